use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use central_terminal::logging::init_tracing;
use central_terminal::{ConsoleSink, ShellConfig, Terminal};

#[derive(Parser)]
#[command(name = "central-terminal")]
#[command(about = "A simulated terminal over an in-memory file system")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Persist the file system to this file
    #[arg(long = "state")]
    state: Option<PathBuf>,

    /// Skip the boot checks
    #[arg(long = "no-boot")]
    no_boot: bool,

    /// Emit logs as JSON
    #[arg(long = "log-json")]
    log_json: bool,

    /// Execute the lines of this script
    #[arg(short = 'c')]
    script: Option<String>,

    /// Script file to execute
    #[arg()]
    script_file: Option<PathBuf>,
}

/// Submit one line, forwarding Ctrl+C to whatever task it wires.
async fn run_line(terminal: &mut Terminal, line: &str) {
    let interrupts = terminal.interrupt_handle();
    let submit = terminal.submit(line);
    tokio::pin!(submit);
    loop {
        tokio::select! {
            _ = &mut submit => return,
            _ = tokio::signal::ctrl_c() => {
                interrupts.fire();
            }
        }
    }
}

async fn run_script(terminal: &mut Terminal, script: &str) {
    for line in script.lines() {
        run_line(terminal, line).await;
    }
}

async fn run_interactive(terminal: &mut Terminal) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", terminal.prompt());
        let _ = std::io::stdout().flush();
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => run_line(terminal, &line).await,
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "failed to read input");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                terminal.interrupt();
            }
        }
    }
    println!();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = match &cli.config {
        Some(path) => match ShellConfig::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => ShellConfig::default(),
    };
    if cli.state.is_some() {
        config.state_file = cli.state.clone();
    }
    if cli.no_boot {
        config.boot_checks = false;
    }

    // Determine script source: -c, file, or piped stdin
    let script = if let Some(s) = cli.script {
        Some(s)
    } else if let Some(ref file) = cli.script_file {
        match std::fs::read_to_string(file) {
            Ok(content) => Some(content),
            Err(e) => {
                eprintln!("Error: Cannot read script file: {}: {}", file.display(), e);
                std::process::exit(1);
            }
        }
    } else if !std::io::stdin().is_terminal() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).unwrap_or_default();
        Some(buf)
    } else {
        None
    };

    match script {
        Some(script) => {
            let mut terminal = Terminal::open(config, Box::new(ConsoleSink::new(true)));
            run_script(&mut terminal, &script).await;
        }
        None => {
            let boot = config.boot_checks;
            let mut terminal = Terminal::open(config, Box::new(ConsoleSink::new(false)));
            if boot {
                terminal.boot().await;
            }
            info!("interactive session started");
            run_interactive(&mut terminal).await;
        }
    }
}
