//! Rock, paper, scissors. The score is kept across activations.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Addon, AddonContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

const CHOICES: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

impl Choice {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rock" => Some(Choice::Rock),
            "paper" => Some(Choice::Paper),
            "scissors" => Some(Choice::Scissors),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    fn beats(&self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors) | (Choice::Paper, Choice::Rock) | (Choice::Scissors, Choice::Paper)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

pub fn judge(player: Choice, computer: Choice) -> Outcome {
    if player == computer {
        Outcome::Tie
    } else if player.beats(computer) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

pub struct RpsAddon {
    rng: StdRng,
    player: u32,
    computer: u32,
    ties: u32,
}

impl RpsAddon {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic opponent.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { rng, player: 0, computer: 0, ties: 0 }
    }

    /// `(player, computer, ties)`
    pub fn score(&self) -> (u32, u32, u32) {
        (self.player, self.computer, self.ties)
    }

    fn play(&mut self, ctx: &mut AddonContext<'_>, choice: Option<&str>) {
        let Some(player) = choice.and_then(Choice::parse) else {
            ctx.out.text("Invalid choice. Please choose rock, paper, or scissors.");
            return;
        };
        let computer = *CHOICES.choose(&mut self.rng).unwrap_or(&Choice::Rock);
        ctx.out.text(format!("You chose {}, computer chose {}.", player.as_str(), computer.as_str()));
        match judge(player, computer) {
            Outcome::Tie => {
                self.ties += 1;
                ctx.out.text("It's a tie!");
            }
            Outcome::Win => {
                self.player += 1;
                ctx.out.text("You win!");
            }
            Outcome::Lose => {
                self.computer += 1;
                ctx.out.text("You lose.");
            }
        }
    }
}

impl Default for RpsAddon {
    fn default() -> Self {
        Self::new()
    }
}

const HELP: &str = "Available commands:
  play [rock|paper|scissors] - Play a round of Rock, Paper, Scissors.
  score - Show the current score.
  help - Show this help message.
  exit - Exit the addon and return to the main terminal.";

impl Addon for RpsAddon {
    fn name(&self) -> &'static str {
        "rps"
    }

    fn description(&self) -> &'static str {
        "Rock, Paper, Scissors"
    }

    fn start(&mut self, ctx: &mut AddonContext<'_>, _args: &[String]) {
        ctx.out.text(
            "Rock, Paper, Scissors addon started. Type 'play rock', 'play paper', or 'play scissors' to play. \
             Type 'help' for more commands.",
        );
    }

    fn handle_input(&mut self, ctx: &mut AddonContext<'_>, line: &str) {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("play") => self.play(ctx, words.next()),
            Some("score") => {
                ctx.out.text(format!("Player: {}, Computer: {}, Ties: {}", self.player, self.computer, self.ties))
            }
            Some("help") => ctx.out.text(HELP),
            Some("exit") | Some("quit") => ctx.request_exit(),
            Some(other) => ctx.out.text(format!("Unknown command: {}. Type 'help' for a list of commands.", other)),
            None => {}
        }
    }
}
