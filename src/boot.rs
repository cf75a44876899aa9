//! Boot checks
//!
//! An ordered list of named checks run one after another before the first
//! prompt, each reported as `OK` or `FAILED`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{info, warn};

use crate::fs::Node;
use crate::session::Session;

pub type CheckFuture = Pin<Box<dyn Future<Output = bool> + Send>>;
pub type CheckFn = Arc<dyn Fn() -> CheckFuture + Send + Sync>;

#[derive(Clone)]
pub struct BootCheck {
    pub name: String,
    pub description: String,
    pub check: CheckFn,
}

impl BootCheck {
    pub fn new<F, Fut>(name: impl Into<String>, description: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            check: Arc::new(move || Box::pin(check()) as CheckFuture),
        }
    }

    /// A check whose outcome is already known.
    pub fn ready(name: impl Into<String>, description: impl Into<String>, ok: bool) -> Self {
        Self::new(name, description, move || async move { ok })
    }
}

impl std::fmt::Debug for BootCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootCheck")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Per-check outcomes, in the order they ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootReport {
    pub results: Vec<(String, bool)>,
}

impl BootReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|(_, ok)| *ok)
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|(_, ok)| !ok).count()
    }
}

/// Run `checks` sequentially, printing one line per check and an overall
/// outcome line.
pub async fn run_boot_checks(checks: &[BootCheck], session: &mut Session) -> BootReport {
    let mut report = BootReport::default();
    session.out.text("Booting...");
    for check in checks {
        let ok = (check.check)().await;
        if ok {
            session.out.text(format!("{}: OK", check.name));
        } else {
            warn!(check = %check.name, "boot check failed");
            session.out.error(format!("{}: FAILED", check.name));
        }
        report.results.push((check.name.clone(), ok));
    }
    if report.passed() {
        session.out.text("Booting complete.");
    } else {
        session.out.error(format!("Boot finished with {} failed check(s).", report.failures()));
    }
    info!(checks = checks.len(), passed = report.passed(), "boot finished");
    report
}

/// Checks over the state of a freshly constructed session.
pub fn default_checks(session: &Session) -> Vec<BootCheck> {
    let vfs = &session.vfs;
    let home_ok = vfs.resolve(vfs.home()).is_some_and(Node::is_directory);
    let addons = session.addons.list().len();
    vec![
        BootCheck::ready("File System Check", "Verifies the home directory is reachable.", home_ok),
        BootCheck::ready("Snapshot Check", "Serializes the file system tree.", vfs.to_json().is_ok()),
        BootCheck::ready("Addon Verification", "Checks that addons are registered.", addons > 0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellConfig;
    use crate::fs::Vfs;
    use crate::output::{MemorySink, Output, OutputLine};

    fn session() -> (Session, MemorySink) {
        let sink = MemorySink::new();
        let s = Session::new(Vfs::new(), Output::new(Box::new(sink.clone())), ShellConfig::default());
        (s, sink)
    }

    #[tokio::test]
    async fn test_all_pass() {
        let (mut s, sink) = session();
        let checks = default_checks(&s);
        let report = run_boot_checks(&checks, &mut s).await;
        assert!(report.passed());
        assert_eq!(report.results.len(), 3);
        let texts = sink.texts();
        assert_eq!(texts.first().map(String::as_str), Some("Booting..."));
        assert_eq!(texts.last().map(String::as_str), Some("Booting complete."));
    }

    #[tokio::test]
    async fn test_failure_reported_in_order() {
        let (mut s, sink) = session();
        let checks = vec![
            BootCheck::new("Memory Check", "", || async { true }),
            BootCheck::new("Network Connection", "", || async {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                false
            }),
            BootCheck::ready("VOS Integrity Check", "", true),
        ];
        let report = run_boot_checks(&checks, &mut s).await;
        assert!(!report.passed());
        assert_eq!(report.failures(), 1);
        assert_eq!(
            report.results,
            vec![
                ("Memory Check".to_string(), true),
                ("Network Connection".to_string(), false),
                ("VOS Integrity Check".to_string(), true),
            ]
        );
        assert!(sink.lines().contains(&OutputLine::Error("Network Connection: FAILED".into())));
        assert_eq!(
            sink.texts().last().map(String::as_str),
            Some("Boot finished with 1 failed check(s).")
        );
    }

    #[tokio::test]
    async fn test_missing_home_fails() {
        let sink = MemorySink::new();
        let s = Session::new(Vfs::empty("/home/user"), Output::new(Box::new(sink)), ShellConfig::default());
        let checks = default_checks(&s);
        assert!(!(checks[0].check)().await);
    }
}
