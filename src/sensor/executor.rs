use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{NdependError, Result};

/// Runs the NDepend rule runner, which writes the violation report.
pub trait Executor {
    /// Runs `rule_runner` on `project`, producing `report`.
    ///
    /// # Errors
    /// Returns an error if the runner cannot start, fails, or exceeds `timeout`.
    fn execute(
        &self,
        rule_runner: &Path,
        project: &Path,
        report: &Path,
        timeout: Duration,
    ) -> Result<()>;
}

/// Spawns the rule runner as `<rule_runner> <project> <report>` and kills it
/// once `timeout` has elapsed.
#[derive(Debug, Clone, Copy)]
pub struct ProcessExecutor {
    poll_interval: Duration,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
        }
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Executor for ProcessExecutor {
    fn execute(
        &self,
        rule_runner: &Path,
        project: &Path,
        report: &Path,
        timeout: Duration,
    ) -> Result<()> {
        tracing::info!(
            "Executing {} on {} (timeout {}s)",
            rule_runner.display(),
            project.display(),
            timeout.as_secs()
        );

        let execution_error = |reason: String| NdependError::Execution {
            program: rule_runner.to_path_buf(),
            reason,
        };

        let mut child = Command::new(rule_runner)
            .arg(project)
            .arg(report)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| execution_error(e.to_string()))?;

        match supervise(&mut child, timeout, self.poll_interval)? {
            Outcome::Exited(status) if status.success() => {
                tracing::debug!("{} finished", rule_runner.display());
                Ok(())
            }
            Outcome::Exited(status) => Err(execution_error(format!("exited with {status}"))),
            Outcome::TimedOut => {
                tracing::warn!(
                    "{} exceeded its timeout and was killed",
                    rule_runner.display()
                );
                Err(NdependError::Timeout {
                    program: rule_runner.to_path_buf(),
                    seconds: timeout.as_secs(),
                })
            }
        }
    }
}

/// A started process the poll loop watches.
trait Supervised {
    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>>;

    /// Kills and reaps the process. It may already have exited.
    fn terminate(&mut self);
}

impl Supervised for Child {
    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        Self::try_wait(self)
    }

    fn terminate(&mut self) {
        let _ = self.kill();
        let _ = self.wait();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Exited(ExitStatus),
    TimedOut,
}

/// Polls `process` until it exits or `timeout` elapses. The process is
/// terminated before returning on timeout or on a polling error.
fn supervise(
    process: &mut impl Supervised,
    timeout: Duration,
    poll_interval: Duration,
) -> io::Result<Outcome> {
    let deadline = Instant::now() + timeout;
    loop {
        match process.try_wait() {
            Ok(Some(status)) => return Ok(Outcome::Exited(status)),
            Ok(None) => {}
            Err(e) => {
                process.terminate();
                return Err(e);
            }
        }

        if Instant::now() >= deadline {
            process.terminate();
            return Ok(Outcome::TimedOut);
        }

        thread::sleep(poll_interval);
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
