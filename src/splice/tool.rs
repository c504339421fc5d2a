use crate::error::{Error, Result};
use crate::splice::job::SpliceJob;
use crate::splice::window::TimeWindow;

use std::fmt;
use std::fs::File;
use std::process::{Command, Stdio};

/// A fully resolved tool call for one job.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub tool: &'a str,
    pub window: &'a TimeWindow,
    pub job: &'a SpliceJob,
}

impl<'a> Invocation<'a> {
    pub fn new(tool: &'a str, window: &'a TimeWindow, job: &'a SpliceJob) -> Self {
        Self { tool, window, job }
    }
}

/// Shell-like rendering: `teqc -st <start> -e <end> <input> > <output>`.
impl fmt::Display for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} > {}",
            self.tool,
            self.window,
            self.job.input.display(),
            self.job.output.display()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Succeeded,
    /// `code` is `None` when the process was killed by a signal.
    Failed { code: Option<i32> },
    NotLaunched { reason: String },
    /// Dry run, nothing executed.
    Skipped,
}

impl ToolOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::NotLaunched { .. })
    }
}

impl fmt::Display for ToolOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed { code: Some(code) } => write!(f, "exited with status {}", code),
            Self::Failed { code: None } => write!(f, "terminated by signal"),
            Self::NotLaunched { reason } => write!(f, "could not be launched: {}", reason),
            Self::Skipped => write!(f, "skipped (dry run)"),
        }
    }
}

/// Executes one invocation, blocking until it completes.
///
/// Tool failures are reported through `ToolOutcome`; `Err` is reserved for
/// problems on our side, such as an output file that cannot be created.
pub trait ToolRunner: Sync {
    fn run(&self, invocation: &Invocation<'_>) -> Result<ToolOutcome>;
}

/// Spawns the tool directly, with stdout redirected into the job output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation<'_>) -> Result<ToolOutcome> {
        let job = invocation.job;
        // Created before spawning, like a shell redirect, so a missing tool
        // still leaves an empty output file behind.
        let output = File::create(&job.output).map_err(|e| Error::file_access(&job.output, e))?;

        let status = Command::new(invocation.tool)
            .args(invocation.window.args())
            .arg(&job.input)
            .stdin(Stdio::null())
            .stdout(Stdio::from(output))
            .status();

        Ok(match status {
            Ok(s) if s.success() => ToolOutcome::Succeeded,
            Ok(s) => ToolOutcome::Failed { code: s.code() },
            Err(e) => ToolOutcome::NotLaunched {
                reason: e.to_string(),
            },
        })
    }
}

/// Touches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunner;

impl ToolRunner for DryRunner {
    fn run(&self, _invocation: &Invocation<'_>) -> Result<ToolOutcome> {
        Ok(ToolOutcome::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    fn job_in(dir: &Path) -> SpliceJob {
        SpliceJob {
            line: 1,
            input: PathBuf::from("/data/obs1.11o"),
            output: dir.join("splice_obs1.11o"),
        }
    }

    #[test]
    fn renders_like_the_shell_command() {
        let window = TimeWindow::default();
        let job = SpliceJob {
            line: 1,
            input: PathBuf::from("/data/obs1.11o"),
            output: PathBuf::from("/clk/splice_data/splice_obs1.11o"),
        };
        assert_eq!(
            Invocation::new("teqc", &window, &job).to_string(),
            "teqc -st 20111001001000 -e 20111001002000 /data/obs1.11o > /clk/splice_data/splice_obs1.11o"
        );
    }

    #[cfg(unix)]
    #[test]
    fn process_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let window = TimeWindow::default();
        let job = job_in(dir.path());

        let ok = ProcessRunner.run(&Invocation::new("true", &window, &job)).unwrap();
        assert_eq!(ok, ToolOutcome::Succeeded);
        assert!(job.output.exists());

        let failed = ProcessRunner.run(&Invocation::new("false", &window, &job)).unwrap();
        assert_eq!(failed, ToolOutcome::Failed { code: Some(1) });

        let missing = ProcessRunner
            .run(&Invocation::new("no-such-splice-tool-xyz", &window, &job))
            .unwrap();
        assert!(matches!(missing, ToolOutcome::NotLaunched { .. }));
        assert!(missing.is_failure());
    }

    #[test]
    fn unwritable_output_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let window = TimeWindow::default();
        let job = job_in(&dir.path().join("missing_subdir"));

        let err = ProcessRunner
            .run(&Invocation::new("true", &window, &job))
            .unwrap_err();
        assert!(matches!(err, Error::FileAccess { .. }));
    }

    #[test]
    fn dry_run_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let window = TimeWindow::default();
        let job = job_in(dir.path());

        let outcome = DryRunner.run(&Invocation::new("teqc", &window, &job)).unwrap();
        assert_eq!(outcome, ToolOutcome::Skipped);
        assert!(!job.output.exists());
    }
}
