use crate::config::SpliceConfig;
use crate::error::{Error, Result};
use crate::lines::write_path_line;
use crate::splice::FailurePolicy;
use crate::splice::job::{SpliceJob, read_jobs};
use crate::splice::tool::{DryRunner, Invocation, ProcessRunner, ToolOutcome, ToolRunner};

use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: ToolOutcome,
}

/// Per-entry results, in input list order.
#[derive(Debug, Clone, Default)]
pub struct SpliceReport {
    pub jobs: Vec<JobReport>,
}

impl SpliceReport {
    pub fn failures(&self) -> usize {
        self.jobs.iter().filter(|j| j.outcome.is_failure()).count()
    }
}

/// Run the batch with the real tool, or with `DryRunner` when `dry_run` is set.
pub fn run_splice(cfg: &SpliceConfig) -> Result<SpliceReport> {
    if cfg.dry_run {
        run_splice_with(cfg, &DryRunner)
    } else {
        run_splice_with(cfg, &ProcessRunner)
    }
}

/// Splice every entry of the input list and write the output list.
///
/// The output list receives one path per entry, in input order. A failed tool
/// run still records its path unless the policy is `Abort`, in which case the
/// list stops right before the failing entry.
pub fn run_splice_with<T: ToolRunner>(cfg: &SpliceConfig, runner: &T) -> Result<SpliceReport> {
    let input_list = cfg.input_list_path();
    let output_list = cfg.output_list_path();
    let splice_dir = cfg.splice_dir_path();

    let reader = File::open(&input_list).map_err(|e| Error::file_access(&input_list, e))?;
    let writer = File::create(&output_list).map_err(|e| Error::file_access(&output_list, e))?;
    let mut writer = BufWriter::new(writer);

    let jobs = read_jobs(
        BufReader::new(reader),
        &input_list,
        &splice_dir,
        &cfg.output_prefix,
    )?;
    log::info!(
        "{} entries from {}, splicing into {}",
        jobs.len(),
        input_list.display(),
        splice_dir.display()
    );

    let mut report = SpliceReport::default();
    if cfg.jobs <= 1 {
        for job in &jobs {
            let outcome = execute(cfg, runner, job)?;
            record(cfg, job, outcome, &mut writer, &output_list, &mut report)?;
        }
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(cfg.jobs)
            .build()?;

        // Set on the first failure under `Abort`; later jobs are not launched.
        let stop = AtomicBool::new(false);
        // collect() keeps job order regardless of completion order.
        let outcomes: Vec<Result<Option<ToolOutcome>>> = pool.install(|| {
            jobs.par_iter()
                .map(|job| {
                    if stop.load(Ordering::Acquire) {
                        return Ok(None);
                    }
                    let outcome = execute(cfg, runner, job)?;
                    if outcome.is_failure() && cfg.on_tool_failure == FailurePolicy::Abort {
                        stop.store(true, Ordering::Release);
                    }
                    Ok(Some(outcome))
                })
                .collect()
        });

        // The list stops at the first entry that failed or never ran. A job
        // skipped after the stop implies a failure further down the list.
        let mut halted = false;
        for (job, outcome) in jobs.iter().zip(outcomes) {
            match outcome? {
                Some(outcome) if !halted => {
                    record(cfg, job, outcome, &mut writer, &output_list, &mut report)?
                }
                Some(outcome) if outcome.is_failure() => {
                    writer
                        .flush()
                        .map_err(|e| Error::file_access(&output_list, e))?;
                    return Err(tool_error(cfg, job, &outcome));
                }
                Some(_) => {}
                None => halted = true,
            }
        }
    }

    log::info!(
        "{} entries processed, {} tool failures, list written to {}",
        report.jobs.len(),
        report.failures(),
        output_list.display()
    );
    Ok(report)
}

fn execute<T: ToolRunner>(cfg: &SpliceConfig, runner: &T, job: &SpliceJob) -> Result<ToolOutcome> {
    let invocation = Invocation::new(&cfg.tool, &cfg.window, job);
    log::debug!("line {}: running {}", job.line, invocation);
    let outcome = runner.run(&invocation)?;
    println!("{}", invocation);
    Ok(outcome)
}

fn tool_error(cfg: &SpliceConfig, job: &SpliceJob, outcome: &ToolOutcome) -> Error {
    Error::ExternalTool {
        tool: cfg.tool.clone(),
        input: job.input.clone(),
        reason: outcome.to_string(),
    }
}

fn record<W: Write>(
    cfg: &SpliceConfig,
    job: &SpliceJob,
    outcome: ToolOutcome,
    writer: &mut W,
    output_list: &Path,
    report: &mut SpliceReport,
) -> Result<()> {
    if outcome.is_failure() {
        match cfg.on_tool_failure {
            FailurePolicy::Ignore => {
                log::debug!("{} {} on {}", cfg.tool, outcome, job.input.display());
            }
            FailurePolicy::Warn => {
                log::warn!(
                    "{} {} on {}, {} is recorded anyway",
                    cfg.tool,
                    outcome,
                    job.input.display(),
                    job.output.display()
                );
            }
            FailurePolicy::Abort => {
                writer
                    .flush()
                    .map_err(|e| Error::file_access(output_list, e))?;
                return Err(tool_error(cfg, job, &outcome));
            }
        }
    }

    write_path_line(writer, &job.output)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::file_access(output_list, e))?;

    report.jobs.push(JobReport {
        input: job.input.clone(),
        output: job.output.clone(),
        outcome,
    });
    Ok(())
}
