use clap::{Args, Parser, Subcommand};
use env_logger::{Builder, Env, Target};
use std::path::PathBuf;

use clk_tools::config::{Config, EpochConfig, SpliceConfig};
use clk_tools::epochs;
use clk_tools::splice::{self, FailurePolicy};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "clk-tools")]
#[command(about = "Epoch list reformatting and batch teqc splicing", long_about = None)]
struct Cli {
    /// JSON configuration file. Flags given on the command line take precedence.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reformat an epoch/source list into one row per GPS header.
    Epochs(EpochArgs),
    /// Splice every file of a list over a fixed time window.
    Splice(SpliceArgs),
    /// Print the effective configuration as JSON.
    ShowConfig,
}

#[derive(Args)]
struct EpochArgs {
    #[arg(long)]
    source: Option<PathBuf>,

    #[arg(long)]
    destination: Option<PathBuf>,

    /// Substring identifying header lines.
    #[arg(long)]
    marker: Option<String>,
}

#[derive(Args)]
struct SpliceArgs {
    /// Base directory for the default list and output locations.
    #[arg(long)]
    clk_dir: Option<PathBuf>,

    #[arg(long)]
    input_list: Option<PathBuf>,

    #[arg(long)]
    output_list: Option<PathBuf>,

    #[arg(long)]
    splice_dir: Option<PathBuf>,

    /// Window start, yyyymmddhhmmss.
    #[arg(long)]
    start: Option<String>,

    /// Window end, yyyymmddhhmmss.
    #[arg(long)]
    end: Option<String>,

    #[arg(long)]
    tool: Option<String>,

    #[arg(long)]
    prefix: Option<String>,

    /// Maximum number of concurrent tool runs.
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    #[arg(long, value_enum)]
    on_tool_failure: Option<FailurePolicy>,

    /// Print invocations and write the list without running the tool.
    #[arg(long)]
    dry_run: bool,
}

impl EpochArgs {
    fn apply(self, cfg: &mut EpochConfig) {
        if let Some(v) = self.source {
            cfg.source = v;
        }
        if let Some(v) = self.destination {
            cfg.destination = v;
        }
        if let Some(v) = self.marker {
            cfg.header_marker = v;
        }
    }
}

impl SpliceArgs {
    fn apply(self, cfg: &mut SpliceConfig) {
        if let Some(v) = self.clk_dir {
            cfg.clk_dir = v;
        }
        if self.input_list.is_some() {
            cfg.input_list = self.input_list;
        }
        if self.output_list.is_some() {
            cfg.output_list = self.output_list;
        }
        if self.splice_dir.is_some() {
            cfg.splice_dir = self.splice_dir;
        }
        if let Some(v) = self.start {
            cfg.window.start = v;
        }
        if let Some(v) = self.end {
            cfg.window.end = v;
        }
        if let Some(v) = self.tool {
            cfg.tool = v;
        }
        if let Some(v) = self.prefix {
            cfg.output_prefix = v;
        }
        if let Some(v) = self.jobs {
            cfg.jobs = v;
        }
        if let Some(v) = self.on_tool_failure {
            cfg.on_tool_failure = v;
        }
        cfg.dry_run |= self.dry_run;
    }
}

fn main() -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.cmd {
        Commands::Epochs(args) => {
            args.apply(&mut cfg.epochs);
            cfg.epochs.validate()?;
            epochs::reformat_file(&cfg.epochs)?;
            println!("Wrote {}", cfg.epochs.destination.display());
        }
        Commands::Splice(args) => {
            args.apply(&mut cfg.splice);
            cfg.splice.validate()?;
            let report = splice::run_splice(&cfg.splice)?;
            println!(
                "Wrote {} ({} entries)",
                cfg.splice.output_list_path().display(),
                report.jobs.len()
            );
        }
        Commands::ShowConfig => {
            cfg.validate()?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
    }

    Ok(())
}
