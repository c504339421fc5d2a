//! Run configuration (config.json) for both subcommands.
//!
//! JSON shape (every section and field is optional):
//! {
//!   "epochs": {
//!     "source": "sourcesData.txt",
//!     "destination": "sourcesMat.txt",
//!     "header_marker": "GPS"
//!   },
//!   "splice": {
//!     "clk_dir": "/data/clk",
//!     "window": { "start": "20111001001000", "end": "20111001002000" },
//!     "tool": "teqc",
//!     "jobs": 1,
//!     "on_tool_failure": "warn"
//!   }
//! }
//!
//! Unset splice paths resolve under `clk_dir`.

use crate::error::{Error, Result};
use crate::splice::{FailurePolicy, TimeWindow};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub epochs: EpochConfig,
    pub splice: SpliceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EpochConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Substring marking a header line.
    pub header_marker: String,
}

impl Default for EpochConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("sourcesData.txt"),
            destination: PathBuf::from("sourcesMat.txt"),
            header_marker: "GPS".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpliceConfig {
    pub clk_dir: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_list: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_list: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub splice_dir: Option<PathBuf>,

    pub window: TimeWindow,

    /// Executable name or path of the splicing tool.
    pub tool: String,

    /// Prepended to the input base name to build the output file name.
    pub output_prefix: String,

    /// Upper bound on concurrent tool invocations. 1 keeps the sequential loop.
    pub jobs: usize,

    pub on_tool_failure: FailurePolicy,

    pub dry_run: bool,
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            clk_dir: PathBuf::from("."),
            input_list: None,
            output_list: None,
            splice_dir: None,
            window: TimeWindow::default(),
            tool: "teqc".to_string(),
            output_prefix: "splice_".to_string(),
            jobs: 1,
            on_tool_failure: FailurePolicy::default(),
            dry_run: false,
        }
    }
}

impl SpliceConfig {
    pub fn input_list_path(&self) -> PathBuf {
        self.resolve(&self.input_list, "clk.rnxlist")
    }

    pub fn output_list_path(&self) -> PathBuf {
        self.resolve(&self.output_list, "splice_clk.rnxlist")
    }

    pub fn splice_dir_path(&self) -> PathBuf {
        self.resolve(&self.splice_dir, "splice_data")
    }

    fn resolve(&self, explicit: &Option<PathBuf>, default_name: &str) -> PathBuf {
        match explicit {
            Some(p) => p.clone(),
            None => self.clk_dir.join(default_name),
        }
    }
}

impl Config {
    /// Read and deserialize a JSON configuration file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let cfg: Config = serde_json::from_str(&text)
            .with_context(|| format!("parse config file {}", path.display()))?;
        Ok(cfg)
    }

    /// Check both sections.
    pub fn validate(&self) -> Result<()> {
        self.epochs.validate()?;
        self.splice.validate()
    }
}

impl EpochConfig {
    pub fn validate(&self) -> Result<()> {
        if self.header_marker.is_empty() {
            return Err(Error::Config("header marker cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl SpliceConfig {
    /// Check every field a splice run depends on before touching any file.
    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;
        if self.jobs == 0 {
            return Err(Error::Config("jobs must be at least 1".to_string()));
        }
        if self.tool.trim().is_empty() {
            return Err(Error::Config("tool name cannot be empty".to_string()));
        }
        if self.output_prefix.is_empty() {
            return Err(Error::Config("output prefix cannot be empty".to_string()));
        }
        Ok(())
    }
}
