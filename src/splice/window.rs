use crate::error::{Error, Result};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time span handed to the tool as `-st <start> -e <end>`.
///
/// Both bounds are `yyyymmddhhmmss`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: "20111001001000".to_string(),
            end: "20111001002000".to_string(),
        }
    }
}

impl TimeWindow {
    pub fn args(&self) -> [&str; 4] {
        ["-st", self.start.as_str(), "-e", self.end.as_str()]
    }

    pub fn validate(&self) -> Result<()> {
        const TIMESTAMP_RE: &str = r"^\d{14}$";
        let re = Regex::new(TIMESTAMP_RE).map_err(|e| Error::Config(e.to_string()))?;

        for (name, value) in [("start", &self.start), ("end", &self.end)] {
            if !re.is_match(value) {
                return Err(Error::Config(format!(
                    "{} time {:?} is not yyyymmddhhmmss",
                    name, value
                )));
            }
        }
        // Fixed width digits, so lexical order is chronological order.
        if self.start > self.end {
            return Err(Error::Config(format!(
                "start time {} is after end time {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-st {} -e {}", self.start, self.end)
    }
}
