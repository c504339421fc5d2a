//! Utilities for the clock-solution workplace: epoch list reformatting and
//! batch splicing of observation files with teqc.

pub mod config;
pub mod epochs;
pub mod error;
pub mod lines;
pub mod splice;

pub use error::{Error, Result};
