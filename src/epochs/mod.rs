//! Epoch list reformatting: flatten `sourcesData.txt` into one row per header.

pub mod line;
pub mod matrix;
pub mod reformat;

pub use line::SourceLine;
pub use matrix::{MatrixRow, read_matrix};
pub use reformat::{ReformatStats, Reformatter, reformat_file};
