use crate::config::EpochConfig;
use crate::epochs::line::SourceLine;
use crate::error::{Error, Result};
use crate::lines::for_each_line;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Counters collected while reformatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReformatStats {
    pub headers: usize,
    pub values: usize,
    /// Values emitted before the first header, with no row to belong to.
    pub orphans: usize,
    pub blanks: usize,
}

/// Streams source lines into the matrix layout.
///
/// Output for each header is `"\n" + header + " "`, followed by `value + " "`
/// for every data line until the next header. Nothing is appended at the end.
pub struct Reformatter<'a> {
    marker: &'a str,
    source: &'a Path,
    destination: &'a Path,
}

impl<'a> Reformatter<'a> {
    /// `source` and `destination` only label error messages.
    pub fn new(marker: &'a str, source: &'a Path, destination: &'a Path) -> Self {
        Self {
            marker,
            source,
            destination,
        }
    }

    pub fn run<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> Result<ReformatStats> {
        let mut stats = ReformatStats::default();
        let marker = self.marker.as_bytes();

        for_each_line(reader, self.source, |lno, line| {
            let classified = SourceLine::classify(line, marker).ok_or_else(|| Error::Parse {
                path: self.source.to_path_buf(),
                line: lno,
                text: String::from_utf8_lossy(line).into_owned(),
            })?;

            match classified {
                SourceLine::Header(text) => {
                    self.emit(writer, &[&b"\n"[..], text, &b" "[..]])?;
                    stats.headers += 1;
                }
                SourceLine::Data { value } => {
                    if stats.headers == 0 {
                        // Kept as-is: values before any header land on the first line.
                        log::warn!(
                            "{}:{}: value {:?} precedes the first header",
                            self.source.display(),
                            lno,
                            String::from_utf8_lossy(value)
                        );
                        stats.orphans += 1;
                    }
                    self.emit(writer, &[value, &b" "[..]])?;
                    stats.values += 1;
                }
                SourceLine::Blank => {
                    log::debug!("{}:{}: skipping blank line", self.source.display(), lno);
                    stats.blanks += 1;
                }
            }
            Ok(())
        })?;

        writer
            .flush()
            .map_err(|e| Error::file_access(self.destination, e))?;
        Ok(stats)
    }

    fn emit<W: Write>(&self, writer: &mut W, parts: &[&[u8]]) -> Result<()> {
        for part in parts {
            writer
                .write_all(part)
                .map_err(|e| Error::file_access(self.destination, e))?;
        }
        Ok(())
    }
}

/// Reformat `cfg.source` into `cfg.destination`.
///
/// The destination is created (or truncated) only after the source opens.
pub fn reformat_file(cfg: &EpochConfig) -> Result<ReformatStats> {
    let source = File::open(&cfg.source).map_err(|e| Error::file_access(&cfg.source, e))?;
    let destination =
        File::create(&cfg.destination).map_err(|e| Error::file_access(&cfg.destination, e))?;

    log::info!(
        "reformatting {} into {}",
        cfg.source.display(),
        cfg.destination.display()
    );

    let mut writer = BufWriter::new(destination);
    let stats = Reformatter::new(&cfg.header_marker, &cfg.source, &cfg.destination)
        .run(BufReader::new(source), &mut writer)?;

    log::info!(
        "{} headers, {} values ({} orphaned, {} blank lines skipped)",
        stats.headers,
        stats.values,
        stats.orphans,
        stats.blanks
    );
    Ok(stats)
}
