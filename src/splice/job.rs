use crate::error::{Error, Result};
use crate::lines::{for_each_line, path_from_bytes};

use std::ffi::OsString;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// One list entry and the path its spliced copy is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceJob {
    /// 1-based line in the input list.
    pub line: usize,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl SpliceJob {
    /// Derive `splice_dir/<prefix><file name of entry>`.
    pub fn new(
        line: usize,
        entry: impl Into<PathBuf>,
        splice_dir: &Path,
        prefix: &str,
    ) -> Result<Self> {
        let input = entry.into();
        let file_name = input.file_name().ok_or_else(|| Error::InvalidListEntry {
            line,
            entry: input.display().to_string(),
        })?;

        let mut name = OsString::from(prefix);
        name.push(file_name);

        Ok(Self {
            line,
            output: splice_dir.join(name),
            input,
        })
    }
}

/// Read every non-blank entry of a list file.
pub fn read_jobs<R: BufRead>(
    reader: R,
    list_path: &Path,
    splice_dir: &Path,
    prefix: &str,
) -> Result<Vec<SpliceJob>> {
    let mut jobs = Vec::new();
    for_each_line(reader, list_path, |lno, line| {
        if line.iter().all(u8::is_ascii_whitespace) {
            log::debug!("{}:{}: skipping blank entry", list_path.display(), lno);
            return Ok(());
        }
        jobs.push(SpliceJob::new(lno, path_from_bytes(line), splice_dir, prefix)?);
        Ok(())
    })?;
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_output_under_splice_dir() {
        let job = SpliceJob::new(1, "/data/obs1.11o", Path::new("/clk/splice_data/"), "splice_")
            .unwrap();
        assert_eq!(job.input, PathBuf::from("/data/obs1.11o"));
        assert_eq!(job.output, PathBuf::from("/clk/splice_data/splice_obs1.11o"));
    }

    #[test]
    fn relative_entries() {
        let job = SpliceJob::new(1, "obs/algo2740.11o", Path::new("out"), "cut_").unwrap();
        assert_eq!(job.output, PathBuf::from("out/cut_algo2740.11o"));
    }

    #[test]
    fn entry_without_file_name() {
        let err = SpliceJob::new(4, "..", Path::new("out"), "splice_").unwrap_err();
        assert!(matches!(err, Error::InvalidListEntry { line: 4, .. }));
    }

    #[test]
    fn reads_in_order_and_skips_blanks() {
        let list = "/data/obs1.11o\n\n/data/obs2.11o\r\n";
        let jobs = read_jobs(
            list.as_bytes(),
            Path::new("clk.rnxlist"),
            Path::new("/clk/splice_data"),
            "splice_",
        )
        .unwrap();

        let outputs: Vec<String> = jobs
            .iter()
            .map(|j| j.output.display().to_string())
            .collect();
        assert_eq!(
            outputs,
            vec![
                "/clk/splice_data/splice_obs1.11o".to_string(),
                "/clk/splice_data/splice_obs2.11o".to_string(),
            ]
        );
        assert_eq!(jobs[1].line, 3);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_entry_keeps_its_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let jobs = read_jobs(
            &b"/data/\xe9t\xe9.11o\n"[..],
            Path::new("clk.rnxlist"),
            Path::new("/clk/splice_data"),
            "splice_",
        )
        .unwrap();
        assert_eq!(jobs[0].input.as_os_str().as_bytes(), b"/data/\xe9t\xe9.11o");
        assert_eq!(
            jobs[0].output.as_os_str().as_bytes(),
            b"/clk/splice_data/splice_\xe9t\xe9.11o"
        );
    }
}
