/// One classified line of the epoch source file, as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLine<'a> {
    /// Starts a new output row. Holds the full line text.
    Header(&'a [u8]),
    /// Field index 1 of a single-space split.
    Data { value: &'a [u8] },
    Blank,
}

impl<'a> SourceLine<'a> {
    /// Classify a line (without its terminator).
    ///
    /// Returns `None` for a data line with fewer than two fields.
    /// Fields are split on single spaces, so `"IDX  5"` yields an empty value.
    pub fn classify(line: &'a [u8], marker: &[u8]) -> Option<Self> {
        if contains(line, marker) {
            return Some(Self::Header(line));
        }
        if line.is_empty() {
            return Some(Self::Blank);
        }
        line.split(|b| *b == b' ')
            .nth(1)
            .map(|value| Self::Data { value })
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}
