/// One row of a reformatted matrix file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    /// `None` for values that were written before the first header.
    pub header: Option<String>,
    pub values: Vec<String>,
}

/// Split reformatted output back into rows.
///
/// The header is taken to be the first space-separated token, so this only
/// recovers values exactly when headers contain no spaces.
pub fn read_matrix(text: &str) -> Vec<MatrixRow> {
    let mut rows = Vec::new();

    for (idx, segment) in text.split('\n').enumerate() {
        let segment = segment.strip_suffix(' ').unwrap_or(segment);
        if idx == 0 {
            if !segment.is_empty() {
                rows.push(MatrixRow {
                    header: None,
                    values: segment.split(' ').map(str::to_string).collect(),
                });
            }
            continue;
        }

        let mut tokens = segment.split(' ');
        let header = tokens.next().map(str::to_string);
        rows.push(MatrixRow {
            header,
            values: tokens.map(str::to_string).collect(),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_with_orphans() {
        let rows = read_matrix("3 \nGPS001 4 5 \nGPS002 ");
        assert_eq!(
            rows,
            vec![
                MatrixRow {
                    header: None,
                    values: vec!["3".to_string()],
                },
                MatrixRow {
                    header: Some("GPS001".to_string()),
                    values: vec!["4".to_string(), "5".to_string()],
                },
                MatrixRow {
                    header: Some("GPS002".to_string()),
                    values: vec![],
                },
            ]
        );
    }

    #[test]
    fn empty_text_has_no_rows() {
        assert!(read_matrix("").is_empty());
    }
}
