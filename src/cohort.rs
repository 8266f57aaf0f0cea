use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};

/// default sample-identifier shape; the upstream cohort exports follow this
/// naming scheme, override with `--id-pattern` elsewhere
pub const DEFAULT_ID_PATTERN: &str = r"^C\d+-ExC\d+-xgenV\d+$";

/// delimiters tried on the first non-empty line; ties keep the earlier one
const DELIM_CANDIDATES: [u8; 4] = [b',', b'\t', b';', b' '];

/// One column of sample ids per cohort, named by the source file stem.
///
/// Columns share one length (the largest cohort's id count); shorter cohorts
/// are padded with None, and padding is strictly a suffix.
pub struct CohortTable {
    names: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
}

impl CohortTable {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    pub fn column(&self, k: usize) -> &[Option<String>] {
        &self.columns[k]
    }

    /// ids of one cohort with the padding stripped
    pub fn ids(&self, k: usize) -> Vec<String> {
        self.columns[k].iter().flatten().cloned().collect()
    }
}

/// Read cohort identifier files into a [`CohortTable`].
///
/// The files carry no reliable header and no fixed delimiter, so each one is
/// sniffed and column-classified independently; a file where no column
/// matches `pattern` fails with [`Error::NoIdentifierColumn`].
pub fn read_cohort_ids(paths: &[PathBuf], pattern: &Regex) -> Result<CohortTable> {
    let mut names = Vec::new();
    let mut columns: Vec<Vec<Option<String>>> = Vec::new();
    for path in paths {
        let ids = read_id_column(path, pattern)?;
        names.push(
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        columns.push(ids.into_iter().map(Some).collect());
    }

    // shorter cohorts are padded up to the largest one
    let max_len = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    for c in columns.iter_mut() {
        c.resize(max_len, None);
    }

    Ok(CohortTable { names, columns })
}

/// pick the candidate delimiter occurring most often on the line
pub fn detect_delimiter(line: &str) -> u8 {
    let mut best = b',';
    let mut best_count = 0usize;
    for d in DELIM_CANDIDATES {
        let count = line.bytes().filter(|b| *b == d).count();
        if count > best_count {
            best = d;
            best_count = count;
        }
    }
    best
}

/// does any of the column's text values match the identifier pattern
pub fn column_matches<'a>(values: impl IntoIterator<Item = &'a str>, pattern: &Regex) -> bool {
    values.into_iter().any(|v| pattern.is_match(v))
}

fn read_id_column(path: &Path, pattern: &Regex) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let delim = detect_delimiter(first);
    debug!(
        "cohort {}: delimiter {:?}",
        path.display(),
        char::from(delim)
    );

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delim)
        .from_reader(text.as_bytes());
    let mut rows = Vec::<csv::StringRecord>::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        rows.push(record.clone());
    }

    // first column where at least one value matches the identifier shape
    let ncols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let id_col = (0..ncols)
        .find(|c| column_matches(rows.iter().filter_map(|r| r.get(*c)), pattern))
        .ok_or_else(|| Error::NoIdentifierColumn {
            pattern: pattern.as_str().to_string(),
            path: path.to_path_buf(),
        })?;

    // keep only that column; drop empty cells and re-index densely
    Ok(rows
        .iter()
        .filter_map(|r| r.get(id_col))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("id1 id2"), b' ');
        // single column: no separator at all falls back to comma
        assert_eq!(detect_delimiter("id1"), b',');
        // comma wins a tie
        assert_eq!(detect_delimiter("a,b\tc"), b',');
    }

    #[test]
    fn test_column_matches() {
        let re = Regex::new(DEFAULT_ID_PATTERN).unwrap();
        assert!(column_matches(
            ["junk", "C12-ExC3-xgenV1", ""].into_iter(),
            &re
        ));
        assert!(!column_matches(["junk", "C12-ExC3"].into_iter(), &re));
        // anchored: the id must be the whole cell
        assert!(!column_matches(["xC1-ExC2-xgenV3y"].into_iter(), &re));
    }
}
