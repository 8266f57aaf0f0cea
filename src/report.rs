use crate::error::{Error, Result};
use crate::site::VariantId;
use regex::Regex;
use std::path::Path;

pub const N_FEATURES_COLUMN: &str = "n_features";
pub const SELECTED_FEATURES_COLUMN: &str = "selected_features";

/// Extract `chr<label>_<digits>` tokens from a list-like report cell such as
/// `"['chr14_23967207', 'chr2_555']"`.
///
/// The cell is semi-structured free text: tokens are separated by arbitrary
/// punctuation (quotes, commas, brackets), and anything that does not match
/// the token shape, or whose position overflows, is skipped silently.
pub fn parse_feature_tokens(cell: &str) -> Vec<VariantId> {
    let token_re = Regex::new(r"chr[0-9A-Za-z]+_[0-9]+").unwrap();
    token_re
        .find_iter(cell)
        .filter_map(|m| VariantId::from_token(m.as_str()))
        .collect()
}

/// Variant set selected by a feature-selection report.
///
/// Loads the report, finds the first row whose `n_features` column equals
/// `n_features` after numeric coercion, and parses its `selected_features`
/// cell. No matching row is an empty set, not an error; a report lacking
/// either column fails with [`Error::MissingColumn`].
pub fn selected_variants(path: impl AsRef<Path>, n_features: u64) -> Result<Vec<VariantId>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn { name: name.into() })
    };
    let n_col = column(N_FEATURES_COLUMN)?;
    let sel_col = column(SELECTED_FEATURES_COLUMN)?;

    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        // numeric coercion: integer-valued text such as "20.0" still matches
        let n = record.get(n_col).and_then(|v| v.trim().parse::<f64>().ok());
        if n == Some(n_features as f64) {
            let cell = record.get(sel_col).unwrap_or("");
            return Ok(parse_feature_tokens(cell));
        }
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_feature_tokens_list_cell() {
        let got = parse_feature_tokens("['chr14_23967207', 'chr2_555']");
        assert_eq!(
            got,
            vec![
                VariantId::new("chr14", 23967207),
                VariantId::new("chr2", 555)
            ]
        );
    }

    #[test]
    fn test_parse_feature_tokens_malformed_inputs() {
        // trailing commas, mixed brackets, double quotes
        let got = parse_feature_tokens("[\"chrX_77\", 'chr1_1',,]]");
        assert_eq!(
            got,
            vec![VariantId::new("chrX", 77), VariantId::new("chr1", 1)]
        );
        // tokens missing position digits or the chr prefix are skipped
        assert!(parse_feature_tokens("['chr14_', '14_23']").is_empty());
        assert!(parse_feature_tokens("").is_empty());
    }

    #[test]
    fn test_parse_feature_tokens_overflowing_position_skipped() {
        let got = parse_feature_tokens("['chr1_99999999999999999999999999', 'chr1_5']");
        assert_eq!(got, vec![VariantId::new("chr1", 5)]);
    }
}
