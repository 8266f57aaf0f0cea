use crate::error::Result;
use crate::indiv::Individuals;
use log::warn;
use std::io::Write;

/// text of an absent genotype observation
pub const MISSING_CALL: &str = "./.";

/// Sample x variant table of genotype call strings.
///
/// Rows are samples (source header order, optionally filtered), columns are
/// variants in stream order. Every row has exactly one cell per column; an
/// absent observation fills its cell with [`MISSING_CALL`] rather than
/// leaving a hole. Built once by the stream reader and read-only afterwards.
pub struct GenotypeMatrix {
    samples: Individuals,
    variants: Vec<String>,
    // column-major: cells of variant j occupy [j * nrows, (j + 1) * nrows)
    calls: Vec<String>,
}

impl GenotypeMatrix {
    pub fn new(samples: Individuals) -> Self {
        Self {
            samples,
            variants: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn nrows(&self) -> usize {
        self.samples.len()
    }

    pub fn ncols(&self) -> usize {
        self.variants.len()
    }

    pub fn samples(&self) -> &Individuals {
        &self.samples
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn get(&self, row: usize, col: usize) -> &str {
        &self.calls[col * self.nrows() + row]
    }

    /// Append one variant column; `calls` must supply exactly one cell per
    /// row, in row order.
    pub fn push_variant(&mut self, label: String, calls: impl IntoIterator<Item = String>) {
        if self.variants.iter().any(|v| *v == label) {
            warn!("duplicate variant id {label}; keeping both columns");
        }
        let len0 = self.calls.len();
        self.calls.extend(calls);
        assert_eq!(
            self.calls.len() - len0,
            self.nrows(),
            "one call per sample per variant"
        );
        self.variants.push(label);
    }

    /// `sample,<variant...>` header and one row per sample
    pub fn write_csv(&self, wrt: impl Write) -> Result<()> {
        let mut w = csv::Writer::from_writer(wrt);
        let mut header = vec!["sample"];
        header.extend(self.variants.iter().map(String::as_str));
        w.write_record(&header)?;
        for (i, s) in self.samples.v().iter().enumerate() {
            let mut rec = vec![s.as_str()];
            rec.extend((0..self.ncols()).map(|j| self.get(i, j)));
            w.write_record(&rec)?;
        }
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn two_sample_matrix() -> GenotypeMatrix {
        let inds = Individuals::from_str_iter(["a", "b"].into_iter());
        let mut gm = GenotypeMatrix::new(inds);
        gm.push_variant(
            "chr1_100".into(),
            ["0/1".to_string(), MISSING_CALL.to_string()],
        );
        gm.push_variant("chr1_200".into(), ["0/0".to_string(), "1/1".to_string()]);
        gm
    }

    #[test]
    fn test_cell_layout() {
        let gm = two_sample_matrix();
        assert_eq!((gm.nrows(), gm.ncols()), (2, 2));
        assert_eq!(gm.get(0, 0), "0/1");
        assert_eq!(gm.get(1, 0), "./.");
        assert_eq!(gm.get(1, 1), "1/1");
    }

    #[test]
    fn test_write_csv() {
        let gm = two_sample_matrix();
        let mut buf = Vec::new();
        gm.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "sample,chr1_100,chr1_200\na,0/1,0/0\nb,./.,1/1\n");
    }

    #[test]
    fn test_zero_row_matrix_keeps_columns() {
        let mut gm = GenotypeMatrix::new(Individuals::default());
        gm.push_variant("chr1_100".into(), Vec::new());
        assert_eq!((gm.nrows(), gm.ncols()), (0, 1));
    }
}
