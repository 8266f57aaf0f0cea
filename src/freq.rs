use crate::error::Result;
use crate::matrix::GenotypeMatrix;
use ahash::AHashMap;
use itertools::Itertools;
use std::io::Write;

/// canonical category order: hom-ref, het, hom-alt, missing
pub const CANONICAL_GENOTYPES: [&str; 4] = ["0/0", "0/1", "1/1", "./."];

/// Variant x genotype-category table.
///
/// One row per matrix column, in matrix column order. Categories are the
/// canonical vocabulary (always present, zero-filled when unobserved)
/// followed by any other call string seen anywhere in the matrix, first seen
/// first. Values are per-variant frequencies in [0, 1], or raw per-category
/// counts when built with [`FrequencyTable::counts_from_matrix`].
pub struct FrequencyTable {
    variants: Vec<String>,
    genotypes: Vec<String>,
    // row-major: variants x genotypes
    values: Vec<f64>,
}

impl FrequencyTable {
    /// per-variant category counts divided by the variant's total call count
    pub fn from_matrix(gm: &GenotypeMatrix) -> Self {
        Self::build(gm, true)
    }

    /// count mode: raw category counts; each row sums to the sample count
    pub fn counts_from_matrix(gm: &GenotypeMatrix) -> Self {
        Self::build(gm, false)
    }

    fn build(gm: &GenotypeMatrix, normalize: bool) -> Self {
        let observed = (0..gm.ncols()).flat_map(|j| (0..gm.nrows()).map(move |i| gm.get(i, j)));
        let genotypes: Vec<String> = CANONICAL_GENOTYPES
            .iter()
            .copied()
            .chain(observed)
            .unique()
            .map(String::from)
            .collect();
        let gidx: AHashMap<&str, usize> = genotypes
            .iter()
            .enumerate()
            .map(|(k, g)| (g.as_str(), k))
            .collect();

        let ncat = genotypes.len();
        let mut values = vec![0.0f64; gm.ncols() * ncat];
        for j in 0..gm.ncols() {
            let row = &mut values[j * ncat..(j + 1) * ncat];
            for i in 0..gm.nrows() {
                row[gidx[gm.get(i, j)]] += 1.0;
            }
            // a variant with no contributing samples keeps an all-zero row
            // instead of propagating 0/0 division
            if normalize && gm.nrows() > 0 {
                for v in row.iter_mut() {
                    *v /= gm.nrows() as f64;
                }
            }
        }

        Self {
            variants: gm.variants().to_vec(),
            genotypes,
            values,
        }
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn genotypes(&self) -> &[String] {
        &self.genotypes
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.genotypes.len() + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let n = self.genotypes.len();
        &self.values[row * n..(row + 1) * n]
    }

    /// `variant,<genotype...>` header and one row per variant
    pub fn write_csv(&self, wrt: impl Write) -> Result<()> {
        let mut w = csv::Writer::from_writer(wrt);
        let mut header = vec!["variant".to_string()];
        header.extend(self.genotypes.iter().cloned());
        w.write_record(&header)?;
        for (i, vid) in self.variants.iter().enumerate() {
            let mut rec = vec![vid.clone()];
            rec.extend(self.row(i).iter().map(|v| v.to_string()));
            w.write_record(&rec)?;
        }
        w.flush()?;
        Ok(())
    }
}
