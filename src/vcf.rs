use crate::error::{Error, Result};
use crate::indiv::Individuals;
use crate::matrix::{GenotypeMatrix, MISSING_CALL};
use crate::site::VariantId;
use ahash::AHashSet;
use itertools::Itertools;
use rust_htslib::bcf::record::GenotypeAllele;
use rust_htslib::bcf::{Read, Reader};
use std::path::Path;

fn open_reader(vcf_path: &Path) -> Result<Reader> {
    if !vcf_path.exists() {
        return Err(Error::SourceNotFound {
            path: vcf_path.to_path_buf(),
        });
    }
    Reader::from_path(vcf_path).map_err(|e| Error::MalformedSource {
        path: vcf_path.to_path_buf(),
        msg: e.to_string(),
    })
}

/// Render one genotype call: allele indices joined by the phasing separator,
/// `.` for a null allele within an otherwise present call.
///
/// With `respect_phasing` off the separator is always `/`; with it on, calls
/// the source marks phased are joined with `|` (htslib carries the phasing
/// flag on the alleles after the first).
fn render_call(alleles: &[GenotypeAllele], respect_phasing: bool) -> String {
    if alleles.is_empty() {
        return MISSING_CALL.to_string();
    }
    let phased = respect_phasing
        && alleles.iter().skip(1).any(|a| {
            matches!(
                a,
                GenotypeAllele::Phased(_) | GenotypeAllele::PhasedMissing
            )
        });
    let sep = if phased { "|" } else { "/" };
    alleles
        .iter()
        .map(|a| match a.index() {
            Some(i) => i.to_string(),
            None => ".".to_string(),
        })
        .join(sep)
}

/// Stream a variant-call source once and build the sample x variant
/// genotype-call table.
///
/// Rows are the header samples in header order, restricted to `keep` when
/// given; a `keep` set matching no header sample yields a zero-row matrix,
/// not an error. Reader failures propagate as
/// [`Error::SourceNotFound`]/[`Error::MalformedSource`]; the source handle is
/// scoped to this call and released on every exit path.
pub fn read_genotype_matrix(
    vcf_path: impl AsRef<Path>,
    keep: Option<&AHashSet<String>>,
    respect_phasing: bool,
) -> Result<GenotypeMatrix> {
    let vcf_path = vcf_path.as_ref();
    let mut bcf = open_reader(vcf_path)?;
    let header = bcf.header().clone();
    let malformed = |e: rust_htslib::errors::Error| Error::MalformedSource {
        path: vcf_path.to_path_buf(),
        msg: e.to_string(),
    };

    // sample mask in header order
    let all_samples: Vec<String> = header
        .samples()
        .iter()
        .map(|s| String::from_utf8_lossy(s).into_owned())
        .collect();
    let mask: Vec<bool> = all_samples
        .iter()
        .map(|s| keep.map_or(true, |k| k.contains(s)))
        .collect();
    let individuals = Individuals::from_str_iter(
        all_samples
            .iter()
            .zip(mask.iter())
            .filter(|(_, yes)| **yes)
            .map(|(s, _)| s.as_str()),
    );
    let nsel = individuals.len();

    let mut gm = GenotypeMatrix::new(individuals);
    for record_result in bcf.records() {
        let record = record_result.map_err(&malformed)?;

        let chrom = {
            let rid = record.rid().ok_or_else(|| Error::MalformedSource {
                path: vcf_path.to_path_buf(),
                msg: "record without a chromosome".into(),
            })?;
            let name = header.rid2name(rid).map_err(&malformed)?;
            String::from_utf8_lossy(name).into_owned()
        };
        // htslib positions are 0-based
        let vid = VariantId::new(chrom, record.pos() as u64 + 1);

        let calls: Vec<String> = match record.genotypes() {
            Ok(gts) => (0..all_samples.len())
                .zip(mask.iter())
                .filter(|(_, yes)| **yes)
                .map(|(i, _)| {
                    let alleles: Vec<GenotypeAllele> = gts.get(i).iter().copied().collect();
                    render_call(&alleles, respect_phasing)
                })
                .collect(),
            // no usable GT field: every included sample gets a missing call
            Err(_) => vec![MISSING_CALL.to_string(); nsel],
        };
        gm.push_variant(vid.label(), calls);
    }

    Ok(gm)
}

/// Stream a variant-call source for variant identity only, in source order.
pub fn read_variant_ids(vcf_path: impl AsRef<Path>) -> Result<Vec<VariantId>> {
    let vcf_path = vcf_path.as_ref();
    let mut bcf = open_reader(vcf_path)?;
    let header = bcf.header().clone();
    let malformed = |e: rust_htslib::errors::Error| Error::MalformedSource {
        path: vcf_path.to_path_buf(),
        msg: e.to_string(),
    };

    let mut out = Vec::new();
    let mut last_rid = None;
    let mut chrom = String::new();
    for record_result in bcf.records() {
        let record = record_result.map_err(&malformed)?;
        let rid = record.rid().ok_or_else(|| Error::MalformedSource {
            path: vcf_path.to_path_buf(),
            msg: "record without a chromosome".into(),
        })?;
        if last_rid != Some(rid) {
            chrom = String::from_utf8_lossy(header.rid2name(rid).map_err(&malformed)?).into_owned();
            last_rid = Some(rid);
        }
        out.push(VariantId::new(chrom.clone(), record.pos() as u64 + 1));
    }
    Ok(out)
}
