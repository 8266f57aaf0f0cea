use crate::site::VariantId;
use ahash::AHashSet;

/// Inner join of two variant sets on exact (chrom, pos) equality.
///
/// Output keeps the observed (left) order, and duplicates in the observed
/// list survive the join.
pub fn intersect_variants(observed: &[VariantId], selected: &[VariantId]) -> Vec<VariantId> {
    let sel: AHashSet<&VariantId> = selected.iter().collect();
    observed
        .iter()
        .filter(|v| sel.contains(*v))
        .cloned()
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_left_order_and_duplicates_preserved() {
        let observed = vec![
            VariantId::new("chr2", 555),
            VariantId::new("chr14", 23967207),
            VariantId::new("chr2", 555),
            VariantId::new("chr3", 1),
        ];
        let selected = vec![VariantId::new("chr14", 23967207), VariantId::new("chr2", 555)];
        let got = intersect_variants(&observed, &selected);
        assert_eq!(
            got,
            vec![
                VariantId::new("chr2", 555),
                VariantId::new("chr14", 23967207),
                VariantId::new("chr2", 555),
            ]
        );
    }

    #[test]
    fn test_chrom_label_must_match_exactly() {
        let observed = vec![VariantId::new("chr2", 555)];
        let selected = vec![VariantId::new("2", 555)];
        assert!(intersect_variants(&observed, &selected).is_empty());
    }

    #[test]
    fn test_empty_selected_set() {
        let observed = vec![VariantId::new("chr2", 555)];
        assert!(intersect_variants(&observed, &[]).is_empty());
    }
}
