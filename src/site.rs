use std::fmt;

/// Variant identity: chromosome label plus 1-based position.
///
/// Doubles as the matrix column key (via [`VariantId::label`]) and as the
/// join key for the intersector. Duplicate chrom+pos pairs within one source
/// are kept as-is, never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantId {
    pub chrom: String,
    pub pos: u64,
}

impl VariantId {
    pub fn new(chrom: impl Into<String>, pos: u64) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
        }
    }

    /// column/row key, e.g. `chr14_23967207`
    pub fn label(&self) -> String {
        format!("{}_{}", self.chrom, self.pos)
    }

    /// Split a `<chrom>_<pos>` token at the first underscore. None if the
    /// chromosome part is empty or the position does not parse as an integer.
    pub fn from_token(token: &str) -> Option<Self> {
        let (chrom, pos) = token.split_once('_')?;
        let pos = pos.parse::<u64>().ok()?;
        if chrom.is_empty() {
            return None;
        }
        Some(Self::new(chrom, pos))
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.chrom, self.pos)
    }
}
