use ahash::AHashMap;

/// Ordered sample registry: insertion order plus name -> row index lookup.
#[derive(Debug, Clone, Default)]
pub struct Individuals {
    vec: Vec<String>,
    map: AHashMap<String, usize>,
}

impl Individuals {
    pub fn from_str_iter<'a>(it: impl Iterator<Item = &'a str>) -> Self {
        let mut v = Vec::<String>::new();
        let mut m = AHashMap::<String, usize>::new();
        for e in it {
            m.insert(e.to_owned(), v.len());
            v.push(e.to_owned());
        }
        Self { vec: v, map: m }
    }

    pub fn v(&self) -> &Vec<String> {
        &self.vec
    }

    pub fn m(&self) -> &AHashMap<String, usize> {
        &self.map
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_order_and_lookup() {
        let inds = Individuals::from_str_iter(["s2", "s0", "s1"].into_iter());
        assert_eq!(inds.v(), &["s2", "s0", "s1"]);
        assert_eq!(inds.m()["s0"], 1);
        assert_eq!(inds.len(), 3);
    }
}
