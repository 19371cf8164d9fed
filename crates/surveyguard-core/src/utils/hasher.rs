use std::hash::BuildHasher;

use xxhash_rust::xxh3::Xxh3;

/// `BuildHasher` backed by xxh3, used for the uniqueness maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh3Builder;

impl BuildHasher for Xxh3Builder {
    type Hasher = Xxh3;

    fn build_hasher(&self) -> Self::Hasher {
        Xxh3::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_same_input_same_hash() {
        let builder = Xxh3Builder;
        assert_eq!(builder.hash_one("A1"), builder.hash_one("A1"));
        assert_ne!(builder.hash_one("A1"), builder.hash_one("A2"));
    }

    #[test]
    fn test_map_with_xxh3() {
        let mut map: HashMap<&str, usize, Xxh3Builder> = HashMap::with_hasher(Xxh3Builder);
        map.insert("a", 0);
        map.insert("b", 1);
        assert_eq!(map.get("b"), Some(&1));
    }
}
