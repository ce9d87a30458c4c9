//! Request id generation.
//!
//! Ids are opaque tokens, unique within (and across) batches. The generator
//! is injectable so tests can use deterministic ids; the default draws 128
//! random bits per id.

use rand::Rng;

/// Capability for minting request ids.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh id, distinct from every id returned before it.
    fn next_id(&self) -> String;
}

/// Default generator: 128-bit random hex, collision-resistant without
/// coordination or state.
#[derive(Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        format!("{:032x}", rand::thread_rng().gen::<u128>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_32_hex_chars() {
        let id = RandomIdGenerator.next_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_are_distinct() {
        let gen = RandomIdGenerator;
        let ids: HashSet<String> = (0..100).map(|_| gen.next_id()).collect();
        assert_eq!(ids.len(), 100);
    }
}
