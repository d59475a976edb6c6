//! Explicit random-source handles.
//!
//! Each strategy owns or builds its own handle, so drawing from one never
//! advances another strategy's sequence.

/// SplitMix64 generator with a fully specified output sequence.
///
/// The sequence depends only on the seed, never on the `rand` crate's choice
/// of `StdRng` algorithm, so seeded picks reproduce across builds and runs.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a generator whose whole output sequence is fixed by `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64_internal().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn same_seed_yields_same_sequence() {
        let mut left = DeterministicRng::new(42);
        let mut right = DeterministicRng::new(42);
        for _ in 0..16 {
            assert_eq!(left.next_u64(), right.next_u64());
        }
    }

    #[test]
    fn first_output_matches_splitmix64_reference() {
        // Reference value for SplitMix64 seeded with 0.
        let mut rng = DeterministicRng::new(0);
        assert_eq!(rng.next_u64(), 0xE220A8397B1DCDAF);
    }

    #[test]
    fn fill_bytes_handles_partial_words() {
        let mut rng = DeterministicRng::new(7);
        let mut reference = DeterministicRng::new(7);
        let mut buf = [0_u8; 11];
        rng.fill_bytes(&mut buf);
        let first = reference.next_u64().to_le_bytes();
        let second = reference.next_u64().to_le_bytes();
        assert_eq!(&buf[..8], &first);
        assert_eq!(&buf[8..], &second[..3]);
    }
}
