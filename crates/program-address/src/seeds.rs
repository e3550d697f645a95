//! Owned, ordered seed lists.

use crate::error::AddressError;

/// Largest single seed accepted by the runtime.
pub const MAX_SEED_LEN: usize = 32;

/// Most seeds accepted by the runtime, bump included.
pub const MAX_SEEDS: usize = 16;

/// An ordered list of seeds. Order and exact bytes are part of the address:
/// `[a, b]` and `[b, a]` derive different addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SeedSet {
    seeds: Vec<Vec<u8>>,
}

impl SeedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a seed, enforcing the per-seed and seed-count limits. One slot
    /// is kept free for the bump.
    pub fn push(&mut self, seed: impl AsRef<[u8]>) -> Result<&mut Self, AddressError> {
        let seed = seed.as_ref();
        if seed.len() > MAX_SEED_LEN {
            return Err(AddressError::MaxSeedLengthExceeded(seed.len()));
        }
        if self.seeds.len() + 1 >= MAX_SEEDS {
            return Err(AddressError::TooManySeeds(self.seeds.len() + 2));
        }
        self.seeds.push(seed.to_vec());
        Ok(self)
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, seed: impl AsRef<[u8]>) -> Result<Self, AddressError> {
        self.push(seed)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Borrowed view suitable for [`find_program_address`](crate::find_program_address).
    pub fn as_slices(&self) -> Vec<&[u8]> {
        self.seeds.iter().map(Vec::as_slice).collect()
    }
}

/// Check a borrowed seed list. `reserve_bump` counts one extra seed for the
/// bump appended by the search.
pub(crate) fn check_seeds(seeds: &[&[u8]], reserve_bump: bool) -> Result<(), AddressError> {
    let count = seeds.len() + usize::from(reserve_bump);
    if count > MAX_SEEDS {
        return Err(AddressError::TooManySeeds(count));
    }
    match seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        Some(seed) => Err(AddressError::MaxSeedLengthExceeded(seed.len())),
        None => Ok(()),
    }
}
