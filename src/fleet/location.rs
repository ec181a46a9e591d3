//! Regional location set
//!
//! Deliveries travel between two distinct entries of a fixed set of named
//! locations. The set is validated once on construction so route selection
//! can never fail.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::ConfigValidationError;

/// A fixed, non-empty set of at least two unique location names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSet {
    names: Vec<String>,
}

impl LocationSet {
    /// Create a location set, rejecting sets that cannot yield a distinct route
    pub fn new(names: Vec<String>) -> Result<Self, ConfigValidationError> {
        Self::check(&names)?;
        Ok(Self { names })
    }

    /// Check that `names` can form a location set: at least two entries,
    /// none blank, no repeats
    pub fn check(names: &[String]) -> Result<(), ConfigValidationError> {
        if names.len() < 2 {
            return Err(ConfigValidationError::TooFewLocations(names.len()));
        }
        for (index, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyLocationName);
            }
            if names[..index].contains(name) {
                return Err(ConfigValidationError::DuplicateLocation(name.clone()));
            }
        }
        Ok(())
    }

    /// Number of locations in the set
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; a valid set holds at least two entries
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All location names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether a name belongs to the set
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|candidate| candidate == name)
    }

    /// Pick an ordered (pickup, drop-off) pair of distinct locations uniformly at random
    pub fn pick_route<R: Rng + ?Sized>(&self, rng: &mut R) -> (&str, &str) {
        let count = self.names.len();
        let pickup = rng.gen_range(0..count);
        // Draw from the remaining count - 1 slots and skip over the pickup index
        let mut drop_off = rng.gen_range(0..count - 1);
        if drop_off >= pickup {
            drop_off += 1;
        }
        (&self.names[pickup], &self.names[drop_off])
    }
}
