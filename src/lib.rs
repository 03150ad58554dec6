//! # syncset
//!
//! A thread-safe hash set with set algebra and functional transforms.
//!
//! ## Overview
//!
//! [`ConcurrentHashSet`] is a deduplicated, unordered collection that any
//! number of threads may read and mutate at once. It offers:
//!
//! - **Membership**: `insert`, `remove`, `contains`, `len`, `snapshot`
//! - **Set Algebra**: union, intersection, difference, symmetric
//!   difference, subset tests and equality
//! - **Functional Transforms**: `filter`, `map`, `fold`
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` as a sequence
//! - `rayon`: collect into a set from parallel iterators
//! - `tracing`: emit `trace` events for every mutation
//! - `loom`: run on loom's model-checked lock (for the loom test suite only)
//! - `full`: `serde`, `rayon` and `tracing`
//!
//! ## Example
//!
//! ```rust
//! use syncset::prelude::*;
//!
//! let odds = concurrent_hash_set![1, 3, 5];
//! let squares = odds.map(|value| value * value);
//!
//! assert_eq!(squares, concurrent_hash_set![1, 9, 25]);
//! assert_eq!(odds.fold(0, |sum, value| sum + value), 9);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the set type and its construction macro.
///
/// # Usage
///
/// ```rust
/// use syncset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::concurrent_hash_set;
    pub use crate::set::*;
}

pub mod set;

pub use set::ConcurrentHashSet;
