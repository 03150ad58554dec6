//! Thread-safe set containers.
//!
//! - [`ConcurrentHashSet`]: an unordered set of distinct values behind a
//!   single reader/writer lock
//!
//! # Shared Ownership
//!
//! Every mutating method takes `&self`, so a set is shared between threads
//! by wrapping it in an `Arc` rather than a `Mutex`.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use syncset::set::ConcurrentHashSet;
//!
//! let set = Arc::new(ConcurrentHashSet::from_values([1, 3, 5]));
//! let writer = {
//!     let set = Arc::clone(&set);
//!     thread::spawn(move || set.insert(2))
//! };
//!
//! assert!(writer.join().unwrap());
//! assert_eq!(set.len(), 4);
//! ```
//!
//! # Derived Sets
//!
//! Set algebra and functional transforms build new sets. Mutating a derived
//! set never affects its source.
//!
//! ```rust
//! use syncset::set::ConcurrentHashSet;
//!
//! let source = ConcurrentHashSet::from_values([1, 2, 3]);
//! let copy = source.clone();
//! copy.insert(4);
//!
//! assert_eq!(source.len(), 3);
//! assert_eq!(copy.len(), 4);
//! ```

mod hashset;
mod lock;

pub use hashset::ConcurrentHashSet;
pub use hashset::EMPTY_SET_SYMBOL;
