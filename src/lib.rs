//! # radixtree
//!
//! A compressed radix tree (patricia trie) keyed by arbitrary byte strings,
//! carrying an opaque value for each key.
//!
//! Two variants share one semantic model: [`RadixTree`] for single-threaded
//! use, and [`ConcurrentRadixTree`] for safe simultaneous readers and
//! writers behind one readers-writer lock. Both support point lookups
//! (`get`/`insert`/`remove`), prefix operations (`remove_prefix`,
//! `walk_prefix`, `walk_path`), longest-prefix match, and ordered scans
//! (`minimum`, `maximum`, `walk`).
//!
//! ## Example
//!
//! ```rust
//! use radixtree::RadixTree;
//!
//! let mut tree = RadixTree::new();
//! tree.insert("hello", "world");
//! tree.insert("hello:foo", "bar");
//!
//! assert_eq!(tree.get("hello"), Some(&"world"));
//!
//! let mut seen = Vec::new();
//! tree.walk_prefix("hello", |k, v| {
//!     seen.push((k.to_vec(), *v));
//!     false
//! });
//! assert_eq!(seen.len(), 2);
//!
//! assert_eq!(tree.remove("hello"), Some("world"));
//! assert_eq!(tree.remove_prefix("hello"), 1);
//! ```
//!
//! Keys are anything that is `AsRef<[u8]>` (`&str`, `&[u8]`, `String`,
//! `Vec<u8>`), and ordering is unit-wise lexicographic over bytes. The empty
//! key is legal and stores at the tree's root.

mod concurrent;
mod node;
mod tree;

pub use concurrent::ConcurrentRadixTree;
pub use tree::RadixTree;
