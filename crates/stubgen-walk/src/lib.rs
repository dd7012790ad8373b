//! Reflection capability boundary and recursive object-graph walker.
//!
//! Converts a live object graph, reachable only through a
//! [`ReflectionCapability`], into the normalized, serializable schema
//! tree of `stubgen-schema`:
//!
//! ```text
//! Host binding              Walker                Schema tree
//! ──────────────    ─────────────────────    ─────────────────
//! live objects  ──> ReflectionCapability ──> Module / Class /
//!                   (closed ObjectKind)      Function / ...
//! ```
//!
//! The walk is single-threaded and fail-fast: a failure at any node aborts
//! the whole walk with a [`WalkError`] and no partial tree. Re-walking the
//! same unchanged graph with a deterministic member order yields an
//! identical tree.
//!
//! # Example
//!
//! ```
//! use stubgen_walk::{ObjectBuilder, MemoryGraph, Walker};
//!
//! let root = ObjectBuilder::module("Live")
//!     .doc("Root module.")
//!     .member("version", ObjectBuilder::value("version", "11.0", "str").build())
//!     .build();
//!
//! let tree = Walker::new(&MemoryGraph).walk_module(&root).unwrap();
//! assert_eq!(tree.name, "Live");
//! ```

pub mod capability;
pub mod memory;
pub mod walker;

pub use capability::{DescriptorFlags, ObjectKind, ReflectError, ReflectionCapability};
pub use memory::{MemoryGraph, MemoryObject, ObjectBuilder};
pub use walker::{WalkError, Walker};
