//! Number index read path.
//!
//! Predicates are turned into key ranges by [`KeyRangeBuilder`], seeks are
//! opened against an [`OrderedTree`](crate::storage::OrderedTree) and tracked
//! by a [`CursorRegistry`], and [`NumberIndexReader`] ties these together.

pub mod error;
pub mod key;
pub mod layout;
pub mod query;
pub mod range;
pub mod reader;
pub mod registry;
pub mod sampler;

pub use error::IndexError;
pub use key::{KeyError, NumberKey};
pub use layout::NumberLayout;
pub use query::{IndexQuery, NumberRange, QueryKind};
pub use range::{KeyRange, KeyRangeBuilder};
pub use reader::{NumberHits, NumberIndexReader};
pub use registry::{CursorRegistry, RegisteredCursor, scoped_seek};
pub use sampler::{IndexSample, IndexSampler};
