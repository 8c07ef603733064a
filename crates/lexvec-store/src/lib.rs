//! Flat sorted text tables keyed by lexical entity.
//!
//! Every table is a newline-delimited file sorted on its first
//! space-separated token. Lookups open the file, binary-search it by
//! seeking over byte offsets and close it again, so no handle outlives
//! a single query.

pub mod definition;
pub mod frequency;
pub mod sorted_file;
pub mod vectors;

pub use definition::DefinitionStore;
pub use frequency::FrequencyStore;
pub use sorted_file::SortedTextFile;
pub use vectors::{format_vector_line, write_vector_table, VectorKey, VectorStore};
