//! Query construction: a typed boolean-query tree built by pure functions
//! from a [`SearchRequest`](crate::types::SearchRequest), serialized once
//! at the engine boundary.

pub mod ast;
pub mod builder;

pub use ast::{Bounds, BoostedField, CompiledQuery, QueryNode, SortSpec};
pub use builder::compile;
