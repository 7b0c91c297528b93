//! Text parsing infrastructure shared by the tree loaders.
//!
//! This module provides the low-level [ByteParser](byte_parser::ByteParser)
//! and the error type [ParsingError] used by [crate::newick] and
//! [crate::edge_list].

pub mod byte_parser;
pub mod parsing_error;

pub use parsing_error::{ParsingError, ParsingErrorType};
