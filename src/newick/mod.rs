//! Newick reader for weighted trees.
//!
//! This module provides [`NewickReader`] to load Newick strings as
//! [`WeightedTree`]s, where branch lengths become edge weights.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single string, returns one tree
//! * [`parse_file`] - parses a file, returns all its trees
//!
//! # Full API
//! Configure a [`NewickReader`]:
//! * [`NewickReader::parse_str`] - parse a single tree
//! * [`NewickReader::parse_all`] - parse all trees of a string
//! * [`NewickReader::read_file`] - parse all trees of a file
//!
//! # Format
//! The reader accepts the following grammar:
//! * `tree ::= vertex [branch_length] ';'`
//! * `vertex ::= ['(' child (',' child)* ')'] [label]`
//! * `child ::= vertex [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Labels may be quoted with single quotes, `''` escaping a quote
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch length
//! * Comments are square brackets and can occur anywhere where whitespace is allowed
//! * Labels must be unique within a tree; vertices without label get a
//!   generated name, see [`NewickReader::with_unnamed_prefix`]

mod defs;
mod reader;

pub use self::reader::NewickReader;

use crate::model::WeightedTree;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string with default settings.
///
/// # Example
/// ```
/// use treedist::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata:2,(Fratercula_arctica:1,Fratercula_corniculata:1):1);").unwrap();
/// assert_eq!(tree.num_nodes(), 5);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<WeightedTree<String>, ParsingError> {
    NewickReader::new().parse_str(newick)
}

/// Parses all trees of a file of semicolon-terminated Newick strings with
/// default settings.
///
/// # Example
/// ```no_run
/// use treedist::newick::parse_file;
///
/// let trees = parse_file("anseriformes.nwk").unwrap();
/// println!("Parsed {} trees", trees.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<WeightedTree<String>>, ParsingError> {
    NewickReader::new().read_file(path)
}
