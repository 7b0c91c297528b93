//! Constants for the Newick reader.

/// Newick label delimiters: parentheses, brackets, comma, colon, semicolon, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Prefix of generated names for vertices without label
pub(crate) const DEFAULT_UNNAMED_PREFIX: &str = "#";

/// Weight of an edge without branch length
pub(crate) const DEFAULT_WEIGHT: f64 = 1.0;
