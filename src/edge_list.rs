//! Reader for delimited edge list files.
//!
//! One record per line:
//! * `a<TAB>b<TAB>weight` - edge `a - b` with the given weight
//! * `a<TAB>b` - edge `a - b` with the default weight
//! * `a` - node `a` without edges (e.g. the single node of a one-node tree)
//!
//! Fields are trimmed of surrounding whitespace, so node names may contain
//! inner spaces. Blank lines are skipped, as are comment lines: `#` followed
//! by whitespace or the line end. A name like `#1` (as generated for unnamed
//! Newick vertices) is a node, not a comment.
//!
//! # Example
//! ```
//! use treedist::edge_list::EdgeListReader;
//!
//! let input = "# a chain\n1\t2\t10\n2\t3\t20\n";
//! let tree = EdgeListReader::new().read_str(input).unwrap();
//! assert_eq!(tree.path_distance(&"1".to_string(), &"3".to_string()).unwrap(), 30.0);
//! ```

use crate::model::WeightedTree;
use crate::parser::byte_parser::ByteParser;
use crate::parser::{ParsingError, ParsingErrorType};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Marker of a comment line, when followed by whitespace or the line end
const COMMENT: u8 = b'#';

fn is_comment(line: &[u8]) -> bool {
    line.first() == Some(&COMMENT) && line.get(1).is_none_or(|b| b.is_ascii_whitespace())
}

/// Reader (configuration) for edge lists.
///
/// # Configuration
/// * `with_delimiter(byte)` - Field delimiter (default tab)
/// * `with_default_weight(weight)` - Weight of edges without weight column (default `1.0`)
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeListReader {
    delimiter: u8,
    default_weight: f64,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            default_weight: 1.0,
        }
    }
}

impl EdgeListReader {
    /// Creates a new `EdgeListReader` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the weight of edges given without weight column.
    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.default_weight = weight;
        self
    }

    /// Reads an edge list from a string.
    ///
    /// The result is not validated to be a tree; label construction does that.
    ///
    /// # Errors
    /// Returns a [ParsingError] positioned at the start of the offending line
    /// for malformed records, invalid weights, self loops or conflicting
    /// weights for the same pair.
    pub fn read_str<S: AsRef<str>>(&self, input: S) -> Result<WeightedTree<String>, ParsingError> {
        self.read(ByteParser::from_str(input.as_ref()))
    }

    /// Reads an edge list from a file.
    ///
    /// # Errors
    /// As [`read_str`](EdgeListReader::read_str), or if the file cannot be read.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<WeightedTree<String>, ParsingError> {
        let path = path.as_ref();
        let tree = self.read(ByteParser::new(fs::read(path)?))?;
        debug!(
            path = %path.display(),
            nodes = tree.num_nodes(),
            edges = tree.num_edges(),
            "read edge list file"
        );
        Ok(tree)
    }

    fn read(&self, mut parser: ByteParser) -> Result<WeightedTree<String>, ParsingError> {
        let mut tree = WeightedTree::new();

        loop {
            let line_start = parser.position();
            let Some(line) = parser.next_line() else {
                break;
            };
            if is_comment(line) {
                continue;
            }
            let fields: Vec<String> = line
                .split(|&b| b == self.delimiter)
                .map(|field| String::from_utf8_lossy(field).trim().to_string())
                .collect();

            if fields.iter().all(String::is_empty) {
                continue;
            }
            let error = |kind| ParsingError::at(kind, &parser, line_start);

            if let Some(position) = fields.iter().position(String::is_empty) {
                if position < 2 {
                    return Err(error(ParsingErrorType::InvalidEdgeList(
                        "empty node name".to_string(),
                    )));
                }
            }

            match fields.as_slice() {
                [node] => {
                    tree.add_node(node.clone());
                }
                [a, b] => tree
                    .add_edge(a.clone(), b.clone(), self.default_weight)
                    .map_err(|err| error(err.into()))?,
                [a, b, weight] => {
                    let weight = weight
                        .parse::<f64>()
                        .map_err(|_| error(ParsingErrorType::InvalidWeight(weight.clone())))?;
                    tree.add_edge(a.clone(), b.clone(), weight)
                        .map_err(|err| error(err.into()))?;
                }
                _ => {
                    return Err(error(ParsingErrorType::InvalidEdgeList(format!(
                        "expected 1 to 3 fields but found {}",
                        fields.len()
                    ))));
                }
            }
        }

        Ok(tree)
    }
}

/// Reads a tab-separated edge list file with default settings.
///
/// # Example
/// ```no_run
/// use treedist::edge_list::read_edge_list_file;
///
/// let tree = read_edge_list_file("tree.tsv").unwrap();
/// println!("Loaded {} nodes", tree.num_nodes());
/// ```
pub fn read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<WeightedTree<String>, ParsingError> {
    EdgeListReader::new().read_file(path)
}
