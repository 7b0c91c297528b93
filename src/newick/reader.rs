//! Reader turning Newick strings into [WeightedTree]s.

use crate::error::OracleError;
use crate::model::tree::NodeIndex;
use crate::model::WeightedTree;
use crate::newick::defs::{DEFAULT_UNNAMED_PREFIX, DEFAULT_WEIGHT, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::{ParsingError, ParsingErrorType};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reader (configuration) for Newick strings as weighted trees.
///
/// Every vertex of the Newick tree, leaf or internal, becomes a node named
/// by its label; every branch becomes an edge weighted by its branch length.
/// Vertices may have any number of children.
///
/// # Configuration
/// * `with_default_weight(weight)` - Weight of branches without length (default `1.0`)
/// * `with_unnamed_prefix(prefix)` - Vertices without label are named
///   `prefix` followed by a counter starting at 1 (default `"#"`), skipping
///   names taken by labels of the same tree
///
/// # Example
/// ```
/// use treedist::newick::NewickReader;
///
/// let reader = NewickReader::new().with_unnamed_prefix("v");
/// let tree = reader.parse_str("((A:1,B:2):3,C:4);").unwrap();
/// assert_eq!(tree.num_nodes(), 5);
/// assert_eq!(tree.path_distance(&"A".to_string(), &"C".to_string()).unwrap(), 8.0);
/// assert!(tree.contains(&"v1".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct NewickReader {
    default_weight: f64,
    unnamed_prefix: String,
}

impl Default for NewickReader {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
            unnamed_prefix: DEFAULT_UNNAMED_PREFIX.to_string(),
        }
    }
}

/// Tree under construction. Vertices are kept in the order they are
/// finished; unnamed vertices get their names once all labels of the tree
/// are known, so generated names never clash with real ones.
#[derive(Default)]
struct PendingTree {
    labels: Vec<Option<String>>,
    named: HashSet<String>,
    /// (parent, child, weight, position of the parent's label)
    edges: Vec<(NodeIndex, NodeIndex, f64, usize)>,
}

// ============================================================================
// Configuration (pub)
// ============================================================================
impl NewickReader {
    /// Creates a new `NewickReader` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight used for branches without branch length.
    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.default_weight = weight;
        self
    }

    /// Sets the prefix of generated names for vertices without label.
    pub fn with_unnamed_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.unnamed_prefix = prefix.into();
        self
    }

    // ============================================================================
    // Reading (pub)
    // ============================================================================
    /// Parses a string holding exactly one Newick tree.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the string is not a single valid Newick
    /// tree, has duplicate labels or a negative branch length.
    pub fn parse_str<S: AsRef<str>>(&self, newick: S) -> Result<WeightedTree<String>, ParsingError> {
        let mut parser = ByteParser::from_str(newick.as_ref());
        let tree = self.parse_tree(&mut parser)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.is_eof() {
            return Err(ParsingError::invalid_newick_string(
                &parser,
                "Unexpected content after ';'".to_string(),
            ));
        }
        Ok(tree)
    }

    /// Parses all semicolon-terminated Newick trees of the input.
    ///
    /// # Errors
    /// Returns a [ParsingError] for the first invalid tree.
    pub fn parse_all<S: AsRef<str>>(&self, input: S) -> Result<Vec<WeightedTree<String>>, ParsingError> {
        let mut parser = ByteParser::from_str(input.as_ref());
        self.parse_remaining(&mut parser)
    }

    /// Reads all Newick trees of a file.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the file cannot be read or a tree is invalid.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<WeightedTree<String>>, ParsingError> {
        let path = path.as_ref();
        let mut parser = ByteParser::new(fs::read(path)?);
        let trees = self.parse_remaining(&mut parser)?;
        debug!(path = %path.display(), trees = trees.len(), "read newick file");
        Ok(trees)
    }

    /// Parses a single tree `vertex [:branch_length] ;` from the parser.
    ///
    /// The branch length of the root has no edge to go to and is ignored.
    pub fn parse_tree(&self, parser: &mut ByteParser) -> Result<WeightedTree<String>, ParsingError> {
        let mut pending = PendingTree::default();

        self.parse_vertices(parser, &mut pending)?;
        let _ = self.parse_branch_length(parser)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(self.unexpected(parser, "';' at end of tree"));
        }

        let tree = self.assemble(pending, parser)?;
        debug!(
            nodes = tree.num_nodes(),
            edges = tree.num_edges(),
            "parsed newick tree"
        );
        Ok(tree)
    }
}

// ============================================================================
// Parsing (private)
// ============================================================================
impl NewickReader {
    fn parse_remaining(&self, parser: &mut ByteParser) -> Result<Vec<WeightedTree<String>>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.is_eof() {
                return Ok(trees);
            }
            trees.push(self.parse_tree(parser)?);
        }
    }

    /// Parses the vertex at the current position with all its descendants
    /// and returns the index of that vertex.
    ///
    /// Nesting depth is only limited by memory: each `(` pushes the list of
    /// its children parsed so far, each `)` pops it once the vertex behind
    /// it is finished.
    fn parse_vertices(
        &self,
        parser: &mut ByteParser,
        pending: &mut PendingTree,
    ) -> Result<NodeIndex, ParsingError> {
        // Children (with branch weight) of each open '('
        let mut open: Vec<Vec<(NodeIndex, f64)>> = Vec::new();

        loop {
            parser.skip_comment_and_whitespace()?;
            while parser.consume_if(b'(') {
                open.push(Vec::new());
                parser.skip_comment_and_whitespace()?;
            }

            let mut children = Vec::new();
            loop {
                let vertex = self.finish_vertex(parser, pending, children)?;
                let Some(siblings) = open.last_mut() else {
                    return Ok(vertex);
                };
                let weight = self
                    .parse_branch_length(parser)?
                    .unwrap_or(self.default_weight);
                siblings.push((vertex, weight));

                parser.skip_comment_and_whitespace()?;
                match parser.peek() {
                    Some(b',') => {
                        parser.next();
                        break;
                    }
                    Some(b')') => {
                        parser.next();
                        children = open.pop().unwrap_or_default();
                    }
                    _ => return Err(self.unexpected(parser, "',' or ')' after child")),
                }
            }
        }
    }

    /// Parses the label of a vertex whose children are done and records the
    /// vertex with the edges to its children.
    fn finish_vertex(
        &self,
        parser: &mut ByteParser,
        pending: &mut PendingTree,
        children: Vec<(NodeIndex, f64)>,
    ) -> Result<NodeIndex, ParsingError> {
        let label_start = parser.position();
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;

        let label = if label.is_empty() {
            None
        } else if pending.named.insert(label.clone()) {
            Some(label)
        } else {
            return Err(ParsingError::at(
                ParsingErrorType::DuplicateLabel(label),
                parser,
                label_start,
            ));
        };

        let vertex = pending.labels.len();
        pending.labels.push(label);
        pending.edges.extend(
            children
                .into_iter()
                .map(|(child, weight)| (vertex, child, weight, label_start)),
        );
        Ok(vertex)
    }

    /// Names the unnamed vertices and builds the tree. Generated names skip
    /// those taken by a label of the tree.
    fn assemble(
        &self,
        pending: PendingTree,
        parser: &ByteParser,
    ) -> Result<WeightedTree<String>, ParsingError> {
        let PendingTree { labels, named, edges } = pending;
        let mut tree = WeightedTree::with_capacity(labels.len());

        let mut num_unnamed = 0;
        for label in labels {
            let name = label.unwrap_or_else(|| loop {
                num_unnamed += 1;
                let candidate = format!("{}{}", self.unnamed_prefix, num_unnamed);
                if !named.contains(&candidate) {
                    break candidate;
                }
            });
            tree.add_node(name);
        }

        for (parent, child, weight, position) in edges {
            tree.link(parent, child, weight)
                .map_err(|err| structure_error(err, parser, position))?;
        }
        Ok(tree)
    }

    /// Parses optional branch length `[:number]`, with comments and
    /// whitespace allowed around `:`.
    ///
    /// # Returns
    /// - `Some(length)` if found a branch length and was able to parse it
    /// - `None` if found no branch length
    fn parse_branch_length(&self, parser: &mut ByteParser) -> Result<Option<f64>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let start = parser.position();
        // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
        while matches!(parser.peek(), Some(b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E')) {
            parser.next();
        }

        let text = String::from_utf8_lossy(parser.slice_from(start)).into_owned();
        match text.parse::<f64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(ParsingError::at(
                ParsingErrorType::InvalidWeight(text),
                parser,
                start,
            )),
        }
    }

    fn unexpected(&self, parser: &ByteParser, expected: &str) -> ParsingError {
        match parser.peek() {
            None => ParsingError::unexpected_eof(parser),
            Some(found) => ParsingError::invalid_newick_string(
                parser,
                format!("Expected {expected} but found {:?}", found as char),
            ),
        }
    }
}

fn structure_error(err: OracleError, parser: &ByteParser, position: usize) -> ParsingError {
    ParsingError::at(err.into(), parser, position)
}
