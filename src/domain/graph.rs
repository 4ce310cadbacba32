//! Tuple-list graph parsing
//!
//! Turns a user-typed list of bracketed pairs like `(alice.eth,bob.eth)`
//! into a deduplicated node set with deterministic grid coordinates and a
//! directed edge list. Anything that is not a well-formed pair is skipped
//! without raising an error; garbage input simply yields an empty graph.

/// Nodes per grid row
const GRID_COLUMNS: usize = 5;
const GRID_X_SPACING: i64 = 200;
const GRID_Y_SPACING: i64 = 150;
const GRID_ORIGIN: i64 = 100;

/// A graph node placed on the layout grid. Identity is the token exactly
/// as it appeared in the input (after trimming).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub title: String,
    pub x: i64,
    pub y: i64,
}

/// A directed edge between two node ids. Repeated pairs produce repeated
/// edges; no deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Parse a tuple list into a graph.
///
/// The scanner walks the input left to right. At every `(` it attempts to
/// match `(<token>,<token>)` where a token is a run of characters other
/// than `,` and `)`. On a failed attempt it advances a single character and
/// retries, which gives the same non-overlapping leftmost matches a regex
/// scan would. Tokens are trimmed; pairs where either token trims to empty
/// are skipped.
pub fn parse(input: &str) -> Graph {
    let chars: Vec<char> = input.chars().collect();
    let mut pairs: Vec<(String, String)> = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '(' {
            if let Some((source, target, next)) = match_pair(&chars, i) {
                pairs.push((source, target));
                i = next;
                continue;
            }
        }
        i += 1;
    }

    let mut graph = Graph::default();
    for (source, target) in &pairs {
        intern_node(&mut graph.nodes, source);
        intern_node(&mut graph.nodes, target);
    }
    graph.edges = pairs
        .into_iter()
        .map(|(source, target)| GraphEdge { source, target })
        .collect();
    graph
}

/// Try to match one `(<token>,<token>)` pair starting at the `(` at `start`.
/// Returns the trimmed tokens and the index just past the closing `)`.
fn match_pair(chars: &[char], start: usize) -> Option<(String, String, usize)> {
    let (first, after_first) = scan_token(chars, start + 1)?;
    if chars.get(after_first) != Some(&',') {
        return None;
    }
    let (second, after_second) = scan_token(chars, after_first + 1)?;
    if chars.get(after_second) != Some(&')') {
        return None;
    }

    let source = first.trim().to_string();
    let target = second.trim().to_string();
    if source.is_empty() || target.is_empty() {
        return None;
    }
    Some((source, target, after_second + 1))
}

/// Collect a run of token characters (anything but `,` and `)`), requiring
/// at least one. Returns the raw token and the index of the delimiter.
fn scan_token(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut end = start;
    while end < chars.len() && chars[end] != ',' && chars[end] != ')' {
        end += 1;
    }
    if end == start {
        return None;
    }
    Some((chars[start..end].iter().collect(), end))
}

/// Add a node for `id` unless one exists; coordinates come from the node's
/// 0-based position in first-seen order on a fixed 5-column grid.
fn intern_node(nodes: &mut Vec<GraphNode>, id: &str) {
    if nodes.iter().any(|node| node.id == id) {
        return;
    }
    let index = nodes.len();
    nodes.push(GraphNode {
        id: id.to_string(),
        title: id.to_string(),
        x: (index % GRID_COLUMNS) as i64 * GRID_X_SPACING + GRID_ORIGIN,
        y: (index / GRID_COLUMNS) as i64 * GRID_Y_SPACING + GRID_ORIGIN,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_with_inner_paren() {
        // `(` is a legal token character, same as the original pattern
        let graph = parse("((a,b)");
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, "(a");
        assert_eq!(graph.edges[0].target, "b");
    }

    #[test]
    fn test_blank_token_skipped() {
        let graph = parse("( ,b)(a,b)");
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn test_unterminated_pair_ignored() {
        let graph = parse("(a,b");
        assert!(graph.is_empty());
        assert!(graph.edges.is_empty());
    }
}
