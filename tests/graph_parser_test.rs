//! Graph parser properties: determinism, grid layout, permissive grammar

use enscope::domain::graph::{parse, GraphEdge};

#[test]
fn test_round_trip_pairs() {
    let graph = parse("[(A,B),(C,D),(C,B),(D,A)]");

    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C", "D"]);

    let coords: Vec<(i64, i64)> = graph.nodes.iter().map(|n| (n.x, n.y)).collect();
    assert_eq!(coords, vec![(100, 100), (300, 100), (500, 100), (700, 100)]);

    let edges: Vec<(&str, &str)> = graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(
        edges,
        vec![("A", "B"), ("C", "D"), ("C", "B"), ("D", "A")]
    );
}

#[test]
fn test_garbage_yields_empty_graph() {
    let graph = parse("garbage, no parens");
    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
}

#[test]
fn test_idempotent() {
    let input = "(alice.eth,bob.eth) junk (bob.eth,carol.eth)(alice.eth,bob.eth)";
    let first = parse(input);
    let second = parse(input);
    assert_eq!(first, second);
}

#[test]
fn test_duplicate_pairs_keep_duplicate_edges() {
    let graph = parse("(a,b)(a,b)");
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 2);
    assert_eq!(
        graph.edges[0],
        GraphEdge {
            source: "a".to_string(),
            target: "b".to_string()
        }
    );
    assert_eq!(graph.edges[0], graph.edges[1]);
}

#[test]
fn test_grid_wraps_after_five_columns() {
    let graph = parse("(n0,n1)(n2,n3)(n4,n5)(n6,n7)");
    assert_eq!(graph.nodes.len(), 8);

    // First row
    assert_eq!((graph.nodes[0].x, graph.nodes[0].y), (100, 100));
    assert_eq!((graph.nodes[4].x, graph.nodes[4].y), (900, 100));
    // Second row starts at index 5
    assert_eq!((graph.nodes[5].x, graph.nodes[5].y), (100, 250));
    assert_eq!((graph.nodes[7].x, graph.nodes[7].y), (500, 250));
}

#[test]
fn test_tokens_are_trimmed() {
    let graph = parse("( alice.eth , bob.eth )");
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["alice.eth", "bob.eth"]);
}

#[test]
fn test_surrounding_garbage_is_ignored() {
    let graph = parse("xx(a,b)yy(c,d)zz");
    assert_eq!(graph.nodes.len(), 4);
    assert_eq!(graph.edges.len(), 2);
}
