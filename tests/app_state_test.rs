//! App state behavior: log ordering, lookup lifecycle, graph selection

use enscope::app::{App, Mode};
use enscope::lookup::{LogEntry, LookupUpdate, Profile, Transaction};

#[test]
fn test_log_renders_newest_first() {
    let mut app = App::new();
    app.apply_update(LookupUpdate::Log(LogEntry::info("first")));
    app.apply_update(LookupUpdate::Log(LogEntry::info("second")));
    app.apply_update(LookupUpdate::Log(LogEntry::error("third")));

    let texts: Vec<&str> = app.log.iter().map(|entry| entry.text.as_str()).collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
}

#[test]
fn test_new_lookup_discards_previous_results_but_keeps_log() {
    let mut app = App::new();
    app.apply_update(LookupUpdate::Log(LogEntry::info("old lookup")));
    app.apply_update(LookupUpdate::Profile(Profile {
        balance: Some("2".to_string()),
        ..Default::default()
    }));
    app.apply_update(LookupUpdate::Transactions(vec![Transaction {
        hash: "0xabc".to_string(),
        from: "0x1".to_string(),
        to: None,
        value: "0".to_string(),
        block_number: 1,
        timestamp: None,
    }]));
    app.apply_update(LookupUpdate::Finished);
    assert!(!app.lookup_in_progress);

    app.request_lookup("vitalik.eth");
    assert!(app.lookup_in_progress);
    assert!(app.profile.is_empty());
    assert!(app.transactions.is_empty());
    // The session log survives across lookups
    assert_eq!(app.log.len(), 1);
    assert_eq!(app.take_lookup_request(), Some("vitalik.eth".to_string()));
    assert_eq!(app.take_lookup_request(), None);
}

#[test]
fn test_graph_submit_parses_and_node_enter_requests_lookup() {
    let mut app = App::new();
    app.mode = Mode::Graph;
    app.graph_input = "(alice.eth,bob.eth)(bob.eth,carol.eth)".to_string();
    app.submit_input();

    assert_eq!(app.graph.nodes.len(), 3);
    assert_eq!(app.graph.edges.len(), 2);
    assert_eq!(app.selected_node, 0);

    app.select_next_node();
    assert_eq!(app.graph.nodes[app.selected_node].id, "bob.eth");

    app.lookup_selected_node();
    assert!(app.lookup_in_progress);
    assert_eq!(app.take_lookup_request(), Some("bob.eth".to_string()));
}

#[test]
fn test_node_selection_clamps_at_ends() {
    let mut app = App::new();
    app.mode = Mode::Graph;
    app.graph_input = "(a,b)".to_string();
    app.submit_input();

    app.select_prev_node();
    assert_eq!(app.selected_node, 0);
    app.select_next_node();
    app.select_next_node();
    assert_eq!(app.selected_node, 1);
}

#[test]
fn test_empty_lookup_input_is_rejected_without_request() {
    let mut app = App::new();
    app.lookup_input = "   ".to_string();
    app.submit_input();

    assert!(!app.lookup_in_progress);
    assert_eq!(app.take_lookup_request(), None);
}
