//! Integration tests for the join graph.
//!
//! These tests exercise the structural invariants through the public API.

use joinwise::model::{JoinCondition, JoinKind, Table};
use joinwise::semantic::{ErrorKind, GraphState, JoinGraph, JoinGraphError, Placement};

fn table(id: &str) -> Table {
    Table::new(id)
        .with_column("id", "Integer")
        .with_column("ref_id", "Integer")
}

fn cond() -> Vec<JoinCondition> {
    vec![JoinCondition::new("id", "ref_id")]
}

fn chain(ids: &[&str]) -> JoinGraph {
    let mut graph = JoinGraph::new();
    for id in ids {
        graph.add_table(table(id)).unwrap();
    }
    for pair in ids.windows(2) {
        graph.add_join(pair[0], pair[1], JoinKind::Left, cond()).unwrap();
    }
    graph
}

#[test]
fn test_state_machine() {
    let mut graph = JoinGraph::new();
    assert_eq!(graph.state(), GraphState::Empty);

    assert_eq!(graph.add_table(table("a")).unwrap(), Placement::Main);
    assert_eq!(graph.state(), GraphState::Rooted);

    graph.add_table(table("b")).unwrap();
    graph.add_join("a", "b", JoinKind::Left, cond()).unwrap();
    assert_eq!(graph.state(), GraphState::Rooted);

    graph.remove_table("b").unwrap();
    graph.remove_table("a").unwrap();
    assert_eq!(graph.state(), GraphState::Empty);
}

#[test]
fn test_self_join_for_any_table() {
    let mut graph = chain(&["a", "b"]);
    for id in ["a", "b", "not_there"] {
        let err = graph.add_join(id, id, JoinKind::Inner, cond()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SelfJoin);
    }
}

#[test]
fn test_rejoin_with_different_condition_is_duplicate() {
    let mut graph = chain(&["a", "b"]);
    let tables_before = graph.list_tables().to_vec();
    let joins_before = graph.list_joins().to_vec();

    let err = graph
        .add_join("b", "a", JoinKind::Left, vec![JoinCondition::new("ref_id", "id")])
        .unwrap_err();

    assert_eq!(err, JoinGraphError::duplicate_join("b", "a"));
    assert_eq!(graph.list_tables(), tables_before.as_slice());
    assert_eq!(graph.list_joins(), joins_before.as_slice());
}

#[test]
fn test_reset_blocked_whenever_joins_exist() {
    let mut graph = chain(&["a", "b"]);
    assert!(!graph.list_joins().is_empty());

    let err = graph.reset_main_table(table("z")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResetBlocked);
    assert_eq!(graph.main_table_id(), Some("a"));
}

#[test]
fn test_reset_after_clearing() {
    let mut graph = chain(&["a", "b", "c"]);
    graph.remove_join("a", "b").unwrap();

    graph.reset_main_table(table("z")).unwrap();
    assert_eq!(graph.list_tables().len(), 1);
    assert!(graph.list_joins().is_empty());
    assert_eq!(graph.main_table_id(), Some("z"));
}

#[test]
fn test_removing_intermediate_table_cascades() {
    let mut graph = chain(&["a", "b", "c"]);

    let removed = graph.remove_table("b").unwrap();
    assert_eq!(removed, vec!["b", "c"]);
    assert!(!graph.contains_table("c"));
    assert!(graph.list_joins().is_empty());
}

#[test]
fn test_failed_operations_leave_graph_unchanged() {
    let mut graph = chain(&["a", "b", "c"]);
    graph.add_table(table("p")).unwrap();
    let tables_before = graph.list_tables().to_vec();
    let joins_before = graph.list_joins().to_vec();

    assert!(graph.add_join("a", "c", JoinKind::Left, cond()).is_err());
    assert!(graph.add_join("p", "q", JoinKind::Left, cond()).is_err());
    assert!(graph.remove_table("a").is_err());
    assert!(graph.remove_join("a", "c").is_err());
    assert!(graph.reset_main_table(table("z")).is_err());
    assert!(graph.replace_join("a", "b", JoinKind::Full, vec![]).is_err());

    assert_eq!(graph.list_tables(), tables_before.as_slice());
    assert_eq!(graph.list_joins(), joins_before.as_slice());
}

#[test]
fn test_every_reachable_table_has_one_path() {
    let mut graph = chain(&["a", "b", "c", "d"]);
    graph.add_table(table("e")).unwrap();
    graph.add_join("b", "e", JoinKind::Left, cond()).unwrap();

    // Connected and acyclic: n reachable tables, n - 1 joins.
    let reachable = graph.reachable_tables().len();
    assert_eq!(reachable, graph.list_tables().len());
    assert_eq!(graph.list_joins().len(), reachable - 1);
}
