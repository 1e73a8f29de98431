//! Integration tests for the query builder facade.

use joinwise::config::Settings;
use joinwise::model::{JoinCondition, JoinKind, Table};
use joinwise::semantic::{ErrorKind, JoinOutcome, QueryBuilder, Severity};

fn customers() -> Table {
    Table::new("customers")
        .with_label("Customers")
        .with_column("id", "Integer")
        .with_column("name", "Text")
}

fn orders() -> Table {
    Table::new("orders")
        .with_column("id", "Integer")
        .with_column("customer_id", "Integer")
        .with_column("placed_at", "Datetime")
}

fn products() -> Table {
    Table::new("products")
        .with_column("sku", "String")
        .with_column("price", "Decimal")
}

fn order_items() -> Table {
    Table::new("order_items")
        .with_column("order_id", "Integer")
        .with_column("sku", "String")
        .with_column("quantity", "Integer")
}

#[test]
fn test_builds_star_of_joins() {
    let mut qb = QueryBuilder::new();

    qb.add_table_and_auto_join(customers()).unwrap();
    assert!(qb.add_table_and_auto_join(orders()).unwrap().is_joined());
    assert!(qb.add_table_and_auto_join(order_items()).unwrap().is_joined());
    assert!(qb.add_table_and_auto_join(products()).unwrap().is_joined());

    let graph = qb.graph();
    assert_eq!(graph.list_joins().len(), 3);
    assert!(graph.pending_tables().is_empty());

    let items = graph.join_between("orders", "order_items").unwrap();
    assert_eq!(items.conditions, vec![JoinCondition::new("id", "order_id")]);
    let products = graph.join_between("order_items", "products").unwrap();
    assert_eq!(products.conditions, vec![JoinCondition::new("sku", "sku")]);
}

#[test]
fn test_earliest_added_table_wins() {
    let mut qb = QueryBuilder::new();
    qb.add_table_and_auto_join(Table::new("a").with_column("code", "Text"))
        .unwrap();
    qb.add_table_and_auto_join(Table::new("b").with_column("code", "Text"))
        .unwrap();

    let outcome = qb
        .add_table_and_auto_join(Table::new("c").with_column("code", "Text"))
        .unwrap();
    let JoinOutcome::Joined { join, .. } = outcome else {
        panic!("expected a join");
    };
    assert_eq!(join.left_table, "a");
    assert_eq!(join.right_table, "c");
}

#[test]
fn test_no_relationship_warning_names_both_tables() {
    let mut qb = QueryBuilder::new();
    qb.add_table_and_auto_join(customers()).unwrap();

    let outcome = qb.add_table_and_auto_join(products()).unwrap();
    assert_eq!(outcome.kind(), Some(ErrorKind::NoRelationshipFound));
    assert_eq!(outcome.severity(), Some(Severity::Warning));
    assert_eq!(
        outcome,
        JoinOutcome::NoRelationshipFound {
            table_a: "customers".into(),
            table_b: "products".into()
        }
    );
    assert!(qb.graph().is_pending("products"));
}

#[test]
fn test_duplicate_table_propagates() {
    let mut qb = QueryBuilder::new();
    qb.add_table_and_auto_join(customers()).unwrap();
    qb.add_table_and_auto_join(orders()).unwrap();

    let err = qb.add_table_and_auto_join(orders()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateTable);
    assert_eq!(err.severity(), Severity::Error);
}

#[test]
fn test_reset_requires_empty_query() {
    let mut qb = QueryBuilder::new();
    qb.add_table_and_auto_join(customers()).unwrap();
    qb.add_table_and_auto_join(orders()).unwrap();

    let err = qb.reset_main_table(products()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResetBlocked);

    qb.remove_table("orders").unwrap();
    qb.reset_main_table(products()).unwrap();
    assert_eq!(qb.graph().main_table_id(), Some("products"));
}

#[test]
fn test_settings_drive_inference_and_removal() {
    let settings = Settings::from_toml(
        r#"
[inference]
default_join_kind = "inner"

[graph]
removal_policy = "reject"
"#,
    )
    .unwrap();

    let mut qb = QueryBuilder::from_settings(&settings);
    qb.add_table_and_auto_join(customers()).unwrap();
    qb.add_table_and_auto_join(orders()).unwrap();
    qb.add_table_and_auto_join(order_items()).unwrap();

    let join = qb.graph().join_between("customers", "orders").unwrap();
    assert_eq!(join.kind, JoinKind::Inner);

    let err = qb.remove_join("customers", "orders").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisconnectingRemoval);
}

#[test]
fn test_manual_replace_join() {
    let mut qb = QueryBuilder::new();
    qb.add_table_and_auto_join(customers()).unwrap();
    qb.add_table_and_auto_join(orders()).unwrap();

    qb.replace_join(
        "customers",
        "orders",
        JoinKind::Full,
        vec![JoinCondition::new("id", "id")],
    )
    .unwrap();

    let join = qb.graph().join_between("orders", "customers").unwrap();
    assert_eq!(join.kind, JoinKind::Full);
    assert_eq!(join.conditions, vec![JoinCondition::new("id", "id")]);
}

#[test]
fn test_column_options_through_graph() {
    let mut qb = QueryBuilder::new();
    qb.add_table_and_auto_join(orders()).unwrap();

    let graph = qb.graph();
    assert_eq!(graph.granularity_options("orders", "placed_at").unwrap().len(), 8);
    assert!(graph.column_type_classes("orders", "id").unwrap().is_measure());
}
