//! Integration tests for relationship inference.

use joinwise::model::{JoinCondition, JoinKind, Table};
use joinwise::semantic::inference::{infer_join, InferenceConfig, MatchKind, RelationshipInferrer};

fn orders() -> Table {
    Table::new("orders")
        .with_column("id", "Integer")
        .with_column("customer_id", "Integer")
        .with_column("total", "Decimal")
}

fn customers() -> Table {
    Table::new("customers")
        .with_column("id", "Integer")
        .with_column("name", "Text")
}

#[test]
fn test_orders_customers_scenario() {
    let proposal = infer_join(&orders(), &customers()).unwrap();

    assert_eq!(proposal.kind, JoinKind::Left);
    assert_eq!(proposal.left_table, "orders");
    assert_eq!(proposal.right_table, "customers");
    assert_eq!(
        proposal.conditions,
        vec![JoinCondition::new("customer_id", "id")]
    );
}

#[test]
fn test_customers_logs_scenario() {
    let logs = Table::new("logs")
        .with_column("id", "Integer")
        .with_column("message", "Text");

    let proposal = infer_join(&customers(), &logs).unwrap();
    assert_eq!(proposal.conditions, vec![JoinCondition::new("id", "id")]);
    assert_eq!(proposal.kind, JoinKind::Left);
}

#[test]
fn test_single_exact_match_is_proposed() {
    let sales = Table::new("sales")
        .with_column("amount", "Decimal")
        .with_column("store_code", "String");
    let stores = Table::new("stores")
        .with_column("Store_Code", "Text")
        .with_column("city", "Text");

    let proposal = infer_join(&sales, &stores).unwrap();
    assert_eq!(proposal.match_kind, MatchKind::ExactName);
    assert_eq!(
        proposal.conditions,
        vec![JoinCondition::new("store_code", "Store_Code")]
    );
}

#[test]
fn test_exact_name_beats_id_reference() {
    let orders = Table::new("orders")
        .with_column("customer_id", "Integer")
        .with_column("region", "Text");
    let customers = Table::new("customers")
        .with_column("id", "Integer")
        .with_column("region", "Text");

    let proposal = infer_join(&orders, &customers).unwrap();
    assert_eq!(proposal.match_kind, MatchKind::ExactName);
    assert_eq!(proposal.conditions, vec![JoinCondition::new("region", "region")]);
}

#[test]
fn test_no_compatible_pair() {
    let a = Table::new("events")
        .with_column("happened_at", "Datetime")
        .with_column("label", "Text");
    let b = Table::new("metrics")
        .with_column("happened_at", "Integer")
        .with_column("value", "Decimal");

    assert!(infer_join(&a, &b).is_none());
}

#[test]
fn test_date_columns_match_dates() {
    let a = Table::new("visits").with_column("day", "Date");
    let b = Table::new("weather").with_column("day", "Datetime");
    assert!(infer_join(&a, &b).is_some());
}

#[test]
fn test_irregular_plural_reference() {
    let tickets = Table::new("tickets").with_column("person_id", "Integer");
    let people = Table::new("people").with_column("id", "Integer");

    let proposal = infer_join(&tickets, &people).unwrap();
    assert_eq!(proposal.match_kind, MatchKind::IdReference);
}

#[test]
fn test_custom_suffix() {
    let inferrer = RelationshipInferrer::new(InferenceConfig {
        id_suffix: "_fk".to_string(),
        ..InferenceConfig::default()
    });
    let orders = Table::new("orders").with_column("customer_fk", "Integer");

    let proposal = inferrer.infer_join(&orders, &customers()).unwrap();
    assert_eq!(proposal.conditions, vec![JoinCondition::new("customer_fk", "id")]);
    assert!(inferrer
        .infer_join(&Table::new("o").with_column("customer_id", "Integer"), &customers())
        .is_none());
}

#[test]
fn test_inference_is_stable() {
    let first = infer_join(&orders(), &customers());
    for _ in 0..10 {
        assert_eq!(infer_join(&orders(), &customers()), first);
    }
}
