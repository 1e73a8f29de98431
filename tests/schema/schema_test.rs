//! Integration tests for loading schema catalogs.

use joinwise::schema::SchemaCatalog;
use joinwise::semantic::{JoinOutcome, QueryBuilder};

const SHOP: &str = include_str!("../../demos/shop.json");

#[test]
fn test_load_demo_catalog() {
    let catalog = SchemaCatalog::from_json(SHOP).unwrap();
    assert!(catalog.get("customers").is_some());
    assert!(catalog.get("orders").is_some());
}

#[test]
fn test_build_query_from_catalog() {
    let catalog = SchemaCatalog::from_json(SHOP).unwrap();
    let mut qb = QueryBuilder::new();

    let mut outcomes = Vec::new();
    for id in ["customers", "orders", "order_items", "products", "exchange_rates"] {
        outcomes.push(qb.add_table_and_auto_join(catalog.table(id).unwrap()).unwrap());
    }

    assert!(matches!(outcomes[0], JoinOutcome::MainTableSet { .. }));
    assert!(outcomes[1..4].iter().all(JoinOutcome::is_joined));
    assert!(matches!(
        outcomes[4],
        JoinOutcome::NoRelationshipFound { .. }
    ));

    insta::assert_snapshot!(
        qb.graph()
            .list_joins()
            .iter()
            .map(|j| j.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        @r"
    customers left join orders on customers.id = orders.customer_id
    orders left join order_items on orders.id = order_items.order_id
    order_items left join products on order_items.product_id = products.product_id
    "
    );
}
