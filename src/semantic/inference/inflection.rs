//! Table-name inflection for foreign-key style column matching.
//!
//! A column such as `customer_id` references the `customers` table. To detect
//! this we need the singular stem of a table name; the `inflector` crate does
//! the regular cases and a short list of irregulars covers schema-typical words
//! it gets wrong.

use inflector::Inflector;

/// Irregular (singular, plural) pairs common in schemas.
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
];

/// Singularize a lowercase word.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    if let Some((singular, _)) = IRREGULAR_PLURALS
        .iter()
        .find(|(singular, plural)| lower == *plural || lower == *singular)
    {
        return singular.to_string();
    }

    lower.to_singular()
}

/// Name stems a foreign-key column may use to reference `table_name`.
///
/// Schema-qualified names (`sales.customers`) and spaces are reduced to the
/// last segment in snake case. Returns the singular form first, then the name
/// as-is when it differs (`customers_id` is seen in the wild too).
pub fn reference_stems(table_name: &str) -> Vec<String> {
    let base = table_name.rsplit('.').next().unwrap_or(table_name);
    let snake = base.to_snake_case();
    if snake.is_empty() {
        return Vec::new();
    }

    let singular = singularize(&snake);
    if singular == snake {
        vec![singular]
    } else {
        vec![singular, snake]
    }
}
