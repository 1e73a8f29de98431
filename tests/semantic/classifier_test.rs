//! Integration tests for column classification.

use joinwise::model::{GranularityBucket, RawType, TypeClass, TypeClassSet};
use joinwise::semantic::{classify, classify_str, granularity_options_for};

#[test]
fn test_classify_is_total() {
    for name in ["Integer", "Text", "Datetime", "Auto", "uuid", "", "ÄÖÜ", "varchar(255)"] {
        let first = classify_str(name);
        assert_eq!(first, classify_str(name), "non-deterministic for '{}'", name);
    }
    assert!(classify_str("varchar(255)").is_empty());
}

#[test]
fn test_every_known_type_has_at_most_one_base_class() {
    for raw in RawType::ALL {
        let classes = classify(&raw);
        assert!(classes.iter().count() <= 1, "{} has {}", raw, classes);
    }
}

#[test]
fn test_groupings_partition_known_types() {
    for raw in RawType::ALL {
        let classes = classify(&raw);
        if classes.is_empty() {
            assert_eq!(raw, RawType::Auto);
            continue;
        }
        // Every classified column is exactly one of measure/dimension.
        assert_ne!(classes.is_measure(), classes.is_dimension(), "{}", raw);
        // And exactly one of discrete/continuous.
        assert_ne!(classes.is_discrete(), classes.is_continuous(), "{}", raw);
    }
}

#[test]
fn test_granularity_options_for_date_types() {
    let expected: Vec<&str> = vec![
        "second", "minute", "hour", "day", "week", "month", "quarter", "year",
    ];
    for raw in [RawType::Date, RawType::Datetime, RawType::Time] {
        let options: Vec<&str> = granularity_options_for(classify(&raw))
            .iter()
            .map(GranularityBucket::as_str)
            .collect();
        assert_eq!(options, expected);
    }
}

#[test]
fn test_granularity_options_for_mixed_set() {
    let set: TypeClassSet = [TypeClass::Number, TypeClass::Date].into_iter().collect();
    assert_eq!(granularity_options_for(set).len(), 8);
    assert!(granularity_options_for(TypeClassSet::DIMENSION.union(TypeClassSet::NUMBER)).len() == 8);
    assert!(granularity_options_for(TypeClassSet::DISCRETE).is_empty());
}
