//! Column classification.
//!
//! Maps raw column types to their semantic type classes and derives the
//! options the presentation layer may offer for a column (granularity buckets,
//! filter widget family). Every function here is pure and total.

use crate::model::types::{FilterType, GranularityBucket, RawType, TypeClass, TypeClassSet};

/// Classify a raw type.
///
/// Unknown raw types (and `Auto`, which has not been resolved yet) classify to
/// the empty set.
pub fn classify(raw_type: &RawType) -> TypeClassSet {
    match base_class(raw_type) {
        Some(class) => TypeClassSet::of(class),
        None => TypeClassSet::EMPTY,
    }
}

/// Classify a raw type given by name.
pub fn classify_str(raw_type: &str) -> TypeClassSet {
    classify(&RawType::parse(raw_type))
}

/// The one classification rule: every raw type maps to at most one base class.
fn base_class(raw_type: &RawType) -> Option<TypeClass> {
    use RawType::*;

    match raw_type {
        Integer | Decimal => Some(TypeClass::Number),
        String | Text | Json | Array => Some(TypeClass::Text),
        Date | Datetime | Time => Some(TypeClass::Date),
        Auto | Unknown(_) => None,
    }
}

/// Granularity buckets applicable to a column with these type classes.
pub fn granularity_options_for(classes: TypeClassSet) -> Vec<GranularityBucket> {
    if classes.contains(TypeClass::Date) {
        GranularityBucket::ALL.to_vec()
    } else {
        Vec::new()
    }
}

/// Filter widget family for a column with these type classes.
pub fn filter_type_for(classes: TypeClassSet) -> Option<FilterType> {
    match classes.base()? {
        TypeClass::Number => Some(FilterType::Number),
        TypeClass::Text => Some(FilterType::String),
        TypeClass::Date => Some(FilterType::Date),
    }
}

/// Two columns can be join keys when they share a base class.
pub fn is_join_compatible(left: &RawType, right: &RawType) -> bool {
    match (base_class(left), base_class(right)) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}
