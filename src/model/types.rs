//! Primitive column and join types.
//!
//! Raw types are the vocabulary the data-source layer reports for a column.
//! Type classes are the semantic view used by the query builder: three base
//! classes (NUMBER, TEXT, DATE) and four derived groupings that are pure unions
//! of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw column type as reported by the data source.
///
/// Parsing never fails: anything outside the known vocabulary is kept
/// verbatim in [`RawType::Unknown`] and classifies to an empty set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RawType {
    Auto,
    String,
    Text,
    Integer,
    Decimal,
    Date,
    Time,
    Datetime,
    Json,
    Array,
    Unknown(String),
}

impl RawType {
    /// The known vocabulary, in the order the column type picker shows it.
    pub const ALL: [RawType; 10] = [
        RawType::Auto,
        RawType::String,
        RawType::Text,
        RawType::Integer,
        RawType::Decimal,
        RawType::Date,
        RawType::Time,
        RawType::Datetime,
        RawType::Json,
        RawType::Array,
    ];

    /// Parse a raw type name (case-insensitive).
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "auto" => RawType::Auto,
            "string" => RawType::String,
            "text" => RawType::Text,
            "integer" => RawType::Integer,
            "decimal" => RawType::Decimal,
            "date" => RawType::Date,
            "time" => RawType::Time,
            "datetime" => RawType::Datetime,
            "json" => RawType::Json,
            "array" => RawType::Array,
            _ => RawType::Unknown(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RawType::Auto => "Auto",
            RawType::String => "String",
            RawType::Text => "Text",
            RawType::Integer => "Integer",
            RawType::Decimal => "Decimal",
            RawType::Date => "Date",
            RawType::Time => "Time",
            RawType::Datetime => "Datetime",
            RawType::Json => "JSON",
            RawType::Array => "Array",
            RawType::Unknown(name) => name,
        }
    }

    /// Is this a type outside the known vocabulary?
    pub fn is_unknown(&self) -> bool {
        matches!(self, RawType::Unknown(_))
    }
}

impl FromStr for RawType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RawType::parse(s))
    }
}

impl From<String> for RawType {
    fn from(s: String) -> Self {
        RawType::parse(&s)
    }
}

impl From<&str> for RawType {
    fn from(s: &str) -> Self {
        RawType::parse(s)
    }
}

impl From<RawType> for String {
    fn from(t: RawType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base type class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeClass {
    Number,
    Text,
    Date,
}

impl TypeClass {
    pub const ALL: [TypeClass; 3] = [TypeClass::Number, TypeClass::Text, TypeClass::Date];

    const fn bit(self) -> u8 {
        match self {
            TypeClass::Number => 0b001,
            TypeClass::Text => 0b010,
            TypeClass::Date => 0b100,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeClass::Number => "NUMBER",
            TypeClass::Text => "TEXT",
            TypeClass::Date => "DATE",
        }
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of base type classes, stored as a bitset.
///
/// The derived groupings are constants built from the base bits, so they can
/// never drift from the base classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeClassSet(u8);

impl TypeClassSet {
    pub const EMPTY: TypeClassSet = TypeClassSet(0);
    pub const NUMBER: TypeClassSet = TypeClassSet(TypeClass::Number.bit());
    pub const TEXT: TypeClassSet = TypeClassSet(TypeClass::Text.bit());
    pub const DATE: TypeClassSet = TypeClassSet(TypeClass::Date.bit());

    /// Aggregatable columns.
    pub const MEASURE: TypeClassSet = Self::NUMBER;
    /// Groupable columns.
    pub const DIMENSION: TypeClassSet = Self::TEXT.union(Self::DATE);
    pub const DISCRETE: TypeClassSet = Self::TEXT;
    pub const CONTINUOUS: TypeClassSet = Self::NUMBER.union(Self::DATE);

    pub const fn of(class: TypeClass) -> Self {
        TypeClassSet(class.bit())
    }

    pub const fn union(self, other: TypeClassSet) -> Self {
        TypeClassSet(self.0 | other.0)
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, class: TypeClass) -> bool {
        self.0 & class.bit() != 0
    }

    /// Does this set share any class with `other`?
    pub const fn intersects(&self, other: TypeClassSet) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_measure(&self) -> bool {
        self.intersects(Self::MEASURE)
    }

    pub const fn is_dimension(&self) -> bool {
        self.intersects(Self::DIMENSION)
    }

    pub const fn is_discrete(&self) -> bool {
        self.intersects(Self::DISCRETE)
    }

    pub const fn is_continuous(&self) -> bool {
        self.intersects(Self::CONTINUOUS)
    }

    /// The single base class of this set, if it has exactly one.
    pub fn base(&self) -> Option<TypeClass> {
        let mut classes = self.iter();
        match (classes.next(), classes.next()) {
            (Some(class), None) => Some(class),
            _ => None,
        }
    }

    /// Iterate base classes in NUMBER, TEXT, DATE order.
    pub fn iter(&self) -> impl Iterator<Item = TypeClass> + '_ {
        TypeClass::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<TypeClass> for TypeClassSet {
    fn from(class: TypeClass) -> Self {
        TypeClassSet::of(class)
    }
}

impl FromIterator<TypeClass> for TypeClassSet {
    fn from_iter<I: IntoIterator<Item = TypeClass>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TypeClassSet::EMPTY, |set, class| set.union(class.into()))
    }
}

impl fmt::Display for TypeClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl Serialize for TypeClassSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for TypeClassSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let classes = Vec::<TypeClass>::deserialize(deserializer)?;
        Ok(classes.into_iter().collect())
    }
}

/// Temporal rollup unit for DATE columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GranularityBucket {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl GranularityBucket {
    /// All buckets, finest first.
    pub const ALL: [GranularityBucket; 8] = [
        GranularityBucket::Second,
        GranularityBucket::Minute,
        GranularityBucket::Hour,
        GranularityBucket::Day,
        GranularityBucket::Week,
        GranularityBucket::Month,
        GranularityBucket::Quarter,
        GranularityBucket::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GranularityBucket::Second => "second",
            GranularityBucket::Minute => "minute",
            GranularityBucket::Hour => "hour",
            GranularityBucket::Day => "day",
            GranularityBucket::Week => "week",
            GranularityBucket::Month => "month",
            GranularityBucket::Quarter => "quarter",
            GranularityBucket::Year => "year",
        }
    }
}

impl FromStr for GranularityBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GranularityBucket::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown granularity '{}'", s))
    }
}

impl fmt::Display for GranularityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL join kind of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    /// Only rows with matches in both tables.
    Inner,
    /// All existing rows plus matches from the joined table.
    #[default]
    Left,
    /// All rows of the joined table plus matches from the existing one.
    Right,
    /// All rows from both tables.
    Full,
}

impl JoinKind {
    pub const ALL: [JoinKind; 4] = [JoinKind::Inner, JoinKind::Left, JoinKind::Right, JoinKind::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "inner",
            JoinKind::Left => "left",
            JoinKind::Right => "right",
            JoinKind::Full => "full",
        }
    }
}

impl FromStr for JoinKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JoinKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown join kind '{}'", s))
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter widget family offered for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    String,
    Number,
    Date,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::String => "String",
            FilterType::Number => "Number",
            FilterType::Date => "Date",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
