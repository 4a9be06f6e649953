use std::fmt;

use bson::Bson;

use crate::operator::Operator;

/// A single field/operator/value constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub operator: Operator,
    pub value: Bson,
}

impl Predicate {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Bson>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn equal(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::new(field, Operator::Gte, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::new(field, Operator::Lte, value)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.field, self.operator.symbol())?;
        match &self.value {
            Bson::Int64(v) => write!(f, "{v}"),
            Bson::Int32(v) => write!(f, "{v}"),
            Bson::Double(v) => write!(f, "{v:?}"),
            Bson::String(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// Conjunction of zero or more predicates, shaped the way the store executes it.
#[derive(Debug, Clone, PartialEq)]
pub enum CompositeQuery {
    /// No filter: every record matches.
    All,
    /// Exactly one predicate, no composite wrapper.
    Single(Predicate),
    /// Two or more predicates combined with logical AND, in encounter order.
    And(Vec<Predicate>),
}

impl CompositeQuery {
    /// Assemble a query from any number of predicates.
    pub fn from_predicates(mut predicates: Vec<Predicate>) -> Self {
        match predicates.len() {
            0 => CompositeQuery::All,
            1 => match predicates.pop() {
                Some(p) => CompositeQuery::Single(p),
                None => CompositeQuery::All,
            },
            _ => CompositeQuery::And(predicates),
        }
    }

    /// The predicates this query applies, in encounter order.
    pub fn predicates(&self) -> &[Predicate] {
        match self {
            CompositeQuery::All => &[],
            CompositeQuery::Single(p) => std::slice::from_ref(p),
            CompositeQuery::And(children) => children,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        matches!(self, CompositeQuery::All)
    }
}

impl FromIterator<Predicate> for CompositeQuery {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self::from_predicates(iter.into_iter().collect())
    }
}

impl fmt::Display for CompositeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeQuery::All => write!(f, "*"),
            CompositeQuery::Single(p) => write!(f, "{p}"),
            CompositeQuery::And(children) => {
                for (i, p) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    write!(f, "{p}")?;
                }
                Ok(())
            }
        }
    }
}
