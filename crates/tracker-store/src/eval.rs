use std::cmp::Ordering;

use bson::{Bson, Document};
use tracker_query::{CompositeQuery, Operator, Predicate};

/// Evaluate whether a stored entity satisfies the query.
pub fn matches(doc: &Document, query: &CompositeQuery) -> bool {
    query.predicates().iter().all(|p| predicate_matches(doc, p))
}

/// Evaluate a single predicate. A missing field never matches.
pub fn predicate_matches(doc: &Document, predicate: &Predicate) -> bool {
    let Some(stored) = doc.get(&predicate.field) else {
        return false;
    };
    match predicate.operator {
        Operator::Eq => value_eq(stored, &predicate.value),
        Operator::Gte => value_cmp(stored, &predicate.value, |o| o != Ordering::Less),
        Operator::Lte => value_cmp(stored, &predicate.value, |o| o != Ordering::Greater),
    }
}

/// Equality: stored value vs query value.
fn value_eq(stored: &Bson, query: &Bson) -> bool {
    match (stored, query) {
        (Bson::String(a), Bson::String(b)) => a == b,
        (Bson::Int32(a), Bson::Int32(b)) => a == b,
        (Bson::Int32(a), Bson::Int64(b)) => (*a as i64) == *b,
        (Bson::Int64(a), Bson::Int64(b)) => a == b,
        (Bson::Int64(a), Bson::Int32(b)) => *a == (*b as i64),
        (Bson::Double(a), Bson::Double(b)) => a == b,
        (Bson::Double(a), Bson::Int64(b)) => *a == (*b as f64),
        (Bson::Double(a), Bson::Int32(b)) => *a == (*b as f64),
        (Bson::Int64(a), Bson::Double(b)) => (*a as f64) == *b,
        (Bson::Int32(a), Bson::Double(b)) => (*a as f64) == *b,
        (Bson::Boolean(a), Bson::Boolean(b)) => a == b,

        // Incompatible types: silent exclusion
        _ => false,
    }
}

/// Ordering: stored value vs query value, fed to `predicate`.
fn value_cmp(stored: &Bson, query: &Bson, predicate: fn(Ordering) -> bool) -> bool {
    let ordering = match (stored, query) {
        (Bson::Int32(a), Bson::Int32(b)) => a.cmp(b),
        (Bson::Int32(a), Bson::Int64(b)) => (*a as i64).cmp(b),
        (Bson::Int64(a), Bson::Int64(b)) => a.cmp(b),
        (Bson::Int64(a), Bson::Int32(b)) => a.cmp(&(*b as i64)),
        (Bson::Double(a), Bson::Double(b)) => match a.partial_cmp(b) {
            Some(o) => o,
            None => return false,
        },
        (Bson::Double(a), Bson::Int64(b)) => match a.partial_cmp(&(*b as f64)) {
            Some(o) => o,
            None => return false,
        },
        (Bson::Double(a), Bson::Int32(b)) => match a.partial_cmp(&(*b as f64)) {
            Some(o) => o,
            None => return false,
        },
        (Bson::Int64(a), Bson::Double(b)) => match (*a as f64).partial_cmp(b) {
            Some(o) => o,
            None => return false,
        },
        (Bson::Int32(a), Bson::Double(b)) => match (*a as f64).partial_cmp(b) {
            Some(o) => o,
            None => return false,
        },
        (Bson::String(a), Bson::String(b)) => a.as_str().cmp(b.as_str()),

        // Incompatible types: silent exclusion
        _ => return false,
    };
    predicate(ordering)
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    fn sample() -> Document {
        doc! { "id": 5_i64, "user": "lea", "lat": 43.8, "lon": 12.6, "timestamp": 154789_i64 }
    }

    #[test]
    fn unfiltered_matches_everything() {
        assert!(matches(&sample(), &CompositeQuery::All));
        assert!(matches(&Document::new(), &CompositeQuery::All));
    }

    #[test]
    fn equality_per_type() {
        let doc = sample();
        assert!(predicate_matches(&doc, &Predicate::equal("id", 5_i64)));
        assert!(predicate_matches(&doc, &Predicate::equal("user", "lea")));
        assert!(predicate_matches(&doc, &Predicate::equal("lat", 43.8)));
        assert!(!predicate_matches(&doc, &Predicate::equal("user", "Lea")));
        assert!(!predicate_matches(&doc, &Predicate::equal("id", 6_i64)));
    }

    #[test]
    fn numeric_cross_type() {
        let doc = doc! { "id": 5_i32, "lat": 15.0 };
        assert!(predicate_matches(&doc, &Predicate::equal("id", 5_i64)));
        assert!(predicate_matches(&doc, &Predicate::equal("lat", 15_i64)));
        assert!(predicate_matches(&doc, &Predicate::gte("id", 4.5)));
    }

    #[test]
    fn inclusive_bounds() {
        let doc = sample();
        assert!(predicate_matches(&doc, &Predicate::gte("timestamp", 154789_i64)));
        assert!(predicate_matches(&doc, &Predicate::lte("timestamp", 154789_i64)));
        assert!(!predicate_matches(&doc, &Predicate::gte("timestamp", 154790_i64)));
        assert!(!predicate_matches(&doc, &Predicate::lte("lon", 12.5)));
    }

    #[test]
    fn missing_field_or_type_mismatch_never_matches() {
        let doc = sample();
        assert!(!predicate_matches(&doc, &Predicate::equal("speed", 1_i64)));
        assert!(!predicate_matches(&doc, &Predicate::gte("user", 1_i64)));
        assert!(!predicate_matches(&doc, &Predicate::equal("id", "5")));
    }

    #[test]
    fn conjunction_requires_all() {
        let doc = sample();
        let inside = CompositeQuery::And(vec![
            Predicate::gte("lat", 40.0),
            Predicate::lte("lat", 50.0),
            Predicate::equal("user", "lea"),
        ]);
        let inverted = CompositeQuery::And(vec![
            Predicate::gte("id", 3_i64),
            Predicate::lte("id", 1_i64),
        ]);
        assert!(matches(&doc, &inside));
        assert!(!matches(&doc, &inverted));
    }
}
