use crate::field::{FIELDS, FieldSpec};
use crate::filter::{CompositeQuery, Predicate};

/// Separator between the low and high bound of a range value.
pub const RANGE_SEPARATOR: char = ',';

/// A query parameter that names a known field but cannot become a predicate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid filter {name}={value:?}: {reason}")]
pub struct InvalidFilterError {
    pub name: String,
    pub value: String,
    pub reason: String,
}

impl InvalidFilterError {
    pub fn new(name: &str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Translates ordered `(name, value)` query parameters into a [`CompositeQuery`].
///
/// - Names missing from the field table are ignored.
/// - `low,high` on a range-capable field yields `field >= low` and
///   `field <= high`; bounds are not ordered against each other.
/// - A separator in a value for a non-range field is part of the literal.
/// - Repeated names are all kept, in encounter order.
/// - Any parse failure rejects the whole parameter list.
#[derive(Debug, Clone, Copy)]
pub struct FilterBuilder {
    fields: &'static [FieldSpec],
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self { fields: FIELDS }
    }
}

impl FilterBuilder {
    pub fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    fn lookup(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Parse parameters into predicates without assembling them.
    pub fn predicates<I, K, V>(&self, params: I) -> Result<Vec<Predicate>, InvalidFilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut predicates = Vec::new();

        for (name, raw) in params {
            let (name, raw) = (name.as_ref(), raw.as_ref());
            let Some(spec) = self.lookup(name) else {
                continue;
            };

            if spec.range && raw.contains(RANGE_SEPARATOR) {
                let (low, high) = split_range(name, raw)?;
                let low = spec
                    .ty
                    .parse(low)
                    .map_err(|reason| InvalidFilterError::new(name, raw, reason))?;
                let high = spec
                    .ty
                    .parse(high)
                    .map_err(|reason| InvalidFilterError::new(name, raw, reason))?;
                predicates.push(Predicate::gte(spec.name, low));
                predicates.push(Predicate::lte(spec.name, high));
            } else {
                predicates.push(equality(spec, raw)?);
            }
        }

        Ok(predicates)
    }

    /// Parse one value as a literal equality on `name`, with no range syntax.
    ///
    /// Unlike [`FilterBuilder::predicates`], an unknown name is an error.
    pub fn equality(&self, name: &str, raw: &str) -> Result<Predicate, InvalidFilterError> {
        let spec = self
            .lookup(name)
            .ok_or_else(|| InvalidFilterError::new(name, raw, "unknown field"))?;
        equality(spec, raw)
    }

    pub fn build<I, K, V>(&self, params: I) -> Result<CompositeQuery, InvalidFilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.predicates(params).map(CompositeQuery::from_predicates)
    }
}

/// Build a query against the standard record fields.
pub fn build<I, K, V>(params: I) -> Result<CompositeQuery, InvalidFilterError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    FilterBuilder::default().build(params)
}

fn equality(spec: &FieldSpec, raw: &str) -> Result<Predicate, InvalidFilterError> {
    let value = spec
        .ty
        .parse(raw)
        .map_err(|reason| InvalidFilterError::new(spec.name, raw, reason))?;
    Ok(Predicate::equal(spec.name, value))
}

/// Split `low,high` into exactly two non-empty halves.
fn split_range<'a>(name: &str, raw: &'a str) -> Result<(&'a str, &'a str), InvalidFilterError> {
    let mut parts = raw.split(RANGE_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(low), Some(high), None) if !low.trim().is_empty() && !high.trim().is_empty() => {
            Ok((low, high))
        }
        (_, _, Some(_)) => Err(InvalidFilterError::new(
            name,
            raw,
            "range must have exactly two bounds",
        )),
        _ => Err(InvalidFilterError::new(name, raw, "range bound is empty")),
    }
}
