use bson::Bson;

/// Declared value type of a queryable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    String,
}

impl FieldType {
    /// Parse a raw query-string value into the store's native scalar.
    ///
    /// Numeric values tolerate surrounding whitespace; strings are kept
    /// verbatim. Non-finite floats are rejected since they can never match a
    /// stored coordinate.
    pub(crate) fn parse(self, raw: &str) -> Result<Bson, &'static str> {
        match self {
            FieldType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Bson::Int64)
                .map_err(|_| "expected an integer"),
            FieldType::Float => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Bson::Double(v)),
                Ok(_) => Err("expected a finite number"),
                Err(_) => Err("expected a number"),
            },
            FieldType::String => Ok(Bson::String(raw.to_string())),
        }
    }
}

/// One row of the queryable-field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    /// Whether `low,high` range syntax is recognized for this field.
    pub range: bool,
}

/// Every field a client may filter on. Adding a field is a row here.
pub static FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "id",
        ty: FieldType::Integer,
        range: true,
    },
    FieldSpec {
        name: "user",
        ty: FieldType::String,
        range: false,
    },
    FieldSpec {
        name: "lat",
        ty: FieldType::Float,
        range: true,
    },
    FieldSpec {
        name: "lon",
        ty: FieldType::Float,
        range: true,
    },
    FieldSpec {
        name: "timestamp",
        ty: FieldType::Integer,
        range: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_user_rejects_ranges() {
        let names: Vec<&str> = FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, ["id", "user", "lat", "lon", "timestamp"]);
        for spec in FIELDS {
            assert_eq!(spec.range, spec.ty != FieldType::String, "{}", spec.name);
        }
    }

    #[test]
    fn integer_parse() {
        assert_eq!(FieldType::Integer.parse(" 42 "), Ok(Bson::Int64(42)));
        assert_eq!(FieldType::Integer.parse("-7"), Ok(Bson::Int64(-7)));
        assert!(FieldType::Integer.parse("4.5").is_err());
        assert!(FieldType::Integer.parse("").is_err());
    }

    #[test]
    fn float_parse() {
        assert_eq!(FieldType::Float.parse("43.8"), Ok(Bson::Double(43.8)));
        assert_eq!(FieldType::Float.parse("12"), Ok(Bson::Double(12.0)));
        assert!(FieldType::Float.parse("north").is_err());
        assert!(FieldType::Float.parse("NaN").is_err());
        assert!(FieldType::Float.parse("inf").is_err());
    }

    #[test]
    fn string_parse_is_verbatim() {
        assert_eq!(
            FieldType::String.parse(" lea,john "),
            Ok(Bson::String(" lea,john ".into()))
        );
    }
}
