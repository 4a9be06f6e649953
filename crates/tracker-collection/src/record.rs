use bson::{Bson, Document, doc};
use serde::{Deserialize, Serialize};

use crate::error::RunError;

/// One tracked location sample. Records sharing an `id` belong to the same run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub user: String,
    pub lat: f64,
    pub lon: f64,
    pub timestamp: i64,
}

impl Record {
    pub fn new(id: i64, lat: f64, lon: f64, user: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            user: user.into(),
            lat,
            lon,
            timestamp,
        }
    }

    /// Entity fields as persisted in the store.
    pub fn to_document(&self) -> Document {
        doc! {
            "id": self.id,
            "user": self.user.as_str(),
            "lat": self.lat,
            "lon": self.lon,
            "timestamp": self.timestamp,
        }
    }

    pub fn from_document(doc: &Document) -> Result<Self, RunError> {
        Ok(Self {
            id: integer(doc, "id")?,
            user: match doc.get("user") {
                Some(Bson::String(s)) => s.clone(),
                other => return Err(mistyped("user", other)),
            },
            lat: float(doc, "lat")?,
            lon: float(doc, "lon")?,
            timestamp: integer(doc, "timestamp")?,
        })
    }
}

fn integer(doc: &Document, field: &str) -> Result<i64, RunError> {
    match doc.get(field) {
        Some(Bson::Int64(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(*v as i64),
        other => Err(mistyped(field, other)),
    }
}

fn float(doc: &Document, field: &str) -> Result<f64, RunError> {
    match doc.get(field) {
        Some(Bson::Double(v)) => Ok(*v),
        Some(Bson::Int64(v)) => Ok(*v as f64),
        Some(Bson::Int32(v)) => Ok(*v as f64),
        other => Err(mistyped(field, other)),
    }
}

fn mistyped(field: &str, found: Option<&Bson>) -> RunError {
    match found {
        None => RunError::Corrupt(format!("missing field {field}")),
        Some(v) => RunError::Corrupt(format!(
            "field {field} has unexpected type {:?}",
            v.element_type()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_round_trip() {
        let r = Record::new(5, 43.8, 12.6, "lea", 154789);
        assert_eq!(Record::from_document(&r.to_document()).unwrap(), r);
    }

    #[test]
    fn accepts_narrow_numeric_types() {
        let doc = doc! { "id": 5_i32, "user": "lea", "lat": 43_i32, "lon": 12_i64, "timestamp": 7_i32 };
        let r = Record::from_document(&doc).unwrap();
        assert_eq!(r, Record::new(5, 43.0, 12.0, "lea", 7));
    }

    #[test]
    fn missing_or_mistyped_field_is_corrupt() {
        let missing = doc! { "id": 5_i64, "lat": 1.0, "lon": 1.0, "timestamp": 1_i64 };
        let err = Record::from_document(&missing).unwrap_err();
        assert!(err.to_string().contains("missing field user"), "{err}");

        let mistyped = doc! { "id": "5", "user": "lea", "lat": 1.0, "lon": 1.0, "timestamp": 1_i64 };
        assert!(matches!(
            Record::from_document(&mistyped),
            Err(RunError::Corrupt(_))
        ));
    }

    #[test]
    fn json_shape() {
        let r: Record = serde_json::from_str(
            r#"{"id":5,"lat":43,"lon":12.6,"user":"john","timestamp":154789}"#,
        )
        .unwrap();
        assert_eq!(r, Record::new(5, 43.0, 12.6, "john", 154789));
    }
}
