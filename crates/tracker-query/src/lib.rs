mod builder;
mod field;
mod filter;
mod operator;

pub use builder::{FilterBuilder, InvalidFilterError, RANGE_SEPARATOR, build};
pub use field::{FIELDS, FieldSpec, FieldType};
pub use filter::{CompositeQuery, Predicate};
pub use operator::Operator;
