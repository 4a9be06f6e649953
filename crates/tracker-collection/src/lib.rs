mod error;
mod handler;
mod record;
mod runs;

pub use error::RunError;
pub use handler::RunHttp;
pub use record::Record;
pub use runs::{ID_LIST_SEPARATOR, Runs};
