#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport or backend failure. Not retried at this layer.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
