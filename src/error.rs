use thiserror::Error;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("clipboard copy failed: {0}")]
    Clipboard(String),
    #[error("preference store rejected write: {0}")]
    Storage(String),
    #[error("browser object unavailable: {0}")]
    Unavailable(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}
