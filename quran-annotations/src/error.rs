use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("no verses are selected")]
    EmptySelection,
    #[error("note {0} does not exist")]
    NoteNotFound(Uuid),
    #[error("removing notes with text requires confirmation")]
    ConfirmationRequired,
    #[error("unknown note color {0:?}")]
    UnknownColor(String),
}
