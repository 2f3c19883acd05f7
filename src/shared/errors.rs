use crate::config::ConfigError;
use crate::embedding::EmbeddingError;
use crate::forms::ValidationFailure;
use crate::report::ReportError;
use crate::store::DataStoreError;
use crate::ui::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    DataAccess,
    UiBinding,
    Embedding,
    Report,
}

#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    DataAccess(#[from] DataStoreError),
    #[error(transparent)]
    UiBinding(#[from] UiError),
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl MapperError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Config(_) => ErrorKind::Configuration,
            Self::DataAccess(_) => ErrorKind::DataAccess,
            Self::UiBinding(_) => ErrorKind::UiBinding,
            Self::Embedding(_) => ErrorKind::Embedding,
            Self::Report(_) => ErrorKind::Report,
        }
    }
}

pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut parent = parts[0].clone();
    let mut current = err.source();
    while let Some(source) = current {
        let text = source.to_string();
        // A message that already ends with its source's text is not repeated.
        if parent.ends_with(&text) {
            break;
        }
        parts.push(text.clone());
        parent = text;
        current = source.source();
    }
    parts.join(": ")
}
