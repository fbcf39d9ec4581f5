use std::path::PathBuf;

pub type AppResult<T> = Result<T, AppError>;

/// Static message shown to the user for any document failure.
pub const DOCUMENT_FAILURE_MESSAGE: &str = "Failed to load the PDF. Please try again later.";

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("failed to open document {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("page {page} is unavailable")]
    Fetch {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("PDF render failed for page {page}")]
    Paint {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn load(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Load {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn fetch(page: usize, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Fetch {
            page,
            source: Box::new(source),
        }
    }

    pub fn paint(page: usize, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Paint {
            page,
            source: Box::new(source),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Load, fetch and paint failures share one user-facing treatment.
    pub fn is_document_failure(&self) -> bool {
        matches!(
            self,
            Self::Load { .. } | Self::Fetch { .. } | Self::Paint { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn paint_error_wraps_page_and_source() {
        let err = AppError::paint(7, AppError::invalid_argument("bad page"));
        assert!(matches!(err, AppError::Paint { page: 7, .. }));
        assert_eq!(err.to_string(), "PDF render failed for page 7");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn load_error_names_the_path() {
        let err = AppError::load("resume.pdf", AppError::invalid_argument("broken xref"));
        assert_eq!(err.to_string(), "failed to open document resume.pdf");
    }

    #[test]
    fn document_failures_are_grouped() {
        let cause = || AppError::invalid_argument("x");
        assert!(AppError::load("a.pdf", cause()).is_document_failure());
        assert!(AppError::fetch(2, cause()).is_document_failure());
        assert!(AppError::paint(2, cause()).is_document_failure());
        assert!(!AppError::unsupported("x").is_document_failure());
        assert!(!AppError::from(std::io::Error::other("x")).is_document_failure());
    }
}
