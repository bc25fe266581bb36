use thiserror::Error;

#[derive(Error, Debug)]
pub enum FemidaError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input a handler recognised as its own but could not use.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid web app data: {0}")]
    InvalidWebAppData(String),

    #[error("Invalid callback data: {0}")]
    InvalidCallback(String),
}

pub type Result<T> = std::result::Result<T, FemidaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_converts_with_context() {
        let err: FemidaError = HandlerError::InvalidCallback("confirm_booking_x".to_string()).into();
        assert!(matches!(err, FemidaError::Handler(HandlerError::InvalidCallback(_))));
        assert_eq!(
            err.to_string(),
            "Handler error: Invalid callback data: confirm_booking_x"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "messages.txt");
        let err: FemidaError = io.into();
        assert!(matches!(err, FemidaError::Io(_)));
    }
}
