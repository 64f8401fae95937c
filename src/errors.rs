use thiserror::Error;

use crate::config::ConfigError;

/// Failures that stop the server before or while it is serving.
///
/// Request handling has no error path of its own: malformed bodies are rejected
/// by axum's extractors with their default client-error responses.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server terminated: {0}")]
    Serve(#[source] std::io::Error),
}

impl ServerError {
    pub fn bind(addr: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            addr: addr.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts() {
        let err: ServerError = ConfigError::InvalidPort.into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: PORT must be a valid u16"
        );
    }

    #[test]
    fn bind_error_names_the_address() {
        let err = ServerError::bind(
            "0.0.0.0:3000",
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use"),
        );
        assert_eq!(
            err.to_string(),
            "failed to bind 0.0.0.0:3000: address in use"
        );
    }
}
