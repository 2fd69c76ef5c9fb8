use std::error::Error;

/// Error type used at the edges of the application (server, client, main).
pub type GenericResult<T> = Result<T, Box<dyn Error + Send + Sync>>;
