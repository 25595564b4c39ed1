use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuralisError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Analysis error: {0}")]
    Api(String),
}

impl From<AuralisError> for String {
    fn from(err: AuralisError) -> Self {
        err.to_string()
    }
}

impl From<gloo_net::Error> for AuralisError {
    fn from(err: gloo_net::Error) -> Self {
        AuralisError::Api(err.to_string())
    }
}
