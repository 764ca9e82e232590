use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnvError>;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("invalid action kind {id}: expected an id in 0..{expected}")]
    InvalidActionKind { id: i64, expected: usize },

    #[error("malformed action: {0}")]
    MalformedAction(String),

    #[error("environment must be reset before stepping")]
    NotReset,

    #[error("episode has terminated, call reset() to start a new one")]
    EpisodeTerminated,

    #[error("invalid configuration for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    #[error("unknown environment id '{0}'")]
    UnknownEnvironment(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("plotting failed: {0}")]
    Plot(String),
}

impl EnvError {
    pub(crate) fn invalid_config(param: &str, message: impl Into<String>) -> Self {
        EnvError::InvalidConfig {
            param: param.to_string(),
            message: message.into(),
        }
    }
}
