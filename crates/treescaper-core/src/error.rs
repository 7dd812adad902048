pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("tree JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid tree node at {path}: expected a JSON object")]
    InvalidNode { path: String },

    #[error("Missing field `{field}` on tree node at {path}")]
    MissingField { path: String, field: &'static str },

    #[error("Tree node at {path} is nested deeper than {limit} levels")]
    TooDeep { path: String, limit: usize },

    #[error("Invalid field `{field}` on tree node at {path}: expected {expected}")]
    InvalidField {
        path: String,
        field: &'static str,
        expected: &'static str,
    },
}
