use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid search request: {field} must not be blank")]
    InvalidRequest { field: &'static str },

    #[error("no category code for vehicle type \"{vehicle_type}\" with seller type \"{seller_type}\"")]
    UnknownCategory {
        vehicle_type: String,
        seller_type: String,
    },
}
