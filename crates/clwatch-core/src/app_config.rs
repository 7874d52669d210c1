use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Where the serialized dedup state lives between runs.
    pub state_path: PathBuf,
    /// sqlite URL for the post log.
    pub database_url: String,
    pub feed_request_timeout_secs: u64,
    pub feed_user_agent: String,
    pub mail_api_url: String,
    pub mail_api_key: Option<String>,
    pub sender_name: String,
    pub sender_email: Option<String>,
    pub recipient_name: String,
    pub recipient_email: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("state_path", &self.state_path)
            .field("database_url", &self.database_url)
            .field(
                "feed_request_timeout_secs",
                &self.feed_request_timeout_secs,
            )
            .field("feed_user_agent", &self.feed_user_agent)
            .field("mail_api_url", &self.mail_api_url)
            .field(
                "mail_api_key",
                &self.mail_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("sender_name", &self.sender_name)
            .field("sender_email", &self.sender_email)
            .field("recipient_name", &self.recipient_name)
            .field("recipient_email", &self.recipient_email)
            .finish()
    }
}
