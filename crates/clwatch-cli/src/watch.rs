//! The `watch` subcommand: one full poll of the feed.
//!
//! Commit order matters here: the dedup state is persisted inside
//! `FeedStore::refresh`, before the post log and the notifier run, so a
//! failed delivery never causes a listing to be re-reported as new.

use clwatch_core::{AppConfig, ConfigError};
use clwatch_feed::{FeedClient, FeedStore};
use clwatch_notify::Mailer;

use crate::args::SearchArgs;

pub async fn run_watch(config: &AppConfig, args: &SearchArgs, dry_run: bool) -> anyhow::Result<()> {
    let url = args.build_url()?;

    // Resolve the notification settings before touching the state so a
    // missing mail credential fails the run without marking anything seen.
    let delivery = if dry_run {
        None
    } else {
        Some(build_delivery(config)?)
    };

    tracing::info!(%url, "fetching feed");
    let client = FeedClient::new(config.feed_request_timeout_secs, &config.feed_user_agent)?;
    let raw = client.fetch_listings(&url).await?;
    tracing::debug!(count = raw.len(), "fetched feed entries");

    let mut store = FeedStore::load(&config.state_path)?;
    let Some(new_items) = store.refresh(raw)? else {
        tracing::info!("no new listings");
        return Ok(());
    };
    tracing::info!(count = new_items.len(), "new listings found");

    if dry_run {
        for listing in &new_items {
            println!("{}  {}", listing.title, listing.link().unwrap_or(""));
        }
        return Ok(());
    }

    let pool = clwatch_db::connect(&config.database_url).await?;
    clwatch_db::init_post_log(&pool).await?;
    for listing in &new_items {
        let url = listing.link().unwrap_or(&listing.id);
        clwatch_db::insert_post(&pool, &listing.id, url).await?;
    }

    if let Some((mailer, recipient)) = delivery {
        mailer
            .send_new_listings(&config.recipient_name, &recipient, &new_items)
            .await?;
    }

    Ok(())
}

fn build_delivery(config: &AppConfig) -> anyhow::Result<(Mailer, String)> {
    let require = |value: &Option<String>, var: &str| -> Result<String, ConfigError> {
        value
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_owned()))
    };

    let api_key = require(&config.mail_api_key, "CLWATCH_MAIL_API_KEY")?;
    let sender = require(&config.sender_email, "CLWATCH_SENDER_EMAIL")?;
    let recipient = require(&config.recipient_email, "CLWATCH_RECIPIENT_EMAIL")?;

    let mailer = Mailer::with_base_url(
        &api_key,
        &config.sender_name,
        &sender,
        &config.mail_api_url,
    )?;
    Ok((mailer, recipient))
}

#[cfg(test)]
mod tests {
    use clwatch_core::Environment;

    use super::*;

    fn mail_ready_config() -> AppConfig {
        AppConfig {
            env: Environment::Test,
            log_level: "info".into(),
            state_path: "./feed_state.json".into(),
            database_url: "sqlite::memory:".into(),
            feed_request_timeout_secs: 30,
            feed_user_agent: "clwatch/0.1 (test)".into(),
            mail_api_url: "https://api.brevo.com".into(),
            mail_api_key: Some("xkeysib-test".into()),
            sender_name: "clwatch".into(),
            sender_email: Some("alerts@example.com".into()),
            recipient_name: "Mike".into(),
            recipient_email: Some("mike@example.com".into()),
        }
    }

    #[test]
    fn delivery_resolves_when_mail_settings_are_present() {
        let (_, recipient) = build_delivery(&mail_ready_config()).unwrap();
        assert_eq!(recipient, "mike@example.com");
    }

    fn delivery_error(config: &AppConfig) -> anyhow::Error {
        match build_delivery(config) {
            Ok(_) => panic!("delivery should not resolve"),
            Err(err) => err,
        }
    }

    #[test]
    fn missing_mail_credential_is_a_missing_env_var() {
        let mut config = mail_ready_config();
        config.mail_api_key = None;
        let err = delivery_error(&config);
        assert!(
            matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::MissingEnvVar(var)) if var == "CLWATCH_MAIL_API_KEY"
            ),
            "got: {err:?}"
        );
    }

    #[test]
    fn missing_recipient_is_a_missing_env_var() {
        let mut config = mail_ready_config();
        config.recipient_email = None;
        let err = delivery_error(&config);
        assert!(
            matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::MissingEnvVar(var)) if var == "CLWATCH_RECIPIENT_EMAIL"
            ),
            "got: {err:?}"
        );
    }
}
