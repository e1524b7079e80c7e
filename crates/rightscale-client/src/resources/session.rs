//! Sessions
//!
//! Logging in returns 204 and two session cookies. The cookie store inside
//! the client's `reqwest::Client` keeps them, so every later call on the
//! same [`RightScaleClient`] is authenticated.
//! See: https://reference.rightscale.com/api1.5/resources/ResourceSessions.html

use crate::client::RightScaleClient;
use crate::common::params::Params;
use crate::common::validation::require_value;
use crate::common::Link;
use crate::config::ClientConfig;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::models::{Account, Instance};
use crate::resource_trait::impl_resource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Session model matching the Session media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub message: Option<String>,
    pub links: Vec<Link>,
}

impl_resource!(Session => "Session");

impl RightScaleClient {
    /// Build a client from `config` and log in with whichever credentials it carries
    ///
    /// Email/password wins over an instance token when both are set. Either
    /// way an account id is required.
    pub async fn connect(config: ClientConfig) -> Result<Self, RightScaleError> {
        let client = Self::new(config)?;
        let config = client.config();
        let account_id = config.require_account_id()?;

        match (&config.email, &config.password, &config.instance_token) {
            (Some(email), Some(password), _) => client.login(email, password, account_id).await?,
            (_, _, Some(token)) => client.login_instance(account_id, token).await?,
            _ => {
                return Err(RightScaleError::Config(
                    "no credentials configured: set email and password, or an instance token".to_string(),
                ));
            }
        }

        Ok(client)
    }

    /// Create an API session scoped to an account
    ///
    /// # Arguments
    /// * `email` - Login email
    /// * `password` - Login password
    /// * `account_id` - Account the session is scoped to
    pub async fn login(&self, email: &str, password: &str, account_id: &str) -> Result<(), RightScaleError> {
        require_value("email", email)?;
        require_value("password", password)?;
        require_value("account id", account_id)?;

        let mut form = Params::new();
        form.push("email", email)
            .push("password", password)
            .push("account_href", hrefs::account(account_id));

        self.http().post(hrefs::SESSION, &form).await?;
        info!("Logged in to account {} at {}", account_id, self.base_url());
        Ok(())
    }

    /// Create an API session scoped to an account and the instance owning `instance_token`
    pub async fn login_instance(&self, account_id: &str, instance_token: &str) -> Result<(), RightScaleError> {
        require_value("account id", account_id)?;
        require_value("instance token", instance_token)?;

        let mut form = Params::new();
        form.push("instance_token", instance_token)
            .push("account_href", hrefs::account(account_id));

        self.http().post(hrefs::SESSION_INSTANCE, &form).await?;
        info!("Opened instance session for account {} at {}", account_id, self.base_url());
        Ok(())
    }

    /// Current session
    pub async fn session(&self) -> Result<Session, RightScaleError> {
        debug!("Fetching session");
        self.fetch(hrefs::SESSION, &Params::new()).await
    }

    /// Accounts a user can open sessions against; needs no session
    pub async fn accounts(&self, email: &str, password: &str) -> Result<Vec<Account>, RightScaleError> {
        require_value("email", email)?;
        require_value("password", password)?;

        let mut query = Params::new();
        query.push("email", email).push("password", password);

        debug!("Listing accounts for session user");
        self.list(hrefs::SESSION_ACCOUNTS, &query).await
    }

    /// The instance an instance session was opened for
    pub async fn instance_session(&self) -> Result<Instance, RightScaleError> {
        debug!("Fetching instance session");
        self.fetch(hrefs::SESSION_INSTANCE, &Params::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_requires_account_id() {
        let mut config = ClientConfig::new("http://127.0.0.1:9");
        config.email = Some("ops@example.com".into());
        config.password = Some("secret".into());

        let err = RightScaleClient::connect(config).await.unwrap_err();
        assert!(matches!(err, RightScaleError::Config(_)));
    }

    #[tokio::test]
    async fn connect_requires_credentials() {
        let mut config = ClientConfig::new("http://127.0.0.1:9");
        config.account_id = Some("1234".into());

        let err = RightScaleClient::connect(config).await.unwrap_err();
        assert!(matches!(err, RightScaleError::Config(ref msg) if msg.contains("no credentials")));
    }

    #[tokio::test]
    async fn blank_password_is_rejected_locally() {
        let client = RightScaleClient::with_url("http://127.0.0.1:9").unwrap();
        let err = client.login("ops@example.com", " ", "1234").await.unwrap_err();
        assert!(matches!(err, RightScaleError::MissingParameter(ref p) if p == "password"));
    }
}
