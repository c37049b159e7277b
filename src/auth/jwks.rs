use jsonwebtoken::jwk::JwkSet;
use thiserror::Error;
use url::Url;

use super::{KeySet, TokenVerifier};
use crate::config::AuthConfig;

#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("Neither JWT_SECRET nor AUTH0_DOMAIN is configured")]
    NotConfigured,

    #[error("Invalid auth domain '{0}'")]
    InvalidDomain(String),

    #[error("Failed to fetch key set from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Location of the published key set for an identity provider domain
pub fn jwks_url(domain: &str) -> Result<Url, KeySetError> {
    let domain = domain
        .trim()
        .trim_start_matches("https://")
        .trim_end_matches('/');

    Url::parse(&format!("https://{}/", domain))
        .and_then(|base| base.join(".well-known/jwks.json"))
        .map_err(|_| KeySetError::InvalidDomain(domain.to_string()))
}

impl TokenVerifier {
    /// Build a verifier from configuration.
    ///
    /// A shared secret wins; otherwise the provider's key set is fetched once.
    pub async fn from_config(config: &AuthConfig) -> Result<Self, KeySetError> {
        let keys = match (&config.jwt_secret, &config.domain) {
            (Some(secret), _) => {
                tracing::info!("Verifying tokens with shared HS256 secret");
                KeySet::shared_secret(secret)
            }
            (None, Some(domain)) => KeySet::Published(fetch_key_set(domain).await?),
            (None, None) => return Err(KeySetError::NotConfigured),
        };

        Ok(TokenVerifier::new(
            keys,
            config.effective_issuer(),
            config.audience.clone(),
        ))
    }
}

async fn fetch_key_set(domain: &str) -> Result<JwkSet, KeySetError> {
    let url = jwks_url(domain)?;
    tracing::info!("Fetching signing keys from {}", url);

    let fetch_err = |source| KeySetError::Fetch {
        url: url.to_string(),
        source,
    };

    let set = reqwest::get(url.clone())
        .await
        .and_then(|response| response.error_for_status())
        .map_err(fetch_err)?
        .json::<JwkSet>()
        .await
        .map_err(fetch_err)?;

    tracing::info!("Loaded {} signing keys", set.keys.len());
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_set_lives_under_well_known() {
        let url = jwks_url("casting.eu.auth0.com").unwrap();
        assert_eq!(url.as_str(), "https://casting.eu.auth0.com/.well-known/jwks.json");

        let url = jwks_url("https://casting.eu.auth0.com/").unwrap();
        assert_eq!(url.as_str(), "https://casting.eu.auth0.com/.well-known/jwks.json");
    }

    #[test]
    fn blank_domain_is_rejected() {
        assert!(matches!(jwks_url(""), Err(KeySetError::InvalidDomain(_))));
    }

    #[tokio::test]
    async fn secret_takes_precedence_over_domain() {
        let config = AuthConfig {
            domain: Some("casting.eu.auth0.com".to_string()),
            audience: Some("casting".to_string()),
            issuer: None,
            jwt_secret: Some("shh".to_string()),
        };
        let verifier = TokenVerifier::from_config(&config).await.unwrap();
        assert!(matches!(verifier.keys, KeySet::Shared(_)));
        assert_eq!(verifier.issuer.as_deref(), Some("https://casting.eu.auth0.com/"));
    }

    #[tokio::test]
    async fn unconfigured_auth_is_an_error() {
        let result = TokenVerifier::from_config(&AuthConfig::default()).await;
        assert!(matches!(result, Err(KeySetError::NotConfigured)));
    }
}
