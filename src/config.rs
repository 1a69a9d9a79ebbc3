//! Run configuration: quoted currency, distributor endpoints and HTTP identity.

use crate::error::{BomError, Result};
use url::Url;

/// User agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "bom_prices/0.1";

/// Avnet storefront used when no override is given
pub const AVNET_BASE_URL: &str = "https://avnetexpress.avnet.com";

/// Currency (and with it the region) that prices are quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Returns the ISO 4217 code (e.g., "USD")
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Regional DigiKey storefront quoting in this currency
    pub fn digikey_base_url(&self) -> &'static str {
        match self {
            Currency::Usd => "https://www.digikey.com",
            Currency::Eur => "https://www.digikey.de",
            Currency::Gbp => "https://www.digikey.co.uk",
        }
    }
}

/// Settings shared by every scraper during one run
#[derive(Debug, Clone)]
pub struct Config {
    pub currency: Currency,
    pub digikey_base_url: String,
    pub avnet_base_url: String,
    pub user_agent: String,
}

impl Config {
    /// Default endpoints for the given currency
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            digikey_base_url: currency.digikey_base_url().to_string(),
            avnet_base_url: AVNET_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Point DigiKey lookups at another host (mirrors, test servers)
    pub fn with_digikey_base_url(mut self, url: &str) -> Result<Self> {
        self.digikey_base_url = validate_base_url(url)?;
        Ok(self)
    }

    /// Point Avnet lookups at another host
    pub fn with_avnet_base_url(mut self, url: &str) -> Result<Self> {
        self.avnet_base_url = validate_base_url(url)?;
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// Base URLs are joined with paths by string formatting, so keep them
/// absolute and without a trailing slash.
fn validate_base_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| BomError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.cannot_be_a_base() {
        return Err(BomError::InvalidUrl {
            url: url.to_string(),
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url.trim_end_matches('/').to_string())
}
