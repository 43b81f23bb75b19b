use crate::config::Config;

/// Startup readiness snapshot for the `status` surface. The store is
/// always configured (its settings are mandatory); OTP and chat degrade
/// when their credentials are absent.
pub struct Health {
    pub identity_configured: bool,
    pub assistant_configured: bool,
}

impl Health {
    pub fn readiness(config: &Config) -> Self {
        Self {
            identity_configured: config.identity_customer_id.is_some()
                && config.identity_auth_token.is_some(),
            assistant_configured: config.ai_api_key.is_some(),
        }
    }
}
