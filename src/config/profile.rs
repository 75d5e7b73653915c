//! Zendesk profile configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// A Zendesk profile configuration.
///
/// Profiles store connection details for a Zendesk account.
/// API tokens are stored separately in the OS keychain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The Zendesk subdomain, e.g. `acme` for `https://acme.zendesk.com`.
    pub subdomain: String,

    /// The agent's email address, used with the API token.
    pub email: String,
}

impl Profile {
    /// Create a new profile.
    #[cfg(test)]
    pub fn new(name: String, subdomain: String, email: String) -> Self {
        Self {
            name,
            subdomain,
            email,
        }
    }

    /// The API base URL for this profile's account.
    pub fn base_url(&self) -> String {
        format!("https://{}.zendesk.com", self.subdomain)
    }

    /// Validate this profile.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.subdomain.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': subdomain cannot be empty",
                self.name
            )));
        }

        let valid_subdomain = self
            .subdomain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !self.subdomain.starts_with('-')
            && !self.subdomain.ends_with('-');
        if !valid_subdomain {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': '{}' is not a valid subdomain",
                self.name, self.subdomain
            )));
        }

        if self.email.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': email cannot be empty",
                self.name
            )));
        }

        if !self.email.contains('@') {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': '{}' does not appear to be a valid email address",
                self.name, self.email
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, subdomain: &str, email: &str) -> Profile {
        Profile::new(name.to_string(), subdomain.to_string(), email.to_string())
    }

    #[test]
    fn test_valid_profile() {
        let profile = profile("work", "acme", "agent@acme.com");
        assert!(profile.validate().is_ok());
        assert_eq!(profile.base_url(), "https://acme.zendesk.com");
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = profile("", "acme", "agent@acme.com").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("name cannot be empty"));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let result = profile("my work", "acme", "agent@acme.com").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cannot contain whitespace"));
    }

    #[test]
    fn test_invalid_subdomain_rejected() {
        for subdomain in ["", "acme.zendesk.com", "-acme", "acme/x"] {
            let result = profile("work", subdomain, "agent@acme.com").validate();
            assert!(result.is_err(), "subdomain {:?} should be rejected", subdomain);
        }
    }

    #[test]
    fn test_hyphenated_subdomain_accepted() {
        assert!(profile("work", "acme-support", "agent@acme.com")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let result = profile("work", "acme", "not-an-email").validate();
        assert!(result.unwrap_err().to_string().contains("valid email"));

        let result = profile("work", "acme", "").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("email cannot be empty"));
    }

    #[test]
    fn test_profile_serialization() {
        let profile = profile("work", "acme", "agent@acme.com");

        let toml_str = toml::to_string(&profile).unwrap();
        let parsed: Profile = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, profile);
    }
}
