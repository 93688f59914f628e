use crate::utils::error::ConfigError;
use url::Url;

pub type Result<T> = std::result::Result<T, ConfigError>;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Checks that `url_str` parses and uses one of `allowed_schemes`.
pub fn validate_url(field_name: &str, url_str: &str, allowed_schemes: &[&str]) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) if allowed_schemes.contains(&url.scheme()) => Ok(()),
        Ok(url) => Err(invalid(
            field_name,
            url_str,
            format!(
                "Unsupported URL scheme: {}. Allowed schemes: {}",
                url.scheme(),
                allowed_schemes.join(", ")
            ),
        )),
        Err(e) => Err(invalid(field_name, url_str, format!("Invalid URL format: {}", e))),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}
