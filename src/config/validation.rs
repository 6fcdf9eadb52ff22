use crate::config::types::{CatalogConfig, Config, SourceConfig, UserAgentConfig};
use crate::series::GroupId;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_catalog_config(&config.catalog)?;
    Ok(())
}

/// Validates the series layout, timeouts and URL template
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    if config.entries_per_group < 1 {
        return Err(ConfigError::Validation(format!(
            "entries_per_group must be >= 1, got {}",
            config.entries_per_group
        )));
    }

    if config.group_width < 1 || config.group_width > 9 {
        return Err(ConfigError::Validation(format!(
            "group_width must be between 1 and 9, got {}",
            config.group_width
        )));
    }

    let widest = config.max_group.to_string().len();
    if widest > config.group_width {
        return Err(ConfigError::Validation(format!(
            "max_group {} does not fit in group_width {}",
            config.max_group, config.group_width
        )));
    }

    if (u64::from(config.max_group) + 1)
        .checked_mul(config.entries_per_group)
        .is_none()
    {
        return Err(ConfigError::Validation(format!(
            "max_group {} with {} entries per group overflows the entry id space",
            config.max_group, config.entries_per_group
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    validate_template(config)
}

/// Renders the first group and checks the result is an http(s) URL
fn validate_template(config: &SourceConfig) -> Result<(), ConfigError> {
    let template = config.template()?;
    let rendered = template.render(&config.layout(), GroupId::ZERO);

    let url = Url::parse(&rendered).map_err(|e| {
        ConfigError::InvalidTemplate(format!("'{}' renders to '{}': {}", template.pattern(), rendered, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidTemplate(format!(
            "'{}' must use the http or https scheme",
            template.pattern()
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if config
        .header_value()
        .chars()
        .any(|c| c.is_control() || !c.is_ascii())
    {
        return Err(ConfigError::Validation(format!(
            "user-agent '{}' must be printable ASCII",
            config.header_value()
        )));
    }

    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    if config.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "catalog path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
