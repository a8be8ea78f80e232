use anyhow::{anyhow, Result};

pub const LOG_FORMATS: &[&str] = &["text", "json"];

pub fn validate_bind_addr(value: &str) -> Result<()> {
    value
        .parse::<std::net::SocketAddr>()
        .map_err(|err| anyhow!("invalid bind_addr '{}': {}", value, err))?;
    Ok(())
}

pub fn validate_log_format(value: &str) -> Result<()> {
    if !LOG_FORMATS.contains(&value) {
        return Err(anyhow!(
            "log_format must be one of {}, got '{}'",
            LOG_FORMATS.join("|"),
            value
        ));
    }
    Ok(())
}
