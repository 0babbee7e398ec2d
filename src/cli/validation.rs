//! CLI argument validators used by clap value parsers.

use std::path::PathBuf;

/// Configuration file must exist and be a regular file.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.exists() {
        return Err(format!("configuration file does not exist: {}", value));
    }
    if !path.is_file() {
        return Err(format!("configuration path is not a file: {}", value));
    }
    Ok(path)
}

/// Host must be a resolvable bind address shape: an IP, 'localhost', or a
/// plain hostname.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("host address must not be empty".to_string());
    }
    if value == "localhost" || value.parse::<std::net::IpAddr>().is_ok() {
        return Ok(value.to_string());
    }
    let valid_hostname = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if valid_hostname {
        Ok(value.to_string())
    } else {
        Err(format!("invalid host address: {}", value))
    }
}

pub fn validate_port(value: &str) -> Result<u16, String> {
    let port: u16 = value
        .parse()
        .map_err(|_| format!("port must be a number between 1 and 65535, got '{}'", value))?;
    if port == 0 {
        return Err("port must not be 0".to_string());
    }
    Ok(port)
}
