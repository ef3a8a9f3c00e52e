use shared::configuration::{env_var, required_env_var, ConfigurationError};
use std::net::IpAddr;

const DEFAULT_PRINCIPAL_ID: &str = "ip-restriction";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub allowed_source_ips: Vec<String>,
    pub principal_id: String,
}

impl Config {
    /// `ALLOWED_SOURCE_IPS` is a comma separated list of CIDR blocks and must
    /// name at least one. `PRINCIPAL_ID` is optional.
    pub fn load() -> Result<Self, ConfigurationError> {
        let allowed_source_ips = parse_source_ips(&required_env_var("ALLOWED_SOURCE_IPS")?)?;
        let principal_id =
            env_var("PRINCIPAL_ID")?.unwrap_or_else(|| DEFAULT_PRINCIPAL_ID.to_string());

        Ok(Config {
            allowed_source_ips,
            principal_id,
        })
    }
}

fn parse_source_ips(raw: &str) -> Result<Vec<String>, ConfigurationError> {
    let ranges: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|range| !range.is_empty())
        .map(str::to_string)
        .collect();

    if ranges.is_empty() {
        return Err(ConfigurationError::Invalid(
            "ALLOWED_SOURCE_IPS must list at least one CIDR block".to_string(),
        ));
    }
    if let Some(bad) = ranges.iter().find(|range| !is_cidr(range)) {
        return Err(ConfigurationError::Invalid(format!(
            "ALLOWED_SOURCE_IPS contains an invalid CIDR block: {bad}"
        )));
    }

    Ok(ranges)
}

// Host bits are allowed to be set, IAM ignores them.
fn is_cidr(range: &str) -> bool {
    let Some((address, prefix)) = range.split_once('/') else {
        return false;
    };
    let (Ok(address), Ok(prefix)) = (address.parse::<IpAddr>(), prefix.parse::<u8>()) else {
        return false;
    };

    match address {
        IpAddr::V4(_) => prefix <= 32,
        IpAddr::V6(_) => prefix <= 128,
    }
}
