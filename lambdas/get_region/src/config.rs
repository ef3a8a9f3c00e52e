use shared::configuration::{required_env_var, ConfigurationError};

#[derive(Debug)]
pub(crate) struct Config {
    pub aws_region: String,
}

impl Config {
    /// Fails when `AWS_REGION` is absent. There is no fallback region, and
    /// the value is passed on exactly as set.
    pub fn load() -> Result<Self, ConfigurationError> {
        Ok(Config {
            aws_region: required_env_var("AWS_REGION")?,
        })
    }
}
