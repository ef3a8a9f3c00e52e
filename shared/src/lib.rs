pub mod configuration;
pub mod observability;
pub mod utils;
