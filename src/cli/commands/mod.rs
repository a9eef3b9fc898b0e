pub mod launch;
pub mod resolve;
pub mod serve;
pub mod sign;
pub mod ticker;

use crate::config::AppConfig;
use crate::errors::AppResult;
use serde::Serialize;
use std::path::Path;

/// Load configuration from an explicit file or the default search path
pub(crate) fn load_config(path: Option<&Path>) -> AppResult<AppConfig> {
    Ok(AppConfig::load_from(path)?)
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
