//! Launch directive parsing
//!
//! A cast asks for a launch by mentioning the launcher account followed by the
//! `launch` command and a `$`-prefixed symbol, e.g. `@launcher launch $FOO`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref DIRECTIVE: Regex =
        Regex::new(r"@launcher launch \$([a-zA-Z0-9]+)").expect("directive pattern is valid");
}

/// A recognised launch request extracted from cast text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchDirective {
    pub ticker: String,
}

/// Extract the ticker symbol from the first directive in `text`
///
/// The symbol is returned exactly as written. Text without a directive yields
/// `None`, which is not an error.
pub fn extract_ticker(text: &str) -> Option<String> {
    DIRECTIVE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse `text` into a [`LaunchDirective`]
pub fn parse_directive(text: &str) -> Option<LaunchDirective> {
    extract_ticker(text).map(|ticker| LaunchDirective { ticker })
}
