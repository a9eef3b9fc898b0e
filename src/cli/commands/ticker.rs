use super::print_json;
use crate::errors::AppResult;
use crate::ticker::extract_ticker;
use clap::Args;
use serde_json::json;

/// Print the ticker a cast text would launch
#[derive(Args)]
pub struct ExtractTickerCommand {
    pub text: String,
}

impl ExtractTickerCommand {
    pub fn run(&self) -> AppResult<()> {
        print_json(&json!({ "ticker": extract_ticker(&self.text) }))
    }
}
