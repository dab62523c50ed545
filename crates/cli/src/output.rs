//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::json;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print `{"success": true, <key>: value}`.
pub fn print_success_json<T: Serialize>(key: &str, value: &T) {
    let mut output = serde_json::Map::new();
    output.insert("success".to_string(), json!(true));
    match serde_json::to_value(value) {
        Ok(v) => {
            output.insert(key.to_string(), v);
        }
        Err(e) => {
            eprintln!("Failed to format {key} as JSON: {e}");
            return;
        }
    }
    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format {key} as JSON: {e}"),
    }
}

pub fn heading(text: &str) {
    println!("{}", text.bold());
}
