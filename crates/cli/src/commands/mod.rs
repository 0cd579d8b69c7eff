pub mod doctor;
pub mod generate;
pub mod onboard;
pub mod score;

use std::io::Read;
use std::path::PathBuf;

/// Read the request body from a file, or stdin when no path was given.
pub fn read_request(input: Option<PathBuf>) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let content = match input {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let body = serde_json::from_str(&content).map_err(|e| format!("Request is not valid JSON: {e}"))?;
    Ok(body)
}
