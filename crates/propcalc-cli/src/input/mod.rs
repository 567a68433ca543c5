pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Deserialise a command input from `--input`, falling back to piped stdin.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_input(path);
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(serde_json::from_value(data)?),
        None => Err("--input is required (or pipe JSON on stdin)".into()),
    }
}
