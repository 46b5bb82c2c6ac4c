//! Bring an existing config file up to the current set of keys.

use super::{
    default_bind_address, default_clamp_fee, default_currency, default_port,
    default_separator_char,
};
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Keys every config file should carry, with the value written when absent.
fn expected_keys() -> Vec<(&'static str, Value)> {
    vec![
        ("bind_address", Value::String(default_bind_address())),
        ("port", Value::Number(default_port().into())),
        ("currency", Value::String(default_currency())),
        ("clamp_fee", Value::Number(default_clamp_fee().into())),
        ("separator_char", Value::String(default_separator_char())),
    ]
}

/// Add any missing key with its default value. Existing values are never
/// overwritten. Returns the keys that were added.
pub fn add_missing_keys(path: &Path) -> io::Result<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let mut yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| io::Error::other(format!("Failed to parse {:?}: {}", path, e)))?;

    let Some(map) = yaml.as_mapping_mut() else {
        return Err(io::Error::other(format!(
            "{:?} is not a YAML mapping",
            path
        )));
    };

    let mut added = Vec::new();
    for (key, default) in expected_keys() {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k) {
            map.insert(k, default);
            added.push(key);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&yaml)
            .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}
