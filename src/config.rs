// Binding document loading
//
// The binding source is a JSON document with two top-level collections:
// action definitions (name -> metadata, currently unused beyond
// existence) and bindings (device-class token -> input-code token ->
// ordered list of action names). Loading fails softly: malformed
// entries are skipped with a diagnostic and the table keeps whatever
// loaded successfully. Only an unopenable or unparseable document is
// an error.

use crate::binding::BindingTable;
use crate::event::{DeviceClass, InputCode};
use anyhow::Result;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Binding document errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read bindings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse bindings document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level shape of a binding document
///
/// Both collections default to empty so a partial document still loads.
#[derive(Debug, Default, Deserialize)]
struct BindingDocument {
    #[serde(default)]
    actions: Map<String, Value>,
    #[serde(default)]
    bindings: Map<String, Value>,
}

/// Load a binding table from a JSON file on disk
pub fn load_bindings_file<P: AsRef<Path>>(path: P) -> Result<BindingTable> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let table = parse_bindings(&text)?;
    info!(
        "Loaded {} bindings from {}",
        table.len(),
        path.to_string_lossy()
    );
    Ok(table)
}

/// Parse a binding table from an in-memory JSON document
pub fn parse_bindings(text: &str) -> Result<BindingTable> {
    let doc: BindingDocument = serde_json::from_str(text).map_err(ConfigError::Parse)?;
    let mut builder = BindingTable::builder();

    // Metadata is accepted but unused beyond the action's existence
    for name in doc.actions.keys() {
        builder.define_action(name.as_str());
    }

    for (device_token, device_bindings) in &doc.bindings {
        let device: DeviceClass = match device_token.parse() {
            Ok(device) => device,
            Err(_) => {
                warn!("Skipping bindings for unknown device class '{}'", device_token);
                continue;
            }
        };

        let entries = match device_bindings.as_object() {
            Some(entries) => entries,
            None => {
                warn!("Skipping bindings for '{}': expected an object", device_token);
                continue;
            }
        };

        for (code_token, action_names) in entries {
            let code: i32 = match code_token.parse() {
                Ok(code) => code,
                Err(_) => {
                    warn!(
                        "Skipping {} binding with invalid input code '{}'",
                        device_token, code_token
                    );
                    continue;
                }
            };

            let names = match action_names.as_array() {
                Some(names) => names,
                None => {
                    warn!(
                        "Skipping {}:{} binding: expected an array of action names",
                        device_token, code_token
                    );
                    continue;
                }
            };

            for name in names {
                match name.as_str() {
                    Some(name) => {
                        // Undefined actions are dropped inside the builder
                        builder.bind(InputCode::new(device, code), name);
                    }
                    None => {
                        warn!(
                            "Skipping non-string action name in {}:{} binding",
                            device_token, code_token
                        );
                    }
                }
            }
        }
    }

    Ok(builder.build())
}
