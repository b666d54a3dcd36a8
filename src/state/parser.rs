//! Tolerant state decoding.
//!
//! Report generation never fails because of the state file itself: anything
//! that does not decode to a JSON object becomes the placeholder document.

use super::document::{RawResource, StateDocument, StateMetadata};
use crate::error::{ReportError, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Input handed to the parser.
#[derive(Debug, Clone)]
pub enum StateSource<'a> {
    /// Already-decoded document; passed through untouched.
    Parsed(StateDocument),
    /// Raw bytes as read from storage.
    Raw(&'a [u8]),
    /// Raw text.
    Text(&'a str),
    /// No state exists yet.
    Missing,
}

impl<'a> From<Option<&'a [u8]>> for StateSource<'a> {
    fn from(raw: Option<&'a [u8]>) -> Self {
        match raw {
            Some(bytes) => StateSource::Raw(bytes),
            None => StateSource::Missing,
        }
    }
}

/// Parser for Terraform state files.
#[derive(Debug, Default, Clone, Copy)]
pub struct StateParser;

impl StateParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode any state source, substituting the placeholder document for
    /// missing or malformed input.
    pub fn parse(&self, source: StateSource<'_>) -> StateDocument {
        match source {
            StateSource::Parsed(document) => document,
            StateSource::Raw(bytes) => self.parse_or_invalid(bytes),
            StateSource::Text(text) => self.parse_or_invalid(text.as_bytes()),
            StateSource::Missing => {
                debug!("No state available, using placeholder document");
                StateDocument::invalid()
            }
        }
    }

    /// Decode raw state, reporting malformed input as an error.
    pub fn parse_strict(&self, content: &[u8]) -> Result<StateDocument> {
        let value: Value = serde_json::from_slice(content)
            .map_err(|e| ReportError::MalformedState(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build a document from decoded JSON.
    pub fn from_value(value: Value) -> Result<StateDocument> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(ReportError::MalformedState(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )));
            }
        };

        let metadata = read_metadata(&fields);
        let resources = match fields.remove("resources") {
            Some(Value::Array(entries)) => decode_resources(entries),
            Some(other) => {
                warn!(
                    found = json_kind(&other),
                    "State field `resources` is not an array, ignoring it"
                );
                Vec::new()
            }
            None => Vec::new(),
        };

        debug!(
            version = metadata.version,
            serial = metadata.serial,
            resources = resources.len(),
            "Parsed state document"
        );
        Ok(StateDocument::new(metadata, resources))
    }

    fn parse_or_invalid(&self, content: &[u8]) -> StateDocument {
        self.parse_strict(content).unwrap_or_else(|err| {
            warn!(error = %err, "Unusable state, using placeholder document");
            StateDocument::invalid()
        })
    }
}

fn read_metadata(fields: &Map<String, Value>) -> StateMetadata {
    StateMetadata {
        version: fields.get("version").and_then(Value::as_i64).unwrap_or(0),
        terraform_version: fields
            .get("terraform_version")
            .and_then(Value::as_str)
            .map(str::to_owned),
        serial: fields.get("serial").and_then(Value::as_i64).unwrap_or(0),
    }
}

fn decode_resources(entries: Vec<Value>) -> Vec<RawResource> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| decode_resource(index, entry))
        .collect()
}

/// Decode one `resources` entry.
///
/// Managed entries are always kept: a missing name becomes
/// `resources[<index>]` and identity fields that are not strings are kept as
/// their JSON text, so the checkers still see the resource.
fn decode_resource(index: usize, entry: Value) -> Option<RawResource> {
    let mut fields = match entry {
        Value::Object(fields) => fields,
        other => {
            warn!(
                index,
                found = json_kind(&other),
                "Skipping state resource that is not an object"
            );
            return None;
        }
    };

    if fields.get("mode").and_then(Value::as_str) == Some("managed") {
        repair_managed(index, &mut fields);
    }

    match serde_json::from_value::<RawResource>(Value::Object(fields)) {
        Ok(resource) => Some(resource),
        Err(e) => {
            warn!(index, error = %e, "Skipping undecodable state resource");
            None
        }
    }
}

fn repair_managed(index: usize, fields: &mut Map<String, Value>) {
    for key in ["type", "name", "module"] {
        let replacement = match fields.get(key) {
            None | Some(Value::String(_)) => continue,
            Some(Value::Null) if key == "module" => continue,
            Some(Value::Null) => None,
            Some(other) => Some(other.to_string()),
        };
        warn!(index, field = key, "Managed state resource has a non-string field");
        match replacement {
            Some(text) => fields.insert(key.to_string(), Value::String(text)),
            None => fields.remove(key),
        };
    }

    if !fields.contains_key("name") {
        let fallback = format!("resources[{index}]");
        warn!(index, name = %fallback, "Managed state resource has no name");
        fields.insert("name".to_string(), Value::String(fallback));
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
