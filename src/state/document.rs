//! State document types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool version recorded in the placeholder metadata.
pub const INVALID_TOOL_VERSION: &str = "invalid";

/// Version and serial recorded in the placeholder metadata.
pub const INVALID_COUNTER: i64 = -1;

/// Top-level metadata of a state file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMetadata {
    /// State schema version (`version` in the state file).
    pub version: i64,
    /// Terraform release that wrote the state, if recorded.
    #[serde(default)]
    pub terraform_version: Option<String>,
    /// Monotonic write counter.
    pub serial: i64,
}

impl StateMetadata {
    /// Metadata used when no usable state exists.
    pub fn invalid() -> Self {
        Self {
            version: INVALID_COUNTER,
            terraform_version: Some(INVALID_TOOL_VERSION.to_string()),
            serial: INVALID_COUNTER,
        }
    }

    pub fn is_invalid(&self) -> bool {
        *self == Self::invalid()
    }
}

/// Keys a checked resource writes beside the fields of its state entry.
pub const RESERVED_KEYS: &[&str] = &["id", "cost", "security"];

/// How Terraform tracks a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceMode {
    /// Created and owned by Terraform.
    Managed,
    /// Read-only lookup of something Terraform does not own.
    Data,
    /// Any other mode string, kept verbatim.
    Other(String),
}

impl ResourceMode {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceMode::Managed => "managed",
            ResourceMode::Data => "data",
            ResourceMode::Other(mode) => mode,
        }
    }

    pub fn is_managed(&self) -> bool {
        matches!(self, ResourceMode::Managed)
    }
}

impl From<String> for ResourceMode {
    fn from(mode: String) -> Self {
        match mode.as_str() {
            "managed" => ResourceMode::Managed,
            "data" => ResourceMode::Data,
            _ => ResourceMode::Other(mode),
        }
    }
}

impl From<ResourceMode> for String {
    fn from(mode: ResourceMode) -> Self {
        match mode {
            ResourceMode::Other(mode) => mode,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ResourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the state's `resources` array, as written by Terraform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResource {
    pub mode: ResourceMode,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Every other field of the entry (`provider`, `instances`, ...).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RawResource {
    pub fn new(mode: ResourceMode, resource_type: &str, name: &str) -> Self {
        Self {
            mode,
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            module: None,
            attributes: Map::new(),
        }
    }

    pub fn with_module(mut self, module: &str) -> Self {
        self.module = Some(module.to_string());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Move attributes named like a [`RESERVED_KEYS`] entry to
    /// `state_<key>`, returning the new names.
    pub fn rename_reserved_keys(&mut self) -> Vec<String> {
        let mut renamed = Vec::new();
        for key in RESERVED_KEYS {
            let Some(value) = self.attributes.remove(*key) else {
                continue;
            };
            let mut target = format!("state_{key}");
            while self.attributes.contains_key(&target) {
                target.insert_str(0, "state_");
            }
            self.attributes.insert(target.clone(), value);
            renamed.push(target);
        }
        renamed
    }

    /// Attribute objects of every recorded instance.
    ///
    /// Resources without an `instances` array expose their own attribute
    /// payload as a single pseudo-instance.
    pub fn instance_attributes(&self) -> Vec<&Value> {
        match self.attributes.get("instances") {
            Some(Value::Array(instances)) => instances
                .iter()
                .filter_map(|instance| instance.get("attributes"))
                .collect(),
            _ => self.attributes.get("attributes").into_iter().collect(),
        }
    }

    /// Number of instances Terraform tracks for this resource (at least one).
    pub fn instance_count(&self) -> usize {
        match self.attributes.get("instances") {
            Some(Value::Array(instances)) if !instances.is_empty() => instances.len(),
            _ => 1,
        }
    }
}

/// Parsed state file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateDocument {
    #[serde(flatten)]
    pub metadata: StateMetadata,
    pub resources: Vec<RawResource>,
}

impl StateDocument {
    pub fn new(metadata: StateMetadata, resources: Vec<RawResource>) -> Self {
        Self {
            metadata,
            resources,
        }
    }

    /// Placeholder document for missing or undecodable state.
    pub fn invalid() -> Self {
        Self::new(StateMetadata::invalid(), Vec::new())
    }

    pub fn is_invalid(&self) -> bool {
        self.metadata.is_invalid() && self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_metadata_values() {
        let metadata = StateMetadata::invalid();
        assert_eq!(metadata.version, -1);
        assert_eq!(metadata.serial, -1);
        assert_eq!(metadata.terraform_version.as_deref(), Some("invalid"));
        assert!(metadata.is_invalid());
        assert!(!StateMetadata::default().is_invalid());
    }

    #[test]
    fn test_metadata_serializes_state_field_names() {
        let metadata = StateMetadata {
            version: 4,
            terraform_version: None,
            serial: 7,
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value, json!({"version": 4, "terraform_version": null, "serial": 7}));
    }

    #[test]
    fn test_resource_mode_from_string() {
        assert_eq!(ResourceMode::from("managed".to_string()), ResourceMode::Managed);
        assert_eq!(ResourceMode::from("data".to_string()), ResourceMode::Data);
        assert_eq!(
            ResourceMode::from("ephemeral".to_string()),
            ResourceMode::Other("ephemeral".to_string())
        );
    }

    #[test]
    fn test_resource_mode_keeps_unknown_string() {
        let mode: ResourceMode = serde_json::from_str("\"ephemeral\"").unwrap();
        assert!(!mode.is_managed());
        assert_eq!(serde_json::to_string(&mode).unwrap(), "\"ephemeral\"");
        assert_eq!(mode.to_string(), "ephemeral");
    }

    #[test]
    fn test_raw_resource_roundtrips_extra_fields() {
        let entry = json!({
            "mode": "managed",
            "type": "aws_s3_bucket",
            "name": "logs",
            "provider": "provider[\"registry.terraform.io/hashicorp/aws\"]",
            "instances": [{"attributes": {"acl": "private"}}]
        });
        let resource: RawResource = serde_json::from_value(entry.clone()).unwrap();
        assert_eq!(resource.resource_type, "aws_s3_bucket");
        assert!(resource.module.is_none());
        assert!(resource.attributes.contains_key("provider"));
        assert_eq!(serde_json::to_value(&resource).unwrap(), entry);
    }

    #[test]
    fn test_instance_attributes() {
        let resource = RawResource::new(ResourceMode::Managed, "aws_instance", "web")
            .with_attribute(
                "instances",
                json!([
                    {"attributes": {"instance_type": "t3.micro"}},
                    {"attributes": {"instance_type": "t3.large"}}
                ]),
            );
        let attrs = resource.instance_attributes();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1]["instance_type"], "t3.large");
        assert_eq!(resource.instance_count(), 2);
    }

    #[test]
    fn test_instance_attributes_without_instances() {
        let resource = RawResource::new(ResourceMode::Managed, "x", "a")
            .with_attribute("attributes", json!({"public": true}));
        assert_eq!(resource.instance_attributes(), vec![&json!({"public": true})]);
        assert_eq!(resource.instance_count(), 1);

        let bare = RawResource::new(ResourceMode::Managed, "x", "b");
        assert!(bare.instance_attributes().is_empty());
    }

    #[test]
    fn test_invalid_document() {
        let doc = StateDocument::invalid();
        assert!(doc.is_invalid());
        assert!(doc.resources.is_empty());
    }

    #[test]
    fn test_rename_reserved_keys() {
        let mut resource = RawResource::new(ResourceMode::Managed, "x", "a")
            .with_attribute("id", json!("legacy"))
            .with_attribute("security", json!({"level": "high"}))
            .with_attribute("state_security", json!(1))
            .with_attribute("provider", json!("aws"));

        let renamed = resource.rename_reserved_keys();
        assert_eq!(renamed, vec!["state_id", "state_state_security"]);
        assert_eq!(resource.attributes["state_id"], "legacy");
        assert_eq!(resource.attributes["state_security"], 1);
        assert_eq!(resource.attributes["state_state_security"], json!({"level": "high"}));
        assert!(!resource.attributes.contains_key("id"));
        assert!(resource.attributes.contains_key("provider"));
    }

    #[test]
    fn test_rename_reserved_keys_without_clash() {
        let mut resource = RawResource::new(ResourceMode::Managed, "x", "a");
        assert!(resource.rename_reserved_keys().is_empty());
        assert!(resource.attributes.is_empty());
    }
}
