use serde::{Deserialize, Serialize};

use crate::access::Capability;

/// On-disk JSON manifest located next to each manager plugin artifact.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PluginManifest {
    pub identifier: String,
    pub display_name: String,
    pub version: String,
    pub description: Option<String>,
    pub capabilities: Vec<Capability>,
}

impl PluginManifest {
    pub fn declares_capability(&self, capability: Capability) -> bool {
        self.capabilities.iter().any(|c| *c == capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_parses_with_camel_case_capabilities() {
        let manifest: PluginManifest = serde_json::from_str(
            r#"{
                "identifier": "myorg.manager.my_asset_manager",
                "display_name": "My Asset Manager",
                "version": "0.1.0",
                "capabilities": ["resolution", "managementPolicyQueries"]
            }"#,
        )
        .unwrap();
        assert!(manifest.declares_capability(Capability::Resolution));
        assert!(!manifest.declares_capability(Capability::EntityTraitIntrospection));
        assert!(manifest.description.is_none());
    }
}
