pub mod manager;
pub mod reference;
pub mod store;

pub use manager::{AssetManager, PolicyOptions};
pub use store::AssetStore;

use curator_plugin_sdk::ManagerPlugin;

/// Registration entry point invoked by the host's loader.
pub fn create_plugin() -> Box<dyn ManagerPlugin> {
    Box::new(AssetManager::with_sample_store())
}

/// Returns the crate version baked in at compile time.
pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_plugin_sdk::Capability;

    #[test]
    fn factory_returns_a_ready_manager() {
        let plugin = create_plugin();
        assert_eq!(plugin.identifier(), manager::IDENTIFIER);
        assert!(plugin.is_entity_reference_string("my_asset_manager:///anAsset"));
        assert!(plugin.has_capability(Capability::Resolution));
    }
}
