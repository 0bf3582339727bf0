use std::collections::BTreeMap;

use curator_plugin_sdk::{vocabulary, EntityReference, TraitSet};

/// Read-only lookup tables backing the manager.
///
/// Injected into the manager at construction so the resolution algorithm
/// stays untouched when a real backend replaces these tables. Keys are
/// unique full reference strings; nothing mutates after construction.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    trait_sets: BTreeMap<String, TraitSet>,
    locations: BTreeMap<String, String>,
}

impl AssetStore {
    pub fn new(
        trait_sets: impl IntoIterator<Item = (String, TraitSet)>,
        locations: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            trait_sets: trait_sets.into_iter().collect(),
            locations: locations.into_iter().collect(),
        }
    }

    /// The bundled demonstration catalog: three assets with filesystem
    /// locations, the second of which doubles as a config entity.
    pub fn sample() -> Self {
        let entity_traits: TraitSet = [
            vocabulary::ENTITY.to_string(),
            vocabulary::LOCATABLE_CONTENT.to_string(),
        ]
        .into();
        let mut config_entity_traits = entity_traits.clone();
        config_entity_traits.insert(vocabulary::CONFIG.to_string());

        Self::new(
            [
                ("my_asset_manager:///anAsset".into(), entity_traits.clone()),
                ("my_asset_manager:///anAsset2".into(), config_entity_traits),
                ("my_asset_manager:///anAsset3".into(), entity_traits),
            ],
            [
                (
                    "my_asset_manager:///anAsset".into(),
                    "file:///some/filesystem/path".into(),
                ),
                (
                    "my_asset_manager:///anAsset2".into(),
                    "file:///some/filesystem/path2".into(),
                ),
                (
                    "my_asset_manager:///anAsset3".into(),
                    "file:///some/filesystem/path3".into(),
                ),
            ],
        )
    }

    /// The traits an entity is composed of, if the entity is known.
    pub fn traits_of(&self, reference: &EntityReference) -> Option<&TraitSet> {
        self.trait_sets.get(reference.as_str())
    }

    /// The content location of an entity, if the entity is known.
    pub fn location_of(&self, reference: &EntityReference) -> Option<&str> {
        self.locations.get(reference.as_str()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_store_knows_its_three_assets() {
        let store = AssetStore::sample();
        for suffix in ["anAsset", "anAsset2", "anAsset3"] {
            let reference = EntityReference::from(format!("my_asset_manager:///{suffix}"));
            assert!(store.location_of(&reference).is_some(), "{suffix}");
            assert!(store.traits_of(&reference).is_some(), "{suffix}");
        }
        let missing = EntityReference::from("my_asset_manager:///missing_entity");
        assert_eq!(store.location_of(&missing), None);
        assert_eq!(store.traits_of(&missing), None);
    }

    #[test]
    fn only_the_second_asset_is_a_config_entity() {
        let store = AssetStore::sample();
        let config = EntityReference::from("my_asset_manager:///anAsset2");
        let plain = EntityReference::from("my_asset_manager:///anAsset");
        assert!(store
            .traits_of(&config)
            .unwrap()
            .contains(vocabulary::CONFIG));
        assert!(!store.traits_of(&plain).unwrap().contains(vocabulary::CONFIG));
    }
}
