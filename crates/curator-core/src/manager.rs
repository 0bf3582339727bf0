use std::collections::BTreeSet;

use curator_plugin_sdk::{
    vocabulary, Access, BatchElementError, Capability, EntityReference, InfoMap, ManagerPlugin,
    PluginError, Settings, TraitSet, TraitsData, INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX,
};

use crate::{reference::ReferenceValidator, store::AssetStore};

/// Stable reverse-domain identifier reported to hosts.
pub const IDENTIFIER: &str = "myorg.manager.my_asset_manager";

pub const DISPLAY_NAME: &str = "My Asset Manager";

const READ_ONLY_MESSAGE: &str = "Entities are read-only";
const MALFORMED_MESSAGE: &str = "Entity identifier is malformed";

/// Tunables for [`ManagerPlugin::management_policy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyOptions {
    /// Also grant a managed policy to read trait sets that carry the
    /// entity trait, not just locatable content. Historical manager
    /// versions disagree on this, so it is a knob rather than a constant.
    pub policy_covers_entity_trait: bool,
}

/// The manager binding: validates references, consults the backing store,
/// and reports per-item results through the host's callback channels.
///
/// Read-only by design; every write-access batch is rejected wholesale.
/// All operations are synchronous and touch no state besides the injected
/// store, so a call is a pure function of its inputs.
pub struct AssetManager {
    validator: ReferenceValidator,
    store: AssetStore,
    capabilities: BTreeSet<Capability>,
    policy: PolicyOptions,
}

impl AssetManager {
    pub fn new(store: AssetStore) -> Self {
        Self::with_options(store, PolicyOptions::default())
    }

    pub fn with_options(store: AssetStore, policy: PolicyOptions) -> Self {
        // The capability set is fixed for the lifetime of the manager;
        // compute it once and answer has_capability by membership.
        let capabilities = [
            Capability::EntityReferenceIdentification,
            Capability::ManagementPolicyQueries,
            Capability::Resolution,
            Capability::EntityTraitIntrospection,
        ]
        .into();
        Self {
            validator: ReferenceValidator::default(),
            store,
            capabilities,
            policy,
        }
    }

    /// A manager over the bundled demonstration catalog.
    pub fn with_sample_store() -> Self {
        Self::new(AssetStore::sample())
    }

    /// Emits the same error at every index. Used for batch-level
    /// preconditions, which fail all items identically.
    fn reject_batch(
        references: &[EntityReference],
        error: BatchElementError,
        on_error: &mut dyn FnMut(usize, BatchElementError),
    ) {
        for idx in 0..references.len() {
            on_error(idx, error.clone());
        }
    }
}

impl ManagerPlugin for AssetManager {
    fn identifier(&self) -> &str {
        IDENTIFIER
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    fn version(&self) -> semver::Version {
        semver::Version::parse(env!("CARGO_PKG_VERSION")).unwrap_or_else(|_| {
            semver::Version::new(0, 0, 0)
        })
    }

    fn info(&self) -> InfoMap {
        // The prefix hint lets hosts pre-filter reference strings with a
        // plain string comparison, never entering the plugin.
        InfoMap::from([(
            INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX.to_string(),
            serde_json::Value::from(self.validator.prefix()),
        )])
    }

    fn initialize(&mut self, settings: Settings) -> Result<(), PluginError> {
        if !settings.is_empty() {
            return Err(PluginError::Configuration(format!(
                "{DISPLAY_NAME} takes no settings, but {} were supplied",
                settings.len()
            )));
        }
        tracing::debug!(manager = IDENTIFIER, "manager initialized");
        Ok(())
    }

    fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn is_entity_reference_string(&self, candidate: &str) -> bool {
        self.validator.is_entity_reference_string(candidate)
    }

    fn management_policy(&self, trait_sets: &[TraitSet], access: Access) -> Vec<TraitsData> {
        trait_sets
            .iter()
            .map(|trait_set| {
                let mut policy = TraitsData::new();
                let covered = trait_set.contains(vocabulary::LOCATABLE_CONTENT)
                    || (self.policy.policy_covers_entity_trait
                        && trait_set.contains(vocabulary::ENTITY));
                if access == Access::Read && covered {
                    vocabulary::imbue_managed(&mut policy);
                    vocabulary::imbue_locatable_content(&mut policy);
                }
                policy
            })
            .collect()
    }

    fn resolve(
        &self,
        references: &[EntityReference],
        requested_traits: &TraitSet,
        access: Access,
        on_success: &mut dyn FnMut(usize, TraitsData),
        on_error: &mut dyn FnMut(usize, BatchElementError),
    ) {
        tracing::debug!(count = references.len(), ?access, "resolving batch");

        if access != Access::Read {
            Self::reject_batch(references, BatchElementError::access(READ_ONLY_MESSAGE), on_error);
            return;
        }

        // Locatable content is the only trait this manager can supply
        // data for; if it wasn't asked for, skip the store entirely.
        if !requested_traits.contains(vocabulary::LOCATABLE_CONTENT) {
            for idx in 0..references.len() {
                on_success(idx, TraitsData::new());
            }
            return;
        }

        for (idx, reference) in references.iter().enumerate() {
            if self.validator.is_malformed(reference) {
                on_error(idx, BatchElementError::malformed(MALFORMED_MESSAGE));
            } else if let Some(url) = self.store.location_of(reference) {
                let mut result = TraitsData::new();
                vocabulary::set_location(&mut result, url);
                on_success(idx, result);
            } else {
                on_error(
                    idx,
                    BatchElementError::resolution(format!("Entity '{reference}' not found")),
                );
            }
        }
    }

    fn entity_traits(
        &self,
        references: &[EntityReference],
        access: Access,
        on_success: &mut dyn FnMut(usize, TraitSet),
        on_error: &mut dyn FnMut(usize, BatchElementError),
    ) {
        tracing::debug!(count = references.len(), ?access, "introspecting batch");

        // A write-mode query asks for the minimal set required to publish;
        // this manager is read-only, so there is no such set to give.
        if access != Access::Read {
            Self::reject_batch(references, BatchElementError::access(READ_ONLY_MESSAGE), on_error);
            return;
        }

        for (idx, reference) in references.iter().enumerate() {
            if self.validator.is_malformed(reference) {
                on_error(idx, BatchElementError::malformed(MALFORMED_MESSAGE));
            } else if let Some(trait_set) = self.store.traits_of(reference) {
                on_success(idx, trait_set.clone());
            } else {
                on_error(
                    idx,
                    BatchElementError::resolution(format!("Entity '{reference}' not found")),
                );
            }
        }
    }
}
