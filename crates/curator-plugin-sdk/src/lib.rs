//! Host-side contract for asset-manager plugins.
//!
//! Hosts drive managers exclusively through [`ManagerPlugin`]; managers
//! implement it and hand the host a boxed instance via their registration
//! factory. All batch operations share one contract: exactly one callback
//! invocation per input index, in input order, on the caller's thread,
//! before the call returns.

pub mod access;
pub mod data;
pub mod error;
pub mod manifest;
pub mod vocabulary;

pub use access::{Access, Capability};
pub use data::{EntityReference, TraitSet, TraitsData};
pub use error::{BatchElementError, ErrorKind, PluginError};
pub use manifest::PluginManifest;

use std::collections::BTreeMap;

use serde_json::Value;

/// Mapping returned by [`ManagerPlugin::info`].
pub type InfoMap = BTreeMap<String, Value>;

/// Settings mapping handed to [`ManagerPlugin::initialize`].
pub type Settings = serde_json::Map<String, Value>;

/// [`InfoMap`] key whose value is the manager's entity-reference prefix.
///
/// When present, hosts may short-circuit `is_entity_reference_string` with
/// a plain string-prefix comparison and never enter the plugin at all.
pub const INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX: &str = "entityReferencesMatchPrefix";

/// Canonical manager trait implemented by asset-manager plugins.
pub trait ManagerPlugin: Send + Sync + 'static {
    /// Stable reverse-domain identifier for this manager.
    fn identifier(&self) -> &str;

    /// Human-readable name for UI display.
    fn display_name(&self) -> &str;

    fn version(&self) -> semver::Version;

    /// Static facts about the manager, e.g. the reference-prefix hint.
    fn info(&self) -> InfoMap;

    /// Completes setup with host-supplied settings.
    ///
    /// Construction must stay cheap; anything expensive belongs here.
    fn initialize(&mut self, settings: Settings) -> Result<(), PluginError>;

    fn has_capability(&self, capability: Capability) -> bool;

    /// True iff `candidate` is recognized as one of this manager's
    /// references. A lightweight textual check; no backend calls.
    fn is_entity_reference_string(&self, candidate: &str) -> bool;

    /// Declares which of the queried trait sets this manager can service
    /// under `access`. One output per input, in order.
    fn management_policy(&self, trait_sets: &[TraitSet], access: Access) -> Vec<TraitsData>;

    /// Resolves the requested traits' data for each reference.
    fn resolve(
        &self,
        references: &[EntityReference],
        requested_traits: &TraitSet,
        access: Access,
        on_success: &mut dyn FnMut(usize, TraitsData),
        on_error: &mut dyn FnMut(usize, BatchElementError),
    );

    /// Reports the full trait set each referenced entity is composed of.
    fn entity_traits(
        &self,
        references: &[EntityReference],
        access: Access,
        on_success: &mut dyn FnMut(usize, TraitSet),
        on_error: &mut dyn FnMut(usize, BatchElementError),
    );
}
