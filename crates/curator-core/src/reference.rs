use curator_plugin_sdk::EntityReference;

/// References handled by this manager start with this string,
/// e.g. `"my_asset_manager:///my_entity_id"`.
pub const REFERENCE_PREFIX: &str = "my_asset_manager:///";

/// Query parameter this manager pretends not to support. A reference can
/// pass the prefix check yet still be malformed because of it.
const UNSUPPORTED_QUERY_PARAM: &str = "?unsupportedQueryParam";

/// Syntactic checks applied to reference strings before any lookup.
///
/// Carries the prefix as a value so a manager built against a different
/// reference scheme reuses the same checks.
#[derive(Debug, Clone)]
pub struct ReferenceValidator {
    prefix: String,
}

impl ReferenceValidator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True iff `candidate` carries this manager's prefix.
    ///
    /// Purely textual; hosts call this often, so no backend access.
    pub fn is_entity_reference_string(&self, candidate: &str) -> bool {
        candidate.starts_with(&self.prefix)
    }

    /// True iff the reference is recognized but syntactically unusable,
    /// independent of whether the backend knows the entity.
    pub fn is_malformed(&self, reference: &EntityReference) -> bool {
        reference.as_str().contains(UNSUPPORTED_QUERY_PARAM)
    }
}

impl Default for ReferenceValidator {
    fn default() -> Self {
        Self::new(REFERENCE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognition_is_exactly_a_prefix_check() {
        let validator = ReferenceValidator::default();
        for (candidate, expected) in [
            ("my_asset_manager:///anAsset", true),
            ("my_asset_manager:///", true),
            ("my_asset_manager://missing-slash", false),
            ("other_manager:///anAsset", false),
            ("", false),
        ] {
            assert_eq!(
                validator.is_entity_reference_string(candidate),
                expected,
                "candidate `{candidate}`"
            );
            assert_eq!(
                validator.is_entity_reference_string(candidate),
                candidate.starts_with(REFERENCE_PREFIX)
            );
        }
    }

    #[test]
    fn unsupported_query_param_is_malformed_despite_valid_prefix() {
        let validator = ReferenceValidator::default();
        let malformed = EntityReference::from("my_asset_manager:///anAsset?unsupportedQueryParam");
        assert!(validator.is_entity_reference_string(malformed.as_str()));
        assert!(validator.is_malformed(&malformed));

        let well_formed = EntityReference::from("my_asset_manager:///anAsset?otherParam=1");
        assert!(!validator.is_malformed(&well_formed));
    }

    #[test]
    fn custom_prefix_is_honored() {
        let validator = ReferenceValidator::new("vault:///");
        assert!(validator.is_entity_reference_string("vault:///x"));
        assert!(!validator.is_entity_reference_string("my_asset_manager:///x"));
    }
}
