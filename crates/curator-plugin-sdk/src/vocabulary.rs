//! Shared trait-identifier vocabulary used by hosts and managers.
//!
//! Trait ids are plain strings on the wire; these constants and helpers
//! keep both sides spelling them identically.

use serde_json::Value;

use crate::data::TraitsData;

/// Marks something as an entity known to a manager.
pub const ENTITY: &str = "curator:usage.Entity";

/// The entity has content that can be located by URL.
pub const LOCATABLE_CONTENT: &str = "curator:content.LocatableContent";

/// Property on [`LOCATABLE_CONTENT`] holding the content URL.
pub const LOCATABLE_CONTENT_LOCATION: &str = "location";

/// Policy marker: the queried trait set is managed by this manager.
pub const MANAGED: &str = "curator:managementPolicy.Managed";

/// The entity carries application configuration.
pub const CONFIG: &str = "curator:application.Config";

pub fn imbue_managed(data: &mut TraitsData) {
    data.add_trait(MANAGED);
}

pub fn imbue_locatable_content(data: &mut TraitsData) {
    data.add_trait(LOCATABLE_CONTENT);
}

/// Sets the locatable-content location URL, imbuing the trait if needed.
pub fn set_location(data: &mut TraitsData, url: &str) {
    data.set_property(
        LOCATABLE_CONTENT,
        LOCATABLE_CONTENT_LOCATION,
        Value::String(url.to_string()),
    );
}

pub fn location(data: &TraitsData) -> Option<&str> {
    data.property(LOCATABLE_CONTENT, LOCATABLE_CONTENT_LOCATION)?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_location_round_trips() {
        let mut data = TraitsData::new();
        assert_eq!(location(&data), None);
        set_location(&mut data, "file:///a/b");
        assert!(data.has_trait(LOCATABLE_CONTENT));
        assert_eq!(location(&data), Some("file:///a/b"));
    }
}
