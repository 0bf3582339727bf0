use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Intent qualifier for a batch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Read,
    Write,
}

impl FromStr for Access {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Access::Read),
            "write" => Ok(Access::Write),
            other => Err(format!("unknown access mode `{other}` (expected read|write)")),
        }
    }
}

/// Capabilities a manager may advertise to the host.
///
/// `EntityReferenceIdentification` and `ManagementPolicyQueries` are
/// mandatory for any manager; the rest are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    EntityReferenceIdentification,
    ManagementPolicyQueries,
    Resolution,
    EntityTraitIntrospection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_parses_from_cli_strings() {
        assert_eq!("read".parse::<Access>(), Ok(Access::Read));
        assert_eq!("write".parse::<Access>(), Ok(Access::Write));
        assert!("append".parse::<Access>().is_err());
    }

    #[test]
    fn capability_serializes_camel_case() {
        let json = serde_json::to_string(&Capability::EntityTraitIntrospection).unwrap();
        assert_eq!(json, "\"entityTraitIntrospection\"");
    }
}
