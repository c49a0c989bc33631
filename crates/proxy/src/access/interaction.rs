//! FHIR interaction names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Interactions a resource type can be configured to allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interaction {
    /// get - Plain GET passthrough.
    Get,
    /// put - Plain PUT passthrough.
    Put,
    /// create - Create a new resource.
    Create,
    /// read - Read the current state of the resource.
    Read,
    /// vread - Read a specific version.
    Vread,
    /// update - Update an existing resource.
    Update,
    /// delete - Delete a resource.
    Delete,
    /// search-type - Search for resources of a type.
    SearchType,
    /// history-instance - Retrieve history for a resource instance.
    HistoryInstance,
    /// history-type - Retrieve history for a resource type.
    HistoryType,
}

impl Interaction {
    /// Returns the FHIR interaction code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interaction::Get => "get",
            Interaction::Put => "put",
            Interaction::Create => "create",
            Interaction::Read => "read",
            Interaction::Vread => "vread",
            Interaction::Update => "update",
            Interaction::Delete => "delete",
            Interaction::SearchType => "search-type",
            Interaction::HistoryInstance => "history-instance",
            Interaction::HistoryType => "history-type",
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown interaction code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interaction: {0}")]
pub struct UnknownInteraction(pub String);

impl FromStr for Interaction {
    type Err = UnknownInteraction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(Interaction::Get),
            "put" => Ok(Interaction::Put),
            "create" => Ok(Interaction::Create),
            "read" => Ok(Interaction::Read),
            "vread" => Ok(Interaction::Vread),
            "update" => Ok(Interaction::Update),
            "delete" => Ok(Interaction::Delete),
            "search-type" => Ok(Interaction::SearchType),
            "history-instance" => Ok(Interaction::HistoryInstance),
            "history-type" => Ok(Interaction::HistoryType),
            other => Err(UnknownInteraction(other.to_string())),
        }
    }
}
