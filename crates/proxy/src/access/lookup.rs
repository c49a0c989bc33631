//! Supported resource type records and the lookup seam.
//!
//! Which resource types the proxy fronts, and which interactions each one
//! allows, is owned by whatever persists the server registry. The proxy
//! only reads it through [`ResourceInteractionLookup`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::interaction::Interaction;
use crate::error::{ProxyError, ProxyResult};

/// A resource type the proxy is configured to serve.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedResourceType {
    /// The FHIR resource type, e.g. `Patient`.
    pub resource_name: String,
    /// Identifier of the backend FHIR server this record belongs to.
    pub fhir_source: String,
    /// Plain GET passthrough.
    pub get: bool,
    /// Plain PUT passthrough.
    pub put: bool,
    /// create interaction.
    pub create: bool,
    /// read interaction.
    pub read: bool,
    /// vread interaction.
    pub vread: bool,
    /// update interaction.
    pub update: bool,
    /// delete interaction.
    pub delete: bool,
    /// search-type interaction.
    pub search: bool,
    /// history-instance and history-type interactions.
    pub history: bool,
}

impl SupportedResourceType {
    /// Creates a record with every flag off.
    pub fn new(resource_name: impl Into<String>, fhir_source: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            fhir_source: fhir_source.into(),
            ..Default::default()
        }
    }

    /// Creates a read-only record (read, vread, search, history).
    pub fn read_only(resource_name: impl Into<String>, fhir_source: impl Into<String>) -> Self {
        Self {
            read: true,
            vread: true,
            search: true,
            history: true,
            ..Self::new(resource_name, fhir_source)
        }
    }

    /// The interactions this record allows.
    ///
    /// Ordered get, put, create, read, vread, update, delete, search-type,
    /// then history-instance and history-type when history is on.
    pub fn supported_interactions(&self) -> Vec<Interaction> {
        let flags = [
            (self.get, Interaction::Get),
            (self.put, Interaction::Put),
            (self.create, Interaction::Create),
            (self.read, Interaction::Read),
            (self.vread, Interaction::Vread),
            (self.update, Interaction::Update),
            (self.delete, Interaction::Delete),
            (self.search, Interaction::SearchType),
            (self.history, Interaction::HistoryInstance),
            (self.history, Interaction::HistoryType),
        ];

        flags
            .into_iter()
            .filter_map(|(enabled, interaction)| enabled.then_some(interaction))
            .collect()
    }

    /// True if the record allows `interaction`.
    pub fn allows(&self, interaction: Interaction) -> bool {
        self.supported_interactions().contains(&interaction)
    }
}

/// Read access to the supported resource registry.
///
/// `None` means "no such record"; a record with the flag off is a distinct
/// outcome.
pub trait ResourceInteractionLookup: Send + Sync {
    /// Finds a record by resource name, across all sources.
    fn by_name(&self, resource_name: &str) -> Option<SupportedResourceType>;

    /// Finds the record for a resource type on a specific source.
    fn by_source(&self, resource_type: &str, fhir_source: &str) -> Option<SupportedResourceType>;
}

/// An in-memory registry, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticResourceTable {
    records: Vec<SupportedResourceType>,
}

impl StaticResourceTable {
    /// Creates a table from records.
    pub fn new(records: Vec<SupportedResourceType>) -> Self {
        Self { records }
    }

    /// Parses a JSON array of records.
    pub fn from_json(json: &str) -> ProxyResult<Self> {
        let records: Vec<SupportedResourceType> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Loads a JSON array of records from a file.
    pub fn from_file(path: impl AsRef<Path>) -> ProxyResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProxyError::ResourceTableIo {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            records = table.len(),
            "Loaded supported resource table"
        );
        Ok(table)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ResourceInteractionLookup for StaticResourceTable {
    fn by_name(&self, resource_name: &str) -> Option<SupportedResourceType> {
        self.records
            .iter()
            .find(|r| r.resource_name == resource_name)
            .cloned()
    }

    fn by_source(&self, resource_type: &str, fhir_source: &str) -> Option<SupportedResourceType> {
        self.records
            .iter()
            .find(|r| r.resource_name == resource_type && r.fhir_source == fhir_source)
            .cloned()
    }
}
