//! Resource type and interaction checks.
//!
//! - [`check_access`] - Rejects unknown resource types (404) and disallowed
//!   interactions (403)
//! - [`valid_interactions`] - Lists what a resource type allows on a source

pub mod interaction;
pub mod lookup;

pub use interaction::{Interaction, UnknownInteraction};
pub use lookup::{ResourceInteractionLookup, StaticResourceTable, SupportedResourceType};

use tracing::debug;

use crate::responses::kickout::{Kickout, kickout_403, kickout_404};

/// Checks that `resource_type` is served and allows `interaction`.
///
/// The record is found by name alone, whichever source it belongs to.
/// [`valid_interactions`] is the per-source view; when one name has records
/// on several sources the two can differ.
pub fn check_access<L>(
    lookup: &L,
    resource_type: &str,
    interaction: Interaction,
) -> Result<(), Kickout>
where
    L: ResourceInteractionLookup + ?Sized,
{
    let Some(record) = lookup.by_name(resource_type) else {
        debug!(resource_type = %resource_type, "Unsupported resource type");
        return Err(kickout_404(format!(
            "{} is not a supported resource type on this FHIR server.",
            resource_type
        )));
    };

    if !record.allows(interaction) {
        debug!(
            resource_type = %resource_type,
            interaction = %interaction,
            "Interaction not permitted"
        );
        return Err(kickout_403(format!(
            "The interaction {} is not permitted on {} FHIR resources on this FHIR server.",
            interaction, resource_type
        )));
    }

    Ok(())
}

/// Lists the interactions `resource_type` allows on `fhir_source`.
///
/// An unknown pair yields an empty list.
pub fn valid_interactions<L>(lookup: &L, resource_type: &str, fhir_source: &str) -> Vec<Interaction>
where
    L: ResourceInteractionLookup + ?Sized,
{
    match lookup.by_source(resource_type, fhir_source) {
        Some(record) => record.supported_interactions(),
        None => {
            debug!(
                resource_type = %resource_type,
                fhir_source = %fhir_source,
                "No supported resource record for source"
            );
            Vec::new()
        }
    }
}
