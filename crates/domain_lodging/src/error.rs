//! Lodging domain errors

use core_kernel::BedId;
use thiserror::Error;

/// Errors that can occur in the lodging domain
#[derive(Debug, Error)]
pub enum LodgingError {
    /// Referenced bed does not exist in the inventory under consideration
    #[error("Unknown bed: {bed_id}")]
    UnknownBed { bed_id: BedId },

    /// Bed is under maintenance or held for an overlapping stay
    #[error("Bed {bed_id} is not available for the requested stay")]
    BedUnavailable { bed_id: BedId },
}
