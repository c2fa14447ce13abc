use crate::stage::{StageDefinition, StageId};

/// Read-only stage catalog.
pub trait StageOracle: Send + Sync {
    fn stage(&self, id: StageId) -> Option<StageDefinition>;
}
