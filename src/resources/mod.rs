//! Resource definitions, the live ledger, and the gather tick

pub mod definitions;
pub mod gather;
pub mod ledger;

pub use definitions::{ResourceCatalog, ResourceDefinition};
pub use gather::{tick_gather, Harvest};
pub use ledger::ResourceLedger;
