//! Ledger stores.
//!
//! One trait per store plus the combined [`LedgerStore`] the orchestration
//! service is generic over. [`MemoryStore`] is the only backend.

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::{
    EscrowStore, IdentityStore, LedgerStore, OwnershipLog, TransactionLedger, VehicleStore,
    VerificationStore,
};
