//! Invariant checking for the MotorMint vehicle ledger.
//!
//! Checks ledger snapshots against the rules the strict transition policy
//! guarantees: vehicle status mirrors its escrows, ownership histories
//! form an unbroken chain, hashes and identities are unique.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      VERIFICATION LAYER                         │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │ SNAPSHOT INVARIANTS                                       │  │
//! │  │  - Escrow status consistency, single ACTIVE escrow        │  │
//! │  │  - Ownership chain, unique tx hashes                      │  │
//! │  │  - DriveChain identity uniqueness, score bounds           │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │ TRANSITION INVARIANTS                                     │  │
//! │  │  - Append-only ownership and transaction logs             │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use motormint_chain::{LedgerConfig, VehicleLedger};
//! use motormint_core::RegisterVehicle;
//! use motormint_verify::{verify_ledger, LedgerInvariants};
//!
//! let ledger = VehicleLedger::new(LedgerConfig::mainnet().with_seed(3)).unwrap();
//! let owner = ledger.mock_wallet_address();
//! ledger
//!     .register_vehicle(RegisterVehicle::new("V1", owner, "1HGCM82633A004352", "ipfs://x"))
//!     .unwrap();
//!
//! assert!(verify_ledger(&ledger, &LedgerInvariants::all()).is_ok());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod invariants;

pub use invariants::{
    AppendOnlyLogs, EscrowStatusConsistency, Invariant, InvariantViolation, LedgerInvariants,
    OwnershipChain, ScoreBounds, SingleActiveEscrow, UniqueDriveChainIdentity, UniqueTxHashes,
};

use motormint_chain::store::LedgerStore;
use motormint_chain::{LedgerSnapshot, VehicleLedger};
use tracing::warn;

/// Errors from verifying a live ledger.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The snapshot could not be taken.
    #[error("snapshot failed: {0}")]
    Snapshot(#[from] motormint_core::Error),

    /// An invariant does not hold.
    #[error(transparent)]
    Violation(#[from] InvariantViolation),
}

/// Snapshot a ledger and verify it.
pub fn verify_ledger<S: LedgerStore>(
    ledger: &VehicleLedger<S>,
    invariants: &LedgerInvariants,
) -> Result<LedgerSnapshot, VerifyError> {
    let snapshot = ledger.snapshot()?;
    if let Err(violation) = invariants.verify(&snapshot) {
        warn!(
            invariant = %violation.name,
            subject = violation.subject.as_deref().unwrap_or("-"),
            "{}",
            violation.message
        );
        return Err(violation.into());
    }
    Ok(snapshot)
}

/// Verify a state transition satisfies all invariants.
pub fn verify_transition(
    old: &LedgerSnapshot,
    new: &LedgerSnapshot,
    invariants: &LedgerInvariants,
) -> Result<(), InvariantViolation> {
    invariants.verify_transition(old, new)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::invariants::{Invariant, InvariantViolation, LedgerInvariants};
    pub use crate::{verify_ledger, verify_transition, VerifyError};
}
