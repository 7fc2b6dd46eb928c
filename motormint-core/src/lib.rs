//! MotorMint Core - Domain types for the simulated vehicle chain.
//!
//! This crate provides the data model shared by the ledger and the
//! invariant checker:
//!
//! - [`id`] - Simulated transaction hashes, addresses and entity ids
//! - [`vehicle`] - On-chain vehicle records and ownership history
//! - [`escrow`] - Escrow agreements and the escrow status machine
//! - [`transaction`] - Append-only ledger entries
//! - [`drivechain`] - Per-vehicle health/authenticity identities
//! - [`verification`] - Vehicle verifications with typed evidence
//! - [`network`] - Network catalogue, gas estimate and token prices
//!
//! Nothing here talks to a real chain. Hashes are random hex.
//!
//! # Example
//!
//! ```rust
//! use motormint_core::{Address, EscrowStatus, TxHash, shorten_address};
//!
//! let hash = TxHash::random();
//! assert!(hash.is_well_formed());
//!
//! let owner = Address::new("0x742d35Cc6634C0532925a3b844Bc9e7595f5c2A1");
//! assert_eq!(shorten_address(owner.as_str()), "0x742d...c2A1");
//!
//! assert!(EscrowStatus::Active.can_transition_to(EscrowStatus::Completed));
//! assert!(!EscrowStatus::Completed.can_transition_to(EscrowStatus::Cancelled));
//! ```

#![deny(unsafe_code)]

pub mod drivechain;
pub mod error;
pub mod escrow;
pub mod id;
pub mod network;
pub mod transaction;
pub mod vehicle;
pub mod verification;

#[cfg(test)]
mod proptest;

// Re-exports for convenience
pub use drivechain::{
    drive_chain_id, DriveChainIdentity, MaintenanceEntry, MAX_FRAUD_SCORE, MAX_HEALTH_SCORE,
};
pub use error::{Error, ErrorCode, Result};
pub use escrow::{
    Currency, DisputeResolution, Escrow, EscrowCondition, EscrowStatus, EscrowTerms, NewEscrow,
    MAX_ESCROW_DAYS, MIN_ESCROW_DAYS,
};
pub use id::{
    entity_id, shorten_address, Address, EscrowId, GeneratedId, IdentityId, OwnershipId,
    RecordId, TransactionId, TxHash, VehicleId, VerificationId,
};
pub use network::{
    explorer_address_link, explorer_tx_link, network, simulated_token_prices,
    supported_networks, GasEstimate, GasTier, NetworkInfo, TokenPrice, MAINNET_CHAIN_ID,
    POLYGON_CHAIN_ID, SEPOLIA_CHAIN_ID,
};
pub use transaction::{BlockchainTransaction, TransactionStatus, TransactionType};
pub use vehicle::{
    OwnershipRecord, OwnershipStatus, RegisterVehicle, Registration, TransferType,
    VehicleChainData, VehicleRecord, VIN_LEN,
};
pub use verification::{VehicleVerification, VerificationEvidence, VERIFICATION_VALIDITY_DAYS};
