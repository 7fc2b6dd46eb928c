//! MotorMint Chain - Simulated vehicle ledger.
//!
//! This crate provides the state-tracking layer of the MotorMint mock chain:
//! - Ledger stores (vehicles, ownership, escrows, transactions, identities)
//! - Chain simulator (hashes, block numbers, gas, scores)
//! - Ledger configuration and network presets
//! - `VehicleLedger`, the orchestration service
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    VehicleLedger                        │
//! │  (registration, transfer, escrow lifecycle, queries)    │
//! └─────────────────────────────────────────────────────────┘
//!               │                             │
//!               ▼                             ▼
//! ┌───────────────────────────┐ ┌───────────────────────────┐
//! │      ChainSimulator       │ │        LedgerStore        │
//! │  (seeded randomness)      │ │  (one lock, six stores)   │
//! └───────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use motormint_chain::{LedgerConfig, VehicleLedger};
//! use motormint_core::{Address, Currency, EscrowTerms, OwnershipStatus, RegisterVehicle, VehicleId};
//!
//! let ledger = VehicleLedger::new(LedgerConfig::mainnet().with_seed(1)).unwrap();
//! let seller = ledger.mock_wallet_address();
//! let buyer = ledger.mock_wallet_address();
//!
//! ledger
//!     .register_vehicle(RegisterVehicle::new("V1", seller.clone(), "1HGCM82633A004352", "ipfs://x"))
//!     .unwrap();
//!
//! let escrow = ledger
//!     .open_escrow(EscrowTerms {
//!         vehicle_id: VehicleId::new("V1"),
//!         seller_address: seller,
//!         buyer_address: buyer.clone(),
//!         amount: "1.5".into(),
//!         currency: Currency::Eth,
//!         duration_days: 7,
//!     })
//!     .unwrap();
//!
//! ledger.release_escrow(&escrow.id).unwrap();
//! let record = ledger.vehicle_record(&VehicleId::new("V1")).unwrap();
//! assert_eq!(record.current_owner, buyer);
//! assert_eq!(record.ownership_status, OwnershipStatus::Transferred);
//! ```

#![deny(unsafe_code)]

mod config;
mod ledger;
mod simulator;
mod snapshot;
pub mod store;

#[cfg(test)]
mod proptest;

pub use config::{LedgerConfig, TransitionPolicy, DEFAULT_REGISTRY_CONTRACT};
pub use ledger::VehicleLedger;
pub use simulator::{ChainSimulator, MAX_MAINTENANCE_BUMP, MIN_SEED_HEALTH};
pub use snapshot::LedgerSnapshot;
pub use store::{LedgerStore, MemoryStore};
