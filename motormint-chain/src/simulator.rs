//! Chain simulator.
//!
//! Single source of randomness for the ledger: transaction hashes,
//! addresses, block numbers, gas, token ids, entity ids and DriveChain
//! scores. Seeding it through [`LedgerConfig::rng_seed`] makes a whole
//! ledger run reproducible.

use chrono::{DateTime, Utc};
use motormint_core::{
    drive_chain_id, simulated_token_prices, Address, GeneratedId, TokenPrice, TxHash,
    MAX_FRAUD_SCORE,
};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LedgerConfig;

/// Lowest seeded health score.
pub const MIN_SEED_HEALTH: u8 = 70;

/// Largest health increase from one maintenance entry.
pub const MAX_MAINTENANCE_BUMP: u8 = 4;

/// Randomness source for simulated chain values.
#[derive(Debug)]
pub struct ChainSimulator {
    rng: Mutex<StdRng>,
    block_base: u64,
    block_span: u64,
    transfer_block_span: u64,
    gas_base: u64,
    gas_span: u64,
    token_id_span: u64,
}

impl ChainSimulator {
    /// Create a simulator from the ledger configuration.
    pub fn new(config: &LedgerConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            block_base: config.block_base,
            block_span: config.block_span.max(1),
            transfer_block_span: config.transfer_block_span.max(1),
            gas_base: config.gas_base,
            gas_span: config.gas_span.max(1),
            token_id_span: config.token_id_span.max(1),
        }
    }

    /// Fresh transaction hash.
    pub fn tx_hash(&self) -> TxHash {
        TxHash::generate(&mut *self.rng.lock())
    }

    /// Fresh address.
    pub fn address(&self) -> Address {
        Address::generate(&mut *self.rng.lock())
    }

    /// Registration block in `block_base..block_base + block_span`.
    pub fn block_number(&self) -> u64 {
        self.block_base.saturating_add(self.rng.lock().gen_range(0..self.block_span))
    }

    /// Transfer block at most `transfer_block_span - 1` past `registration_block`.
    pub fn transfer_block(&self, registration_block: u64) -> u64 {
        registration_block.saturating_add(self.rng.lock().gen_range(0..self.transfer_block_span))
    }

    /// Simulated gas used.
    pub fn gas_used(&self) -> u64 {
        self.gas_base.saturating_add(self.rng.lock().gen_range(0..self.gas_span))
    }

    /// Token id as a decimal string.
    pub fn token_id(&self) -> String {
        self.rng.lock().gen_range(0..self.token_id_span).to_string()
    }

    /// Mint an entity id stamped with `at`.
    pub fn id<I: GeneratedId>(&self, at: DateTime<Utc>) -> I {
        I::generate(at, &mut *self.rng.lock())
    }

    /// Human-facing DriveChain id.
    pub fn drive_chain_id(&self, at: DateTime<Utc>) -> String {
        drive_chain_id(at, &mut *self.rng.lock())
    }

    /// Initial health score in `70..=99`.
    pub fn health_score(&self) -> u8 {
        self.rng.lock().gen_range(MIN_SEED_HEALTH..100)
    }

    /// Fraud score in `[0, 10)`.
    pub fn fraud_score(&self) -> f64 {
        self.rng.lock().gen_range(0.0..MAX_FRAUD_SCORE)
    }

    /// Health increase for one maintenance entry, `0..=4`.
    pub fn maintenance_bump(&self) -> u8 {
        self.rng.lock().gen_range(0..=MAX_MAINTENANCE_BUMP)
    }

    /// Jittered token prices.
    pub fn token_prices(&self, now: DateTime<Utc>) -> Vec<TokenPrice> {
        simulated_token_prices(&mut *self.rng.lock(), now)
    }
}
