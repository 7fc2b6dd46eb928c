//! Ledger configuration.

use motormint_core::{
    network, Address, Error, Result, MAINNET_CHAIN_ID, POLYGON_CHAIN_ID, SEPOLIA_CHAIN_ID,
};
use serde::{Deserialize, Serialize};

/// Placeholder registry contract shared by every registered vehicle.
pub const DEFAULT_REGISTRY_CONTRACT: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f5c2A1";

/// How `update_escrow_status` treats the requested status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Only the edges of the escrow status machine are accepted. Disputes
    /// lock the vehicle and direct transfers of held vehicles are refused.
    #[default]
    Strict,
    /// Any status may be written and COMPLETED/CANCELLED effects re-run on
    /// every call. Cross-entity invariants are not guaranteed.
    Permissive,
}

/// Configuration for a [`VehicleLedger`](crate::VehicleLedger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Chain id stamped on vehicle records.
    pub chain_id: u64,
    /// Network label stamped on vehicle records.
    pub network_name: String,
    /// Contract address recorded for every vehicle.
    pub registry_contract: Address,
    /// Lowest synthetic registration block.
    pub block_base: u64,
    /// Width of the registration block range.
    pub block_span: u64,
    /// Maximum offset of a transfer block past the registration block.
    pub transfer_block_span: u64,
    /// Minimum simulated gas.
    pub gas_base: u64,
    /// Width of the simulated gas range.
    pub gas_span: u64,
    /// Width of the token id range.
    pub token_id_span: u64,
    /// Escrow status handling.
    pub transition_policy: TransitionPolicy,
    /// Seed for reproducible simulation. Entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl LedgerConfig {
    /// Simulated Ethereum mainnet.
    pub fn mainnet() -> Self {
        Self {
            chain_id: MAINNET_CHAIN_ID,
            network_name: "Ethereum Mainnet".to_string(),
            registry_contract: Address::new(DEFAULT_REGISTRY_CONTRACT),
            block_base: 18_000_000,
            block_span: 1_000_000,
            transfer_block_span: 10_000,
            gas_base: 21_000,
            gas_span: 100_000,
            token_id_span: 100_000,
            transition_policy: TransitionPolicy::Strict,
            rng_seed: None,
        }
    }

    /// Simulated Polygon PoS.
    pub fn polygon() -> Self {
        Self {
            chain_id: POLYGON_CHAIN_ID,
            network_name: "Polygon".to_string(),
            block_base: 50_000_000,
            block_span: 5_000_000,
            ..Self::mainnet()
        }
    }

    /// Simulated Sepolia testnet.
    pub fn sepolia() -> Self {
        Self {
            chain_id: SEPOLIA_CHAIN_ID,
            network_name: "Sepolia Testnet".to_string(),
            block_base: 5_000_000,
            ..Self::mainnet()
        }
    }

    /// Preset for a supported chain id.
    pub fn for_network(chain_id: u64) -> Result<Self> {
        let info = network(chain_id)?;
        let base = match chain_id {
            POLYGON_CHAIN_ID => Self::polygon(),
            SEPOLIA_CHAIN_ID => Self::sepolia(),
            _ => Self::mainnet(),
        };
        Ok(Self {
            network_name: info.name,
            ..base
        })
    }

    /// Parse a JSON config and validate it. Missing fields take mainnet defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Set the transition policy.
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    /// Set the registry contract address.
    pub fn with_registry_contract(mut self, address: impl Into<Address>) -> Self {
        self.registry_contract = address.into();
        self
    }

    /// Set the registration block range.
    pub fn with_block_range(mut self, base: u64, span: u64) -> Self {
        self.block_base = base;
        self.block_span = span;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.network_name.trim().is_empty() {
            return Err(Error::config("network name is required"));
        }
        if !self.registry_contract.is_well_formed() {
            return Err(Error::config(format!(
                "registry contract {} is not a 0x-prefixed 40 digit hex address",
                self.registry_contract
            )));
        }
        for (name, span) in [
            ("block_span", self.block_span),
            ("transfer_block_span", self.transfer_block_span),
            ("gas_span", self.gas_span),
            ("token_id_span", self.token_id_span),
        ] {
            if span == 0 {
                return Err(Error::config(format!("{name} must be at least 1")));
            }
        }
        if self.block_base.checked_add(self.block_span).is_none() {
            return Err(Error::config("block range overflows"));
        }
        if self.gas_base.checked_add(self.gas_span).is_none() {
            return Err(Error::config("gas range overflows"));
        }
        Ok(())
    }
}
