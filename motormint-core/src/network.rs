//! Simulated network catalogue, gas estimates and token prices.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ethereum mainnet chain id.
pub const MAINNET_CHAIN_ID: u64 = 1;
/// Polygon PoS chain id.
pub const POLYGON_CHAIN_ID: u64 = 137;
/// Sepolia testnet chain id.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Network the ledger can stamp on records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub currency: String,
    pub is_testnet: bool,
}

impl NetworkInfo {
    fn new(
        chain_id: u64,
        name: &str,
        rpc_url: &str,
        explorer_url: &str,
        currency: &str,
        is_testnet: bool,
    ) -> Self {
        Self {
            chain_id,
            name: name.to_string(),
            rpc_url: rpc_url.to_string(),
            explorer_url: explorer_url.to_string(),
            currency: currency.to_string(),
            is_testnet,
        }
    }

    /// Explorer page for a transaction.
    pub fn tx_link(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    /// Explorer page for an address.
    pub fn address_link(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }
}

/// All supported networks, ordered by chain id.
pub fn supported_networks() -> Vec<NetworkInfo> {
    vec![
        NetworkInfo::new(
            MAINNET_CHAIN_ID,
            "Ethereum Mainnet",
            "https://mainnet.infura.io/v3/",
            "https://etherscan.io",
            "ETH",
            false,
        ),
        NetworkInfo::new(
            POLYGON_CHAIN_ID,
            "Polygon",
            "https://polygon-rpc.com",
            "https://polygonscan.com",
            "MATIC",
            false,
        ),
        NetworkInfo::new(
            SEPOLIA_CHAIN_ID,
            "Sepolia Testnet",
            "https://sepolia.infura.io/v3/",
            "https://sepolia.etherscan.io",
            "ETH",
            true,
        ),
    ]
}

/// Look up a network by chain id.
pub fn network(chain_id: u64) -> Result<NetworkInfo> {
    supported_networks()
        .into_iter()
        .find(|n| n.chain_id == chain_id)
        .ok_or_else(|| Error::network_not_found(chain_id))
}

/// Explorer link for a transaction, empty for an unknown chain.
pub fn explorer_tx_link(tx_hash: &str, chain_id: u64) -> String {
    network(chain_id)
        .map(|n| n.tx_link(tx_hash))
        .unwrap_or_default()
}

/// Explorer link for an address, empty for an unknown chain.
pub fn explorer_address_link(address: &str, chain_id: u64) -> String {
    network(chain_id)
        .map(|n| n.address_link(address))
        .unwrap_or_default()
}

/// One gas price tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasTier {
    /// Gas price in gwei, as a decimal string.
    pub gas_price: String,
    /// Expected confirmation time in seconds.
    pub estimated_time: u32,
}

/// Static three-tier gas estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasEstimate {
    pub slow: GasTier,
    pub standard: GasTier,
    pub fast: GasTier,
}

impl GasEstimate {
    /// The fixed simulated estimate.
    pub fn simulated() -> Self {
        let tier = |price: &str, secs| GasTier {
            gas_price: price.to_string(),
            estimated_time: secs,
        };
        Self {
            slow: tier("20", 300),
            standard: tier("35", 60),
            fast: tier("50", 15),
        }
    }
}

/// Simulated market price of a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPrice {
    pub symbol: String,
    pub name: String,
    pub price_usd: f64,
    pub price_eth: f64,
    pub change_24h: f64,
    pub last_updated: DateTime<Utc>,
}

/// Token prices with random jitter: ETH, MOTO and a flat USDC peg.
pub fn simulated_token_prices<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Vec<TokenPrice> {
    let mut jitter = |base: f64, spread: f64| base + (rng.gen::<f64>() - 0.5) * spread;
    let eth_usd = jitter(3245.67, 100.0);
    let eth_change = jitter(0.0, 10.0);
    let moto_usd = jitter(2.45, 0.5);
    let moto_change = jitter(0.0, 15.0);

    let price = |symbol: &str, name: &str, usd, eth, change| TokenPrice {
        symbol: symbol.to_string(),
        name: name.to_string(),
        price_usd: usd,
        price_eth: eth,
        change_24h: change,
        last_updated: now,
    };
    vec![
        price("ETH", "Ethereum", eth_usd, 1.0, eth_change),
        price("MOTO", "MotorMint Token", moto_usd, 0.00075, moto_change),
        price("USDC", "USD Coin", 1.0, 0.000308, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lookup() {
        assert_eq!(network(POLYGON_CHAIN_ID).unwrap().currency, "MATIC");
        assert!(network(SEPOLIA_CHAIN_ID).unwrap().is_testnet);
        let err = network(56).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_explorer_links() {
        assert_eq!(
            explorer_tx_link("0xabc", MAINNET_CHAIN_ID),
            "https://etherscan.io/tx/0xabc"
        );
        assert_eq!(
            explorer_address_link("0xdef", POLYGON_CHAIN_ID),
            "https://polygonscan.com/address/0xdef"
        );
        assert_eq!(explorer_tx_link("0xabc", 999), "");
    }

    #[test]
    fn test_gas_estimate() {
        let gas = GasEstimate::simulated();
        assert_eq!(gas.standard.gas_price, "35");
        assert_eq!(gas.fast.estimated_time, 15);
        let json = serde_json::to_value(&gas).unwrap();
        assert_eq!(json["slow"]["estimatedTime"], 300);
    }

    #[test]
    fn test_token_price_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let prices = simulated_token_prices(&mut rng, Utc::now());
            assert_eq!(prices.len(), 3);
            assert!((3195.67..=3295.67).contains(&prices[0].price_usd));
            assert!((2.2..=2.7).contains(&prices[1].price_usd));
            assert!(prices[1].change_24h.abs() <= 7.5);
            assert_eq!(prices[2].price_usd, 1.0);
            assert_eq!(prices[2].change_24h, 0.0);
        }
    }
}
