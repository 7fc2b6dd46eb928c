//! Identifiers, simulated hashes and addresses.
//!
//! Nothing here is cryptographic. Transaction hashes and addresses are
//! random hex strings that only look like their Ethereum counterparts, and
//! entity ids are `{prefix}_{unix_millis}_{suffix}` strings whose
//! uniqueness is probabilistic.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Number of hex digits in a transaction hash (after `0x`).
pub const TX_HASH_HEX_LEN: usize = 64;

/// Number of hex digits in an address (after `0x`).
pub const ADDRESS_HEX_LEN: usize = 40;

/// Random lowercase hex string of `bytes * 2` digits.
fn random_hex<R: RngCore + ?Sized>(rng: &mut R, bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// `0x` followed by exactly `digits` hex characters, either case.
fn is_prefixed_hex(s: &str, digits: usize) -> bool {
    match s.strip_prefix("0x") {
        Some(body) => body.len() == digits && body.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Simulated transaction hash: `0x` + 64 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    /// Wrap an existing hash string without validation.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Generate a hash from the given random source.
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self(format!("0x{}", random_hex(rng, TX_HASH_HEX_LEN / 2)))
    }

    /// Generate a hash from the thread-local RNG.
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    /// Get the hash as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the `0x` + 64 hex digit shape.
    pub fn is_well_formed(&self) -> bool {
        is_prefixed_hex(&self.0, TX_HASH_HEX_LEN)
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TxHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TxHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Wallet or contract address: `0x` + 40 hex digits.
///
/// Comparison is exact and case-sensitive; the ledger never lowercases.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    /// Wrap an existing address string without validation.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Generate an address from the given random source.
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self(format!("0x{}", random_hex(rng, ADDRESS_HEX_LEN / 2)))
    }

    /// Generate an address from the thread-local RNG.
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    /// Get the address as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the `0x` + 40 hex digit shape.
    pub fn is_well_formed(&self) -> bool {
        is_prefixed_hex(&self.0, ADDRESS_HEX_LEN)
    }

    /// Display form, see [`shorten_address`].
    pub fn short(&self) -> String {
        shorten_address(&self.0)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Shorten an address to `{first 6}...{last 4}`.
///
/// Inputs shorter than 10 characters are not rejected: the two slices
/// overlap and the output repeats characters (`"0x12"` becomes
/// `"0x12...0x12"`). Callers that care must check the length first.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}...{tail}")
}

/// Build an entity id `{prefix}_{unix_millis}_{8 hex}`.
pub fn entity_id<R: RngCore + ?Sized>(prefix: &str, at: DateTime<Utc>, rng: &mut R) -> String {
    format!("{}_{}_{}", prefix, at.timestamp_millis(), random_hex(rng, 4))
}

/// Entity id type minted by the ledger.
pub trait GeneratedId: Sized {
    /// Human-readable id prefix.
    const PREFIX: &'static str;

    /// Wrap a raw id string.
    fn from_raw(raw: String) -> Self;

    /// Mint a fresh id.
    fn generate<R: RngCore + ?Sized>(at: DateTime<Utc>, rng: &mut R) -> Self {
        Self::from_raw(entity_id(Self::PREFIX, at, rng))
    }
}

/// Macro for defining opaque string identifiers.
///
/// With a prefix the type also implements [`GeneratedId`].
#[macro_export]
macro_rules! define_id {
    ($name:ident, $desc:expr) => {
        #[doc = concat!("Opaque ", $desc, " identifier.")]
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an existing id string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the id as a string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
    ($name:ident, $desc:expr, $prefix:expr) => {
        $crate::define_id!($name, $desc);

        impl $crate::id::GeneratedId for $name {
            const PREFIX: &'static str = $prefix;

            fn from_raw(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(VehicleId, "vehicle");
define_id!(RecordId, "on-chain record", "record");
define_id!(OwnershipId, "ownership record", "ownership");
define_id!(EscrowId, "escrow", "escrow");
define_id!(TransactionId, "ledger transaction", "tx");
define_id!(IdentityId, "DriveChain identity", "dc");
define_id!(VerificationId, "vehicle verification", "ver");
