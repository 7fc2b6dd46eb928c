//! Error types for MotorMint.
//!
//! Provides structured errors with:
//! - Unique error codes for API responses
//! - Source error chaining
//! - Client vs server error categorization

use thiserror::Error;

use crate::escrow::EscrowStatus;

/// Result type for MotorMint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes for API responses.
///
/// Codes are structured as:
/// - 1xxx: Validation errors (client)
/// - 2xxx: Not found errors (client)
/// - 3xxx: Conflict errors (client)
/// - 4xxx: State transition errors (client)
/// - 6xxx: Internal errors (server)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Validation errors (1xxx)
    InvalidInput = 1001,
    InvalidAddress = 1002,
    InvalidTxHash = 1003,
    InvalidVin = 1004,
    InvalidEscrowTerms = 1005,
    InvalidTransferType = 1006,
    InvalidConfig = 1007,

    // Not found errors (2xxx)
    VehicleNotFound = 2001,
    EscrowNotFound = 2002,
    TransactionNotFound = 2003,
    IdentityNotFound = 2004,
    NetworkNotFound = 2005,

    // Conflict errors (3xxx)
    VehicleAlreadyRegistered = 3001,
    ActiveEscrowExists = 3002,
    IdentityExists = 3003,
    VehicleEncumbered = 3004,

    // Transition errors (4xxx)
    InvalidTransition = 4001,

    // Internal errors (6xxx)
    Serialization = 6001,
    Deserialization = 6002,
    Internal = 6003,
}

impl ErrorCode {
    /// Get the numeric code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(self) -> bool {
        (1000..5000).contains(&self.code())
    }

    /// Check if this is a server error (5xx equivalent).
    pub fn is_server_error(self) -> bool {
        self.code() >= 5000
    }

    /// HTTP status an outer REST layer should answer with.
    pub fn http_status(self) -> u16 {
        match self.code() {
            1000..=1999 => 422,
            2000..=2999 => 404,
            3000..=4999 => 409,
            _ => 500,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Errors that can occur in MotorMint.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================================================
    // Validation Errors (client errors)
    // ========================================================================
    /// Request or configuration failed validation.
    #[error("[{code}] invalid input: {message}")]
    InvalidInput { code: ErrorCode, message: String },

    // ========================================================================
    // Not Found Errors (client errors)
    // ========================================================================
    /// Referenced vehicle, escrow, identity or transaction does not exist.
    #[error("[{code}] not found: {message}")]
    NotFound { code: ErrorCode, message: String },

    // ========================================================================
    // Conflict Errors (client errors)
    // ========================================================================
    /// Creation would violate a uniqueness or singleton invariant.
    #[error("[{code}] conflict: {message}")]
    Conflict { code: ErrorCode, message: String },

    // ========================================================================
    // Transition Errors (client errors)
    // ========================================================================
    /// Escrow status change not permitted by the active transition policy.
    #[error("[{code}] invalid escrow transition: {from} -> {to}")]
    InvalidTransition {
        code: ErrorCode,
        from: EscrowStatus,
        to: EscrowStatus,
    },

    // ========================================================================
    // Serialization Errors (server errors)
    // ========================================================================
    /// Serialization/deserialization failed.
    #[error("[{code}] serialization error: {message}")]
    Serialization {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ========================================================================
    // Internal Errors (server errors)
    // ========================================================================
    /// Internal error.
    #[error("[{code}] internal error: {message}")]
    Internal { code: ErrorCode, message: String },
}

impl Error {
    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidInput { code, .. } => *code,
            Error::NotFound { code, .. } => *code,
            Error::Conflict { code, .. } => *code,
            Error::InvalidTransition { code, .. } => *code,
            Error::Serialization { code, .. } => *code,
            Error::Internal { code, .. } => *code,
        }
    }

    /// Check if this is a client error.
    pub fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        self.code().is_server_error()
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Error {
    /// Create an InvalidInput error with a specific code.
    pub fn invalid(code: ErrorCode, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            code,
            message: message.into(),
        }
    }

    /// Create a generic InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::invalid(ErrorCode::InvalidInput, message)
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::invalid(ErrorCode::InvalidConfig, message)
    }

    /// Vehicle not registered on-chain.
    pub fn vehicle_not_found(vehicle_id: impl std::fmt::Display) -> Self {
        Error::NotFound {
            code: ErrorCode::VehicleNotFound,
            message: format!("vehicle {vehicle_id} not registered on-chain"),
        }
    }

    /// Escrow not found.
    pub fn escrow_not_found(escrow_id: impl std::fmt::Display) -> Self {
        Error::NotFound {
            code: ErrorCode::EscrowNotFound,
            message: format!("escrow {escrow_id} not found"),
        }
    }

    /// Transaction not found.
    pub fn transaction_not_found(tx_hash: impl std::fmt::Display) -> Self {
        Error::NotFound {
            code: ErrorCode::TransactionNotFound,
            message: format!("transaction {tx_hash} not found"),
        }
    }

    /// DriveChain identity not found.
    pub fn identity_not_found(vehicle_id: impl std::fmt::Display) -> Self {
        Error::NotFound {
            code: ErrorCode::IdentityNotFound,
            message: format!("DriveChain identity for vehicle {vehicle_id} not found"),
        }
    }

    /// Network not supported.
    pub fn network_not_found(chain_id: u64) -> Self {
        Error::NotFound {
            code: ErrorCode::NetworkNotFound,
            message: format!("network {chain_id} not supported"),
        }
    }

    /// Vehicle already registered.
    pub fn vehicle_already_registered(vehicle_id: impl std::fmt::Display) -> Self {
        Error::Conflict {
            code: ErrorCode::VehicleAlreadyRegistered,
            message: format!("vehicle {vehicle_id} already registered on-chain"),
        }
    }

    /// Vehicle already has an active escrow.
    pub fn active_escrow_exists(vehicle_id: impl std::fmt::Display) -> Self {
        Error::Conflict {
            code: ErrorCode::ActiveEscrowExists,
            message: format!("vehicle {vehicle_id} already has an active escrow"),
        }
    }

    /// DriveChain identity already exists.
    pub fn identity_exists(vehicle_id: impl std::fmt::Display) -> Self {
        Error::Conflict {
            code: ErrorCode::IdentityExists,
            message: format!("DriveChain identity for vehicle {vehicle_id} already exists"),
        }
    }

    /// Vehicle is held by an escrow and cannot change hands directly.
    pub fn vehicle_encumbered(vehicle_id: impl std::fmt::Display) -> Self {
        Error::Conflict {
            code: ErrorCode::VehicleEncumbered,
            message: format!("vehicle {vehicle_id} is held by an escrow"),
        }
    }

    /// Escrow status change not allowed.
    pub fn invalid_transition(from: EscrowStatus, to: EscrowStatus) -> Self {
        Error::InvalidTransition {
            code: ErrorCode::InvalidTransition,
            from,
            to,
        }
    }

    /// Create an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            code: ErrorCode::Internal,
            message: message.into(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        let code = if e.is_data() || e.is_syntax() || e.is_eof() {
            ErrorCode::Deserialization
        } else {
            ErrorCode::Serialization
        };
        Error::Serialization {
            code,
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}
