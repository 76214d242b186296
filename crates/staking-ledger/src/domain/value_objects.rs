//! # Value Objects
//!
//! Immutable domain primitives for the staking and reward ledgers.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for 256-bit balance arithmetic
pub use primitive_types::U256;

/// Unix timestamp in seconds, as supplied by the execution environment's clock.
pub type Timestamp = u64;

// =============================================================================
// ACCOUNT ID (20 bytes)
// =============================================================================

/// A 20-byte account identifier.
///
/// Identifies stakers, admin wallets, and the engines' custody accounts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// The zero account (0x0000...0000). Never a valid transfer target.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an account id from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an account id from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// DEVICE ID (9 bytes)
// =============================================================================

/// Width of the fixed device-id key, in bytes.
pub const DEVICE_ID_LEN: usize = 9;

/// A fixed-width 9-byte device key derived from a device serial string.
///
/// Serials longer than 9 bytes are truncated to their first 9 bytes without
/// rejection, so distinct serials sharing a 9-byte prefix alias to the same
/// ledger entry. Shorter serials are zero-padded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId(pub [u8; DEVICE_ID_LEN]);

impl DeviceId {
    /// Creates a device id from a 9-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; DEVICE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Derives a device id from a serial string.
    ///
    /// Takes the first 9 bytes of the UTF-8 encoding; shorter serials are
    /// zero-padded on the right. Oversized serials are NOT rejected.
    #[must_use]
    pub fn from_serial(serial: &str) -> Self {
        let mut bytes = [0u8; DEVICE_ID_LEN];
        let raw = serial.as_bytes();
        let take = raw.len().min(DEVICE_ID_LEN);
        bytes[..take].copy_from_slice(&raw[..take]);
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DEVICE_ID_LEN] {
        &self.0
    }
}

impl fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceId(0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Printable zero-padded serials render as text, anything else as hex
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(DEVICE_ID_LEN);
        let text = &self.0[..end];
        let tail_is_padding = self.0[end..].iter().all(|b| *b == 0);
        if !text.is_empty() && tail_is_padding && text.iter().all(|b| b.is_ascii_graphic()) {
            for byte in text {
                write!(f, "{}", *byte as char)?;
            }
            Ok(())
        } else {
            write!(f, "0x")?;
            for byte in &self.0 {
                write!(f, "{byte:02x}")?;
            }
            Ok(())
        }
    }
}

impl From<[u8; DEVICE_ID_LEN]> for DeviceId {
    fn from(bytes: [u8; DEVICE_ID_LEN]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// CAPABILITY
// =============================================================================

/// Authorization label checked by the external gate before privileged calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Full administrative control: config setters, reward accrual.
    Admin,
    /// May pause and resume the system.
    PauseControl,
    /// Reserved for upgrade machinery (out of scope for the core engines).
    UpgradeControl,
    /// May invoke the staking engine's `reinvest` entry point directly.
    Reinvest,
}

// =============================================================================
// TESTS
// =============================================================================
