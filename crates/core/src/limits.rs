//! Size limits for error excerpts and entity addresses
//!
//! ## Contract
//!
//! The default limits are FROZEN. Custom limits can be passed to the
//! `*_with_limits` validation functions.

/// Default number of input characters kept in a parse error excerpt
pub const DEFAULT_MAX_EXCERPT_CHARS: usize = 48;

/// Default maximum entity address length in bytes (8KB)
pub const DEFAULT_MAX_ADDRESS_BYTES: usize = 8 * 1024;

/// Size limits applied by the advisory validation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum characters of offending input echoed into error messages (default: 48)
    pub max_excerpt_chars: usize,

    /// Maximum `EntityId` address length in bytes (default: 8KB)
    pub max_address_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_excerpt_chars: DEFAULT_MAX_EXCERPT_CHARS,
            max_address_bytes: DEFAULT_MAX_ADDRESS_BYTES,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_excerpt_chars: 10,
            max_address_bytes: 32,
        }
    }
}
