//! L2Track Token Core
//!
//! Shared core for the L2Track backend tools.
//! Holds the canonical Ethereum wire encodings and the token entities
//! persisted by the reconciliation tooling.
//!
//! ## Architecture
//!
//! This library is deliberately small and free of I/O:
//!
//! - **Core**: strict hex codec for the `data` and `quantity` wire forms
//! - **Domain**: token entities and their listing/matching rules
//! - **Shared**: error types used across the crate
//!
//! Everything network- or file-shaped lives in `l2track-reconciler`.

pub mod core;
pub mod domain;
pub mod shared;

// Re-export the types most callers need
pub use crate::core::codec::{decode_data, decode_quantity, encode_data, encode_quantity};
pub use crate::domain::entities::{
    BridgeType, BridgedUsing, SourceEntry, TokenCategory, TokenEntry, TokenMetadata,
};
pub use crate::shared::error::{FormatError, RangeError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
