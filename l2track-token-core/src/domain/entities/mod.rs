pub mod token;

pub use token::{BridgeType, BridgedUsing, SourceEntry, TokenCategory, TokenEntry, TokenMetadata};
