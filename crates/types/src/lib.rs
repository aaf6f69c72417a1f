// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]

//! Core data structures and error types for the mesh gateway.
//!
//! The gateway translates between two vocabularies: the chain-agnostic
//! *protocol* model spoken by clients ([`protocol`]) and the *native* model
//! returned by the underlying node ([`native`]). Everything in this crate is
//! plain data; behavior lives in the converter and client crates.

pub mod address;
pub mod coin;
pub mod construction;
pub mod error;
pub mod native;
pub mod protocol;

pub use address::AddressCodec;
pub use coin::{Coin, DecCoin};
pub use error::{ErrorCode, GatewayError};

/// Crate-wide result alias.
pub type Result<T, E = GatewayError> = core::result::Result<T, E>;

/// Operation status attached to confirmed, successfully executed operations.
pub const STATUS_SUCCESS: &str = "Success";
/// Operation status attached to confirmed operations whose transaction failed.
pub const STATUS_REVERTED: &str = "Reverted";

/// Byte length of an ordinary (user) transaction hash.
pub const USER_TX_HASH_LEN: usize = 32;
/// Byte length of a synthetic block-transaction hash: a one-byte marker
/// followed by the 32-byte block hash. Disjoint from [`USER_TX_HASH_LEN`] so
/// the two identifier spaces can never collide.
pub const BLOCK_TX_HASH_LEN: usize = 33;
/// Marker byte prepended to a block hash to form a synthetic tx identifier.
pub const BLOCK_TX_HASH_MARKER: u8 = 0x02;
