//! # handtrack-id
//!
//! Identifier types shared by the handtrack crates.
//!
//! ## ID Kinds
//!
//! - [`HandId`]: the integer handle the tracking engine assigns to a hand.
//!   It is unique among the hands tracked at one moment, and is reused once
//!   a hand is released.
//! - [`SessionId`]: a prefixed ULID (`sess_01HV4Z2WQXKJNM8GPQY6VBKC3D`)
//!   naming one tracker session.
//! - [`EventSeq`]: the monotonic sequence number of an event within a
//!   session.

mod error;
mod macros;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export ulid for consumers that need raw ULID operations
pub use ulid::Ulid;
