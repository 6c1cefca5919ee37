//! Shared vocabulary and state machine for the payment intent and receipt registries.
//!
//! Everything here is plain data plus pure functions, so the same rules run inside the Stylus
//! contracts and in off-chain tooling that replays the fact log.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod errors;
pub mod facts;
pub mod intent;
pub mod receipt;
pub mod revert;
pub mod roles;
pub mod status;

pub use errors::{EnumField, ErrorKind, HashField, RegistryError};
pub use facts::{
    CommitterUpdated, ExecutorUpdated, IntentCancelled, IntentCreated, IntentUpdated,
    ReceiptCommitted,
};
pub use intent::{
    CreateIntentAbi, CreateIntentParams, IntentAbi, PaymentIntent, UpdateIntentAbi,
    UpdateIntentParams, MIN_DEADLINE,
};
pub use receipt::{CommitReceiptAbi, CommitReceiptParams, ReceiptAbi, ReceiptProof};
pub use roles::{authorize, MemoryRoles, Role, RoleLookup};
pub use status::{FailReason, IntentStatus, RecipientType, RoutePreference};

#[cfg(feature = "stylus")]
pub use revert::RegistryRevert;
