//! Off-chain helpers for the payment intent/receipt registries.
//!
//! - `hash`: content addressing for the opaque hash fields.
//! - `calldata`: ABI encoding of registry calls and decoding of their views.
//! - `facts`: decoding emitted logs into typed facts.
//! - `replay`: rebuilding a consumer-side ledger view from an ordered fact stream.

pub mod calldata;
pub mod facts;
pub mod hash;
pub mod replay;

#[cfg(test)]
mod tests;

pub use facts::{decode_fact, FactDecodeError, RegistryFact};
pub use replay::{LedgerMirror, ReceiptMismatch, ReplayError};
