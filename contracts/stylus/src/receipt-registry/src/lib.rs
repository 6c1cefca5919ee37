//! Settlement receipt registry for Arbitrum Stylus.
//!
//! Committers write one receipt per intent id (last write wins). The registry never consults the
//! intent registry; it shares only the id space and the status/reason vocabulary.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

extern crate alloc;

pub mod receipt_registry;


pub use receipt_registry::ReceiptRegistry;
pub use payment_registry_types::RegistryRevert as ReceiptRegistryError;
