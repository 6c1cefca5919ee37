//! Payment intent registry for Arbitrum Stylus.
//!
//! Executors create intents and drive them through their lifecycle; the admin manages who is an
//! executor. Every successful mutation emits a fact (EVM log) consumed by off-chain indexers.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

extern crate alloc;

pub mod intent_registry;


pub use intent_registry::IntentRegistry;
pub use payment_registry_types::RegistryRevert as IntentRegistryError;
