//! Typed decoding of the registries' emitted logs.

use alloy_primitives::{Log, LogData, B256};
use alloy_sol_types::SolEvent;
use payment_registry_types::{
    CommitterUpdated, ExecutorUpdated, IntentCancelled, IntentCreated, IntentUpdated,
    ReceiptCommitted,
};

/// A fact emitted by either registry.
#[derive(Debug, PartialEq, Eq)]
pub enum RegistryFact {
    IntentCreated(IntentCreated),
    IntentUpdated(IntentUpdated),
    IntentCancelled(IntentCancelled),
    ExecutorUpdated(ExecutorUpdated),
    ReceiptCommitted(ReceiptCommitted),
    CommitterUpdated(CommitterUpdated),
}

/// Errors decoding a raw log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactDecodeError {
    /// Log carried no topics (anonymous or truncated).
    MissingTopic,
    /// topic0 is not a registry event signature.
    UnknownEvent(B256),
    /// Signature matched but topics/data did not decode.
    Malformed,
}

/// Decode a raw log (topics + data) into a [`RegistryFact`].
pub fn decode_fact(topics: &[B256], data: &[u8]) -> Result<RegistryFact, FactDecodeError> {
    let topic0 = *topics.first().ok_or(FactDecodeError::MissingTopic)?;

    fn decode<E: SolEvent>(topics: &[B256], data: &[u8]) -> Result<E, FactDecodeError> {
        E::decode_raw_log(topics.iter().copied(), data, true).map_err(|_| FactDecodeError::Malformed)
    }

    let fact = if topic0 == IntentCreated::SIGNATURE_HASH {
        RegistryFact::IntentCreated(decode(topics, data)?)
    } else if topic0 == IntentUpdated::SIGNATURE_HASH {
        RegistryFact::IntentUpdated(decode(topics, data)?)
    } else if topic0 == IntentCancelled::SIGNATURE_HASH {
        RegistryFact::IntentCancelled(decode(topics, data)?)
    } else if topic0 == ExecutorUpdated::SIGNATURE_HASH {
        RegistryFact::ExecutorUpdated(decode(topics, data)?)
    } else if topic0 == ReceiptCommitted::SIGNATURE_HASH {
        RegistryFact::ReceiptCommitted(decode(topics, data)?)
    } else if topic0 == CommitterUpdated::SIGNATURE_HASH {
        RegistryFact::CommitterUpdated(decode(topics, data)?)
    } else {
        return Err(FactDecodeError::UnknownEvent(topic0));
    };
    Ok(fact)
}

/// Decode an alloy [`Log`], ignoring the emitting address.
pub fn decode_log(log: &Log) -> Result<RegistryFact, FactDecodeError> {
    decode_fact(log.data.topics(), &log.data.data)
}

impl RegistryFact {
    /// Encode back into log topics + data (as the contract would emit it).
    pub fn encode_log_data(&self) -> LogData {
        match self {
            RegistryFact::IntentCreated(e) => e.encode_log_data(),
            RegistryFact::IntentUpdated(e) => e.encode_log_data(),
            RegistryFact::IntentCancelled(e) => e.encode_log_data(),
            RegistryFact::ExecutorUpdated(e) => e.encode_log_data(),
            RegistryFact::ReceiptCommitted(e) => e.encode_log_data(),
            RegistryFact::CommitterUpdated(e) => e.encode_log_data(),
        }
    }
}
