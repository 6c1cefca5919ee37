//! Solidity custom errors the registries revert with.
//!
//! Each error maps to exactly one `ErrorKind`, so clients can classify a revert by selector
//! alone.

use alloc::vec::Vec;

use alloy_sol_types::{sol, SolError};

use crate::errors::{ErrorKind, RegistryError};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    error Unauthorized(address caller, uint8 role);

    #[derive(Debug, PartialEq, Eq)]
    error InvalidAmount();
    #[derive(Debug, PartialEq, Eq)]
    error ZeroHash(uint8 field);
    #[derive(Debug, PartialEq, Eq)]
    error DeadlineTooShort(uint64 deadline, uint64 minimum);
    #[derive(Debug, PartialEq, Eq)]
    error InvalidEnumValue(uint8 field, uint8 value);

    #[derive(Debug, PartialEq, Eq)]
    error IntentFinalized(uint256 id, uint8 status);
    #[derive(Debug, PartialEq, Eq)]
    error IntentNotCancellable(uint256 id, uint8 status);
    #[derive(Debug, PartialEq, Eq)]
    error UnknownIntent(uint256 id);
}

/// Classify raw revert data by its 4-byte selector.
pub fn revert_kind(data: &[u8]) -> Option<ErrorKind> {
    let selector: [u8; 4] = data.get(..4)?.try_into().ok()?;
    let validation = [
        InvalidAmount::SELECTOR,
        ZeroHash::SELECTOR,
        DeadlineTooShort::SELECTOR,
        InvalidEnumValue::SELECTOR,
    ];
    let state_conflict = [
        IntentFinalized::SELECTOR,
        IntentNotCancellable::SELECTOR,
        UnknownIntent::SELECTOR,
    ];

    if selector == Unauthorized::SELECTOR {
        Some(ErrorKind::Authorization)
    } else if validation.contains(&selector) {
        Some(ErrorKind::Validation)
    } else if state_conflict.contains(&selector) {
        Some(ErrorKind::StateConflict)
    } else {
        None
    }
}

/// ABI-encoded revert payload for `err`, as the contracts produce it.
pub fn encode_revert(err: &RegistryError) -> Vec<u8> {
    match *err {
        RegistryError::Unauthorized { caller, role } => Unauthorized {
            caller,
            role: role as u8,
        }
        .abi_encode(),
        RegistryError::InvalidAmount => InvalidAmount {}.abi_encode(),
        RegistryError::ZeroHash(field) => ZeroHash { field: field as u8 }.abi_encode(),
        RegistryError::DeadlineTooShort { deadline, minimum } => {
            DeadlineTooShort { deadline, minimum }.abi_encode()
        }
        RegistryError::InvalidEnumValue { field, value } => InvalidEnumValue {
            field: field as u8,
            value,
        }
        .abi_encode(),
        RegistryError::IntentFinalized { id, status } => IntentFinalized {
            id,
            status: status as u8,
        }
        .abi_encode(),
        RegistryError::IntentNotCancellable { id, status } => IntentNotCancellable {
            id,
            status: status as u8,
        }
        .abi_encode(),
        RegistryError::UnknownIntent { id } => UnknownIntent { id }.abi_encode(),
    }
}

/// Revert type returned by both registries' public methods.
#[cfg(feature = "stylus")]
#[derive(stylus_sdk::stylus_proc::SolidityError, Debug)]
pub enum RegistryRevert {
    Unauthorized(Unauthorized),
    InvalidAmount(InvalidAmount),
    ZeroHash(ZeroHash),
    DeadlineTooShort(DeadlineTooShort),
    InvalidEnumValue(InvalidEnumValue),
    IntentFinalized(IntentFinalized),
    IntentNotCancellable(IntentNotCancellable),
    UnknownIntent(UnknownIntent),
}

#[cfg(feature = "stylus")]
impl RegistryRevert {
    /// Category of the rejection.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryRevert::Unauthorized(_) => ErrorKind::Authorization,
            RegistryRevert::InvalidAmount(_)
            | RegistryRevert::ZeroHash(_)
            | RegistryRevert::DeadlineTooShort(_)
            | RegistryRevert::InvalidEnumValue(_) => ErrorKind::Validation,
            RegistryRevert::IntentFinalized(_)
            | RegistryRevert::IntentNotCancellable(_)
            | RegistryRevert::UnknownIntent(_) => ErrorKind::StateConflict,
        }
    }
}

#[cfg(feature = "stylus")]
impl From<RegistryError> for RegistryRevert {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Unauthorized { caller, role } => Self::Unauthorized(Unauthorized {
                caller,
                role: role as u8,
            }),
            RegistryError::InvalidAmount => Self::InvalidAmount(InvalidAmount {}),
            RegistryError::ZeroHash(field) => Self::ZeroHash(ZeroHash { field: field as u8 }),
            RegistryError::DeadlineTooShort { deadline, minimum } => {
                Self::DeadlineTooShort(DeadlineTooShort { deadline, minimum })
            }
            RegistryError::InvalidEnumValue { field, value } => {
                Self::InvalidEnumValue(InvalidEnumValue {
                    field: field as u8,
                    value,
                })
            }
            RegistryError::IntentFinalized { id, status } => {
                Self::IntentFinalized(IntentFinalized {
                    id,
                    status: status as u8,
                })
            }
            RegistryError::IntentNotCancellable { id, status } => {
                Self::IntentNotCancellable(IntentNotCancellable {
                    id,
                    status: status as u8,
                })
            }
            RegistryError::UnknownIntent { id } => Self::UnknownIntent(UnknownIntent { id }),
        }
    }
}
