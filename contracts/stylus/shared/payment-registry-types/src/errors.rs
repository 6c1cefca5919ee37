use alloy_primitives::{Address, U256};

use crate::{roles::Role, status::IntentStatus};

/// Category of a rejected call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller lacks the required role.
    Authorization,
    /// An input precondition failed.
    Validation,
    /// The target intent's current status forbids the transition.
    StateConflict,
}

/// Hash-valued inputs that must be non-zero. Discriminants are emitted in `ZeroHash(uint8)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum HashField {
    RecipientHash = 0,
    MetadataHash = 1,
    ChosenProviderRefHash = 2,
    ReceiptHash = 3,
    ProviderRefHash = 4,
    ReceiptUriHash = 5,
}

/// `uint8` inputs decoded into closed enums. Discriminants are emitted in `InvalidEnumValue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EnumField {
    RecipientType = 0,
    Preference = 1,
    Status = 2,
    FailReason = 3,
    FinalStatus = 4,
    FinalReason = 5,
}

/// Rejection of a registry call. Every variant aborts the whole call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryError {
    Unauthorized { caller: Address, role: Role },

    InvalidAmount,
    ZeroHash(HashField),
    DeadlineTooShort { deadline: u64, minimum: u64 },
    InvalidEnumValue { field: EnumField, value: u8 },

    IntentFinalized { id: U256, status: IntentStatus },
    IntentNotCancellable { id: U256, status: IntentStatus },
    /// Update or cancel addressed an id that was never created.
    UnknownIntent { id: U256 },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Unauthorized { .. } => ErrorKind::Authorization,
            RegistryError::InvalidAmount
            | RegistryError::ZeroHash(_)
            | RegistryError::DeadlineTooShort { .. }
            | RegistryError::InvalidEnumValue { .. } => ErrorKind::Validation,
            RegistryError::IntentFinalized { .. }
            | RegistryError::IntentNotCancellable { .. }
            | RegistryError::UnknownIntent { .. } => ErrorKind::StateConflict,
        }
    }

    /// Stable reason code, suitable for logs and client-side matching.
    pub fn reason(&self) -> &'static str {
        match self {
            RegistryError::Unauthorized { role: Role::Admin, .. } => "NOT_ADMIN",
            RegistryError::Unauthorized { role: Role::Executor, .. } => "NOT_EXECUTOR",
            RegistryError::Unauthorized { role: Role::Committer, .. } => "NOT_COMMITTER",
            RegistryError::InvalidAmount => "INVALID_AMOUNT",
            RegistryError::ZeroHash(HashField::RecipientHash) => "ZERO_RECIPIENT_HASH",
            RegistryError::ZeroHash(HashField::MetadataHash) => "ZERO_METADATA_HASH",
            RegistryError::ZeroHash(HashField::ChosenProviderRefHash) => "ZERO_PROVIDER_REF",
            RegistryError::ZeroHash(HashField::ReceiptHash) => "ZERO_RECEIPT_HASH",
            RegistryError::ZeroHash(HashField::ProviderRefHash) => "ZERO_PROVIDER_REF_HASH",
            RegistryError::ZeroHash(HashField::ReceiptUriHash) => "ZERO_RECEIPT_URI_HASH",
            RegistryError::DeadlineTooShort { .. } => "DEADLINE_TOO_SHORT",
            RegistryError::InvalidEnumValue { .. } => "INVALID_ENUM_VALUE",
            RegistryError::IntentFinalized { .. } => "INTENT_FINALIZED",
            RegistryError::IntentNotCancellable { .. } => "INTENT_NOT_CANCELLABLE",
            RegistryError::UnknownIntent { .. } => "INTENT_NOT_FOUND",
        }
    }
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_partition_the_variants() {
        let unauthorized = RegistryError::Unauthorized {
            caller: Address::ZERO,
            role: Role::Executor,
        };
        assert_eq!(unauthorized.kind(), ErrorKind::Authorization);
        assert_eq!(unauthorized.reason(), "NOT_EXECUTOR");

        assert_eq!(RegistryError::InvalidAmount.kind(), ErrorKind::Validation);
        assert_eq!(
            RegistryError::DeadlineTooShort { deadline: 1, minimum: 1 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            RegistryError::IntentNotCancellable {
                id: U256::from(1u64),
                status: IntentStatus::Sent
            }
            .kind(),
            ErrorKind::StateConflict
        );
        let unknown = RegistryError::UnknownIntent { id: U256::from(9u64) };
        assert_eq!(unknown.kind(), ErrorKind::StateConflict);
        assert_eq!(unknown.reason(), "INTENT_NOT_FOUND");
    }
}
