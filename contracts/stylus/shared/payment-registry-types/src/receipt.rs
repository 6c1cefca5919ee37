//! Settlement receipts.
//!
//! A receipt is keyed by intent id and is last-write-wins: committing again replaces every
//! field. Nothing here consults the intent registry; `final_status` is whatever the committer
//! asserts.

use alloy_primitives::{Address, B256, U256};

use crate::{
    errors::{EnumField, HashField, RegistryError},
    facts::ReceiptCommitted,
    intent::decode_enum,
    status::{FailReason, IntentStatus},
};

/// `(intentId, receiptHash, providerRefHash, receiptUriHash, evidenceHash, receiptVersion,
/// finalStatus, finalReason)`
pub type CommitReceiptAbi = (U256, B256, B256, B256, B256, u32, u8, u8);

/// Full receipt in declaration order, as returned by `getReceipt`.
pub type ReceiptAbi = (U256, B256, B256, B256, B256, u32, u8, u8, u64, Address);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiptProof {
    pub intent_id: U256,
    pub receipt_hash: B256,
    pub provider_ref_hash: B256,
    pub receipt_uri_hash: B256,
    /// Optional supporting evidence; zero when absent.
    pub evidence_hash: B256,
    pub receipt_version: u32,
    pub final_status: IntentStatus,
    pub final_reason: FailReason,
    pub committed_at: u64,
    pub committed_by: Address,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitReceiptParams {
    pub intent_id: U256,
    pub receipt_hash: B256,
    pub provider_ref_hash: B256,
    pub receipt_uri_hash: B256,
    pub evidence_hash: B256,
    pub receipt_version: u32,
    pub final_status: IntentStatus,
    pub final_reason: FailReason,
}

impl CommitReceiptParams {
    pub fn validate(&self) -> Result<(), RegistryError> {
        for (hash, field) in [
            (self.receipt_hash, HashField::ReceiptHash),
            (self.provider_ref_hash, HashField::ProviderRefHash),
            (self.receipt_uri_hash, HashField::ReceiptUriHash),
        ] {
            if hash == B256::ZERO {
                return Err(RegistryError::ZeroHash(field));
            }
        }
        Ok(())
    }

    pub fn to_abi(&self) -> CommitReceiptAbi {
        (
            self.intent_id,
            self.receipt_hash,
            self.provider_ref_hash,
            self.receipt_uri_hash,
            self.evidence_hash,
            self.receipt_version,
            self.final_status as u8,
            self.final_reason as u8,
        )
    }
}

impl TryFrom<CommitReceiptAbi> for CommitReceiptParams {
    type Error = RegistryError;

    fn try_from(abi: CommitReceiptAbi) -> Result<Self, Self::Error> {
        let (
            intent_id,
            receipt_hash,
            provider_ref_hash,
            receipt_uri_hash,
            evidence_hash,
            receipt_version,
            final_status,
            final_reason,
        ) = abi;

        Ok(Self {
            intent_id,
            receipt_hash,
            provider_ref_hash,
            receipt_uri_hash,
            evidence_hash,
            receipt_version,
            final_status: decode_enum(final_status, EnumField::FinalStatus)?,
            final_reason: decode_enum(final_reason, EnumField::FinalReason)?,
        })
    }
}

impl TryFrom<ReceiptAbi> for ReceiptProof {
    type Error = RegistryError;

    fn try_from(abi: ReceiptAbi) -> Result<Self, Self::Error> {
        let (
            intent_id,
            receipt_hash,
            provider_ref_hash,
            receipt_uri_hash,
            evidence_hash,
            receipt_version,
            final_status,
            final_reason,
            committed_at,
            committed_by,
        ) = abi;

        Ok(Self {
            intent_id,
            receipt_hash,
            provider_ref_hash,
            receipt_uri_hash,
            evidence_hash,
            receipt_version,
            final_status: decode_enum(final_status, EnumField::FinalStatus)?,
            final_reason: decode_enum(final_reason, EnumField::FinalReason)?,
            committed_at,
            committed_by,
        })
    }
}

impl ReceiptProof {
    /// Build the receipt that replaces whatever is stored for `params.intent_id`.
    pub fn commit(
        params: &CommitReceiptParams,
        committer: Address,
        now: u64,
    ) -> Result<Self, RegistryError> {
        params.validate()?;

        Ok(Self {
            intent_id: params.intent_id,
            receipt_hash: params.receipt_hash,
            provider_ref_hash: params.provider_ref_hash,
            receipt_uri_hash: params.receipt_uri_hash,
            evidence_hash: params.evidence_hash,
            receipt_version: params.receipt_version,
            final_status: params.final_status,
            final_reason: params.final_reason,
            committed_at: now,
            committed_by: committer,
        })
    }

    /// A receipt slot that was never written reads back with a zero receipt hash.
    pub fn is_empty(&self) -> bool {
        self.receipt_hash == B256::ZERO
    }

    pub fn committed_fact(&self) -> ReceiptCommitted {
        ReceiptCommitted {
            intentId: self.intent_id,
            receiptHash: self.receipt_hash,
            receiptVersion: self.receipt_version,
            providerRefHash: self.provider_ref_hash,
            finalStatus: self.final_status as u8,
            finalReason: self.final_reason as u8,
        }
    }

    pub fn to_abi(&self) -> ReceiptAbi {
        (
            self.intent_id,
            self.receipt_hash,
            self.provider_ref_hash,
            self.receipt_uri_hash,
            self.evidence_hash,
            self.receipt_version,
            self.final_status as u8,
            self.final_reason as u8,
            self.committed_at,
            self.committed_by,
        )
    }
}
