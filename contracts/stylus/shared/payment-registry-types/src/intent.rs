//! Payment intent record and its state machine.
//!
//! The flow the orchestrator is expected to drive is
//! `Created -> Quoting -> Routed -> Sent -> Pending -> {Confirmed | Failed | NeedsReview}`, with
//! cancellation allowed up to `Routed` (or from `NeedsReview`). Only existence and the terminal
//! lock are enforced here; which non-terminal status comes next is the caller's decision.

use alloy_primitives::{B256, U256};

use crate::{
    errors::{EnumField, HashField, RegistryError},
    facts::{IntentCancelled, IntentCreated, IntentUpdated},
    status::{FailReason, IntentStatus, RecipientType, RoutePreference},
};

/// Smallest deadline offset accepted. Deadlines must be strictly greater.
pub const MIN_DEADLINE: u64 = 1;

/// `(externalReferenceId, amount, senderHash, recipientType, recipientHash, metadataHash,
/// preference, chosenProviderRefHash, deadline)`
pub type CreateIntentAbi = (B256, U256, B256, u8, B256, B256, u8, B256, u64);

/// `(status, chosenProviderRefHash, attempts, lastFailReason, lastFailDetailHash, deadline)`
pub type UpdateIntentAbi = (u8, B256, u32, u8, B256, u64);

/// Full intent record in declaration order, as returned by `getIntent`.
pub type IntentAbi = (
    U256,
    B256,
    U256,
    u8,
    B256,
    B256,
    B256,
    u8,
    B256,
    u64,
    u64,
    u64,
    u8,
    u32,
    u8,
    B256,
);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: U256,
    pub external_reference_id: B256,

    pub amount: U256,
    pub recipient_type: RecipientType,
    pub sender_hash: B256,
    pub recipient_hash: B256,
    pub metadata_hash: B256,

    pub preference: RoutePreference,
    pub chosen_provider_ref_hash: B256,

    pub created_at: u64,
    pub deadline: u64,
    pub last_updated_at: u64,

    pub status: IntentStatus,
    /// Retry counter owned by the orchestrator; stored verbatim, never interpreted.
    pub attempts: u32,
    pub last_fail_reason: FailReason,
    pub last_fail_detail_hash: B256,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateIntentParams {
    pub external_reference_id: B256,
    pub amount: U256,
    pub sender_hash: B256,
    pub recipient_type: RecipientType,
    pub recipient_hash: B256,
    pub metadata_hash: B256,
    pub preference: RoutePreference,
    pub chosen_provider_ref_hash: B256,
    pub deadline: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateIntentParams {
    pub status: IntentStatus,
    pub chosen_provider_ref_hash: B256,
    pub attempts: u32,
    pub last_fail_reason: FailReason,
    pub last_fail_detail_hash: B256,
    pub deadline: u64,
}

fn check_deadline(deadline: u64) -> Result<(), RegistryError> {
    if deadline <= MIN_DEADLINE {
        return Err(RegistryError::DeadlineTooShort {
            deadline,
            minimum: MIN_DEADLINE,
        });
    }
    Ok(())
}

fn check_hash(hash: B256, field: HashField) -> Result<(), RegistryError> {
    if hash == B256::ZERO {
        return Err(RegistryError::ZeroHash(field));
    }
    Ok(())
}

pub(crate) fn decode_enum<T: TryFrom<u8>>(
    value: u8,
    field: EnumField,
) -> Result<T, RegistryError> {
    T::try_from(value).map_err(|_| RegistryError::InvalidEnumValue { field, value })
}

impl CreateIntentParams {
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.amount == U256::ZERO {
            return Err(RegistryError::InvalidAmount);
        }
        check_hash(self.recipient_hash, HashField::RecipientHash)?;
        check_hash(self.metadata_hash, HashField::MetadataHash)?;
        check_hash(self.chosen_provider_ref_hash, HashField::ChosenProviderRefHash)?;
        check_deadline(self.deadline)
    }

    pub fn to_abi(&self) -> CreateIntentAbi {
        (
            self.external_reference_id,
            self.amount,
            self.sender_hash,
            self.recipient_type as u8,
            self.recipient_hash,
            self.metadata_hash,
            self.preference as u8,
            self.chosen_provider_ref_hash,
            self.deadline,
        )
    }
}

impl TryFrom<CreateIntentAbi> for CreateIntentParams {
    type Error = RegistryError;

    fn try_from(abi: CreateIntentAbi) -> Result<Self, Self::Error> {
        let (
            external_reference_id,
            amount,
            sender_hash,
            recipient_type,
            recipient_hash,
            metadata_hash,
            preference,
            chosen_provider_ref_hash,
            deadline,
        ) = abi;

        Ok(Self {
            external_reference_id,
            amount,
            sender_hash,
            recipient_type: decode_enum(recipient_type, EnumField::RecipientType)?,
            recipient_hash,
            metadata_hash,
            preference: decode_enum(preference, EnumField::Preference)?,
            chosen_provider_ref_hash,
            deadline,
        })
    }
}

impl UpdateIntentParams {
    pub fn validate(&self) -> Result<(), RegistryError> {
        check_deadline(self.deadline)?;
        check_hash(self.chosen_provider_ref_hash, HashField::ChosenProviderRefHash)
    }

    pub fn to_abi(&self) -> UpdateIntentAbi {
        (
            self.status as u8,
            self.chosen_provider_ref_hash,
            self.attempts,
            self.last_fail_reason as u8,
            self.last_fail_detail_hash,
            self.deadline,
        )
    }
}

impl TryFrom<UpdateIntentAbi> for UpdateIntentParams {
    type Error = RegistryError;

    fn try_from(abi: UpdateIntentAbi) -> Result<Self, Self::Error> {
        let (
            status,
            chosen_provider_ref_hash,
            attempts,
            last_fail_reason,
            last_fail_detail_hash,
            deadline,
        ) = abi;

        Ok(Self {
            status: decode_enum(status, EnumField::Status)?,
            chosen_provider_ref_hash,
            attempts,
            last_fail_reason: decode_enum(last_fail_reason, EnumField::FailReason)?,
            last_fail_detail_hash,
            deadline,
        })
    }
}

impl TryFrom<IntentAbi> for PaymentIntent {
    type Error = RegistryError;

    fn try_from(abi: IntentAbi) -> Result<Self, Self::Error> {
        let (
            id,
            external_reference_id,
            amount,
            recipient_type,
            sender_hash,
            recipient_hash,
            metadata_hash,
            preference,
            chosen_provider_ref_hash,
            created_at,
            deadline,
            last_updated_at,
            status,
            attempts,
            last_fail_reason,
            last_fail_detail_hash,
        ) = abi;

        Ok(Self {
            id,
            external_reference_id,
            amount,
            recipient_type: decode_enum(recipient_type, EnumField::RecipientType)?,
            sender_hash,
            recipient_hash,
            metadata_hash,
            preference: decode_enum(preference, EnumField::Preference)?,
            chosen_provider_ref_hash,
            created_at,
            deadline,
            last_updated_at,
            status: decode_enum(status, EnumField::Status)?,
            attempts,
            last_fail_reason: decode_enum(last_fail_reason, EnumField::FailReason)?,
            last_fail_detail_hash,
        })
    }
}

impl PaymentIntent {
    /// Build a freshly created intent under `id`.
    pub fn create(id: U256, params: &CreateIntentParams, now: u64) -> Result<Self, RegistryError> {
        params.validate()?;

        Ok(Self {
            id,
            external_reference_id: params.external_reference_id,
            amount: params.amount,
            recipient_type: params.recipient_type,
            sender_hash: params.sender_hash,
            recipient_hash: params.recipient_hash,
            metadata_hash: params.metadata_hash,
            preference: params.preference,
            chosen_provider_ref_hash: params.chosen_provider_ref_hash,
            created_at: now,
            deadline: params.deadline,
            last_updated_at: now,
            status: IntentStatus::Created,
            attempts: 0,
            last_fail_reason: FailReason::None,
            last_fail_detail_hash: B256::ZERO,
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether this record was produced by `create` under `id`. Ids start at 1, so the zero
    /// record read back for an unused slot never matches.
    pub fn is_created_as(&self, id: U256) -> bool {
        self.id != U256::ZERO && self.id == id
    }

    fn ensure_created(&self, id: U256) -> Result<(), RegistryError> {
        if !self.is_created_as(id) {
            return Err(RegistryError::UnknownIntent { id });
        }
        Ok(())
    }

    /// Overwrite the mutable fields. `id` is the key the caller addressed; `self` must be the
    /// record created under it.
    ///
    /// Leaves `self` untouched on error.
    pub fn apply_update(
        &mut self,
        id: U256,
        params: &UpdateIntentParams,
        now: u64,
    ) -> Result<IntentUpdated, RegistryError> {
        params.validate()?;
        self.ensure_created(id)?;
        if self.is_terminal() {
            return Err(RegistryError::IntentFinalized {
                id,
                status: self.status,
            });
        }

        self.status = params.status;
        self.chosen_provider_ref_hash = params.chosen_provider_ref_hash;
        self.attempts = params.attempts;
        self.last_fail_reason = params.last_fail_reason;
        self.last_fail_detail_hash = params.last_fail_detail_hash;
        self.deadline = params.deadline;
        self.last_updated_at = now;

        Ok(IntentUpdated {
            id,
            status: self.status as u8,
            chosenProviderRefHash: self.chosen_provider_ref_hash,
            lastFailReason: self.last_fail_reason as u8,
        })
    }

    /// Move to `Cancelled`. Leaves `self` untouched on error.
    pub fn cancel(&mut self, id: U256, now: u64) -> Result<IntentCancelled, RegistryError> {
        self.ensure_created(id)?;
        if !self.status.is_cancellable() {
            return Err(RegistryError::IntentNotCancellable {
                id,
                status: self.status,
            });
        }

        self.status = IntentStatus::Cancelled;
        self.last_updated_at = now;
        Ok(IntentCancelled { id })
    }

    pub fn created_fact(&self) -> IntentCreated {
        IntentCreated {
            id: self.id,
            externalReferenceId: self.external_reference_id,
            amount: self.amount,
            senderHash: self.sender_hash,
            recipientType: self.recipient_type as u8,
            recipientHash: self.recipient_hash,
            metadataHash: self.metadata_hash,
            deadline: self.deadline,
        }
    }

    pub fn to_abi(&self) -> IntentAbi {
        (
            self.id,
            self.external_reference_id,
            self.amount,
            self.recipient_type as u8,
            self.sender_hash,
            self.recipient_hash,
            self.metadata_hash,
            self.preference as u8,
            self.chosen_provider_ref_hash,
            self.created_at,
            self.deadline,
            self.last_updated_at,
            self.status as u8,
            self.attempts,
            self.last_fail_reason as u8,
            self.last_fail_detail_hash,
        )
    }
}
