//! Stylus entrypoint for the payment intent registry.
//!
//! Storage is a thin persisted image of [`PaymentIntent`]; all lifecycle rules live in
//! `payment_registry_types`. Each public method loads the record, applies the pure transition,
//! writes it back and emits the resulting fact.

use alloc::{vec, vec::Vec};

use payment_registry_types::{
    authorize, CreateIntentAbi, CreateIntentParams, ExecutorUpdated, FailReason, IntentAbi,
    IntentStatus, PaymentIntent, RecipientType, RegistryRevert, Role, RoleLookup,
    RoutePreference, UpdateIntentAbi, UpdateIntentParams,
};
use stylus_sdk::{
    alloy_primitives::{Address, U256, U32, U64, U8},
    prelude::*,
    stylus_core::log,
};

sol_storage! {
    /// Persisted form of a payment intent; enums are stored as their `uint8` discriminants.
    pub struct StoredIntent {
        uint256 id;
        bytes32 external_reference_id;

        uint256 amount;
        uint8 recipient_type;
        bytes32 sender_hash;
        bytes32 recipient_hash;
        bytes32 metadata_hash;

        uint8 preference;
        bytes32 chosen_provider_ref_hash;

        uint64 created_at;
        uint64 deadline;
        uint64 last_updated_at;

        uint8 status;
        uint32 attempts;
        uint8 last_fail_reason;
        bytes32 last_fail_detail_hash;
    }

    #[entrypoint]
    pub struct IntentRegistry {
        /// Sole identity allowed to manage executors. Fixed at deployment.
        address admin;

        /// Highest id assigned so far; ids start at 1.
        uint256 intent_count;

        mapping(uint256 => StoredIntent) intents;
        mapping(address => bool) executors;
    }
}

#[public]
impl IntentRegistry {
    #[constructor]
    pub fn constructor(&mut self, admin: Address) {
        // Keep revert semantics deterministic; panic on malformed deployment args.
        if admin == Address::ZERO {
            panic!("Invalid admin");
        }
        self.admin.set(admin);
    }

    /// Register a new intent in `CREATED` and return its id.
    ///
    /// `params` layout: `(externalReferenceId, amount, senderHash, recipientType, recipientHash,
    /// metadataHash, preference, chosenProviderRefHash, deadline)`.
    pub fn create_intent(&mut self, params: CreateIntentAbi) -> Result<U256, RegistryRevert> {
        let caller = self.vm().msg_sender();
        authorize(&*self, caller, Role::Executor)?;
        let params = CreateIntentParams::try_from(params)?;

        // The id is only committed once the intent validates; rejected calls consume nothing.
        let id = self
            .intent_count
            .get()
            .checked_add(U256::from(1u64))
            .unwrap_or_else(|| panic!("Intent id space exhausted"));
        let intent = PaymentIntent::create(id, &params, self.vm().block_timestamp())?;

        self.intent_count.set(id);
        self.intents.setter(id).write_intent(&intent);
        log(self.vm(), intent.created_fact());
        Ok(id)
    }

    /// Overwrite the mutable fields of a non-terminal intent.
    ///
    /// `params` layout: `(status, chosenProviderRefHash, attempts, lastFailReason,
    /// lastFailDetailHash, deadline)`.
    pub fn update_intent(
        &mut self,
        id: U256,
        params: UpdateIntentAbi,
    ) -> Result<(), RegistryRevert> {
        let caller = self.vm().msg_sender();
        authorize(&*self, caller, Role::Executor)?;
        let params = UpdateIntentParams::try_from(params)?;

        let mut intent = self.intents.getter(id).to_intent();
        let fact = intent.apply_update(id, &params, self.vm().block_timestamp())?;

        self.intents.setter(id).write_intent(&intent);
        log(self.vm(), fact);
        Ok(())
    }

    pub fn cancel_intent(&mut self, id: U256) -> Result<(), RegistryRevert> {
        let caller = self.vm().msg_sender();
        authorize(&*self, caller, Role::Executor)?;

        let mut intent = self.intents.getter(id).to_intent();
        let fact = intent.cancel(id, self.vm().block_timestamp())?;

        self.intents.setter(id).write_intent(&intent);
        log(self.vm(), fact);
        Ok(())
    }

    /// Grant or revoke the executor role. Admin only.
    pub fn manage_executors(
        &mut self,
        executor: Address,
        authorized: bool,
    ) -> Result<(), RegistryRevert> {
        let caller = self.vm().msg_sender();
        authorize(&*self, caller, Role::Admin)?;

        self.executors.insert(executor, authorized);
        log(self.vm(), ExecutorUpdated { executor, authorized });
        Ok(())
    }

    /// Full record for `id`; all-zero (status `NONE`) if it was never created.
    pub fn get_intent(&self, id: U256) -> IntentAbi {
        self.intents.getter(id).to_intent().to_abi()
    }

    pub fn admin(&self) -> Address {
        self.admin.get()
    }

    pub fn is_executor(&self, account: Address) -> bool {
        self.executors.get(account)
    }

    pub fn intent_count(&self) -> U256 {
        self.intent_count.get()
    }
}

impl RoleLookup for IntentRegistry {
    fn admin(&self) -> Address {
        self.admin.get()
    }

    fn is_member(&self, role: Role, who: Address) -> bool {
        role == Role::Executor && self.executors.get(who)
    }
}

impl StoredIntent {
    fn to_intent(&self) -> PaymentIntent {
        PaymentIntent {
            id: self.id.get(),
            external_reference_id: self.external_reference_id.get(),
            amount: self.amount.get(),
            recipient_type: RecipientType::try_from(self.recipient_type.get().to::<u8>())
                .unwrap_or_default(),
            sender_hash: self.sender_hash.get(),
            recipient_hash: self.recipient_hash.get(),
            metadata_hash: self.metadata_hash.get(),
            preference: RoutePreference::try_from(self.preference.get().to::<u8>())
                .unwrap_or_default(),
            chosen_provider_ref_hash: self.chosen_provider_ref_hash.get(),
            created_at: self.created_at.get().to::<u64>(),
            deadline: self.deadline.get().to::<u64>(),
            last_updated_at: self.last_updated_at.get().to::<u64>(),
            status: IntentStatus::try_from(self.status.get().to::<u8>()).unwrap_or_default(),
            attempts: self.attempts.get().to::<u32>(),
            last_fail_reason: FailReason::try_from(self.last_fail_reason.get().to::<u8>())
                .unwrap_or_default(),
            last_fail_detail_hash: self.last_fail_detail_hash.get(),
        }
    }

    fn write_intent(&mut self, intent: &PaymentIntent) {
        self.id.set(intent.id);
        self.external_reference_id.set(intent.external_reference_id);
        self.amount.set(intent.amount);
        self.recipient_type.set(U8::from(intent.recipient_type as u8));
        self.sender_hash.set(intent.sender_hash);
        self.recipient_hash.set(intent.recipient_hash);
        self.metadata_hash.set(intent.metadata_hash);
        self.preference.set(U8::from(intent.preference as u8));
        self.chosen_provider_ref_hash.set(intent.chosen_provider_ref_hash);
        self.created_at.set(U64::from(intent.created_at));
        self.deadline.set(U64::from(intent.deadline));
        self.last_updated_at.set(U64::from(intent.last_updated_at));
        self.status.set(U8::from(intent.status as u8));
        self.attempts.set(U32::from(intent.attempts));
        self.last_fail_reason.set(U8::from(intent.last_fail_reason as u8));
        self.last_fail_detail_hash.set(intent.last_fail_detail_hash);
    }
}
