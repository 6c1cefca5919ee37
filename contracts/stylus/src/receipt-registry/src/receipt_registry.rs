use alloc::{vec, vec::Vec};

use payment_registry_types::{
    authorize, CommitReceiptAbi, CommitReceiptParams, CommitterUpdated, FailReason,
    IntentStatus, ReceiptAbi, ReceiptProof, RegistryRevert, Role, RoleLookup,
};
use stylus_sdk::{
    alloy_primitives::{Address, U256, U32, U64, U8},
    prelude::*,
    stylus_core::log,
};

sol_storage! {
    /// Persisted form of a receipt proof.
    pub struct StoredReceipt {
        uint256 intent_id;
        bytes32 receipt_hash;
        bytes32 provider_ref_hash;
        bytes32 receipt_uri_hash;
        bytes32 evidence_hash;
        uint32 receipt_version;
        uint8 final_status;
        uint8 final_reason;
        uint64 committed_at;
        address committed_by;
    }

    #[entrypoint]
    pub struct ReceiptRegistry {
        /// Sole identity allowed to manage committers. Fixed at deployment.
        address admin;

        /// Receipt per intent id (last write wins).
        mapping(uint256 => StoredReceipt) receipts;
        mapping(address => bool) committers;
    }
}

#[public]
impl ReceiptRegistry {
    #[constructor]
    pub fn constructor(&mut self, admin: Address) {
        // Keep revert semantics deterministic; panic on malformed deployment args.
        if admin == Address::ZERO {
            panic!("Invalid admin");
        }
        self.admin.set(admin);
    }

    /// Create or fully replace the receipt for `params.intentId`.
    ///
    /// `params` layout: `(intentId, receiptHash, providerRefHash, receiptUriHash, evidenceHash,
    /// receiptVersion, finalStatus, finalReason)`.
    ///
    /// The intent id is not checked against the intent registry and `finalStatus` is taken as
    /// asserted.
    pub fn commit_receipt(&mut self, params: CommitReceiptAbi) -> Result<(), RegistryRevert> {
        let caller = self.vm().msg_sender();
        authorize(&*self, caller, Role::Committer)?;
        let params = CommitReceiptParams::try_from(params)?;

        let receipt = ReceiptProof::commit(&params, caller, self.vm().block_timestamp())?;

        self.receipts.setter(receipt.intent_id).write_receipt(&receipt);
        log(self.vm(), receipt.committed_fact());
        Ok(())
    }

    /// Grant or revoke the committer role. Admin only.
    pub fn manage_committers(
        &mut self,
        committer: Address,
        authorized: bool,
    ) -> Result<(), RegistryRevert> {
        let caller = self.vm().msg_sender();
        authorize(&*self, caller, Role::Admin)?;

        self.committers.insert(committer, authorized);
        log(self.vm(), CommitterUpdated { committer, authorized });
        Ok(())
    }

    /// Receipt for `intent_id`; all-zero if nothing was ever committed.
    pub fn get_receipt(&self, intent_id: U256) -> ReceiptAbi {
        self.receipts.getter(intent_id).to_receipt().to_abi()
    }

    pub fn has_receipt(&self, intent_id: U256) -> bool {
        !self.receipts.getter(intent_id).to_receipt().is_empty()
    }

    pub fn admin(&self) -> Address {
        self.admin.get()
    }

    pub fn is_committer(&self, account: Address) -> bool {
        self.committers.get(account)
    }
}

impl RoleLookup for ReceiptRegistry {
    fn admin(&self) -> Address {
        self.admin.get()
    }

    fn is_member(&self, role: Role, who: Address) -> bool {
        role == Role::Committer && self.committers.get(who)
    }
}

impl StoredReceipt {
    fn to_receipt(&self) -> ReceiptProof {
        ReceiptProof {
            intent_id: self.intent_id.get(),
            receipt_hash: self.receipt_hash.get(),
            provider_ref_hash: self.provider_ref_hash.get(),
            receipt_uri_hash: self.receipt_uri_hash.get(),
            evidence_hash: self.evidence_hash.get(),
            receipt_version: self.receipt_version.get().to::<u32>(),
            final_status: IntentStatus::try_from(self.final_status.get().to::<u8>())
                .unwrap_or_default(),
            final_reason: FailReason::try_from(self.final_reason.get().to::<u8>())
                .unwrap_or_default(),
            committed_at: self.committed_at.get().to::<u64>(),
            committed_by: self.committed_by.get(),
        }
    }

    fn write_receipt(&mut self, receipt: &ReceiptProof) {
        self.intent_id.set(receipt.intent_id);
        self.receipt_hash.set(receipt.receipt_hash);
        self.provider_ref_hash.set(receipt.provider_ref_hash);
        self.receipt_uri_hash.set(receipt.receipt_uri_hash);
        self.evidence_hash.set(receipt.evidence_hash);
        self.receipt_version.set(U32::from(receipt.receipt_version));
        self.final_status.set(U8::from(receipt.final_status as u8));
        self.final_reason.set(U8::from(receipt.final_reason as u8));
        self.committed_at.set(U64::from(receipt.committed_at));
        self.committed_by.set(receipt.committed_by);
    }
}
