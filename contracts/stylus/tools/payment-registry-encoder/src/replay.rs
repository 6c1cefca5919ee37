//! Consumer-side ledger mirror rebuilt from the ordered fact stream.
//!
//! The registries never cross-check each other; this is where receipts are compared against
//! the intent lifecycle they claim to conclude.

use std::collections::BTreeMap;

use alloy_primitives::{B256, U256};
use payment_registry_types::{FailReason, IntentStatus, MemoryRoles, Role, RoleLookup};
use tracing::{debug, warn};

use crate::facts::RegistryFact;

/// What the fact stream reveals about an intent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntentView {
    pub external_reference_id: B256,
    pub amount: U256,
    pub deadline: u64,
    pub status: IntentStatus,
    pub chosen_provider_ref_hash: B256,
    pub last_fail_reason: FailReason,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiptView {
    pub receipt_hash: B256,
    pub receipt_version: u32,
    pub provider_ref_hash: B256,
    pub final_status: IntentStatus,
    pub final_reason: FailReason,
}

/// A history the registries could not have produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayError {
    NonSequentialId { expected: U256, got: U256 },
    UpdateAfterTerminal { id: U256, status: IntentStatus },
    CancelNotAllowed { id: U256, status: IntentStatus },
    UnknownIntent { id: U256 },
    InvalidEnumValue { id: U256, value: u8 },
}

/// A receipt whose asserted outcome disagrees with the mirrored intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptMismatch {
    pub intent_id: U256,
    pub asserted: IntentStatus,
    /// `None` when no intent with this id was ever observed.
    pub observed: Option<IntentStatus>,
}

#[derive(Debug, Default)]
pub struct LedgerMirror {
    intents: BTreeMap<U256, IntentView>,
    receipts: BTreeMap<U256, ReceiptView>,
    roles: MemoryRoles,
    last_id: U256,
}

fn status(id: U256, value: u8) -> Result<IntentStatus, ReplayError> {
    IntentStatus::try_from(value).map_err(|_| ReplayError::InvalidEnumValue { id, value })
}

fn reason(id: U256, value: u8) -> Result<FailReason, ReplayError> {
    FailReason::try_from(value).map_err(|_| ReplayError::InvalidEnumValue { id, value })
}

impl LedgerMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply facts in emission order, stopping at the first inconsistency.
    pub fn apply_all<'a, I>(&mut self, facts: I) -> Result<(), ReplayError>
    where
        I: IntoIterator<Item = &'a RegistryFact>,
    {
        facts.into_iter().try_for_each(|fact| self.apply(fact))
    }

    /// Apply one fact. On error the mirror is left unchanged.
    pub fn apply(&mut self, fact: &RegistryFact) -> Result<(), ReplayError> {
        match fact {
            RegistryFact::IntentCreated(e) => {
                let expected = self.last_id + U256::from(1u64);
                if e.id != expected {
                    warn!(%expected, got = %e.id, "intent id out of sequence");
                    return Err(ReplayError::NonSequentialId {
                        expected,
                        got: e.id,
                    });
                }
                self.last_id = e.id;
                self.intents.insert(
                    e.id,
                    IntentView {
                        external_reference_id: e.externalReferenceId,
                        amount: e.amount,
                        deadline: e.deadline,
                        status: IntentStatus::Created,
                        chosen_provider_ref_hash: B256::ZERO,
                        last_fail_reason: FailReason::None,
                    },
                );
                debug!(id = %e.id, amount = %e.amount, "intent created");
            }
            RegistryFact::IntentUpdated(e) => {
                let next = status(e.id, e.status)?;
                let fail_reason = reason(e.id, e.lastFailReason)?;
                let current = self.observed_status(e.id)?;
                if current.is_terminal() {
                    warn!(id = %e.id, ?current, "update observed after terminal status");
                    return Err(ReplayError::UpdateAfterTerminal {
                        id: e.id,
                        status: current,
                    });
                }
                let view = self.intents.entry(e.id).or_default();
                view.status = next;
                view.chosen_provider_ref_hash = e.chosenProviderRefHash;
                view.last_fail_reason = fail_reason;
                debug!(id = %e.id, status = ?next, "intent updated");
            }
            RegistryFact::IntentCancelled(e) => {
                let current = self.observed_status(e.id)?;
                if !current.is_cancellable() {
                    warn!(id = %e.id, ?current, "cancellation observed from non-cancellable status");
                    return Err(ReplayError::CancelNotAllowed {
                        id: e.id,
                        status: current,
                    });
                }
                self.intents.entry(e.id).or_default().status = IntentStatus::Cancelled;
                debug!(id = %e.id, "intent cancelled");
            }
            RegistryFact::ExecutorUpdated(e) => {
                self.roles.set(Role::Executor, e.executor, e.authorized);
                debug!(executor = %e.executor, authorized = e.authorized, "executor role changed");
            }
            RegistryFact::CommitterUpdated(e) => {
                self.roles.set(Role::Committer, e.committer, e.authorized);
                debug!(committer = %e.committer, authorized = e.authorized, "committer role changed");
            }
            RegistryFact::ReceiptCommitted(e) => {
                let view = ReceiptView {
                    receipt_hash: e.receiptHash,
                    receipt_version: e.receiptVersion,
                    provider_ref_hash: e.providerRefHash,
                    final_status: status(e.intentId, e.finalStatus)?,
                    final_reason: reason(e.intentId, e.finalReason)?,
                };
                if let Some(previous) = self.receipts.insert(e.intentId, view) {
                    debug!(
                        intent_id = %e.intentId,
                        previous_version = previous.receipt_version,
                        version = e.receiptVersion,
                        "receipt overwritten"
                    );
                }
            }
        }
        Ok(())
    }

    fn observed_status(&self, id: U256) -> Result<IntentStatus, ReplayError> {
        match self.intents.get(&id) {
            Some(view) => Ok(view.status),
            None => {
                warn!(%id, "mutation observed for an intent that was never created");
                Err(ReplayError::UnknownIntent { id })
            }
        }
    }

    pub fn intent(&self, id: U256) -> Option<&IntentView> {
        self.intents.get(&id)
    }

    pub fn receipt(&self, intent_id: U256) -> Option<&ReceiptView> {
        self.receipts.get(&intent_id)
    }

    /// Highest intent id observed in a creation fact.
    pub fn last_id(&self) -> U256 {
        self.last_id
    }

    pub fn is_executor(&self, who: alloy_primitives::Address) -> bool {
        self.roles.is_member(Role::Executor, who)
    }

    pub fn is_committer(&self, who: alloy_primitives::Address) -> bool {
        self.roles.is_member(Role::Committer, who)
    }

    /// Receipts whose `finalStatus` does not equal the mirrored intent's terminal status.
    ///
    /// A receipt for an intent that is still in flight (non-terminal) is reported too.
    pub fn receipt_mismatches(&self) -> Vec<ReceiptMismatch> {
        self.receipts
            .iter()
            .filter_map(|(id, receipt)| {
                let observed = self.intents.get(id).map(|v| v.status);
                let consistent = matches!(
                    observed,
                    Some(s) if s.is_terminal() && s == receipt.final_status
                );
                (!consistent).then_some(ReceiptMismatch {
                    intent_id: *id,
                    asserted: receipt.final_status,
                    observed,
                })
            })
            .collect()
    }
}
