//! Facts emitted by the registries on every successful mutation.
//!
//! Field order is part of the contract with log consumers replaying history; append-only.

use alloy_sol_types::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    event IntentCreated(
        uint256 indexed id,
        bytes32 externalReferenceId,
        uint256 amount,
        bytes32 senderHash,
        uint8 recipientType,
        bytes32 recipientHash,
        bytes32 metadataHash,
        uint64 deadline
    );

    #[derive(Debug, PartialEq, Eq)]
    event IntentUpdated(
        uint256 indexed id,
        uint8 status,
        bytes32 chosenProviderRefHash,
        uint8 lastFailReason
    );

    #[derive(Debug, PartialEq, Eq)]
    event IntentCancelled(uint256 indexed id);

    #[derive(Debug, PartialEq, Eq)]
    event ExecutorUpdated(address indexed executor, bool authorized);

    #[derive(Debug, PartialEq, Eq)]
    event ReceiptCommitted(
        uint256 indexed intentId,
        bytes32 receiptHash,
        uint32 receiptVersion,
        bytes32 providerRefHash,
        uint8 finalStatus,
        uint8 finalReason
    );

    #[derive(Debug, PartialEq, Eq)]
    event CommitterUpdated(address indexed committer, bool authorized);
}
