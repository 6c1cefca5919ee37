use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use payment_registry_types::{
    CommitReceiptParams, CreateIntentParams, PaymentIntent, ReceiptProof, RegistryError,
    UpdateIntentParams,
};

sol! {
    /// ABI surface exported by the `IntentRegistry` Stylus contract.
    interface IIntentRegistry {
        function createIntent((bytes32,uint256,bytes32,uint8,bytes32,bytes32,uint8,bytes32,uint64) params) external returns (uint256);
        function updateIntent(uint256 id, (uint8,bytes32,uint32,uint8,bytes32,uint64) params) external;
        function cancelIntent(uint256 id) external;
        function manageExecutors(address executor, bool authorized) external;
        function getIntent(uint256 id) external view returns ((uint256,bytes32,uint256,uint8,bytes32,bytes32,bytes32,uint8,bytes32,uint64,uint64,uint64,uint8,uint32,uint8,bytes32) intent);
        function isExecutor(address account) external view returns (bool);
        function intentCount() external view returns (uint256);
    }

    /// ABI surface exported by the `ReceiptRegistry` Stylus contract.
    interface IReceiptRegistry {
        function commitReceipt((uint256,bytes32,bytes32,bytes32,bytes32,uint32,uint8,uint8) params) external;
        function manageCommitters(address committer, bool authorized) external;
        function getReceipt(uint256 intentId) external view returns ((uint256,bytes32,bytes32,bytes32,bytes32,uint32,uint8,uint8,uint64,address) receipt);
        function hasReceipt(uint256 intentId) external view returns (bool);
        function isCommitter(address account) external view returns (bool);
    }
}

/// Errors decoding a registry view's return data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDecodeError {
    /// Return data did not match the expected ABI shape.
    Malformed,
    /// Return data decoded but carried an out-of-range enum.
    Registry(RegistryError),
}

pub fn encode_create_intent(params: &CreateIntentParams) -> Vec<u8> {
    IIntentRegistry::createIntentCall {
        params: params.to_abi(),
    }
    .abi_encode()
}

pub fn encode_update_intent(id: U256, params: &UpdateIntentParams) -> Vec<u8> {
    IIntentRegistry::updateIntentCall {
        id,
        params: params.to_abi(),
    }
    .abi_encode()
}

pub fn encode_cancel_intent(id: U256) -> Vec<u8> {
    IIntentRegistry::cancelIntentCall { id }.abi_encode()
}

pub fn encode_manage_executors(executor: Address, authorized: bool) -> Vec<u8> {
    IIntentRegistry::manageExecutorsCall {
        executor,
        authorized,
    }
    .abi_encode()
}

pub fn encode_get_intent(id: U256) -> Vec<u8> {
    IIntentRegistry::getIntentCall { id }.abi_encode()
}

pub fn encode_commit_receipt(params: &CommitReceiptParams) -> Vec<u8> {
    IReceiptRegistry::commitReceiptCall {
        params: params.to_abi(),
    }
    .abi_encode()
}

pub fn encode_manage_committers(committer: Address, authorized: bool) -> Vec<u8> {
    IReceiptRegistry::manageCommittersCall {
        committer,
        authorized,
    }
    .abi_encode()
}

pub fn encode_get_receipt(intent_id: U256) -> Vec<u8> {
    IReceiptRegistry::getReceiptCall {
        intentId: intent_id,
    }
    .abi_encode()
}

/// Decode `getIntent` return data.
pub fn decode_get_intent(data: &[u8]) -> Result<PaymentIntent, ViewDecodeError> {
    let ret = IIntentRegistry::getIntentCall::abi_decode_returns(data, true)
        .map_err(|_| ViewDecodeError::Malformed)?;
    PaymentIntent::try_from(ret.intent).map_err(ViewDecodeError::Registry)
}

/// Decode `getReceipt` return data.
pub fn decode_get_receipt(data: &[u8]) -> Result<ReceiptProof, ViewDecodeError> {
    let ret = IReceiptRegistry::getReceiptCall::abi_decode_returns(data, true)
        .map_err(|_| ViewDecodeError::Malformed)?;
    ReceiptProof::try_from(ret.receipt).map_err(ViewDecodeError::Registry)
}
