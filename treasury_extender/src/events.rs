//! Events emitted by the ledger, one per successful state-changing operation.
//!
//! Each event also has the Ethereum log encoding of the on-chain extender, so
//! indexers built for that system can consume them unchanged.

use alloy_primitives::{Address, LogData, U256};
use alloy_sol_types::SolEvent;
use candid::CandidType;

mod abi {
    use alloy_sol_types::sol;

    sol! {
        event NewAllocatorRegistered(address allocator, address token, uint256 id);
        event AllocatorLimitsChanged(
            uint256 indexed id,
            uint256 allocationLimit,
            uint256 lossLimit
        );
        event AllocatorReportedGain(uint256 indexed id, uint256 gain);
        event AllocatorReportedLoss(uint256 indexed id, uint256 loss);
        event AllocatorReportedMigration(uint256 indexed id);
        event AllocatorFunded(uint256 indexed id, uint256 amount, uint256 value);
        event AllocatorWithdrawal(uint256 indexed id, uint256 amount, uint256 value);
        event AllocatorRewardsWithdrawal(uint256 indexed id, uint256 amount, uint256 value);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtenderEvent {
    NewAllocatorRegistered {
        allocator: Address,
        token: Address,
        id: u64,
    },
    AllocatorLimitsChanged {
        id: u64,
        allocation_limit: U256,
        loss_limit: U256,
    },
    AllocatorReportedGain {
        id: u64,
        gain: U256,
    },
    AllocatorReportedLoss {
        id: u64,
        loss: U256,
    },
    AllocatorReportedMigration {
        id: u64,
    },
    AllocatorFunded {
        id: u64,
        amount: U256,
        value: U256,
    },
    AllocatorWithdrawal {
        id: u64,
        amount: U256,
        value: U256,
    },
    AllocatorRewardsWithdrawal {
        id: u64,
        amount: U256,
        value: U256,
    },
}

impl ExtenderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ExtenderEvent::NewAllocatorRegistered { .. } => abi::NewAllocatorRegistered::SIGNATURE,
            ExtenderEvent::AllocatorLimitsChanged { .. } => abi::AllocatorLimitsChanged::SIGNATURE,
            ExtenderEvent::AllocatorReportedGain { .. } => abi::AllocatorReportedGain::SIGNATURE,
            ExtenderEvent::AllocatorReportedLoss { .. } => abi::AllocatorReportedLoss::SIGNATURE,
            ExtenderEvent::AllocatorReportedMigration { .. } => {
                abi::AllocatorReportedMigration::SIGNATURE
            }
            ExtenderEvent::AllocatorFunded { .. } => abi::AllocatorFunded::SIGNATURE,
            ExtenderEvent::AllocatorWithdrawal { .. } => abi::AllocatorWithdrawal::SIGNATURE,
            ExtenderEvent::AllocatorRewardsWithdrawal { .. } => {
                abi::AllocatorRewardsWithdrawal::SIGNATURE
            }
        }
        .split('(')
        .next()
        .unwrap_or_default()
    }

    /// Id of the allocator the event is about
    pub fn allocator_id(&self) -> u64 {
        match self {
            ExtenderEvent::NewAllocatorRegistered { id, .. }
            | ExtenderEvent::AllocatorLimitsChanged { id, .. }
            | ExtenderEvent::AllocatorReportedGain { id, .. }
            | ExtenderEvent::AllocatorReportedLoss { id, .. }
            | ExtenderEvent::AllocatorReportedMigration { id }
            | ExtenderEvent::AllocatorFunded { id, .. }
            | ExtenderEvent::AllocatorWithdrawal { id, .. }
            | ExtenderEvent::AllocatorRewardsWithdrawal { id, .. } => *id,
        }
    }

    /// Encodes the event as Ethereum log topics and data
    pub fn encode_log_data(&self) -> LogData {
        match self.clone() {
            ExtenderEvent::NewAllocatorRegistered {
                allocator,
                token,
                id,
            } => abi::NewAllocatorRegistered {
                allocator,
                token,
                id: U256::from(id),
            }
            .encode_log_data(),
            ExtenderEvent::AllocatorLimitsChanged {
                id,
                allocation_limit,
                loss_limit,
            } => abi::AllocatorLimitsChanged {
                id: U256::from(id),
                allocationLimit: allocation_limit,
                lossLimit: loss_limit,
            }
            .encode_log_data(),
            ExtenderEvent::AllocatorReportedGain { id, gain } => abi::AllocatorReportedGain {
                id: U256::from(id),
                gain,
            }
            .encode_log_data(),
            ExtenderEvent::AllocatorReportedLoss { id, loss } => abi::AllocatorReportedLoss {
                id: U256::from(id),
                loss,
            }
            .encode_log_data(),
            ExtenderEvent::AllocatorReportedMigration { id } => abi::AllocatorReportedMigration {
                id: U256::from(id),
            }
            .encode_log_data(),
            ExtenderEvent::AllocatorFunded { id, amount, value } => abi::AllocatorFunded {
                id: U256::from(id),
                amount,
                value,
            }
            .encode_log_data(),
            ExtenderEvent::AllocatorWithdrawal { id, amount, value } => abi::AllocatorWithdrawal {
                id: U256::from(id),
                amount,
                value,
            }
            .encode_log_data(),
            ExtenderEvent::AllocatorRewardsWithdrawal { id, amount, value } => {
                abi::AllocatorRewardsWithdrawal {
                    id: U256::from(id),
                    amount,
                    value,
                }
                .encode_log_data()
            }
        }
    }
}

/// Candid view of an emitted event and its log encoding
#[derive(CandidType, Clone, Debug, PartialEq)]
pub struct EventQuery {
    pub name: String,
    pub allocator_id: u64,
    pub topics: Vec<String>,
    pub data: String,
}

impl From<&ExtenderEvent> for EventQuery {
    fn from(value: &ExtenderEvent) -> Self {
        let log = value.encode_log_data();
        Self {
            name: value.name().to_string(),
            allocator_id: value.allocator_id(),
            topics: log
                .topics()
                .iter()
                .map(|topic| format!("0x{}", hex::encode(topic)))
                .collect(),
            data: format!("0x{}", hex::encode(&log.data)),
        }
    }
}
