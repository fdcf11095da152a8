//! Pure reconciliation arithmetic for performance reports and fund returns.

use alloy_primitives::U256;

use crate::{
    events::ExtenderEvent,
    utils::{common::checked_add, error::ExtenderResult},
};

/// How a report moves holdings and the aggregate value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportReconciliation {
    /// Loss actually booked against holdings. For a migration it is the whole
    /// outstanding principal, discarding the reported loss magnitude.
    pub working_loss: U256,
    /// Whether the reported gain is valued into the aggregate
    pub credits_gain: bool,
}

/// Reconciles a report of `gain` and `loss` against the current `allocated` holdings.
///
/// A report carrying both a gain and a loss is the migration signal.
pub fn reconcile_report(gain: U256, loss: U256, allocated: U256) -> ReportReconciliation {
    if !gain.is_zero() && !loss.is_zero() {
        ReportReconciliation {
            working_loss: allocated,
            credits_gain: false,
        }
    } else if !gain.is_zero() {
        ReportReconciliation {
            working_loss: U256::ZERO,
            credits_gain: true,
        }
    } else {
        ReportReconciliation {
            working_loss: loss,
            credits_gain: false,
        }
    }
}

/// Picks the report event by comparing the reported gain with the working loss.
///
/// The comparison uses the post-adjustment loss, so a migration whose gain
/// equals the outstanding principal is classified as a migration even when the
/// reported loss differs.
pub fn classify_report(id: u64, gain: U256, working_loss: U256) -> ExtenderEvent {
    if gain > working_loss {
        ExtenderEvent::AllocatorReportedGain { id, gain }
    } else if gain != working_loss {
        ExtenderEvent::AllocatorReportedLoss {
            id,
            loss: working_loss,
        }
    } else {
        ExtenderEvent::AllocatorReportedMigration { id }
    }
}

/// Outcome of returning funds from an allocator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReturnReconciliation {
    /// Amount pulled from the allocator, possibly capped
    pub transferred: U256,
    /// Holdings after the return
    pub allocated: U256,
    /// Cumulative gain after the return; only written back when `allocated` is zero
    pub gain: U256,
}

/// Reconciles a return of `amount` against `allocated` holdings and cumulative `gain`.
///
/// Principal is returned first; anything above it is drawn from the recorded
/// gain, and the transfer is capped at `allocated + gain`.
pub fn reconcile_return(
    amount: U256,
    allocated: U256,
    gain: U256,
) -> ExtenderResult<ReturnReconciliation> {
    if amount <= allocated {
        return Ok(ReturnReconciliation {
            transferred: amount,
            allocated: allocated - amount,
            gain,
        });
    }

    let excess = amount - allocated;
    if excess <= gain {
        Ok(ReturnReconciliation {
            transferred: amount,
            allocated: U256::ZERO,
            gain: gain - excess,
        })
    } else {
        Ok(ReturnReconciliation {
            transferred: checked_add(allocated, gain, "Returnable amount")?,
            allocated: U256::ZERO,
            gain: U256::ZERO,
        })
    }
}
