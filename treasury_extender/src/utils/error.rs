use alloy_primitives::{Address, U256};

/// Treasury Extender Result
pub type ExtenderResult<T> = Result<T, ExtenderError>;

/// Treasury Extender Errors
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtenderError {
    /// The allocator reports `OFFLINE` where an active status is required
    AllocatorOffline,
    /// The allocator reports a non-`OFFLINE` status where `OFFLINE` is required
    AllocatorActivated,
    /// The allocator already carries a non-zero id
    AlreadyRegistered(u64),
    /// The sender is not the allocator stored at the given id
    OnlyAllocator(u64, Address),
    /// Funding would push holdings above the allocation limit (attempted, limit)
    MaxAllocation(U256, U256),
    /// Caller does not hold the operator role
    Unauthorized,
    /// A requested value does not exist
    NonExistentValue,
    /// A mutating call re-entered the ledger
    Locked,
    /// The call panicked and its state changes were undone
    Unwound,
    /// An external port call failed
    CallResult(Address, String),
    /// Decoding issue
    DecodingError(String),
    /// Arithmetic error
    Arithmetic(String),
}

pub fn arithmetic_err<S: AsRef<str>>(s: S) -> ExtenderError {
    ExtenderError::Arithmetic(format!("{:#?}", s.as_ref()))
}
