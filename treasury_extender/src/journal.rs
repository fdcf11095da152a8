//! Operation journal
//!
//! Every mutating ledger operation commits one entry describing its outcome,
//! whether it succeeded or was aborted. The journal keeps the most recent
//! `capacity` entries and drops the oldest ones beyond that.

use std::collections::VecDeque;

use alloy_primitives::Address;
use candid::CandidType;
use chrono::Utc;

use crate::{constants::DEFAULT_JOURNAL_CAPACITY, utils::error::ExtenderResult};

/// Category of the journaled operation
#[derive(Clone, Copy, CandidType, Debug, PartialEq, Eq)]
pub enum LogType {
    Info,
    Registration,
    Limits,
    Report,
    Funding,
    Withdrawal,
    Rewards,
}

/// Journal entry
#[derive(Clone, Debug, PartialEq)]
pub struct JournalEntry {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub entry: ExtenderResult<()>,
    pub log_type: LogType,
    pub allocator_id: Option<u64>,
    pub caller: Option<Address>,
    pub note: Option<String>,
}

/// Builder for journal entries
impl JournalEntry {
    /// Create a new instance of a journal entry
    /// Fills the `timestamp`, `entry` and `log_type` fields
    pub fn new(entry: ExtenderResult<()>, log_type: LogType) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis().max(0) as u64,
            entry,
            log_type,
            allocator_id: None,
            caller: None,
            note: None,
        }
    }

    /// Fills the `allocator_id` field of the entry
    pub fn allocator(mut self, id: u64) -> Self {
        self.allocator_id = Some(id);
        self
    }

    /// Fills the `caller` field of the entry
    pub fn caller(mut self, caller: Address) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Fills the `note` field of the entry
    pub fn note<S: AsRef<str>>(mut self, text: S) -> Self {
        self.note = Some(text.as_ref().to_string());
        self
    }
}

/// Bounded, append-only collection of journal entries
#[derive(Clone, Debug)]
pub struct Journal {
    entries: VecDeque<JournalEntry>,
    capacity: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY as usize)
    }
}

impl Journal {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Commits the entry, dropping the oldest entries beyond capacity
    pub fn commit(&mut self, entry: JournalEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }
}

/// Candid view of a journal entry
#[derive(CandidType, Clone, Debug, PartialEq)]
pub struct JournalEntryQuery {
    pub timestamp: u64,
    pub error: Option<String>,
    pub log_type: LogType,
    pub allocator_id: Option<u64>,
    pub caller: Option<String>,
    pub note: Option<String>,
}

impl From<&JournalEntry> for JournalEntryQuery {
    fn from(value: &JournalEntry) -> Self {
        Self {
            timestamp: value.timestamp,
            error: value.entry.as_ref().err().map(|err| format!("{:?}", err)),
            log_type: value.log_type,
            allocator_id: value.allocator_id,
            caller: value.caller.map(|caller| caller.to_string()),
            note: value.note.clone(),
        }
    }
}
