use anchor_lang::prelude::*;

#[event]
pub struct EntryProposedEvent {
    pub entry_id: u64,
    pub owner: Pubkey,
    pub name: String,
    pub timestamp: i64,
}

#[event]
pub struct EntryDeactivatedEvent {
    pub entry_id: u64,
    pub timestamp: i64,
}

#[event]
pub struct ParticipantAuthorizedEvent {
    pub identity: Pubkey,
    pub encryption_pubkey: [u8; 32],
    pub timestamp: i64,
}

#[event]
pub struct ParticipantRevokedEvent {
    pub identity: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RoundOpenedEvent {
    pub round: u64,
    pub entry_ids: Vec<u64>,
    pub timestamp: i64,
}

#[event]
pub struct SubmissionRecordedEvent {
    pub round: u64,
    pub entry_id: u64,
    pub participant: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RoundClosedEvent {
    pub round: u64,
    pub submissions: u8,
    pub timestamp: i64,
}

#[event]
pub struct TallyRequestedEvent {
    pub round: u64,
    pub computation: Pubkey,
    pub batch_len: u8,
    /// Cells queued so far, including this batch
    pub queued: u8,
    pub expected: u8,
    pub timestamp: i64,
}

#[event]
pub struct TallyRevealedEvent {
    pub round: u64,
    /// Zero when no entry received a positive value
    pub winner_entry_id: u64,
    pub winning_value: u64,
    pub winning_participant: Pubkey,
    pub timestamp: i64,
}
