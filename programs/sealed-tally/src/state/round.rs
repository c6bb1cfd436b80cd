use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::ErrorCode,
    utils::{BatchPosition, TallyOutcome},
};

/// One bounded submission period over a fixed subset of entries.
#[account]
#[derive(InitSpace)]
pub struct Round {
    /// PDA bump seed
    pub bump: u8,
    pub number: u64,
    /// Eligible entries, deduplicated, in the order the administrator gave them
    #[max_len(8)]
    pub entry_ids: Vec<u64>,
    pub active: bool,
    pub results_revealed: bool,
    pub started_at: i64,
    /// Zero until the round is closed
    pub ended_at: i64,
    /// Identities that submitted at least once, in first-submission order
    #[max_len(64)]
    pub participants: Vec<Pubkey>,
    pub submission_count: u8,
    pub winner_entry_id: u64,
    pub winning_value: u64,
    /// Winning bidder in `TallyMode::Max`, default key otherwise
    pub winning_participant: Pubkey,
}

impl Round {
    /// Validates a requested selection and returns it deduplicated, first
    /// occurrence kept.
    pub fn snapshot(entry_ids: &[u64]) -> Result<Vec<u64>> {
        require!(!entry_ids.is_empty(), ErrorCode::EmptySelection);

        let mut snapshot: Vec<u64> = Vec::with_capacity(entry_ids.len());
        for id in entry_ids {
            if !snapshot.contains(id) {
                snapshot.push(*id);
            }
        }
        require!(
            snapshot.len() <= MAX_ROUND_ENTRIES,
            ErrorCode::TooManyEntries
        );
        Ok(snapshot)
    }

    pub fn open(&mut self, bump: u8, number: u64, snapshot: Vec<u64>, now: i64) {
        self.bump = bump;
        self.number = number;
        self.entry_ids = snapshot;
        self.active = true;
        self.results_revealed = false;
        self.started_at = now;
        self.ended_at = 0;
        self.participants = Vec::new();
        self.submission_count = 0;
        self.winner_entry_id = 0;
        self.winning_value = 0;
        self.winning_participant = Pubkey::default();
    }

    pub fn ensure_open(&self) -> Result<()> {
        require!(self.active, ErrorCode::NotActive);
        Ok(())
    }

    /// Position of the entry in the snapshot.
    pub fn entry_position(&self, entry_id: u64) -> Result<usize> {
        self.entry_ids
            .iter()
            .position(|id| *id == entry_id)
            .ok_or_else(|| error!(ErrorCode::EntryNotInRound))
    }

    pub fn participant_position(&self, participant: &Pubkey) -> Option<usize> {
        self.participants.iter().position(|p| p == participant)
    }

    /// Where a submission of this round sits in the tally order.
    pub fn batch_position(&self, entry_id: u64, participant: &Pubkey) -> Result<BatchPosition> {
        let entry_position = self.entry_position(entry_id)?;
        let participant_position = self
            .participant_position(participant)
            .ok_or(ErrorCode::InvalidSubmissionAccount)?;
        Ok((entry_position, participant_position))
    }

    /// Counts an accepted submission and adds the participant if new.
    pub fn record_submission(&mut self, participant: Pubkey) -> Result<()> {
        require!(
            (self.submission_count as usize) < MAX_ROUND_SUBMISSIONS,
            ErrorCode::BatchFull
        );
        if self.participant_position(&participant).is_none() {
            self.participants.push(participant);
        }
        self.submission_count += 1;
        Ok(())
    }

    pub fn end(&mut self, now: i64) -> Result<()> {
        self.ensure_open()?;
        self.active = false;
        self.ended_at = now;
        Ok(())
    }

    /// Publishes the outcome. The round is immutable afterwards.
    pub fn reveal(&mut self, outcome: &TallyOutcome) {
        self.winner_entry_id = outcome.winner_entry_id;
        self.winning_value = outcome.winning_value;
        self.winning_participant = outcome.winning_participant;
        self.results_revealed = true;
    }
}
