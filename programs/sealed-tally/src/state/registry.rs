use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// How decrypted submissions are reduced to a winner.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum TallyMode {
    /// Voting: values are summed per entry, the entry with the largest sum wins.
    Sum,
    /// Auction: the single largest submission wins.
    Max,
}

/// Where the round controller currently stands.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum RoundPhase {
    Idle,
    Open,
    /// Closed, waiting on the MXE cluster to deliver the decrypted batch.
    ClosedPending,
}

/// Singleton holding the administrator, counters and the round phase.
#[account]
#[derive(InitSpace)]
pub struct Registry {
    /// PDA bump seed
    pub bump: u8,
    /// Only identity allowed to deactivate entries, manage participants and drive rounds
    pub admin: Pubkey,
    pub mode: TallyMode,
    /// Last assigned entry id (ids start at 1)
    pub entry_count: u64,
    /// Number of the current or next round (starts at 1)
    pub round_number: u64,
    pub phase: RoundPhase,
}

impl Registry {
    pub fn ensure_admin(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.admin, ErrorCode::Unauthorized);
        Ok(())
    }

    /// Reserves the next sequential entry id.
    pub fn next_entry_id(&mut self) -> Result<u64> {
        self.entry_count = self
            .entry_count
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(self.entry_count)
    }

    pub fn ensure_idle(&self) -> Result<()> {
        match self.phase {
            RoundPhase::Idle => Ok(()),
            RoundPhase::Open => err!(ErrorCode::AlreadyActive),
            RoundPhase::ClosedPending => err!(ErrorCode::TallyPending),
        }
    }

    /// Returns to Idle and moves the counter on to the next round.
    pub fn complete_round(&mut self) -> Result<()> {
        self.round_number = self
            .round_number
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        self.phase = RoundPhase::Idle;
        Ok(())
    }
}
