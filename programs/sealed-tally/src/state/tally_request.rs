use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::ErrorCode,
    state::TallyMode,
    utils::{reduce, TallyOutcome},
};

/// Position of one ciphertext in the decryption batch.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct TallyCell {
    pub entry_id: u64,
    pub participant: Pubkey,
}

/// One queued `reveal_batch` computation covering `len` cells from `start`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct TallyChunk {
    /// Computation account of the queued job; identifies the chunk
    pub computation: Pubkey,
    pub start: u8,
    pub len: u8,
    pub done: bool,
}

/// The tally of one closed round, decrypted in chunks and consumed exactly once.
#[account]
#[derive(InitSpace)]
pub struct TallyRequest {
    /// PDA bump seed
    pub bump: u8,
    pub round: u64,
    pub mode: TallyMode,
    /// Submissions the round holds; the tally is complete once all are queued and decrypted
    pub expected: u8,
    /// Batch layout: snapshot entry order, then participant order
    #[max_len(64)]
    pub cells: Vec<TallyCell>,
    /// Decrypted values, one per cell, zero until the cell's chunk arrives
    #[max_len(64)]
    pub values: Vec<u64>,
    #[max_len(8)]
    pub chunks: Vec<TallyChunk>,
    pub processed: bool,
    pub requested_at: i64,
    pub processed_at: i64,
}

impl TallyRequest {
    pub fn prepare(&mut self, bump: u8, round: u64, mode: TallyMode, expected: u8, now: i64) {
        self.bump = bump;
        self.round = round;
        self.mode = mode;
        self.expected = expected;
        self.cells = Vec::new();
        self.values = Vec::new();
        self.chunks = Vec::new();
        self.processed = false;
        self.requested_at = now;
        self.processed_at = 0;
    }

    /// Last cell queued so far, used to keep the order across chunks.
    pub fn last_cell(&self) -> Option<&TallyCell> {
        self.cells.last()
    }

    /// Appends the cells of a newly queued computation.
    pub fn push_chunk(&mut self, computation: Pubkey, cells: &[TallyCell]) -> Result<()> {
        require!(!self.processed, ErrorCode::AlreadyProcessed);
        require!(!cells.is_empty(), ErrorCode::BatchIncomplete);
        require!(
            cells.len() <= MAX_TALLY_BATCH
                && self.chunks.len() < MAX_TALLY_CHUNKS
                && self.cells.len() + cells.len() <= self.expected as usize,
            ErrorCode::BatchFull
        );
        require!(
            self.chunks.iter().all(|chunk| chunk.computation != computation),
            ErrorCode::UnknownRequest
        );

        self.chunks.push(TallyChunk {
            computation,
            start: self.cells.len() as u8,
            len: cells.len() as u8,
            done: false,
        });
        self.cells.extend_from_slice(cells);
        self.values.resize(self.cells.len(), 0);
        Ok(())
    }

    /// Stores the decrypted values of one chunk. The circuit returns a full
    /// batch; values past the chunk's cells are padding.
    pub fn apply_chunk(&mut self, computation: &Pubkey, plaintexts: &[u64]) -> Result<()> {
        require!(!self.processed, ErrorCode::AlreadyProcessed);

        let chunk = self
            .chunks
            .iter_mut()
            .find(|chunk| chunk.computation == *computation)
            .ok_or(ErrorCode::UnknownRequest)?;
        require!(!chunk.done, ErrorCode::AlreadyProcessed);

        let start = chunk.start as usize;
        let len = chunk.len as usize;
        require!(plaintexts.len() >= len, ErrorCode::Mismatch);

        self.values[start..start + len].copy_from_slice(&plaintexts[..len]);
        chunk.done = true;
        Ok(())
    }

    /// Every submission queued and every chunk decrypted.
    pub fn is_ready(&self) -> bool {
        !self.processed
            && self.cells.len() == self.expected as usize
            && self.chunks.iter().all(|chunk| chunk.done)
    }

    /// Reduces the decrypted values to the round outcome.
    pub fn resolve(&mut self, snapshot: &[u64], now: i64) -> Result<TallyOutcome> {
        require!(!self.processed, ErrorCode::AlreadyProcessed);
        require!(self.is_ready(), ErrorCode::BatchIncomplete);

        let outcome = reduce(self.mode, snapshot, &self.cells, &self.values)?;
        self.processed = true;
        self.processed_at = now;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Registry, Round, RoundPhase};

    fn request(mode: TallyMode, expected: u8) -> TallyRequest {
        let mut request = TallyRequest {
            bump: 0,
            round: 0,
            mode,
            expected: 0,
            cells: vec![],
            values: vec![],
            chunks: vec![],
            processed: false,
            requested_at: 0,
            processed_at: 0,
        };
        request.prepare(255, 1, mode, expected, 10);
        request
    }

    fn cell(entry_id: u64) -> TallyCell {
        TallyCell {
            entry_id,
            participant: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_resolve_once() {
        let mut request = request(TallyMode::Sum, 2);
        let computation = Pubkey::new_unique();
        request.push_chunk(computation, &[cell(1), cell(2)]).unwrap();
        request.apply_chunk(&computation, &[8, 9, 9, 9, 9, 9, 9, 9]).unwrap();

        let outcome = request.resolve(&[1, 2], 50).unwrap();
        assert_eq!(outcome.winner_entry_id, 2);
        assert_eq!(outcome.winning_value, 9);
        assert!(request.processed);

        let err = request.resolve(&[1, 2], 60).unwrap_err();
        assert_eq!(err, error!(ErrorCode::AlreadyProcessed));
        let err = request.apply_chunk(&computation, &[100, 0]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::AlreadyProcessed));
        assert_eq!(request.processed_at, 50);
    }

    #[test]
    fn test_apply_chunk_rejects_short_output() {
        let mut request = request(TallyMode::Sum, 2);
        let computation = Pubkey::new_unique();
        request.push_chunk(computation, &[cell(1), cell(2)]).unwrap();

        let err = request.apply_chunk(&computation, &[8]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::Mismatch));
        assert!(!request.chunks[0].done);
        assert!(!request.is_ready());
    }

    #[test]
    fn test_apply_chunk_rejects_unknown_and_replayed_computation() {
        let mut request = request(TallyMode::Sum, 1);
        let computation = Pubkey::new_unique();
        request.push_chunk(computation, &[cell(1)]).unwrap();

        let err = request.apply_chunk(&Pubkey::new_unique(), &[1]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::UnknownRequest));

        request.apply_chunk(&computation, &[1]).unwrap();
        let err = request.apply_chunk(&computation, &[5]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::AlreadyProcessed));
        assert_eq!(request.values, vec![1]);
    }

    #[test]
    fn test_push_chunk_bounds() {
        let mut request = request(TallyMode::Sum, 9);
        let err = request.push_chunk(Pubkey::new_unique(), &[]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::BatchIncomplete));

        let oversized: Vec<TallyCell> = (0..=MAX_TALLY_BATCH as u64).map(|_| cell(1)).collect();
        let err = request.push_chunk(Pubkey::new_unique(), &oversized).unwrap_err();
        assert_eq!(err, error!(ErrorCode::BatchFull));

        let computation = Pubkey::new_unique();
        request.push_chunk(computation, &oversized[..8]).unwrap();
        let err = request.push_chunk(computation, &[cell(1)]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::UnknownRequest));

        // more cells than the round holds
        let err = request
            .push_chunk(Pubkey::new_unique(), &[cell(1), cell(1)])
            .unwrap_err();
        assert_eq!(err, error!(ErrorCode::BatchFull));
        assert_eq!(request.cells.len(), 8);
    }

    #[test]
    fn test_resolve_waits_for_every_chunk() {
        // three voters on three entries: nine votes over two chunks
        let mut request = request(TallyMode::Sum, 9);
        let cells: Vec<TallyCell> = [1, 1, 1, 2, 2, 2, 3, 3, 3].iter().map(|id| cell(*id)).collect();
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        request.push_chunk(first, &cells[..8]).unwrap();
        let err = request.resolve(&[1, 2, 3], 50).unwrap_err();
        assert_eq!(err, error!(ErrorCode::BatchIncomplete));

        request.push_chunk(second, &cells[8..]).unwrap();
        // results may arrive in any order
        request.apply_chunk(&second, &[4, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert!(!request.is_ready());
        request.apply_chunk(&first, &[1, 0, 1, 2, 2, 2, 3, 0]).unwrap();
        assert!(request.is_ready());

        let outcome = request.resolve(&[1, 2, 3], 50).unwrap();
        assert_eq!(outcome.winner_entry_id, 3);
        assert_eq!(outcome.winning_value, 7);
    }

    #[test]
    fn test_empty_round_is_ready_at_once() {
        let mut request = request(TallyMode::Max, 0);
        assert!(request.is_ready());
        let outcome = request.resolve(&[1, 2], 20).unwrap();
        assert_eq!(outcome, TallyOutcome::default());
    }

    #[test]
    fn test_round_lifecycle_two_voters() {
        let admin = Pubkey::new_unique();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut registry = Registry {
            bump: 255,
            admin,
            mode: TallyMode::Sum,
            entry_count: 2,
            round_number: 1,
            phase: RoundPhase::Open,
        };
        let mut round = Round {
            bump: 0,
            number: 0,
            entry_ids: vec![],
            active: false,
            results_revealed: false,
            started_at: 0,
            ended_at: 0,
            participants: vec![],
            submission_count: 0,
            winner_entry_id: 0,
            winning_value: 0,
            winning_participant: Pubkey::default(),
        };
        round.open(254, 1, Round::snapshot(&[1, 2]).unwrap(), 100);

        // alice votes 8 for entry 1, bob votes 9 for entry 2
        round.record_submission(alice).unwrap();
        round.record_submission(bob).unwrap();
        round.end(200).unwrap();
        registry.phase = RoundPhase::ClosedPending;

        let mut request = request(registry.mode, round.submission_count);
        let computation = Pubkey::new_unique();
        let cells = [
            TallyCell { entry_id: 1, participant: alice },
            TallyCell { entry_id: 2, participant: bob },
        ];
        request.push_chunk(computation, &cells).unwrap();
        request.apply_chunk(&computation, &[8, 9, 9, 9, 9, 9, 9, 9]).unwrap();

        let outcome = request.resolve(&round.entry_ids, 300).unwrap();
        round.reveal(&outcome);
        registry.complete_round().unwrap();

        assert!(!round.active);
        assert!(round.results_revealed);
        assert_eq!(round.winner_entry_id, 2);
        assert_eq!(round.winning_value, 9);
        assert_eq!(registry.round_number, 2);
        assert_eq!(registry.phase, RoundPhase::Idle);
    }
}
