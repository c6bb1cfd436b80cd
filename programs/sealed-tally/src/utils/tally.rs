use anchor_lang::prelude::*;

use crate::{error::ErrorCode, state::{TallyCell, TallyMode}};

/// Result of reducing a decrypted batch. All zero when nothing beat zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TallyOutcome {
    pub winner_entry_id: u64,
    pub winning_value: u64,
    pub winning_participant: Pubkey,
}

/// Reduces decrypted values to a winner.
///
/// `cells` and `plaintexts` are walked together in batch order. In `Sum` mode
/// values are totalled per entry and the totals compared in snapshot order; in
/// `Max` mode every submission competes on its own. Comparison is strictly
/// greater, so the first candidate in snapshot order keeps a tie.
pub fn reduce(
    mode: TallyMode,
    snapshot: &[u64],
    cells: &[TallyCell],
    plaintexts: &[u64],
) -> Result<TallyOutcome> {
    require!(cells.len() == plaintexts.len(), ErrorCode::Mismatch);

    let mut outcome = TallyOutcome::default();

    match mode {
        TallyMode::Sum => {
            let mut totals = vec![0u64; snapshot.len()];
            for (cell, value) in cells.iter().zip(plaintexts) {
                let position = snapshot
                    .iter()
                    .position(|id| *id == cell.entry_id)
                    .ok_or_else(|| error!(ErrorCode::EntryNotInRound))?;
                totals[position] = totals[position]
                    .checked_add(*value)
                    .ok_or(ErrorCode::Overflow)?;
            }

            for (entry_id, total) in snapshot.iter().zip(totals) {
                if total > outcome.winning_value {
                    outcome.winner_entry_id = *entry_id;
                    outcome.winning_value = total;
                }
            }
        }
        TallyMode::Max => {
            for (cell, value) in cells.iter().zip(plaintexts) {
                if *value > outcome.winning_value {
                    outcome.winner_entry_id = cell.entry_id;
                    outcome.winning_value = *value;
                    outcome.winning_participant = cell.participant;
                }
            }
        }
    }

    Ok(outcome)
}

/// Where a submission sits in the batch: (snapshot index, participant index).
pub type BatchPosition = (usize, usize);

/// Batch positions must strictly increase: snapshot order first, then
/// participant order, no repeats.
pub fn check_batch_order(positions: &[BatchPosition]) -> Result<()> {
    for pair in positions.windows(2) {
        require!(pair[0] < pair[1], ErrorCode::BatchOutOfOrder);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(entry_ids: &[u64]) -> Vec<TallyCell> {
        entry_ids
            .iter()
            .map(|entry_id| TallyCell {
                entry_id: *entry_id,
                participant: Pubkey::new_unique(),
            })
            .collect()
    }

    #[test]
    fn test_sum_picks_largest_entry() {
        // A votes 8 on entry 1, B votes 9 on entry 2
        let outcome = reduce(TallyMode::Sum, &[1, 2], &cells(&[1, 2]), &[8, 9]).unwrap();
        assert_eq!(outcome.winner_entry_id, 2);
        assert_eq!(outcome.winning_value, 9);
        assert_eq!(outcome.winning_participant, Pubkey::default());
    }

    #[test]
    fn test_sum_accumulates_per_entry() {
        let outcome =
            reduce(TallyMode::Sum, &[1, 2], &cells(&[1, 1, 2]), &[5, 5, 9]).unwrap();
        assert_eq!(outcome.winner_entry_id, 1);
        assert_eq!(outcome.winning_value, 10);
    }

    #[test]
    fn test_sum_tie_goes_to_first_in_snapshot() {
        let outcome = reduce(TallyMode::Sum, &[1, 3], &cells(&[1, 3]), &[10, 10]).unwrap();
        assert_eq!(outcome.winner_entry_id, 1);

        let outcome = reduce(TallyMode::Sum, &[3, 1], &cells(&[3, 1]), &[10, 10]).unwrap();
        assert_eq!(outcome.winner_entry_id, 3);
    }

    #[test]
    fn test_all_zero_has_no_winner() {
        let outcome = reduce(TallyMode::Sum, &[1, 2], &cells(&[1, 2]), &[0, 0]).unwrap();
        assert_eq!(outcome, TallyOutcome::default());

        let outcome = reduce(TallyMode::Max, &[1, 2], &[], &[]).unwrap();
        assert_eq!(outcome, TallyOutcome::default());
    }

    #[test]
    fn test_max_picks_single_highest_bid() {
        let batch = cells(&[1, 1, 2]);
        let outcome = reduce(TallyMode::Max, &[1, 2], &batch, &[5, 5, 9]).unwrap();
        assert_eq!(outcome.winner_entry_id, 2);
        assert_eq!(outcome.winning_value, 9);
        assert_eq!(outcome.winning_participant, batch[2].participant);
    }

    #[test]
    fn test_max_tie_goes_to_first_submission() {
        let batch = cells(&[1, 2]);
        let outcome = reduce(TallyMode::Max, &[1, 2], &batch, &[7, 7]).unwrap();
        assert_eq!(outcome.winner_entry_id, 1);
        assert_eq!(outcome.winning_participant, batch[0].participant);
    }

    #[test]
    fn test_reduce_is_deterministic() {
        let batch = cells(&[1, 2, 2, 3]);
        let values = [4, 2, 2, 4];
        let first = reduce(TallyMode::Sum, &[1, 2, 3], &batch, &values).unwrap();
        let second = reduce(TallyMode::Sum, &[1, 2, 3], &batch, &values).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.winner_entry_id, 1);
    }

    #[test]
    fn test_reduce_rejects_unknown_entry_and_overflow() {
        let err = reduce(TallyMode::Sum, &[1], &cells(&[2]), &[1]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::EntryNotInRound));

        let err = reduce(TallyMode::Sum, &[1], &cells(&[1, 1]), &[u64::MAX, 1]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::Overflow));
    }

    #[test]
    fn test_check_batch_order() {
        assert!(check_batch_order(&[]).is_ok());
        assert!(check_batch_order(&[(0, 0), (0, 2), (1, 0), (1, 1)]).is_ok());

        let err = check_batch_order(&[(1, 0), (0, 1)]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::BatchOutOfOrder));

        let err = check_batch_order(&[(0, 1), (0, 1)]).unwrap_err();
        assert_eq!(err, error!(ErrorCode::BatchOutOfOrder));
    }
}
