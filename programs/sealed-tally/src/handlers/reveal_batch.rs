use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;

use crate::{
    error::ErrorCode,
    state::TallyRevealedEvent,
    InitRevealBatchCompDef, RevealBatchCallback, RevealBatchOutput,
};

/// One-off job to create the computation definition for `reveal_batch` in encrypted-ixs/src/lib.rs.
///
/// Must be called once before any tally can be requested.
pub fn init_reveal_batch_comp_def(ctx: Context<InitRevealBatchCompDef>) -> Result<()> {
    init_comp_def(ctx.accounts, None, None)?;
    Ok(())
}

/// Receives one decrypted batch from the MXE cluster and finishes the round
/// once every batch of its tally has arrived.
///
/// The output is only trusted once the cluster signature over it verifies.
/// Aborted computations fail verification too.
pub fn reveal_batch_callback(
    ctx: Context<RevealBatchCallback>,
    output: SignedComputationOutputs<RevealBatchOutput>,
) -> Result<()> {
    let RevealBatchOutput { field_0: plaintexts } = output
        .verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        )
        .map_err(|_| ErrorCode::OracleVerificationFailed)?;

    let tally_request = &mut ctx.accounts.tally_request;
    tally_request.apply_chunk(&ctx.accounts.computation_account.key(), &plaintexts)?;

    let round = &mut ctx.accounts.round;
    if !tally_request.is_ready() {
        msg!(
            "Round {}: decrypted batch stored, {} of {} submissions queued",
            round.number,
            tally_request.cells.len(),
            tally_request.expected
        );
        return Ok(());
    }

    let now = Clock::get()?.unix_timestamp;
    let outcome = tally_request.resolve(&round.entry_ids, now)?;
    round.reveal(&outcome);
    ctx.accounts.registry.complete_round()?;

    msg!(
        "Round {} won by entry {} with {}",
        round.number,
        outcome.winner_entry_id,
        outcome.winning_value
    );
    emit!(TallyRevealedEvent {
        round: round.number,
        winner_entry_id: outcome.winner_entry_id,
        winning_value: outcome.winning_value,
        winning_participant: outcome.winning_participant,
        timestamp: now,
    });

    Ok(())
}
