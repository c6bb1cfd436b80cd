use anchor_lang::prelude::*;

use crate::{constants::*, error::ErrorCode, state::*};

#[derive(Accounts)]
pub struct CloseRound<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        has_one = admin @ ErrorCode::Unauthorized,
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        mut,
        seeds = [ROUND_SEED, &round.number.to_le_bytes()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_SIZE + TallyRequest::INIT_SPACE,
        seeds = [TALLY_SEED, &round.number.to_le_bytes()],
        bump,
    )]
    pub tally_request: Account<'info, TallyRequest>,

    pub system_program: Program<'info, System>,
}

/// Closes the open round and opens its tally request.
///
/// The submissions are then sent to the MXE cluster with `request_tally`, one
/// batch at a time. A round without submissions is revealed right away with a
/// zero winner.
pub fn close_round(ctx: Context<CloseRound>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let round = &mut ctx.accounts.round;
    round.end(now)?;

    let registry = &mut ctx.accounts.registry;
    require!(round.number == registry.round_number, ErrorCode::NotActive);
    registry.phase = RoundPhase::ClosedPending;

    msg!(
        "Closing round {} with {} submissions",
        round.number,
        round.submission_count
    );
    emit!(RoundClosedEvent {
        round: round.number,
        submissions: round.submission_count,
        timestamp: now,
    });

    let tally_request = &mut ctx.accounts.tally_request;
    tally_request.prepare(
        ctx.bumps.tally_request,
        round.number,
        registry.mode,
        round.submission_count,
        now,
    );

    if tally_request.is_ready() {
        let outcome = tally_request.resolve(&round.entry_ids, now)?;
        round.reveal(&outcome);
        registry.complete_round()?;

        msg!("Round {} had no submissions", round.number);
        emit!(TallyRevealedEvent {
            round: round.number,
            winner_entry_id: outcome.winner_entry_id,
            winning_value: outcome.winning_value,
            winning_participant: outcome.winning_participant,
            timestamp: now,
        });
    }

    Ok(())
}
