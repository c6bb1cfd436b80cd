use anchor_lang::prelude::*;
use anchor_lang::AccountDeserialize;

use crate::{constants::*, error::ErrorCode, state::*};

#[derive(Accounts)]
pub struct OpenRound<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        has_one = admin @ ErrorCode::Unauthorized,
        constraint = registry.phase != RoundPhase::Open @ ErrorCode::AlreadyActive,
        constraint = registry.phase != RoundPhase::ClosedPending @ ErrorCode::TallyPending,
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_SIZE + Round::INIT_SPACE,
        seeds = [ROUND_SEED, &registry.round_number.to_le_bytes()],
        bump,
    )]
    pub round: Account<'info, Round>,

    pub system_program: Program<'info, System>,
}

/// Opens the next round over a subset of active entries.
///
/// The entry accounts for the deduplicated selection are passed as remaining
/// accounts, in selection order.
///
/// # Arguments
/// * `entry_ids` - Entries eligible in this round; duplicates are dropped
pub fn open_round(ctx: Context<OpenRound>, entry_ids: Vec<u64>) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    registry.ensure_idle()?;

    let snapshot = Round::snapshot(&entry_ids)?;
    check_entries(&snapshot, ctx.remaining_accounts, ctx.program_id)?;

    let number = registry.round_number;
    msg!("Opening round {} over {} entries", number, snapshot.len());

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .round
        .open(ctx.bumps.round, number, snapshot.clone(), now);
    registry.phase = RoundPhase::Open;

    emit!(RoundOpenedEvent {
        round: number,
        entry_ids: snapshot,
        timestamp: now,
    });

    Ok(())
}

/// Every selected id must be backed by its own active entry account.
fn check_entries(snapshot: &[u64], accounts: &[AccountInfo], program_id: &Pubkey) -> Result<()> {
    require!(accounts.len() == snapshot.len(), ErrorCode::UnknownEntry);

    for (entry_id, entry_info) in snapshot.iter().zip(accounts) {
        let (expected, _) =
            Pubkey::find_program_address(&[ENTRY_SEED, &entry_id.to_le_bytes()], program_id);
        require_keys_eq!(entry_info.key(), expected, ErrorCode::UnknownEntry);
        require_keys_eq!(*entry_info.owner, *program_id, ErrorCode::UnknownEntry);

        let data = entry_info.try_borrow_data()?;
        let mut data_slice: &[u8] = &data;
        let entry = Entry::try_deserialize(&mut data_slice).map_err(|_| ErrorCode::UnknownEntry)?;
        require!(
            entry.id == *entry_id && entry.active,
            ErrorCode::UnknownEntry
        );
    }

    Ok(())
}
