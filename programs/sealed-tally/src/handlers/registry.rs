use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_SIZE + Registry::INIT_SPACE,
        seeds = [REGISTRY_SEED],
        bump,
    )]
    pub registry: Account<'info, Registry>,

    pub system_program: Program<'info, System>,
}

/// Creates the registry. The signer becomes the administrator.
///
/// # Arguments
/// * `mode` - `Sum` for voting rounds, `Max` for auction rounds
pub fn initialize_registry(ctx: Context<InitializeRegistry>, mode: TallyMode) -> Result<()> {
    msg!("Initializing registry in {:?} mode", mode);

    let registry = &mut ctx.accounts.registry;
    registry.bump = ctx.bumps.registry;
    registry.admin = ctx.accounts.admin.key();
    registry.mode = mode;
    registry.entry_count = 0;
    registry.round_number = 1;
    registry.phase = RoundPhase::Idle;

    Ok(())
}
