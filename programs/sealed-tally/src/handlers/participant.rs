use anchor_lang::prelude::*;

use crate::{constants::*, error::ErrorCode, state::*};

#[derive(Accounts)]
#[instruction(identity: Pubkey)]
pub struct ManageParticipant<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        has_one = admin @ ErrorCode::Unauthorized,
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        init_if_needed,
        payer = admin,
        space = DISCRIMINATOR_SIZE + Participant::INIT_SPACE,
        seeds = [PARTICIPANT_SEED, identity.as_ref()],
        bump,
    )]
    pub participant: Account<'info, Participant>,

    pub system_program: Program<'info, System>,
}

/// Allows `identity` to submit in rounds, encrypting under `encryption_pubkey`.
/// Idempotent; calling again with a new key rotates it.
pub fn authorize_participant(
    ctx: Context<ManageParticipant>,
    identity: Pubkey,
    encryption_pubkey: [u8; 32],
) -> Result<()> {
    let participant = &mut ctx.accounts.participant;
    participant.bump = ctx.bumps.participant;
    participant.identity = identity;

    let authorized = participant.set_authorized(true);
    let rotated = participant.set_encryption_pubkey(encryption_pubkey);
    if authorized || rotated {
        msg!("Authorized participant {}", identity);
        emit!(ParticipantAuthorizedEvent {
            identity,
            encryption_pubkey,
            timestamp: Clock::get()?.unix_timestamp,
        });
    }

    Ok(())
}

/// Withdraws the right to submit. Idempotent.
pub fn revoke_participant(ctx: Context<ManageParticipant>, identity: Pubkey) -> Result<()> {
    let participant = &mut ctx.accounts.participant;
    participant.bump = ctx.bumps.participant;
    participant.identity = identity;

    if participant.set_authorized(false) {
        msg!("Revoked participant {}", identity);
        emit!(ParticipantRevokedEvent {
            identity,
            timestamp: Clock::get()?.unix_timestamp,
        });
    }

    Ok(())
}
