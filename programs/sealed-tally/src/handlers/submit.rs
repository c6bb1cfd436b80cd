use anchor_lang::prelude::*;

use crate::{constants::*, error::ErrorCode, state::*, utils::*};

#[derive(Accounts)]
#[instruction(entry_id: u64)]
pub struct Submit<'info> {
    #[account(mut)]
    pub submitter: Signer<'info>,

    #[account(
        mut,
        seeds = [ROUND_SEED, &round.number.to_le_bytes()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    /// Absent when the submitter was never authorized
    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, submitter.key().as_ref()],
        bump,
    )]
    pub participant: Option<Account<'info, Participant>>,

    #[account(
        init_if_needed,
        payer = submitter,
        space = DISCRIMINATOR_SIZE + Submission::INIT_SPACE,
        seeds = [
            SUBMISSION_SEED,
            &round.number.to_le_bytes(),
            &entry_id.to_le_bytes(),
            submitter.key().as_ref(),
        ],
        bump,
    )]
    pub submission: Account<'info, Submission>,

    pub system_program: Program<'info, System>,
}

/// Submits one encrypted value for one entry of the open round.
///
/// # Arguments
/// * `entry_id` - Entry the value is for; must be part of the round
/// * `ciphertext` - Value encrypted for the MXE cluster
/// * `encryption_pubkey` - Submitter's x25519 public key; must be the one registered for them
/// * `nonce` - Encryption nonce; must exceed every nonce the submitter used before
/// * `input_binding` - Commitment tying the ciphertext to the submitter and this program
pub fn submit(
    ctx: Context<Submit>,
    entry_id: u64,
    ciphertext: [u8; 32],
    encryption_pubkey: [u8; 32],
    nonce: u128,
    input_binding: [u8; 32],
) -> Result<()> {
    let submitter = ctx.accounts.submitter.key();
    let round = &mut ctx.accounts.round;

    round.ensure_open()?;
    require!(
        is_authorized(ctx.accounts.participant.as_deref(), &submitter),
        ErrorCode::Unauthorized
    );
    round.entry_position(entry_id)?;
    ctx.accounts.submission.ensure_unused()?;
    verify_input_binding(
        &ciphertext,
        &encryption_pubkey,
        nonce,
        &submitter,
        ctx.program_id,
        &input_binding,
    )?;
    ctx.accounts
        .participant
        .as_mut()
        .ok_or(ErrorCode::Unauthorized)?
        .accept_input(&encryption_pubkey, nonce)?;

    msg!("Recording submission for entry {} in round {}", entry_id, round.number);

    round.record_submission(submitter)?;

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.submission.record(
        ctx.bumps.submission,
        round.number,
        entry_id,
        submitter,
        ciphertext,
        encryption_pubkey,
        nonce,
        ctx.program_id,
        now,
    )?;

    emit!(SubmissionRecordedEvent {
        round: round.number,
        entry_id,
        participant: submitter,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AllowReader<'info> {
    pub submitter: Signer<'info>,

    #[account(
        mut,
        seeds = [
            SUBMISSION_SEED,
            &submission.round.to_le_bytes(),
            &submission.entry_id.to_le_bytes(),
            submission.participant.as_ref(),
        ],
        bump = submission.bump,
        constraint = submission.participant == submitter.key() @ ErrorCode::Unauthorized,
    )]
    pub submission: Account<'info, Submission>,
}

/// Lets the submitter share read access to their stored ciphertext.
///
/// The tally only loads submissions the program can read. Other grants are
/// for off-chain readers that request re-encryption from the MXE cluster.
pub fn allow_reader(ctx: Context<AllowReader>, reader: Pubkey) -> Result<()> {
    msg!("Granting read access to {}", reader);
    grant_access(&mut ctx.accounts.submission.readers, reader)
}
