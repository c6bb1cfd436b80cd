use anchor_lang::prelude::*;
use anchor_lang::AccountDeserialize;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use crate::{
    constants::*,
    error::ErrorCode,
    state::*,
    utils::*,
    RequestTally, RevealBatchCallback,
};

/// Sends the next batch of a closed round's submissions to the MXE cluster.
///
/// Up to `MAX_TALLY_BATCH` submissions are passed as remaining accounts,
/// continuing the tally order where the previous batch stopped: entries in
/// snapshot order, and within an entry, participants in the order they first
/// submitted. `reveal_batch_callback` finishes the round once every
/// submission has been queued and decrypted.
///
/// # Arguments
/// * `computation_offset` - Offset of the MXE computation; its account identifies the batch
pub fn request_tally(ctx: Context<RequestTally>, computation_offset: u64) -> Result<()> {
    let round = &ctx.accounts.round;
    let tally_request = &mut ctx.accounts.tally_request;

    let submissions = load_chunk(
        round,
        tally_request.last_cell(),
        ctx.remaining_accounts,
        ctx.program_id,
    )?;
    let cells: Vec<TallyCell> = submissions
        .iter()
        .map(|submission| TallyCell {
            entry_id: submission.entry_id,
            participant: submission.participant,
        })
        .collect();

    let computation = ctx.accounts.computation_account.key();
    tally_request.push_chunk(computation, &cells)?;

    let round_number = round.number;
    let batch_len = cells.len() as u8;
    let queued = tally_request.cells.len() as u8;
    let expected = tally_request.expected;
    msg!(
        "Requesting tally of {} submissions for round {} ({} of {})",
        batch_len,
        round_number,
        queued,
        expected
    );

    let callback_accounts = [
        CallbackAccount {
            pubkey: ctx.accounts.registry.key(),
            is_writable: true,
        },
        CallbackAccount {
            pubkey: ctx.accounts.round.key(),
            is_writable: true,
        },
        CallbackAccount {
            pubkey: ctx.accounts.tally_request.key(),
            is_writable: true,
        },
    ];

    // The circuit has a fixed arity; unused slots repeat the last submission
    // and are dropped again in the callback.
    let mut args = ArgBuilder::new();
    for slot in 0..MAX_TALLY_BATCH {
        let submission = &submissions[slot.min(submissions.len() - 1)];
        args = args
            .x25519_pubkey(submission.encryption_pubkey)
            .plaintext_u128(submission.nonce)
            .encrypted_u64(submission.ciphertext);
    }
    let computation_args = args.build();

    let callback_ix = RevealBatchCallback::callback_ix(
        computation_offset,
        &ctx.accounts.mxe_account,
        &callback_accounts,
    )?;

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    queue_computation(
        ctx.accounts,
        computation_offset,
        computation_args,
        None,
        vec![callback_ix],
        1,
        0,
    )?;

    emit!(TallyRequestedEvent {
        round: round_number,
        computation,
        batch_len,
        queued,
        expected,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

/// Loads one batch of the round's submissions from `accounts` and checks it
/// continues the tally order after `last`.
pub(crate) fn load_chunk(
    round: &Round,
    last: Option<&TallyCell>,
    accounts: &[AccountInfo],
    program_id: &Pubkey,
) -> Result<Vec<Submission>> {
    require!(!accounts.is_empty(), ErrorCode::BatchIncomplete);
    require!(accounts.len() <= MAX_TALLY_BATCH, ErrorCode::BatchFull);

    let mut submissions = Vec::with_capacity(accounts.len());
    let mut positions: Vec<BatchPosition> = Vec::with_capacity(accounts.len() + 1);
    if let Some(cell) = last {
        positions.push(round.batch_position(cell.entry_id, &cell.participant)?);
    }

    for submission_info in accounts {
        require_keys_eq!(
            *submission_info.owner,
            *program_id,
            ErrorCode::InvalidSubmissionAccount
        );

        let submission = {
            let data = submission_info.try_borrow_data()?;
            let mut data_slice: &[u8] = &data;
            Submission::try_deserialize(&mut data_slice)
                .map_err(|_| ErrorCode::InvalidSubmissionAccount)?
        };
        require!(
            submission.submitted
                && submission.round == round.number
                && can_read(&submission.readers, program_id),
            ErrorCode::InvalidSubmissionAccount
        );

        let (expected, _) = Pubkey::find_program_address(
            &[
                SUBMISSION_SEED,
                &submission.round.to_le_bytes(),
                &submission.entry_id.to_le_bytes(),
                submission.participant.as_ref(),
            ],
            program_id,
        );
        require_keys_eq!(
            submission_info.key(),
            expected,
            ErrorCode::InvalidSubmissionAccount
        );

        positions.push(round.batch_position(submission.entry_id, &submission.participant)?);
        submissions.push(submission);
    }

    check_batch_order(&positions)?;
    Ok(submissions)
}
