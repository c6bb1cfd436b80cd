use anchor_lang::prelude::*;
use anchor_lang::{AccountDeserialize, AccountSerialize};

use crate::{constants::*, error::ErrorCode, state::*};

#[derive(Accounts)]
pub struct ProposeEntry<'info> {
    #[account(mut)]
    pub proposer: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        init,
        payer = proposer,
        space = DISCRIMINATOR_SIZE + Entry::INIT_SPACE,
        seeds = [ENTRY_SEED, &(registry.entry_count + 1).to_le_bytes()],
        bump,
    )]
    pub entry: Account<'info, Entry>,

    pub system_program: Program<'info, System>,
}

/// Registers a new entry under the next sequential id. Open to anyone.
pub fn propose_entry(
    ctx: Context<ProposeEntry>,
    name: String,
    description: String,
    category: String,
) -> Result<()> {
    Entry::validate_metadata(&name, &description, &category)?;

    let registry = &mut ctx.accounts.registry;
    let entry_id = registry.next_entry_id()?;
    msg!("Proposing entry {}", entry_id);

    let now = Clock::get()?.unix_timestamp;
    let entry = &mut ctx.accounts.entry;
    entry.bump = ctx.bumps.entry;
    entry.id = entry_id;
    entry.name = name;
    entry.description = description;
    entry.category = category;
    entry.owner = ctx.accounts.proposer.key();
    entry.active = true;
    entry.created_at = now;

    emit!(EntryProposedEvent {
        entry_id,
        owner: entry.owner,
        name: entry.name.clone(),
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(entry_id: u64)]
pub struct DeactivateEntry<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        has_one = admin @ ErrorCode::Unauthorized,
    )]
    pub registry: Account<'info, Registry>,

    /// CHECK: entry PDA for `entry_id`; may not exist, which is reported as NotFound
    #[account(
        mut,
        seeds = [ENTRY_SEED, &entry_id.to_le_bytes()],
        bump,
    )]
    pub entry: UncheckedAccount<'info>,
}

/// Clears the active flag of an entry. Administrator only.
pub fn deactivate_entry(ctx: Context<DeactivateEntry>, entry_id: u64) -> Result<()> {
    let entry_info = ctx.accounts.entry.to_account_info();
    let mut entry = load_entry(
        &entry_info,
        entry_id,
        ctx.accounts.registry.entry_count,
        ctx.program_id,
    )?;

    if !entry.deactivate() {
        msg!("Entry {} already inactive", entry_id);
        return Ok(());
    }

    msg!("Deactivating entry {}", entry_id);
    {
        let mut data = entry_info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data;
        entry.try_serialize(&mut writer)?;
    }

    emit!(EntryDeactivatedEvent {
        entry_id,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

/// Reads entry `entry_id`, reporting ids that were never assigned as `NotFound`.
pub(crate) fn load_entry(
    entry_info: &AccountInfo,
    entry_id: u64,
    entry_count: u64,
    program_id: &Pubkey,
) -> Result<Entry> {
    require!(
        entry_id >= 1 && entry_id <= entry_count,
        ErrorCode::NotFound
    );
    require_keys_eq!(*entry_info.owner, *program_id, ErrorCode::NotFound);

    let data = entry_info.try_borrow_data()?;
    let mut data_slice: &[u8] = &data;
    let entry = Entry::try_deserialize(&mut data_slice).map_err(|_| ErrorCode::NotFound)?;
    require!(entry.id == entry_id, ErrorCode::NotFound);
    Ok(entry)
}
