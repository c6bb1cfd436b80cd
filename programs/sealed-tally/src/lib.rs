// Stops Rust Analyzer complaining about missing configs
// See https://solana.stackexchange.com/questions/17777
#![allow(unexpected_cfgs)]
// Fix warning: use of deprecated method `anchor_lang::prelude::AccountInfo::<'a>::realloc`: Use AccountInfo::resize() instead
// See https://solana.stackexchange.com/questions/22979
#![allow(deprecated)]

use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;

pub mod constants;
pub mod error;
pub mod handlers;
pub mod state;
pub mod utils;

use constants::*;
pub use error::ErrorCode;
pub use handlers::*;
pub use state::{Registry, Round, RoundPhase, Submission, TallyMode, TallyRequest};

declare_id!("5kQnwkvRUu9Xcqa1fMoz3dVfqm8bTQgf3tCFd7yAKpQv");

#[arcium_program]
pub mod sealed_tally {
    use super::*;

    pub fn initialize_registry(ctx: Context<InitializeRegistry>, mode: TallyMode) -> Result<()> {
        handlers::registry::initialize_registry(ctx, mode)
    }

    pub fn propose_entry(
        ctx: Context<ProposeEntry>,
        name: String,
        description: String,
        category: String,
    ) -> Result<()> {
        handlers::entry::propose_entry(ctx, name, description, category)
    }

    pub fn deactivate_entry(ctx: Context<DeactivateEntry>, entry_id: u64) -> Result<()> {
        handlers::entry::deactivate_entry(ctx, entry_id)
    }

    pub fn authorize_participant(
        ctx: Context<ManageParticipant>,
        identity: Pubkey,
        encryption_pubkey: [u8; 32],
    ) -> Result<()> {
        handlers::participant::authorize_participant(ctx, identity, encryption_pubkey)
    }

    pub fn revoke_participant(ctx: Context<ManageParticipant>, identity: Pubkey) -> Result<()> {
        handlers::participant::revoke_participant(ctx, identity)
    }

    pub fn open_round(ctx: Context<OpenRound>, entry_ids: Vec<u64>) -> Result<()> {
        handlers::open_round::open_round(ctx, entry_ids)
    }

    pub fn submit(
        ctx: Context<Submit>,
        entry_id: u64,
        ciphertext: [u8; 32],
        encryption_pubkey: [u8; 32],
        nonce: u128,
        input_binding: [u8; 32],
    ) -> Result<()> {
        handlers::submit::submit(
            ctx,
            entry_id,
            ciphertext,
            encryption_pubkey,
            nonce,
            input_binding,
        )
    }

    pub fn allow_reader(ctx: Context<AllowReader>, reader: Pubkey) -> Result<()> {
        handlers::submit::allow_reader(ctx, reader)
    }

    pub fn init_reveal_batch_comp_def(ctx: Context<InitRevealBatchCompDef>) -> Result<()> {
        handlers::reveal_batch::init_reveal_batch_comp_def(ctx)
    }

    pub fn close_round(ctx: Context<CloseRound>) -> Result<()> {
        handlers::close_round::close_round(ctx)
    }

    pub fn request_tally(ctx: Context<RequestTally>, computation_offset: u64) -> Result<()> {
        handlers::request_tally::request_tally(ctx, computation_offset)
    }

    #[arcium_callback(encrypted_ix = "reveal_batch")]
    pub fn reveal_batch_callback(
        ctx: Context<RevealBatchCallback>,
        output: SignedComputationOutputs<RevealBatchOutput>,
    ) -> Result<()> {
        handlers::reveal_batch::reveal_batch_callback(ctx, output)
    }

    // Account struct definitions - these need to be inside the arcium_program module
    // so they can access the generated SignerAccount type

    #[init_computation_definition_accounts("reveal_batch", payer)]
    #[derive(Accounts)]
    pub struct InitRevealBatchCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[queue_computation_accounts("reveal_batch", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64)]
    pub struct RequestTally<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, ArciumSignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_BATCH)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            mut,
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            seeds = [REGISTRY_SEED],
            bump = registry.bump,
            constraint = registry.admin == payer.key() @ ErrorCode::Unauthorized,
        )]
        pub registry: Account<'info, Registry>,

        #[account(
            seeds = [ROUND_SEED, &round.number.to_le_bytes()],
            bump = round.bump,
        )]
        pub round: Account<'info, Round>,

        #[account(
            mut,
            seeds = [TALLY_SEED, &round.number.to_le_bytes()],
            bump = tally_request.bump,
        )]
        pub tally_request: Account<'info, TallyRequest>,
    }

    #[callback_accounts("reveal_batch")]
    #[derive(Accounts)]
    pub struct RevealBatchCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_BATCH)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        /// CHECK: computation_account, checked by arcium program via constraints in the callback context.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        #[account(
            mut,
            seeds = [REGISTRY_SEED],
            bump = registry.bump,
        )]
        pub registry: Account<'info, Registry>,

        #[account(
            mut,
            seeds = [ROUND_SEED, &round.number.to_le_bytes()],
            bump = round.bump,
        )]
        pub round: Account<'info, Round>,

        #[account(
            mut,
            seeds = [TALLY_SEED, &round.number.to_le_bytes()],
            bump = tally_request.bump,
        )]
        pub tally_request: Account<'info, TallyRequest>,
    }
}

pub use sealed_tally::{
    InitRevealBatchCompDef, RequestTally, RevealBatchCallback, RevealBatchOutput,
};
