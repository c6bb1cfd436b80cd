use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;

// PDA seeds
#[constant]
pub const REGISTRY_SEED: &[u8] = b"registry";
#[constant]
pub const ENTRY_SEED: &[u8] = b"entry";
#[constant]
pub const PARTICIPANT_SEED: &[u8] = b"participant";
#[constant]
pub const ROUND_SEED: &[u8] = b"round";
#[constant]
pub const SUBMISSION_SEED: &[u8] = b"submission";
#[constant]
pub const TALLY_SEED: &[u8] = b"tally";

pub const DISCRIMINATOR_SIZE: usize = 8;

// Entry metadata limits, in bytes
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_DESCRIPTION_LEN: usize = 128;
pub const MAX_CATEGORY_LEN: usize = 32;

pub const MAX_ROUND_ENTRIES: usize = 8;
/// Number of ciphertexts the `reveal_batch` circuit decrypts in one call.
/// Must match the arity of `reveal_batch` in encrypted-ixs.
pub const MAX_TALLY_BATCH: usize = 8;
/// Decryption batches one tally may be split into.
pub const MAX_TALLY_CHUNKS: usize = 8;
/// Submissions a round accepts. Keep `#[max_len]` on `Round` and `TallyRequest` in sync.
pub const MAX_ROUND_SUBMISSIONS: usize = MAX_TALLY_BATCH * MAX_TALLY_CHUNKS;
/// Program + submitter + two extra readers granted with `allow_reader`.
pub const MAX_READERS: usize = 4;

// Computation definition offset for the batch decryption circuit
pub const COMP_DEF_OFFSET_REVEAL_BATCH: u32 = comp_def_offset("reveal_batch");
