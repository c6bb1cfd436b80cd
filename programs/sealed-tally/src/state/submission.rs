use anchor_lang::prelude::*;

use crate::{error::ErrorCode, utils::grant_access};

/// One participant's encrypted contribution to one entry within one round.
/// Written once, never overwritten.
#[account]
#[derive(InitSpace, Debug)]
pub struct Submission {
    /// PDA bump seed
    pub bump: u8,
    pub round: u64,
    pub entry_id: u64,
    pub participant: Pubkey,
    /// Value encrypted by the participant for the MXE cluster (x25519 shared secret)
    pub ciphertext: [u8; 32],
    /// Participant's x25519 public key used for the encryption
    pub encryption_pubkey: [u8; 32],
    pub nonce: u128,
    pub submitted: bool,
    pub submitted_at: i64,
    /// Identities allowed to request decryption of `ciphertext`
    #[max_len(4)]
    pub readers: Vec<Pubkey>,
}

impl Submission {
    pub fn ensure_unused(&self) -> Result<()> {
        require!(!self.submitted, ErrorCode::DuplicateSubmission);
        Ok(())
    }

    /// Stores the value and grants read access to the program and the submitter.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        bump: u8,
        round: u64,
        entry_id: u64,
        participant: Pubkey,
        ciphertext: [u8; 32],
        encryption_pubkey: [u8; 32],
        nonce: u128,
        program_id: &Pubkey,
        now: i64,
    ) -> Result<()> {
        self.ensure_unused()?;

        self.bump = bump;
        self.round = round;
        self.entry_id = entry_id;
        self.participant = participant;
        self.ciphertext = ciphertext;
        self.encryption_pubkey = encryption_pubkey;
        self.nonce = nonce;
        self.submitted = true;
        self.submitted_at = now;
        self.readers = Vec::new();

        grant_access(&mut self.readers, *program_id)?;
        grant_access(&mut self.readers, participant)?;
        Ok(())
    }
}
