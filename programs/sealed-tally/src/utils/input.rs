use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::error::ErrorCode;

/// Commitment a client attaches to an encrypted input. Ties the ciphertext,
/// its encryption key and nonce to the signer and the target program.
///
/// Every input is public, so this only catches tampering in transit and
/// inputs prepared for another program. Ownership of the ciphertext is
/// established by `Participant::accept_input`.
pub fn input_binding(
    ciphertext: &[u8; 32],
    encryption_pubkey: &[u8; 32],
    nonce: u128,
    signer: &Pubkey,
    program_id: &Pubkey,
) -> [u8; 32] {
    hashv(&[
        &ciphertext[..],
        &encryption_pubkey[..],
        &nonce.to_le_bytes()[..],
        signer.as_ref(),
        program_id.as_ref(),
    ])
    .to_bytes()
}

pub fn verify_input_binding(
    ciphertext: &[u8; 32],
    encryption_pubkey: &[u8; 32],
    nonce: u128,
    signer: &Pubkey,
    program_id: &Pubkey,
    binding: &[u8; 32],
) -> Result<()> {
    let expected = input_binding(ciphertext, encryption_pubkey, nonce, signer, program_id);
    require!(expected == *binding, ErrorCode::InvalidProof);
    Ok(())
}
