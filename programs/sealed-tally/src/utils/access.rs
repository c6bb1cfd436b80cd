use anchor_lang::prelude::*;

use crate::{constants::MAX_READERS, error::ErrorCode};

/// Adds `reader` to the list of identities allowed to decrypt a stored
/// ciphertext. Granting twice is a no-op.
pub fn grant_access(readers: &mut Vec<Pubkey>, reader: Pubkey) -> Result<()> {
    if can_read(readers, &reader) {
        return Ok(());
    }
    require!(readers.len() < MAX_READERS, ErrorCode::TooManyReaders);
    readers.push(reader);
    Ok(())
}

pub fn can_read(readers: &[Pubkey], who: &Pubkey) -> bool {
    readers.contains(who)
}
