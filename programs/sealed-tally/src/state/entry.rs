use anchor_lang::prelude::*;

use crate::{constants::*, error::ErrorCode};

/// A proposed project or auction lot. Never deleted, only deactivated.
#[account]
#[derive(InitSpace, Debug)]
pub struct Entry {
    /// PDA bump seed
    pub bump: u8,
    /// Sequential id, 1-based, never reused
    pub id: u64,
    #[max_len(32)]
    pub name: String,
    #[max_len(128)]
    pub description: String,
    #[max_len(32)]
    pub category: String,
    /// Identity that proposed the entry
    pub owner: Pubkey,
    /// Cleared by the administrator, never set again
    pub active: bool,
    pub created_at: i64,
}

impl Entry {
    pub fn validate_metadata(name: &str, description: &str, category: &str) -> Result<()> {
        check_field(name, MAX_NAME_LEN)?;
        check_field(description, MAX_DESCRIPTION_LEN)?;
        check_field(category, MAX_CATEGORY_LEN)?;
        Ok(())
    }

    /// Returns whether the flag actually changed.
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }
}

fn check_field(value: &str, max_len: usize) -> Result<()> {
    require!(!value.is_empty(), ErrorCode::EmptyField);
    require!(value.len() <= max_len, ErrorCode::FieldTooLong);
    Ok(())
}
