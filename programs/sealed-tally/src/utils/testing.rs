use anchor_lang::prelude::*;
use anchor_lang::AccountSerialize;

/// Owned backing storage for an `AccountInfo` in unit tests.
pub struct TestAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

impl TestAccount {
    pub fn new<T: AccountSerialize>(key: Pubkey, owner: Pubkey, account: &T) -> Self {
        let mut data = Vec::new();
        account.try_serialize(&mut data).unwrap();
        Self {
            key,
            owner,
            lamports: 1_000_000,
            data,
        }
    }

    pub fn info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            false,
            true,
            &mut self.lamports,
            &mut self.data,
            &self.owner,
            false,
            0,
        )
    }
}

pub fn infos(accounts: &mut [TestAccount]) -> Vec<AccountInfo<'_>> {
    accounts.iter_mut().map(TestAccount::info).collect()
}
