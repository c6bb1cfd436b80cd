use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// Authorization flag and registered encryption key for one identity.
/// Created the first time the administrator authorizes or revokes it.
#[account]
#[derive(InitSpace)]
pub struct Participant {
    /// PDA bump seed
    pub bump: u8,
    pub identity: Pubkey,
    pub authorized: bool,
    /// x25519 key the identity encrypts its submissions with
    pub encryption_pubkey: [u8; 32],
    /// Highest nonce accepted so far; nonces must strictly increase
    pub last_nonce: u128,
}

impl Participant {
    /// Sets the flag and reports whether it changed.
    pub fn set_authorized(&mut self, authorized: bool) -> bool {
        let changed = self.authorized != authorized;
        self.authorized = authorized;
        changed
    }

    /// Registers the encryption key and reports whether it changed.
    pub fn set_encryption_pubkey(&mut self, encryption_pubkey: [u8; 32]) -> bool {
        let changed = self.encryption_pubkey != encryption_pubkey;
        self.encryption_pubkey = encryption_pubkey;
        changed
    }

    /// Accepts an encrypted input only under the identity's own key and a
    /// fresh nonce. A ciphertext copied from another participant carries
    /// their key and is rejected.
    pub fn accept_input(&mut self, encryption_pubkey: &[u8; 32], nonce: u128) -> Result<()> {
        require!(
            self.encryption_pubkey == *encryption_pubkey,
            ErrorCode::InvalidProof
        );
        require!(nonce > self.last_nonce, ErrorCode::InvalidProof);
        self.last_nonce = nonce;
        Ok(())
    }
}

/// An identity without a participant account has never been authorized.
pub fn is_authorized(participant: Option<&Participant>, identity: &Pubkey) -> bool {
    participant.is_some_and(|p| p.identity == *identity && p.authorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{input_binding, verify_input_binding};

    fn participant(encryption_pubkey: [u8; 32]) -> Participant {
        Participant {
            bump: 255,
            identity: Pubkey::new_unique(),
            authorized: true,
            encryption_pubkey,
            last_nonce: 0,
        }
    }

    #[test]
    fn test_authorize_and_revoke_are_idempotent() {
        let mut participant = participant([1; 32]);
        participant.authorized = false;
        assert!(participant.set_authorized(true));
        assert!(!participant.set_authorized(true));
        assert!(participant.set_authorized(false));
        assert!(!participant.set_authorized(false));

        assert!(!participant.set_encryption_pubkey([1; 32]));
        assert!(participant.set_encryption_pubkey([2; 32]));
    }

    #[test]
    fn test_is_authorized() {
        let participant = participant([1; 32]);
        let identity = participant.identity;
        assert!(is_authorized(Some(&participant), &identity));
        assert!(!is_authorized(Some(&participant), &Pubkey::new_unique()));
        assert!(!is_authorized(None, &identity));

        let revoked = Participant {
            authorized: false,
            ..participant
        };
        assert!(!is_authorized(Some(&revoked), &identity));
    }

    #[test]
    fn test_accept_input_requires_fresh_nonce() {
        let mut participant = participant([1; 32]);
        participant.accept_input(&[1; 32], 5).unwrap();
        assert_eq!(participant.last_nonce, 5);

        let err = participant.accept_input(&[1; 32], 5).unwrap_err();
        assert_eq!(err, error!(ErrorCode::InvalidProof));
        let err = participant.accept_input(&[1; 32], 4).unwrap_err();
        assert_eq!(err, error!(ErrorCode::InvalidProof));

        participant.accept_input(&[1; 32], 6).unwrap();
    }

    #[test]
    fn test_copied_ciphertext_under_other_signer_is_rejected() {
        let program_id = Pubkey::new_unique();
        let alice_key = [1; 32];
        let alice_ciphertext = [7; 32];
        let nonce = 42;
        let mut mallory = participant([2; 32]);

        // the binding over public data can be recomputed for any signer
        let binding = input_binding(&alice_ciphertext, &alice_key, nonce, &mallory.identity, &program_id);
        assert!(verify_input_binding(
            &alice_ciphertext,
            &alice_key,
            nonce,
            &mallory.identity,
            &program_id,
            &binding
        )
        .is_ok());

        // but alice's key is not mallory's registered key
        let err = mallory.accept_input(&alice_key, nonce).unwrap_err();
        assert_eq!(err, error!(ErrorCode::InvalidProof));
        assert_eq!(mallory.last_nonce, 0);
    }
}
