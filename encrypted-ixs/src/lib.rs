use arcis_imports::*;

#[encrypted]
mod circuits {
    use arcis_imports::*;

    /// A single submitted scalar (a vote weight or a bid),
    /// encrypted by the submitter with their x25519 shared secret.
    pub struct SealedValue {
        value: u64,
    }

    /// Decrypts one tally batch.
    ///
    /// Each slot carries its own submitter key and nonce, so values from
    /// different participants can be decrypted in one computation. Output
    /// order equals input order; the program relies on that to map every
    /// plaintext back to its (entry, participant) cell. Slots the program
    /// did not fill hold copies of the last real submission.
    ///
    /// # Returns
    /// The eight plaintext values, in slot order
    #[instruction]
    pub fn reveal_batch(
        slot_0: Enc<Shared, SealedValue>,
        slot_1: Enc<Shared, SealedValue>,
        slot_2: Enc<Shared, SealedValue>,
        slot_3: Enc<Shared, SealedValue>,
        slot_4: Enc<Shared, SealedValue>,
        slot_5: Enc<Shared, SealedValue>,
        slot_6: Enc<Shared, SealedValue>,
        slot_7: Enc<Shared, SealedValue>,
    ) -> [u64; 8] {
        // Reveal every slot unconditionally
        [
            slot_0.to_arcis().value.reveal(),
            slot_1.to_arcis().value.reveal(),
            slot_2.to_arcis().value.reveal(),
            slot_3.to_arcis().value.reveal(),
            slot_4.to_arcis().value.reveal(),
            slot_5.to_arcis().value.reveal(),
            slot_6.to_arcis().value.reveal(),
            slot_7.to_arcis().value.reveal(),
        ]
    }
}
