use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Arcium plumbing
    #[msg("Cluster not set")]
    ClusterNotSet,

    // Authorization
    #[msg("Caller lacks the role required for this action")]
    Unauthorized,

    // State conflicts
    #[msg("A round is already open")]
    AlreadyActive,
    #[msg("No round is open")]
    NotActive,
    #[msg("The previous round is still waiting for its tally")]
    TallyPending,
    #[msg("A submission for this round, entry and participant already exists")]
    DuplicateSubmission,
    #[msg("This tally result has already been processed")]
    AlreadyProcessed,

    // Not found
    #[msg("Entry does not exist")]
    NotFound,
    #[msg("Entry is not registered or not active")]
    UnknownEntry,
    #[msg("Entry is not part of the current round")]
    EntryNotInRound,
    #[msg("Tally request does not match the computation")]
    UnknownRequest,

    // Invalid input
    #[msg("Round needs at least one entry")]
    EmptySelection,
    #[msg("Round selects more entries than a round can hold")]
    TooManyEntries,
    #[msg("Round or decryption batch is already full")]
    BatchFull,
    #[msg("Text field must not be empty")]
    EmptyField,
    #[msg("Text field exceeds its maximum length")]
    FieldTooLong,
    #[msg("Ciphertext already has the maximum number of readers")]
    TooManyReaders,
    #[msg("Submission accounts do not cover the whole round")]
    BatchIncomplete,
    #[msg("Submission accounts are not in tally order")]
    BatchOutOfOrder,
    #[msg("Account is not a submission of this round")]
    InvalidSubmissionAccount,

    // External contract violations
    #[msg("Input is not bound to the signer, its registered key and this program")]
    InvalidProof,
    #[msg("Plaintext count does not match the decryption batch")]
    Mismatch,
    #[msg("Decryption output was aborted or failed cluster signature verification")]
    OracleVerificationFailed,

    #[msg("Arithmetic overflow")]
    Overflow,
}
