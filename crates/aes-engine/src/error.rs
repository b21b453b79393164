//! Error type shared by every public constructor and chunk operation.

/// Errors reported at the cipher API boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    /// The key is not 16, 24 or 32 bytes long.
    #[error("invalid key length {0} bytes: expected 16, 24 or 32")]
    InvalidKeyLength(usize),
    /// The chunk is empty or not a multiple of the 16-byte block size.
    #[error("invalid chunk length {0} bytes: expected a positive multiple of 16")]
    InvalidChunkLength(usize),
    /// The hardware backend was requested but the processor lacks AES instructions.
    #[error("hardware AES acceleration is not available on this processor")]
    HardwareUnavailable,
}
