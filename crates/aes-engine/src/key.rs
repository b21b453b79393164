//! Key types for AES-128/192/256.

use crate::block::Block;
use crate::error::CipherError;

/// Key-size class; fixes the round count and the expanded-key length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Maps a raw key length in bytes onto its size class.
    pub fn from_len(len: usize) -> Result<Self, CipherError> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            other => Err(CipherError::InvalidKeyLength(other)),
        }
    }

    /// Key length in bits.
    pub const fn bits(self) -> usize {
        self.key_words() * 32
    }

    /// Key length in bytes.
    pub const fn byte_len(self) -> usize {
        self.key_words() * 4
    }

    /// Number of 32-bit words in the key (`Nk`).
    pub const fn key_words(self) -> usize {
        match self {
            Self::Aes128 => 4,
            Self::Aes192 => 6,
            Self::Aes256 => 8,
        }
    }

    /// Number of cipher rounds (`Nk + 6`).
    pub const fn rounds(self) -> usize {
        self.key_words() + 6
    }
}

/// AES key of one of the three supported sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// 16-byte key.
    Aes128([u8; 16]),
    /// 24-byte key.
    Aes192([u8; 24]),
    /// 32-byte key.
    Aes256([u8; 32]),
}

impl Key {
    /// Copies a key out of `bytes`, rejecting any length other than 16, 24 or 32.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CipherError> {
        let key = match KeySize::from_len(bytes.len())? {
            KeySize::Aes128 => {
                let mut raw = [0u8; 16];
                raw.copy_from_slice(bytes);
                Self::Aes128(raw)
            }
            KeySize::Aes192 => {
                let mut raw = [0u8; 24];
                raw.copy_from_slice(bytes);
                Self::Aes192(raw)
            }
            KeySize::Aes256 => {
                let mut raw = [0u8; 32];
                raw.copy_from_slice(bytes);
                Self::Aes256(raw)
            }
        };
        Ok(key)
    }

    /// Size class of this key.
    pub fn size(&self) -> KeySize {
        match self {
            Self::Aes128(_) => KeySize::Aes128,
            Self::Aes192(_) => KeySize::Aes192,
            Self::Aes256(_) => KeySize::Aes256,
        }
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Aes128(raw) => raw,
            Self::Aes192(raw) => raw,
            Self::Aes256(raw) => raw,
        }
    }
}

impl From<[u8; 16]> for Key {
    fn from(value: [u8; 16]) -> Self {
        Self::Aes128(value)
    }
}

impl From<[u8; 24]> for Key {
    fn from(value: [u8; 24]) -> Self {
        Self::Aes192(value)
    }
}

impl From<[u8; 32]> for Key {
    fn from(value: [u8; 32]) -> Self {
        Self::Aes256(value)
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = CipherError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(value)
    }
}

/// Expanded round keys, `rounds + 1` blocks consumed in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub(crate) Vec<Block>);

impl RoundKeys {
    /// Returns the round key at the requested index (`0..=rounds`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Number of round-key blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a schedule holds at least 11 blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rounds these keys drive.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.0.len() - 1
    }

    /// All round-key blocks in order.
    #[inline]
    pub fn as_slice(&self) -> &[Block] {
        &self.0
    }
}
