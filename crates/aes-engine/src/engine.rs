//! Block-encryptor capability and the factory choosing an engine for a key.

use std::fmt;

use crate::block::{check_chunk_len, for_each_block, Block};
use crate::cpu::is_hardware_acceleration_supported;
use crate::error::CipherError;
use crate::key::{Key, KeySize};
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use crate::ni::NiEngine;
use crate::soft::SoftwareEngine;

/// In-place AES encryption of independent 16-byte blocks.
///
/// Blocks are never chained: a chunk is the concatenation of its blocks
/// encrypted one by one.
pub trait BlockEncryptor {
    /// Key-size class the engine was built for.
    fn key_size(&self) -> KeySize;

    /// Encrypts one block in place.
    fn encrypt_block(&self, block: &mut Block);

    /// Encrypts every 16-byte block of `chunk` in place, in order.
    ///
    /// Fails without touching `chunk` unless its length is a positive
    /// multiple of 16.
    fn encrypt_chunk(&self, chunk: &mut [u8]) -> Result<(), CipherError> {
        check_chunk_len(chunk.len())?;
        for_each_block(chunk, |block| self.encrypt_block(block));
        Ok(())
    }
}

/// Which implementation an [`Encryptor`] runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Table-driven portable implementation.
    Software,
    /// AES-NI instructions.
    Hardware,
}

impl Backend {
    /// Short lowercase name, used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Software => "software",
            Self::Hardware => "hardware",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend selection policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendPreference {
    /// Hardware when the processor supports it, software otherwise.
    #[default]
    Auto,
    /// Always the software engine.
    Software,
    /// Hardware engine, or [`CipherError::HardwareUnavailable`].
    Hardware,
}

/// Configuration for [`create_encryptor_with_config`].
#[derive(Clone, Debug, Default)]
pub struct EncryptorConfig {
    /// Backend selection policy.
    pub backend: BackendPreference,
}

#[derive(Clone, Debug)]
enum Inner {
    Software(SoftwareEngine),
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Hardware(NiEngine),
}

/// Engine returned by the factory; output never depends on the backend.
#[derive(Clone, Debug)]
pub struct Encryptor {
    inner: Inner,
}

impl Encryptor {
    /// Backend this encryptor was built on.
    pub fn backend(&self) -> Backend {
        match &self.inner {
            Inner::Software(_) => Backend::Software,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Inner::Hardware(_) => Backend::Hardware,
        }
    }
}

impl BlockEncryptor for Encryptor {
    fn key_size(&self) -> KeySize {
        match &self.inner {
            Inner::Software(engine) => engine.key_size(),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Inner::Hardware(engine) => engine.key_size(),
        }
    }

    fn encrypt_block(&self, block: &mut Block) {
        match &self.inner {
            Inner::Software(engine) => engine.encrypt_block(block),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Inner::Hardware(engine) => engine.encrypt_block(block),
        }
    }

    fn encrypt_chunk(&self, chunk: &mut [u8]) -> Result<(), CipherError> {
        match &self.inner {
            Inner::Software(engine) => engine.encrypt_chunk(chunk),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Inner::Hardware(engine) => engine.encrypt_chunk(chunk),
        }
    }
}

/// Builds an encryptor for `key`, preferring hardware when available.
pub fn create_encryptor(key: &[u8]) -> Result<Encryptor, CipherError> {
    create_encryptor_with_config(key, &EncryptorConfig::default())
}

/// Builds an encryptor for `key` following `config`.
pub fn create_encryptor_with_config(
    key: &[u8],
    config: &EncryptorConfig,
) -> Result<Encryptor, CipherError> {
    let key = Key::from_slice(key)?;
    let inner = match config.backend {
        BackendPreference::Software => Inner::Software(SoftwareEngine::new(&key)),
        BackendPreference::Auto => {
            hardware(&key).unwrap_or_else(|| Inner::Software(SoftwareEngine::new(&key)))
        }
        BackendPreference::Hardware => hardware(&key).ok_or(CipherError::HardwareUnavailable)?,
    };
    let encryptor = Encryptor { inner };
    tracing::debug!(
        key_bits = key.size().bits(),
        backend = %encryptor.backend(),
        preference = ?config.backend,
        "created encryptor"
    );
    Ok(encryptor)
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[allow(unsafe_code)]
fn hardware(key: &Key) -> Option<Inner> {
    if !is_hardware_acceleration_supported() {
        return None;
    }
    // SAFETY: the processor reported AES-NI and SSE2 support.
    Some(Inner::Hardware(unsafe { NiEngine::new(key) }))
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn hardware(_key: &Key) -> Option<Inner> {
    debug_assert!(!is_hardware_acceleration_supported());
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_key_lengths() {
        for len in [15usize, 17, 33] {
            let err = create_encryptor(&vec![0u8; len]).unwrap_err();
            assert_eq!(err, CipherError::InvalidKeyLength(len));
        }
    }

    #[test]
    fn auto_follows_capability() {
        let enc = create_encryptor(&[0u8; 16]).unwrap();
        let expected = if is_hardware_acceleration_supported() {
            Backend::Hardware
        } else {
            Backend::Software
        };
        assert_eq!(enc.backend(), expected);
        assert_eq!(enc.key_size(), KeySize::Aes128);
    }

    #[test]
    fn software_preference_is_honoured() {
        let config = EncryptorConfig {
            backend: BackendPreference::Software,
        };
        let enc = create_encryptor_with_config(&[1u8; 32], &config).unwrap();
        assert_eq!(enc.backend(), Backend::Software);
        assert_eq!(enc.key_size(), KeySize::Aes256);
    }

    #[test]
    fn hardware_preference_fails_cleanly_without_support() {
        let config = EncryptorConfig {
            backend: BackendPreference::Hardware,
        };
        let result = create_encryptor_with_config(&[1u8; 24], &config);
        if is_hardware_acceleration_supported() {
            assert_eq!(result.unwrap().backend(), Backend::Hardware);
        } else {
            assert_eq!(result.unwrap_err(), CipherError::HardwareUnavailable);
        }
    }

    #[test]
    fn encryptor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Encryptor>();
    }
}
