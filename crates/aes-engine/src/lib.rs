//! AES (Rijndael) block encryption for 128, 192 and 256-bit keys.
//!
//! Two engines produce byte-identical ciphertext:
//! - a portable engine built on compile-time GF(2^8) tables;
//! - an AES-NI engine, selected at runtime on x86/x86_64 processors that
//!   support it.
//!
//! [`create_encryptor`] picks the engine. Only the forward cipher is provided
//! and blocks are always encrypted independently; modes of operation and
//! padding belong to callers. The software path uses table lookups and is
//! not constant-time.

#![deny(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cpu;
mod engine;
mod error;
mod key;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[allow(unsafe_code)]
mod ni;
mod round;
mod schedule;
mod soft;
mod tables;

pub use crate::block::{Block, BLOCK_SIZE};
pub use crate::cpu::is_hardware_acceleration_supported;
pub use crate::engine::{
    create_encryptor, create_encryptor_with_config, Backend, BackendPreference, BlockEncryptor,
    Encryptor, EncryptorConfig,
};
pub use crate::error::CipherError;
pub use crate::key::{Key, KeySize, RoundKeys};
pub use crate::schedule::schedule_keys;
pub use crate::soft::{encrypt_block, SoftwareEngine};
