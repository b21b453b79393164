//! AES-NI cipher engine for x86 and x86_64.
//!
//! Round keys come from the portable schedule and are held as `__m128i`
//! values, the layout `AESENC`/`AESENCLAST` consume directly. Every engine
//! here assumes the processor supports AES-NI; only the factory constructs
//! them, after [`crate::is_hardware_acceleration_supported`] returned true.

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m128i, _mm_aesenc_si128, _mm_aesenclast_si128, _mm_loadu_si128, _mm_setzero_si128,
    _mm_storeu_si128, _mm_xor_si128,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128i, _mm_aesenc_si128, _mm_aesenclast_si128, _mm_loadu_si128, _mm_setzero_si128,
    _mm_storeu_si128, _mm_xor_si128,
};

use crate::block::{check_chunk_len, Block, BLOCK_SIZE};
use crate::engine::BlockEncryptor;
use crate::error::CipherError;
use crate::key::{Key, KeySize, RoundKeys};
use crate::schedule::schedule_keys;

/// AES-NI engine holding `KEYS` round keys (`rounds + 1`).
#[derive(Clone, Debug)]
pub(crate) struct AesNi<const KEYS: usize> {
    round_keys: [__m128i; KEYS],
}

impl<const KEYS: usize> AesNi<KEYS> {
    /// # Safety
    ///
    /// The processor must support AES-NI and SSE2, and `round_keys` must hold
    /// exactly `KEYS` blocks.
    unsafe fn new(round_keys: &RoundKeys) -> Self {
        debug_assert_eq!(round_keys.len(), KEYS);
        Self {
            round_keys: load_round_keys(round_keys),
        }
    }

    #[inline]
    fn encrypt_block(&self, block: &mut Block) {
        // SAFETY: AesNi values only exist once AES-NI support was confirmed.
        unsafe { encrypt_blocks(&self.round_keys, block) }
    }

    /// Encrypts every block of an already validated chunk.
    #[inline]
    fn encrypt_blocks(&self, chunk: &mut [u8]) {
        // SAFETY: as above; `chunks_exact_mut` inside never reads past the slice.
        unsafe { encrypt_blocks(&self.round_keys, chunk) }
    }
}

#[target_feature(enable = "sse2")]
unsafe fn load_round_keys<const KEYS: usize>(round_keys: &RoundKeys) -> [__m128i; KEYS] {
    let mut out = [_mm_setzero_si128(); KEYS];
    for (dst, src) in out.iter_mut().zip(round_keys.as_slice()) {
        *dst = _mm_loadu_si128(src.as_ptr() as *const __m128i);
    }
    out
}

#[target_feature(enable = "aes,sse2")]
unsafe fn encrypt_blocks<const KEYS: usize>(round_keys: &[__m128i; KEYS], data: &mut [u8]) {
    let last = round_keys[KEYS - 1];
    for slice in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut state = _mm_loadu_si128(slice.as_ptr() as *const __m128i);
        state = _mm_xor_si128(state, round_keys[0]);
        for key in &round_keys[1..KEYS - 1] {
            state = _mm_aesenc_si128(state, *key);
        }
        state = _mm_aesenclast_si128(state, last);
        _mm_storeu_si128(slice.as_mut_ptr() as *mut __m128i, state);
    }
}

/// Hardware engine, one variant per key-size class.
#[derive(Clone, Debug)]
pub(crate) enum NiEngine {
    Aes128(AesNi<11>),
    Aes192(AesNi<13>),
    Aes256(AesNi<15>),
}

impl NiEngine {
    /// Expands `key` into hardware round keys.
    ///
    /// # Safety
    ///
    /// The caller must have checked [`crate::is_hardware_acceleration_supported`].
    pub(crate) unsafe fn new(key: &Key) -> Self {
        let round_keys = schedule_keys(key);
        match key.size() {
            KeySize::Aes128 => Self::Aes128(AesNi::new(&round_keys)),
            KeySize::Aes192 => Self::Aes192(AesNi::new(&round_keys)),
            KeySize::Aes256 => Self::Aes256(AesNi::new(&round_keys)),
        }
    }
}

impl BlockEncryptor for NiEngine {
    fn key_size(&self) -> KeySize {
        match self {
            Self::Aes128(_) => KeySize::Aes128,
            Self::Aes192(_) => KeySize::Aes192,
            Self::Aes256(_) => KeySize::Aes256,
        }
    }

    fn encrypt_block(&self, block: &mut Block) {
        match self {
            Self::Aes128(engine) => engine.encrypt_block(block),
            Self::Aes192(engine) => engine.encrypt_block(block),
            Self::Aes256(engine) => engine.encrypt_block(block),
        }
    }

    fn encrypt_chunk(&self, chunk: &mut [u8]) -> Result<(), CipherError> {
        check_chunk_len(chunk.len())?;
        match self {
            Self::Aes128(engine) => engine.encrypt_blocks(chunk),
            Self::Aes192(engine) => engine.encrypt_blocks(chunk),
            Self::Aes256(engine) => engine.encrypt_blocks(chunk),
        }
        Ok(())
    }
}
