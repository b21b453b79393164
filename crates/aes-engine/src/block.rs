//! Block representation helpers.

use crate::error::CipherError;

/// Size of one AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// Checks that `len` is a positive multiple of [`BLOCK_SIZE`].
#[inline]
pub(crate) fn check_chunk_len(len: usize) -> Result<(), CipherError> {
    if len == 0 || len % BLOCK_SIZE != 0 {
        return Err(CipherError::InvalidChunkLength(len));
    }
    Ok(())
}

/// Runs `f` over every 16-byte block of `chunk` in order, writing each result back.
///
/// The caller is expected to have validated the chunk length already.
#[inline]
pub(crate) fn for_each_block(chunk: &mut [u8], mut f: impl FnMut(&mut Block)) {
    for slice in chunk.chunks_exact_mut(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(slice);
        f(&mut block);
        slice.copy_from_slice(&block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_len_must_be_positive_multiple() {
        assert!(check_chunk_len(16).is_ok());
        assert!(check_chunk_len(4096).is_ok());
        assert_eq!(check_chunk_len(0), Err(CipherError::InvalidChunkLength(0)));
        assert_eq!(check_chunk_len(15), Err(CipherError::InvalidChunkLength(15)));
        assert_eq!(check_chunk_len(33), Err(CipherError::InvalidChunkLength(33)));
    }

    #[test]
    fn for_each_block_visits_in_order() {
        let mut chunk = [0u8; 48];
        let mut idx = 0u8;
        for_each_block(&mut chunk, |block| {
            block.fill(idx);
            idx += 1;
        });
        assert!(chunk[..16].iter().all(|&b| b == 0));
        assert!(chunk[16..32].iter().all(|&b| b == 1));
        assert!(chunk[32..].iter().all(|&b| b == 2));
    }
}
