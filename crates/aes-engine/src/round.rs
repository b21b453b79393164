//! AES round transformations over a column-major 4×4 state.

use crate::block::Block;
use crate::tables::{sbox, MUL2, MUL3};

/// One block as four columns of four bytes; byte `i` of the block lives in
/// column `i / 4`, row `i % 4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct State([[u8; 4]; 4]);

impl State {
    /// Loads a block column by column.
    #[inline]
    pub(crate) fn load(block: &Block) -> Self {
        let mut cols = [[0u8; 4]; 4];
        for (col, bytes) in cols.iter_mut().zip(block.chunks_exact(4)) {
            col.copy_from_slice(bytes);
        }
        Self(cols)
    }

    /// Writes the state back into `block`.
    #[inline]
    pub(crate) fn store(&self, block: &mut Block) {
        for (bytes, col) in block.chunks_exact_mut(4).zip(self.0.iter()) {
            bytes.copy_from_slice(col);
        }
    }

    /// Applies SubBytes in place.
    #[inline]
    pub(crate) fn sub_bytes(&mut self) {
        for byte in self.0.iter_mut().flatten() {
            *byte = sbox(*byte);
        }
    }

    /// Applies ShiftRows in place: row `r` moves left by `r` columns.
    #[inline]
    pub(crate) fn shift_rows(&mut self) {
        let old = self.0;
        for (c, col) in self.0.iter_mut().enumerate() {
            for (r, byte) in col.iter_mut().enumerate() {
                *byte = old[(c + r) % 4][r];
            }
        }
    }

    /// Applies MixColumns to all four columns.
    #[inline]
    pub(crate) fn mix_columns(&mut self) {
        for col in self.0.iter_mut() {
            mix_single_column(col);
        }
    }

    /// XORs a round key into the state, column by column.
    #[inline]
    pub(crate) fn add_round_key(&mut self, round_key: &Block) {
        for (col, key) in self.0.iter_mut().zip(round_key.chunks_exact(4)) {
            for (byte, k) in col.iter_mut().zip(key) {
                *byte ^= *k;
            }
        }
    }
}

fn mix_single_column(col: &mut [u8; 4]) {
    let double = |b: u8| MUL2[b as usize];
    let triple = |b: u8| MUL3[b as usize];
    let [a0, a1, a2, a3] = *col;
    col[0] = double(a0) ^ triple(a1) ^ a2 ^ a3;
    col[1] = a0 ^ double(a1) ^ triple(a2) ^ a3;
    col[2] = a0 ^ a1 ^ double(a2) ^ triple(a3);
    col[3] = triple(a0) ^ a1 ^ a2 ^ double(a3);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential_block() -> Block {
        let mut block = [0u8; 16];
        for (i, b) in block.iter_mut().enumerate() {
            *b = i as u8;
        }
        block
    }

    #[test]
    fn load_store_is_column_major() {
        let block = sequential_block();
        let state = State::load(&block);
        assert_eq!(state.0[1], [4, 5, 6, 7]);
        assert_eq!(state.0[3][2], 14);
        let mut out = [0u8; 16];
        state.store(&mut out);
        assert_eq!(out, block);
    }

    #[test]
    fn shift_rows_permutation() {
        let mut state = State::load(&sequential_block());
        state.shift_rows();
        let mut out = [0u8; 16];
        state.store(&mut out);
        assert_eq!(out, [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]);
    }

    #[test]
    fn mix_single_column_known_values() {
        let mut col = [0xdb, 0x13, 0x53, 0x45];
        mix_single_column(&mut col);
        assert_eq!(col, [0x8e, 0x4d, 0xa1, 0xbc]);

        let mut col = [0xf2, 0x0a, 0x22, 0x5c];
        mix_single_column(&mut col);
        assert_eq!(col, [0x9f, 0xdc, 0x58, 0x9d]);

        let mut col = [0xc6; 4];
        mix_single_column(&mut col);
        assert_eq!(col, [0xc6; 4]);
    }

    #[test]
    fn sub_bytes_uses_sbox() {
        let mut state = State::default();
        state.sub_bytes();
        assert_eq!(state, State([[0x63; 4]; 4]));
    }

    #[test]
    fn add_round_key_twice_is_identity() {
        let block = sequential_block();
        let key = [0x3cu8; 16];
        let mut state = State::load(&block);
        state.add_round_key(&key);
        assert_ne!(state, State::load(&block));
        state.add_round_key(&key);
        assert_eq!(state, State::load(&block));
    }
}
