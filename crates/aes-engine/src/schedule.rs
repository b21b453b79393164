//! AES key schedule for 128/192/256-bit keys.

use crate::block::Block;
use crate::key::{Key, RoundKeys};
use crate::tables::{sbox, RCON};

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    let [b0, b1, b2, b3] = word.to_be_bytes();
    u32::from_be_bytes([sbox(b0), sbox(b1), sbox(b2), sbox(b3)])
}

/// Expands `key` into `rounds + 1` round keys.
pub fn schedule_keys(key: &Key) -> RoundKeys {
    let size = key.size();
    let nk = size.key_words();
    let total = 4 * (size.rounds() + 1);

    let mut w: Vec<u32> = key
        .as_bytes()
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    w.reserve(total - nk);

    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[i / nk - 1]) << 24);
        } else if nk == 8 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w.push(w[i - nk] ^ temp);
    }

    let round_keys = w
        .chunks_exact(4)
        .map(|words| {
            let mut block: Block = [0u8; 16];
            for (dst, word) in block.chunks_exact_mut(4).zip(words) {
                dst.copy_from_slice(&word.to_be_bytes());
            }
            block
        })
        .collect();

    RoundKeys(round_keys)
}
