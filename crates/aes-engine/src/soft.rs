//! Portable table-driven cipher engine.

use crate::block::Block;
use crate::engine::BlockEncryptor;
use crate::key::{Key, KeySize, RoundKeys};
use crate::round::State;
use crate::schedule::schedule_keys;

/// Encrypts a single 16-byte block in place with pre-expanded round keys.
pub fn encrypt_block(block: &mut Block, round_keys: &RoundKeys) {
    let rounds = round_keys.rounds();
    let mut state = State::load(block);

    state.add_round_key(round_keys.get(0));

    for round in 1..rounds {
        state.sub_bytes();
        state.shift_rows();
        state.mix_columns();
        state.add_round_key(round_keys.get(round));
    }

    state.sub_bytes();
    state.shift_rows();
    state.add_round_key(round_keys.get(rounds));

    state.store(block);
}

/// Software AES engine owning its round keys.
#[derive(Clone, Debug)]
pub struct SoftwareEngine {
    size: KeySize,
    round_keys: RoundKeys,
}

impl SoftwareEngine {
    /// Expands `key` and builds the engine.
    pub fn new(key: &Key) -> Self {
        Self {
            size: key.size(),
            round_keys: schedule_keys(key),
        }
    }

    /// Round keys derived at construction.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }
}

impl BlockEncryptor for SoftwareEngine {
    fn key_size(&self) -> KeySize {
        self.size
    }

    fn encrypt_block(&self, block: &mut Block) {
        encrypt_block(block, &self.round_keys);
    }
}
