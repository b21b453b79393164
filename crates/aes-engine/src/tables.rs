//! Galois-field lookup tables, computed at compile time.
//!
//! Arithmetic is over GF(2^8) with the AES reduction polynomial
//! x^8 + x^4 + x^3 + x + 1 (`0x11b`).

/// Forward S-box.
pub(crate) const SBOX: [u8; 256] = build_sbox();

/// `MUL2[x] = 2 • x` in GF(2^8).
pub(crate) const MUL2: [u8; 256] = build_mul_table(2);

/// `MUL3[x] = 3 • x` in GF(2^8).
pub(crate) const MUL3: [u8; 256] = build_mul_table(3);

/// Round constants `2^(i-1)` for key-schedule rounds 1..=10.
pub(crate) const RCON: [u8; 10] = build_rcon();

const fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ 0x1b
    } else {
        shifted
    }
}

const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

/// Multiplicative inverse as `x^254`; maps 0 to 0.
const fn gf_inv(x: u8) -> u8 {
    let mut result = 1u8;
    let mut base = x;
    let mut exp = 254u8;
    while exp != 0 {
        if exp & 1 != 0 {
            result = gf_mul(result, base);
        }
        base = gf_mul(base, base);
        exp >>= 1;
    }
    if x == 0 {
        0
    } else {
        result
    }
}

const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let b = gf_inv(i as u8);
        table[i] = b
            ^ b.rotate_left(1)
            ^ b.rotate_left(2)
            ^ b.rotate_left(3)
            ^ b.rotate_left(4)
            ^ 0x63;
        i += 1;
    }
    table
}

const fn build_mul_table(factor: u8) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = gf_mul(i as u8, factor);
        i += 1;
    }
    table
}

const fn build_rcon() -> [u8; 10] {
    let mut table = [0u8; 10];
    let mut value = 1u8;
    let mut i = 0;
    while i < 10 {
        table[i] = value;
        value = xtime(value);
        i += 1;
    }
    table
}

/// Looks up `byte` in the forward S-box.
#[inline]
pub(crate) fn sbox(byte: u8) -> u8 {
    SBOX[byte as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sbox_known_entries() {
        assert_eq!(SBOX[0x00], 0x63);
        assert_eq!(SBOX[0x01], 0x7c);
        assert_eq!(SBOX[0x53], 0xed);
        assert_eq!(SBOX[0x9a], 0xb8);
        assert_eq!(SBOX[0xff], 0x16);
    }

    #[test]
    fn sbox_is_a_permutation() {
        let mut seen = [false; 256];
        for &value in SBOX.iter() {
            assert!(!seen[value as usize]);
            seen[value as usize] = true;
        }
    }

    #[test]
    fn sbox_has_no_fixed_points() {
        for (input, &output) in SBOX.iter().enumerate() {
            assert_ne!(input as u8, output);
        }
    }

    #[test]
    fn doubling_and_tripling() {
        assert_eq!(MUL2[0x57], 0xae);
        assert_eq!(MUL2[0x80], 0x1b);
        assert_eq!(MUL3[0x57], 0xf9);
        for x in 0..=255u8 {
            assert_eq!(MUL3[x as usize], MUL2[x as usize] ^ x);
        }
        assert_eq!(gf_mul(0x57, 0x13), 0xfe);
    }

    #[test]
    fn rcon_powers_of_two() {
        assert_eq!(
            RCON,
            [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36]
        );
    }

    #[test]
    fn inverse_is_inverse() {
        for x in 1..=255u8 {
            assert_eq!(gf_mul(x, gf_inv(x)), 1);
        }
    }
}
