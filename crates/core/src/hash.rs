//! Stateless 32-bit cell hashes.
//! Every value here is reproducible bit for bit with wrapping `u32` arithmetic, so the
//! maze can be regenerated by any implementation that shares the constants.

/// Multipliers for one independent hash stream.
#[derive(Clone, Copy)]
struct Stream {
    basis: u32,
    x_mul: u32,
    y_mul: u32,
    salt_mul: u32,
}

/// Door open/closed decisions and the connectivity guarantee.
const DOOR: Stream =
    Stream { basis: 0x243F_6A88, x_mul: 0x9E37_79B1, y_mul: 0x85EB_CA77, salt_mul: 0xC2B2_AE3D };

/// Wall decoration subtype.
const DECOR: Stream =
    Stream { basis: 0x1319_8A2E, x_mul: 0x27D4_EB2F, y_mul: 0x1656_67B1, salt_mul: 0xD3A2_646D };

/// Portal rooms.
const PORTAL: Stream =
    Stream { basis: 0xA409_3822, x_mul: 0x7FEB_352D, y_mul: 0x846C_A68B, salt_mul: 0x68E3_1DA5 };

const UNIT_SCALE: f64 = 4_294_967_296.0;

/// Folds a 64-bit session seed into the 32 bits mixed into every hash.
/// The high half is finalized before the xor so that `n` and `-n - 1` stay distinct.
pub const fn fold_seed(seed: i64) -> u32 {
    let bits = seed as u64;
    (bits as u32) ^ fmix32((bits >> 32) as u32)
}

/// Maps raw hash bits onto `[0, 1)`.
pub fn unit(bits: u32) -> f64 {
    f64::from(bits) / UNIT_SCALE
}

pub fn h1_bits(x: i64, y: i64, salt: u32, seed: u32) -> u32 {
    stream_bits(DOOR, x, y, salt, seed)
}

pub fn h1(x: i64, y: i64, salt: u32, seed: u32) -> f64 {
    unit(h1_bits(x, y, salt, seed))
}

pub fn h2_bits(x: i64, y: i64, salt: u32, seed: u32) -> u32 {
    stream_bits(DECOR, x, y, salt, seed)
}

pub fn h2(x: i64, y: i64, salt: u32, seed: u32) -> f64 {
    unit(h2_bits(x, y, salt, seed))
}

pub fn portal_bits(x: i64, y: i64, salt: u32, seed: u32) -> u32 {
    stream_bits(PORTAL, x, y, salt, seed)
}

// Coordinates are truncated to their low 32 bits before mixing.
fn stream_bits(stream: Stream, x: i64, y: i64, salt: u32, seed: u32) -> u32 {
    let mut h = seed ^ stream.basis;
    h = absorb(h, (x as u32).wrapping_mul(stream.x_mul));
    h = absorb(h, (y as u32).wrapping_mul(stream.y_mul));
    h = absorb(h, salt.wrapping_mul(stream.salt_mul));
    fmix32(h)
}

fn absorb(h: u32, k: u32) -> u32 {
    let k = k.wrapping_mul(0xCC9E_2D51).rotate_left(15).wrapping_mul(0x1B87_3593);
    (h ^ k).rotate_left(13).wrapping_mul(5).wrapping_add(0xE654_6B64)
}

const fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^ (h >> 16)
}
