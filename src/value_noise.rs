//! seeded integer hash & smoothed 2‑D value noise
//!
//! Everything here is a pure function of its arguments. The hash is a
//! splitmix64 finaliser over wrapping 64‑bit arithmetic, so terrain built on
//! it is bit‑reproducible for a given seed.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX_1: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_2: u64 = 0x94D0_49BB_1331_11EB;

/// lattice index multipliers for `noise2d`
const LATTICE_X: i64 = 7349;
const LATTICE_Y: i64 = 9157;

/// hash `(seed, index)` to a float in `[0, 1)`
#[inline]
pub fn rand01(seed: i64, index: i64) -> f64 {
    let mut x = (seed as u64) ^ (index as u64).wrapping_mul(GOLDEN_GAMMA);
    x ^= x >> 30;
    x = x.wrapping_mul(MIX_1);
    x ^= x >> 27;
    x = x.wrapping_mul(MIX_2);
    x ^= x >> 31;
    // top 53 bits → full f64 mantissa
    (x >> 11) as f64 / (1u64 << 53) as f64
}

/// `3t² − 2t³`
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
fn lattice(seed: i64, ix: i64, iy: i64) -> f64 {
    rand01(seed, ix.wrapping_mul(LATTICE_X) ^ iy.wrapping_mul(LATTICE_Y))
}

/// smoothstep‑eased bilinear value noise in `[0, 1)`
///
/// `(x, y)` is scaled by `scale` before the four surrounding integer lattice
/// points are hashed with `seed + salt`.
pub fn noise2d(seed: i64, x: f64, y: f64, scale: f64, salt: i64) -> f64 {
    let sx = x * scale;
    let sy = y * scale;
    let fx0 = sx.floor();
    let fy0 = sy.floor();
    let (x0, y0) = (fx0 as i64, fy0 as i64);
    let (x1, y1) = (x0.wrapping_add(1), y0.wrapping_add(1));

    let fx = smoothstep(sx - fx0);
    let fy = smoothstep(sy - fy0);

    let s = seed.wrapping_add(salt);
    let top = lerp(lattice(s, x0, y0), lattice(s, x1, y0), fx);
    let bottom = lerp(lattice(s, x0, y1), lattice(s, x1, y1), fx);
    lerp(top, bottom, fy)
}
