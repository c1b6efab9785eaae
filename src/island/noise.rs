//! Coherent value noise for terrain shaping
//!
//! Hash-based lattice noise with smoothstep interpolation. Pure function
//! of position and offset, so regeneration from a seed is exact.

/// Deterministic hash of a lattice point
fn lattice_hash(x: i64, y: i64, offset: u64) -> u64 {
    let mut h = (x as u64)
        .wrapping_mul(374761393)
        .wrapping_add((y as u64).wrapping_mul(668265263))
        .wrapping_add(offset);
    h = h.wrapping_mul(6364136223846793005);
    h = h.wrapping_add(1442695040888963407);
    h ^ (h >> 32)
}

/// Lattice value in [0,1]
fn lattice_value(x: i64, y: i64, offset: u64) -> f32 {
    (lattice_hash(x, y, offset) & 0xFFFF) as f32 / 65535.0
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample smooth noise in [0,1] at `(x, y)`.
///
/// `offset` shifts the whole field so different seeds produce visibly
/// different islands; `frequency` controls feature size in cells.
pub fn sample(x: f32, y: f32, offset: u64, frequency: f32) -> f32 {
    let sx = x * frequency;
    let sy = y * frequency;

    let x0 = sx.floor() as i64;
    let y0 = sy.floor() as i64;
    let tx = smoothstep(sx - x0 as f32);
    let ty = smoothstep(sy - y0 as f32);

    let v00 = lattice_value(x0, y0, offset);
    let v10 = lattice_value(x0 + 1, y0, offset);
    let v01 = lattice_value(x0, y0 + 1, offset);
    let v11 = lattice_value(x0 + 1, y0 + 1, offset);

    let top = lerp(v00, v10, tx);
    let bottom = lerp(v01, v11, tx);
    lerp(top, bottom, ty)
}
