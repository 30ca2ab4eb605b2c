//! Deterministic stand-in images for scene textures whose files are missing.
//!
//! Each role gets its own fixed seed so the fallback looks the same on
//! every run.

use image::{Rgba, RgbaImage};
use pod_scene::TextureId;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const FALLBACK_SIZE: u32 = 256;

fn seed(id: TextureId) -> u64 {
    match id {
        TextureId::Planet => 0x504c_414e,
        TextureId::Moon => 0x4d4f_4f4e,
        TextureId::Metal => 0x4d45_5441,
        TextureId::Stars => 0x5354_4152,
    }
}

/// Generate the fallback image for `id` at [`FALLBACK_SIZE`] square.
pub fn generate(id: TextureId) -> RgbaImage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed(id));
    match id {
        TextureId::Stars => stars(&mut rng),
        TextureId::Planet => banded(&mut rng, [40, 90, 160], [210, 220, 230]),
        TextureId::Moon => cratered(&mut rng),
        TextureId::Metal => brushed(&mut rng),
    }
}

/// Sparse white points on black, a few of them brighter.
fn stars(rng: &mut ChaCha8Rng) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(FALLBACK_SIZE, FALLBACK_SIZE, Rgba([0, 0, 0, 255]));
    let count = (FALLBACK_SIZE * FALLBACK_SIZE) / 180;
    for _ in 0..count {
        let x = rng.random_range(0..FALLBACK_SIZE);
        let y = rng.random_range(0..FALLBACK_SIZE);
        let brightness = rng.random::<f32>().powf(3.0);
        let level = (80.0 + brightness * 175.0) as u8;
        image.put_pixel(x, y, Rgba([level, level, level.saturating_add(10), 255]));
    }
    image
}

/// Horizontal cloud bands blending two colours, with per-row jitter.
fn banded(rng: &mut ChaCha8Rng, base: [u8; 3], cloud: [u8; 3]) -> RgbaImage {
    let phase = rng.random::<f32>() * std::f32::consts::TAU;
    let rows: Vec<f32> = (0..FALLBACK_SIZE)
        .map(|y| {
            let v = y as f32 / FALLBACK_SIZE as f32;
            let band = (v * 14.0 + phase).sin() * 0.5 + 0.5;
            (band * 0.6 + rng.random::<f32>() * 0.15).clamp(0.0, 1.0)
        })
        .collect();
    RgbaImage::from_fn(FALLBACK_SIZE, FALLBACK_SIZE, |_, y| {
        let t = rows[y as usize];
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Rgba([
            mix(base[0], cloud[0]),
            mix(base[1], cloud[1]),
            mix(base[2], cloud[2]),
            255,
        ])
    })
}

/// Grey noise with darker circular craters.
fn cratered(rng: &mut ChaCha8Rng) -> RgbaImage {
    let mut image = RgbaImage::from_fn(FALLBACK_SIZE, FALLBACK_SIZE, |_, _| {
        let level = 150 + rng.random_range(0..40u8);
        Rgba([level, level, level, 255])
    });
    for _ in 0..24 {
        let cx = rng.random_range(0..FALLBACK_SIZE) as i32;
        let cy = rng.random_range(0..FALLBACK_SIZE) as i32;
        let radius = rng.random_range(4..20) as i32;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let x = (cx + dx).rem_euclid(FALLBACK_SIZE as i32) as u32;
                let y = (cy + dy).rem_euclid(FALLBACK_SIZE as i32) as u32;
                let pixel = image.get_pixel_mut(x, y);
                for channel in &mut pixel.0[..3] {
                    *channel = channel.saturating_sub(45);
                }
            }
        }
    }
    image
}

/// Light grey with faint horizontal streaks.
fn brushed(rng: &mut ChaCha8Rng) -> RgbaImage {
    let streaks: Vec<u8> = (0..FALLBACK_SIZE).map(|_| rng.random_range(0..24)).collect();
    RgbaImage::from_fn(FALLBACK_SIZE, FALLBACK_SIZE, |x, y| {
        let seam = if x % 64 == 0 || y % 64 == 0 { 40 } else { 0 };
        let level = (170 + streaks[y as usize]).saturating_sub(seam);
        Rgba([level, level, level.saturating_add(6), 255])
    })
}
