#![allow(dead_code)]

use rejig::raster::Raster;

/// Smooth diagonal gradient: every true adjacency is the unique best match,
/// which makes buddy relations and optimal arrangements predictable.
pub fn gradient(width: usize, height: usize) -> Raster {
    let mut bytes = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            bytes.extend_from_slice(&[x as u8, y as u8, ((x + y) / 2) as u8]);
        }
    }
    Raster::from_rgb(width, height, &bytes).expect("gradient buffer")
}

pub fn solid(width: usize, height: usize, color: [u8; 3]) -> Raster {
    let bytes: Vec<u8> = color
        .iter()
        .copied()
        .cycle()
        .take(width * height * 3)
        .collect();
    Raster::from_rgb(width, height, &bytes).expect("solid buffer")
}

pub fn scrambled(raster: &Raster, piece_size: usize, seed: u64) -> Raster {
    rejig::scramble(raster, piece_size, seed).expect("scramble failed")
}
