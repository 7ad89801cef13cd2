//! Nearest-color mapping and Floyd-Steinberg error diffusion.

use alloc::vec;
use alloc::vec::Vec;
use ctex_common::Color8888;

/// Index of the palette color closest to `color` over all four channels.
pub(crate) fn nearest(palette: &[Color8888], color: Color8888) -> u8 {
    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, entry)| entry.distance_squared(color))
        .map_or(0, |(index, _)| index as u8)
}

/// Maps `pixels` to `palette`, diffusing each pixel's error to its unvisited neighbors
/// with the 7/16, 3/16, 5/16, 1/16 kernel. Rows are scanned left to right.
pub(crate) fn floyd_steinberg(pixels: &[Color8888], width: usize, palette: &[Color8888]) -> Vec<u8> {
    let mut indices = Vec::with_capacity(pixels.len());
    // Errors scaled by 16, with one column of slack on each side.
    let mut current = vec![[0i32; 4]; width + 2];
    let mut next = vec![[0i32; 4]; width + 2];

    for row in pixels.chunks(width) {
        for (x, &pixel) in row.iter().enumerate() {
            let error = current[x + 1];
            let channels = pixel.to_array();
            let adjusted: [u8; 4] = core::array::from_fn(|c| {
                (channels[c] as i32 + error[c] / 16).clamp(0, 255) as u8
            });
            let adjusted = Color8888::from_array(adjusted);

            let index = nearest(palette, adjusted);
            indices.push(index);

            let chosen = palette[index as usize].to_array();
            let adjusted = adjusted.to_array();
            for c in 0..4 {
                let diff = adjusted[c] as i32 - chosen[c] as i32;
                current[x + 2][c] += diff * 7;
                next[x][c] += diff * 3;
                next[x + 1][c] += diff * 5;
                next[x + 2][c] += diff;
            }
        }
        core::mem::swap(&mut current, &mut next);
        next.iter_mut().for_each(|e| *e = [0; 4]);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn nearest_prefers_exact_match() {
        let palette = [Color8888::BLACK, Color8888::gray(128), Color8888::gray(255)];
        assert_eq!(nearest(&palette, Color8888::gray(130)), 1);
        assert_eq!(nearest(&palette, Color8888::gray(250)), 2);
    }

    #[test]
    fn exact_colors_do_not_accumulate_error() {
        let palette = [Color8888::BLACK, Color8888::gray(255)];
        let pixels = [Color8888::BLACK, Color8888::gray(255), Color8888::BLACK, Color8888::gray(255)];
        assert_eq!(floyd_steinberg(&pixels, 2, &palette), vec![0, 1, 0, 1]);
    }

    #[test]
    fn mid_gray_dithers_between_extremes() {
        let palette = [Color8888::BLACK, Color8888::gray(255)];
        let pixels = vec![Color8888::gray(128); 64];
        let indices = floyd_steinberg(&pixels, 8, &palette);
        let whites = indices.iter().filter(|&&i| i == 1).count();
        assert!((24..=40).contains(&whites), "{whites} white pixels");
    }
}
