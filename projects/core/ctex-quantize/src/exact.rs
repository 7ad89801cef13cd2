//! Lossless path for images with few distinct colors.

use crate::QuantizedImage;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use ctex_common::Color8888;

/// Builds a palette from the distinct colors of `pixels` in first-occurrence order.
///
/// Returns `None` as soon as more than `max_colors` distinct colors are seen.
pub(crate) fn exact_palette(pixels: &[Color8888], max_colors: usize) -> Option<QuantizedImage> {
    let mut lookup: BTreeMap<Color8888, u8> = BTreeMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity(pixels.len());

    for &pixel in pixels {
        let index = match lookup.get(&pixel) {
            Some(&index) => index,
            None => {
                if palette.len() == max_colors {
                    return None;
                }
                let index = palette.len() as u8;
                palette.push(pixel);
                lookup.insert(pixel, index);
                index
            }
        };
        indices.push(index);
    }

    Some(QuantizedImage { palette, indices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn palette_follows_first_occurrence() {
        let a = Color8888::new(1, 0, 0, 255);
        let b = Color8888::new(0, 1, 0, 255);
        let c = Color8888::new(0, 0, 1, 255);
        let result = exact_palette(&[b, a, b, c, a], 3).unwrap();
        assert_eq!(result.palette, vec![b, a, c]);
        assert_eq!(result.indices, vec![0, 1, 0, 2, 1]);
    }

    #[test]
    fn too_many_colors_bails_out() {
        let pixels: Vec<_> = (0..5u8).map(Color8888::gray).collect();
        assert!(exact_palette(&pixels, 4).is_none());
        assert!(exact_palette(&pixels, 5).is_some());
    }

    #[test]
    fn alpha_distinguishes_colors() {
        let pixels = [Color8888::new(9, 9, 9, 0), Color8888::new(9, 9, 9, 255)];
        assert_eq!(exact_palette(&pixels, 2).unwrap().palette.len(), 2);
    }
}
