//! Monochrome bit packing.
//!
//! Each image row becomes `ceil(width / 8)` bytes, most significant bit
//! first, where a set bit is a dark dot. Bits past the image width stay zero.
use image::{Rgba, RgbaImage};

use crate::Matrix;

/// Pixels with a 16 bit luminance below this are printed.
pub const LUMINANCE_THRESHOLD: u16 = u16::MAX / 2;

/// Number of bytes a packed row of `width` pixels occupies.
pub fn bytes_per_row(width: u32) -> usize {
    (width as usize + 7) / 8
}

/// 16 bit luminance of an 8 bit pixel, alpha premultiplied.
///
/// Uses the JFIF weights (0.299, 0.587, 0.114) in 16.16 fixed point.
pub fn luminance(pixel: Rgba<u8>) -> u16 {
    let [r, g, b, a] = pixel.0;
    let alpha = u32::from(a) * 0x101;
    let premultiply = |c: u8| u32::from(c) * 0x101 * alpha / 0xFFFF;

    let y = (19595 * premultiply(r) + 38470 * premultiply(g) + 7471 * premultiply(b) + (1 << 15))
        >> 16;
    y as u16
}

/// Pack one row of pixels into `width` bytes.
pub fn pack_row<I>(pixels: I, width: usize) -> Vec<u8>
where
    I: IntoIterator<Item = Rgba<u8>>,
{
    let mut buf = vec![0u8; width];

    for (x, pixel) in pixels.into_iter().enumerate() {
        if luminance(pixel) < LUMINANCE_THRESHOLD {
            if let Some(byte) = buf.get_mut(x / 8) {
                *byte |= 0x80 >> (x % 8);
            }
        }
    }

    buf
}

/// Pack every row of `image`.
pub fn pack_image(image: &RgbaImage) -> Matrix {
    let width = bytes_per_row(image.width());
    image
        .rows()
        .map(|row| pack_row(row.copied(), width))
        .collect()
}

/// Render a packed row as uppercase hexadecimal.
pub fn hex_row(row: &[u8]) -> String {
    hex::encode_upper(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 0xFF]);

    #[test]
    fn row_width_rounds_up_on_columns() {
        assert_eq!(bytes_per_row(0), 0);
        assert_eq!(bytes_per_row(1), 1);
        assert_eq!(bytes_per_row(8), 1);
        assert_eq!(bytes_per_row(9), 2);
        assert_eq!(bytes_per_row(16), 2);
        assert_eq!(bytes_per_row(17), 3);
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(luminance(BLACK), 0);
        assert_eq!(luminance(WHITE), u16::MAX);
        // unflattened transparency reads as black
        assert_eq!(luminance(Rgba([0xFF, 0xFF, 0xFF, 0])), 0);
    }

    #[test]
    fn mid_gray_is_the_boundary() {
        assert!(luminance(Rgba([127, 127, 127, 0xFF])) < LUMINANCE_THRESHOLD);
        assert!(luminance(Rgba([128, 128, 128, 0xFF])) >= LUMINANCE_THRESHOLD);
    }

    #[test]
    fn msb_first() {
        let mut pixels = vec![WHITE; 8];
        pixels[0] = BLACK;
        pixels[7] = BLACK;
        assert_eq!(pack_row(pixels, 1), vec![0b1000_0001]);
    }

    #[test]
    fn padding_bits_are_zero() {
        let image = RgbaImage::from_pixel(10, 3, BLACK);
        let matrix = pack_image(&image);
        assert_eq!(matrix.len(), 3);
        for row in matrix {
            assert_eq!(row, vec![0xFF, 0b1100_0000]);
        }
    }

    #[test]
    fn every_row_has_the_same_width() {
        let mut image = RgbaImage::from_pixel(21, 5, WHITE);
        image.put_pixel(20, 4, BLACK);
        let matrix = pack_image(&image);
        assert!(matrix.iter().all(|row| row.len() == 3));
        assert_eq!(matrix[4], vec![0x00, 0x00, 0x08]);
    }

    #[test]
    fn hex_is_uppercase() {
        assert_eq!(hex_row(&[0xAB, 0x0F, 0x00]), "AB0F00");
    }
}
