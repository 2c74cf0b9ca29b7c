//! ZPL Graphic Field encoder
//!
//! This crate converts images into `^GF` (Graphic Field) commands understood by
//! Zebra label printers, in plain hexadecimal, compressed hexadecimal or binary
//! form.
//!
//! # Example
//!
//! ```rust
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use zplgfa::{flatten_image, Config, EncodingMode, GraphicField};
//!
//! let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 8, Rgba([255, 255, 255, 255])));
//! let config = Config::for_image(&image, 812, 1218);
//! let flat = flatten_image(&image, &config).unwrap();
//! let field = GraphicField::from_rgba(&flat, EncodingMode::CompressedAscii).unwrap();
//! assert_eq!(field.to_text().unwrap(), "^GFA,8,16,2,\n,:::::::");
//! ```

mod compress;
mod config;
mod error;
mod flatten;
mod graphic_field;
mod label;
mod mode;
mod raster;

pub use crate::{
    compress::{
        compress_row, decompress, expand_row, repeat_code, BLACK_ROW, MAX_REPEAT, REPEAT_ROW,
        WHITE_ROW,
    },
    config::Config,
    error::Error,
    flatten::{fit_dimensions, flatten_image, flatten_pixel, resize},
    graphic_field::GraphicField,
    label::{convert_to_zpl, wrap_label},
    mode::EncodingMode,
    raster::{bytes_per_row, hex_row, luminance, pack_image, pack_row, LUMINANCE_THRESHOLD},
};

/// Type alias for 1-bit bitmap data.
///
/// Each inner `Vec<u8>` represents a single row of pixels, with 8 pixels
/// packed into each byte, leftmost pixel in the most significant bit.
/// The outer Vec represents the rows from top to bottom.
pub type Matrix = Vec<Vec<u8>>;
