//! Image preprocessing.
//!
//! Before thresholding, an image is optionally resized to fit the label
//! canvas, then every pixel is composited onto a white background and dimmed
//! by the configured darkness. The result is fully opaque.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba, RgbaImage};
use log::debug;

use crate::{Config, Error};

/// Background the alpha channel is flattened against.
const BACKGROUND: Rgba<u16> = Rgba([0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF]);

/// Compute the size `image_size` should be resized to, if any.
///
/// Nothing is resized when the scale is 1.0 or the source size in `config`
/// is unknown. Otherwise the longer side is scaled and clamped to the canvas;
/// when the other side would then overflow its own limit, that side is
/// clamped instead. The remaining dimension follows the aspect ratio of the
/// actual image. When both sides truncate to zero the image is kept as is.
pub fn fit_dimensions(config: &Config, image_size: (u32, u32)) -> Result<Option<(u32, u32)>, Error> {
    let config = config.normalized();
    let scale = config.get_scale();

    let (source_width, source_height) = match config.get_source_size() {
        Some(size) if scale != 1.0 => size,
        _ => return Ok(None),
    };

    let (image_width, image_height) = image_size;
    if image_width == 0 || image_height == 0 {
        return Err(Error::InvalidInput(format!(
            "can not resize an image of {}x{}",
            image_width, image_height
        )));
    }

    let sw = f64::from(source_width);
    let sh = f64::from(source_height);
    let max_width = config.get_max_width();
    let max_height = config.get_max_height();

    let scaled_width = || (sw * scale).min(f64::from(max_width)) as u32;
    let scaled_height = || (sh * scale).min(f64::from(max_height)) as u32;

    let mut target_width = 0;
    let mut target_height = 0;
    let mut predicted_width = 0;
    let mut predicted_height = 0;

    if source_width > source_height {
        target_width = scaled_width();
        predicted_height = (sh * (f64::from(target_width) / sw)) as u32;
    } else {
        target_height = scaled_height();
        predicted_width = (sw * (f64::from(target_height) / sh)) as u32;
    }

    if predicted_height > max_height {
        target_width = 0;
        target_height = scaled_height();
    } else if predicted_width > max_width {
        target_width = scaled_width();
        target_height = 0;
    }

    let (width, height) = match (target_width, target_height) {
        (0, 0) => {
            debug!(
                "resize target for {}x{} at scale {} within {}x{} is empty, keeping {}x{}",
                source_width, source_height, scale, max_width, max_height, image_width, image_height
            );
            return Ok(None);
        }
        (0, h) => (follow_ratio(h, image_height, image_width), h),
        (w, 0) => (w, follow_ratio(w, image_width, image_height)),
        (w, h) => (w, h),
    };

    debug!(
        "fit {}x{} (source {}x{}, scale {}) into {}x{}",
        image_width, image_height, source_width, source_height, scale, width, height
    );
    Ok(Some((width, height)))
}

// Length of the free side when the fixed side goes from `from` to `to`,
// rounded the way printer-side resize tooling rounds it.
fn follow_ratio(to: u32, from: u32, other: u32) -> u32 {
    let length = (f64::from(other) * f64::from(to) / f64::from(from) + 0.7) as u32;
    length.max(1)
}

/// Resize with a Lanczos3 filter.
pub fn resize(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.dimensions() == (width, height) {
        debug!("image already {}x{}, skipping resize", width, height);
        return image.clone();
    }
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// Composite one pixel onto `background` and dim it by `darkness`.
///
/// Works on 16 bit channels and yields an opaque 8 bit pixel. The color is
/// alpha-premultiplied before blending, and the background share is OR-ed
/// with the dimmed color, which is what the printer-side tooling expects.
pub fn flatten_pixel(pixel: Rgba<u16>, background: Rgba<u16>, darkness: f64) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    let alpha = f32::from(a) / 65535.0;
    let keep = alpha * (1.0 - darkness as f32);

    let conv = |c: u16, bg: u16| -> u8 {
        let premultiplied = u32::from(c) * u32::from(a) / 0xFFFF;
        let val = 0xFFFF - (f32::from(bg) * alpha) as u32;
        let val = val | (premultiplied as f32 * keep) as u32;
        (val >> 8) as u8
    };

    Rgba([
        conv(r, background[0]),
        conv(g, background[1]),
        conv(b, background[2]),
        0xFF,
    ])
}

/// Prepare `source` for thresholding: resize per `config`, then flatten.
///
/// # Errors
///
/// [`Error::InvalidInput`] when the image has no pixels. A resize target that
/// collapses to nothing leaves the image at its own size.
pub fn flatten_image(source: &DynamicImage, config: &Config) -> Result<RgbaImage, Error> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }

    let config = config.normalized();
    let resized;
    let source = match fit_dimensions(&config, (width, height))? {
        Some((w, h)) => {
            resized = resize(source, w, h);
            &resized
        }
        None => source,
    };

    let darkness = config.get_darkness();
    let pixels = source.to_rgba16();
    let target = ImageBuffer::from_fn(pixels.width(), pixels.height(), |x, y| {
        flatten_pixel(*pixels.get_pixel(x, y), BACKGROUND, darkness)
    });
    Ok(target)
}
