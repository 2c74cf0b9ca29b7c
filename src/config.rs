use image::GenericImageView;

const DEFAULT_SCALE: f64 = 1.0;
const DEFAULT_DARKNESS: f64 = 0.1;

/// Preprocessing parameters for [`flatten_image`](crate::flatten_image).
///
/// # Example
///
/// ```
/// use zplgfa::Config;
///
/// let config = Config::new(812, 1218).scale(2.0).darkness(0.2).source_size(400, 300);
/// assert_eq!(config.get_max_width(), 812);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_width: u32,
    max_height: u32,
    scale: f64,
    darkness: f64,
    source_width: u32,
    source_height: u32,
}

impl Config {
    /// Initialize configuration with the canvas limits and default values.
    ///
    /// The source size is left unknown, which disables resizing until
    /// [`source_size`](Self::source_size) is set.
    pub fn new(max_width: u32, max_height: u32) -> Config {
        Config {
            max_width,
            max_height,
            scale: DEFAULT_SCALE,
            darkness: DEFAULT_DARKNESS,
            source_width: 0,
            source_height: 0,
        }
    }

    /// Same as [`new`](Self::new) with the source size taken from `image`.
    pub fn for_image<I: GenericImageView>(image: &I, max_width: u32, max_height: u32) -> Config {
        let (width, height) = image.dimensions();
        Config::new(max_width, max_height).source_size(width, height)
    }

    /// Set the resize factor applied to the source size.
    pub fn scale(self, scale: f64) -> Self {
        Config { scale, ..self }
    }

    /// Set how much colors are dimmed before thresholding, from 0 to 1.
    pub fn darkness(self, darkness: f64) -> Self {
        Config { darkness, ..self }
    }

    /// Set the size of the original image the resize rule works from.
    pub fn source_size(self, width: u32, height: u32) -> Self {
        Config {
            source_width: width,
            source_height: height,
            ..self
        }
    }

    /// Clamp values into their valid ranges.
    ///
    /// A scale below zero is raised to zero and zero means 1.0. Darkness is
    /// clamped into `[0, 1]` and zero means the default of 0.1.
    pub fn normalized(self) -> Self {
        let mut scale = self.scale.max(0.0);
        let mut darkness = self.darkness.min(1.0).max(0.0);

        if scale == 0.0 {
            scale = DEFAULT_SCALE;
        }
        if darkness == 0.0 {
            darkness = DEFAULT_DARKNESS;
        }

        Config {
            scale,
            darkness,
            ..self
        }
    }

    pub fn get_max_width(&self) -> u32 {
        self.max_width
    }

    pub fn get_max_height(&self) -> u32 {
        self.max_height
    }

    pub fn get_scale(&self) -> f64 {
        self.scale
    }

    pub fn get_darkness(&self) -> f64 {
        self.darkness
    }

    /// Source size, or `None` when either dimension is unknown.
    pub fn get_source_size(&self) -> Option<(u32, u32)> {
        if self.source_width == 0 || self.source_height == 0 {
            None
        } else {
            Some((self.source_width, self.source_height))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new(100, 200);
        assert_eq!(config.get_max_width(), 100);
        assert_eq!(config.get_max_height(), 200);
        assert_eq!(config.get_scale(), 1.0);
        assert_eq!(config.get_darkness(), 0.1);
        assert_eq!(config.get_source_size(), None);
    }

    #[test]
    fn negative_and_zero_scale_become_one() {
        assert_eq!(Config::new(1, 1).scale(-3.0).normalized().get_scale(), 1.0);
        assert_eq!(Config::new(1, 1).scale(0.0).normalized().get_scale(), 1.0);
        assert_eq!(Config::new(1, 1).scale(2.5).normalized().get_scale(), 2.5);
    }

    #[test]
    fn darkness_is_clamped() {
        assert_eq!(Config::new(1, 1).darkness(7.0).normalized().get_darkness(), 1.0);
        assert_eq!(Config::new(1, 1).darkness(-1.0).normalized().get_darkness(), 0.1);
        assert_eq!(Config::new(1, 1).darkness(0.5).normalized().get_darkness(), 0.5);
    }

    #[test]
    fn source_size_needs_both_dimensions() {
        assert_eq!(Config::new(1, 1).source_size(10, 0).get_source_size(), None);
        assert_eq!(
            Config::new(1, 1).source_size(10, 4).get_source_size(),
            Some((10, 4))
        );
    }

    #[test]
    fn for_image_reads_dimensions() {
        let image = image::RgbaImage::new(30, 20);
        let config = Config::for_image(&image, 100, 100);
        assert_eq!(config.get_source_size(), Some((30, 20)));
    }
}
