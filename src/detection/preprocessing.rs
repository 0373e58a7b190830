use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use imageproc::distance_transform::Norm;
use imageproc::filter::separable_filter_equal;
use imageproc::morphology;

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Sigma used when none is given: `0.3 * ((k - 1) / 2 - 1) + 0.8`
pub fn default_sigma(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalised 1-D Gaussian of `kernel_size` taps. A non-positive sigma is
/// derived from the kernel size.
pub fn gaussian_kernel(kernel_size: u32, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 { sigma } else { default_sigma(kernel_size) };
    let center = (kernel_size as f32 - 1.0) / 2.0;
    let scale = -0.5 / (sigma * sigma);

    let weights: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let d = i as f32 - center;
            (scale * d * d).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// How pixels beyond the image edge are synthesised before filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// `aaa|abcd|ddd`
    Replicate,
    /// `dcb|abcd|cba`, the edge pixel itself is not repeated
    Reflect101,
}

impl Border {
    /// Map a possibly out-of-range coordinate into `0..len`
    fn index(self, i: i64, len: i64) -> i64 {
        if len == 1 {
            return 0;
        }
        match self {
            Border::Replicate => i.clamp(0, len - 1),
            Border::Reflect101 => {
                let period = 2 * (len - 1);
                let m = i.rem_euclid(period);
                if m < len { m } else { period - m }
            }
        }
    }
}

/// Separable Gaussian filter computed in f32 and rounded once at the end.
///
/// The image is padded by the kernel radius using `border`, filtered, then
/// cropped back to its original size.
pub fn gaussian_filter(img: &GrayImage, kernel_size: u32, border: Border) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    let kernel = gaussian_kernel(kernel_size, 0.0);
    let radius = kernel_size / 2;
    let padded: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_fn(width + 2 * radius, height + 2 * radius, |x, y| {
            let sx = border.index(x as i64 - radius as i64, width as i64);
            let sy = border.index(y as i64 - radius as i64, height as i64);
            Luma([img.get_pixel(sx as u32, sy as u32)[0] as f32])
        });

    let filtered = separable_filter_equal(&padded, kernel.as_slice());

    GrayImage::from_fn(width, height, |x, y| {
        let v = filtered.get_pixel(x + radius, y + radius)[0];
        Luma([v.round().clamp(0.0, 255.0) as u8])
    })
}

/// Gaussian blur with a fixed square kernel, mirrored edges
pub fn apply_blur(img: &GrayImage, kernel_size: u32) -> GrayImage {
    gaussian_filter(img, kernel_size, Border::Reflect101)
}

/// Inverted adaptive threshold against a Gaussian-weighted local mean.
///
/// A pixel becomes foreground when it is at least `bias` darker than the
/// mean of its `block_size` neighbourhood. The mean replicates edge pixels.
pub fn adaptive_threshold_inv(img: &GrayImage, block_size: u32, bias: i32) -> GrayImage {
    let mean = gaussian_filter(img, block_size, Border::Replicate);
    let mut out = GrayImage::new(img.width(), img.height());

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let src = img.get_pixel(x, y)[0] as i32;
        let local = mean.get_pixel(x, y)[0] as i32;
        *pixel = if src - local > -bias {
            Luma([BACKGROUND])
        } else {
            Luma([FOREGROUND])
        };
    }

    out
}

/// Morphological closing with a `kernel_size` x `kernel_size` all-ones element
pub fn close_mask(mask: &GrayImage, kernel_size: u32) -> GrayImage {
    // Chessboard distance k covers a (2k + 1) square
    let radius = (kernel_size / 2).min(u8::MAX as u32) as u8;
    morphology::close(mask, Norm::LInf, radius)
}
