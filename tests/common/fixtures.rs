use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::point::Point;
use shapeclass::{ClassifierConfig, Outline};
use std::path::{Path, PathBuf};

/// Dark rectangle on a light background: (x, y, width, height)
pub type Shape = (u32, u32, u32, u32);

/// Rectangle footprints for the three reference images, smallest first
pub const SMALL_SHAPE: Shape = (35, 35, 10, 10);
pub const MEDIUM_SHAPE: Shape = (25, 30, 30, 20);
pub const LARGE_SHAPE: Shape = (20, 25, 60, 50);

/// White canvas with black filled rectangles
pub fn shape_image(width: u32, height: u32, shapes: &[Shape]) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for &(x0, y0, w, h) in shapes {
        for y in y0..(y0 + h).min(height) {
            for x in x0..(x0 + w).min(width) {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }
    img
}

/// Save as PNG under `dir` and return the path
pub fn save_image(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}

/// Writes three single-shape reference images and returns a config
/// pointing at them
pub fn reference_config(dir: &Path) -> ClassifierConfig {
    let references = vec![
        save_image(dir, "ref_small.png", &shape_image(80, 80, &[SMALL_SHAPE])),
        save_image(dir, "ref_medium.png", &shape_image(80, 80, &[MEDIUM_SHAPE])),
        save_image(dir, "ref_large.png", &shape_image(100, 100, &[LARGE_SHAPE])),
    ];
    ClassifierConfig::default().with_references(references)
}

/// Binary mask with the given filled rectangles set to 255
pub fn mask_with(width: u32, height: u32, shapes: &[Shape]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    for &(x0, y0, w, h) in shapes {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }
    mask
}

/// Axis-aligned rectangle outline with the given corner and size
pub fn rect_outline(x: i32, y: i32, w: i32, h: i32) -> Outline {
    Outline::new(vec![
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ])
}
