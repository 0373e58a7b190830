use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::models::Outline;

pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 255]);
pub const MARKER_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// Side of one glyph cell in rendered pixels
const MARKER_SCALE: u32 = 2;
const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;

/// 3x5 digit faces, one row per byte, high bit on the left
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Draw the closed polygon of an outline
pub fn draw_outline(canvas: &mut RgbImage, outline: &Outline, color: Rgb<u8>) {
    if outline.points.len() < 2 {
        return;
    }
    let poly: Vec<Point<f32>> = outline
        .points
        .iter()
        .map(|p| Point::new(p.x as f32, p.y as f32))
        .collect();
    draw_hollow_polygon_mut(canvas, &poly, color);
}

/// Draw a number centred on `center`
pub fn draw_marker(canvas: &mut RgbImage, value: usize, center: (f32, f32), color: Rgb<u8>) {
    let text = value.to_string();
    let advance = (GLYPH_WIDTH + 1) * MARKER_SCALE;
    let width = advance * text.len() as u32 - MARKER_SCALE;
    let height = GLYPH_HEIGHT * MARKER_SCALE;

    let left = center.0.round() as i32 - (width / 2) as i32;
    let top = center.1.round() as i32 - (height / 2) as i32;

    for (i, ch) in text.chars().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            continue;
        };
        let glyph_left = left + (i as u32 * advance) as i32;
        for (row, bits) in DIGITS[digit as usize].iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let rect = Rect::at(
                    glyph_left + (col * MARKER_SCALE) as i32,
                    top + (row as u32 * MARKER_SCALE) as i32,
                )
                .of_size(MARKER_SCALE, MARKER_SCALE);
                draw_filled_rect_mut(canvas, rect, color);
            }
        }
    }
}
