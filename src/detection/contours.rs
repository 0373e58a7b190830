use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

use crate::models::Outline;

/// Extracts the outer boundary of every top-level foreground region
#[derive(Debug, Clone, Copy, Default)]
pub struct ContourExtractor;

impl ContourExtractor {
    /// Any non-zero pixel counts as foreground. Holes, and regions nested
    /// inside holes, are not reported. Outlines with fewer than three
    /// vertices after compression are dropped.
    pub fn extract(&self, mask: &GrayImage) -> Vec<Outline> {
        find_contours::<i32>(mask)
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| Outline::new(compress_chain(&c.points)))
            .filter(|outline| !outline.is_degenerate())
            .collect()
    }
}

/// Collapse straight runs of a closed chain down to their end points.
///
/// Consecutive chain points are 8-neighbours, so a vertex is redundant when
/// the step into it equals the step out of it.
pub fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let mut chain: Vec<Point<i32>> = Vec::with_capacity(points.len());
    for &p in points {
        if chain.last() != Some(&p) {
            chain.push(p);
        }
    }
    while chain.len() > 1 && chain.first() == chain.last() {
        chain.pop();
    }

    let n = chain.len();
    if n < 3 {
        return chain;
    }

    (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let cur = chain[i];
            let next = chain[(i + 1) % n];
            (cur.x - prev.x, cur.y - prev.y) != (next.x - cur.x, next.y - cur.y)
        })
        .map(|i| chain[i])
        .collect()
}
