use image::RgbImage;
use imageproc::point::Point;
use std::path::PathBuf;

/// Closed polygon approximating the outer boundary of one foreground region
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub points: Vec<Point<i32>>,
}

impl Outline {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Number of vertices in the simplified polygon
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than three vertices encloses no area
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Enclosed area via the shoelace formula
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }

        let twice: i64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum();

        (twice as f64 / 2.0).abs()
    }

    /// Arithmetic mean of the vertices
    pub fn centroid(&self) -> (f32, f32) {
        if self.points.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0f64, 0.0f64), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
        ((sx / n) as f32, (sy / n) as f32)
    }
}

/// Outlines extracted from one reference image
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLabel {
    pub source: Option<PathBuf>,
    pub outlines: Vec<Outline>,
}

/// Labelled reference outlines, indexed by position in the configured list.
///
/// Built once and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceSet {
    labels: Vec<ReferenceLabel>,
}

impl ReferenceSet {
    pub fn new(labels: Vec<ReferenceLabel>) -> Self {
        Self { labels }
    }

    /// Build directly from outlines, label order = vector order
    pub fn from_outlines(outlines: Vec<Vec<Outline>>) -> Self {
        Self {
            labels: outlines
                .into_iter()
                .map(|outlines| ReferenceLabel {
                    source: None,
                    outlines,
                })
                .collect(),
        }
    }

    pub fn labels(&self) -> &[ReferenceLabel] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn outline_count(&self) -> usize {
        self.labels.iter().map(|l| l.outlines.len()).sum()
    }

    /// True when no label produced a single outline
    pub fn is_empty(&self) -> bool {
        self.outline_count() == 0
    }

    /// Every reference outline paired with its label, labels first then
    /// extraction order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Outline)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .flat_map(|(label, l)| l.outlines.iter().map(move |o| (label, o)))
    }
}

/// One surviving candidate in a query image
#[derive(Debug, Clone)]
pub struct DetectedObject {
    /// 1-based position among the filtered outlines
    pub number: usize,
    pub outline: Outline,
    pub area: f64,
    pub centroid: (f32, f32),
    pub label: Option<usize>,
    pub category: Option<String>,
}

/// Result of classifying one query image
#[derive(Debug, Clone)]
pub struct Classification {
    pub objects: Vec<DetectedObject>,
    pub report: String,
    pub rendering: RgbImage,
}

impl Classification {
    pub fn count(&self) -> usize {
        self.objects.len()
    }
}
