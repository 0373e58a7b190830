use crate::models::{Outline, ReferenceSet};

/// Best reference for a candidate and how far off its area was
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaMatch {
    pub label: usize,
    pub difference: f64,
}

/// Nearest-neighbour classification on enclosed area.
///
/// Searches every reference outline across all labels. The first strict
/// minimum wins, so ties go to the earlier label, then the earlier outline.
/// There is no rejection distance: any non-empty reference set yields a label.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaMatcher;

impl AreaMatcher {
    pub fn best_match(&self, outline: &Outline, references: &ReferenceSet) -> Option<AreaMatch> {
        let area = outline.area();
        let mut best: Option<AreaMatch> = None;

        for (label, reference) in references.iter() {
            let difference = (area - reference.area()).abs();
            if best.is_none_or(|b| difference < b.difference) {
                best = Some(AreaMatch { label, difference });
            }
        }

        best
    }

    /// Label index of the closest reference, `None` only for an empty set
    pub fn match_label(&self, outline: &Outline, references: &ReferenceSet) -> Option<usize> {
        self.best_match(outline, references).map(|m| m.label)
    }
}
