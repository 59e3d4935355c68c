//! Scalar text-length feature.

use crate::error::Result;
use crate::features::FeatureExtractor;
use crate::features::vector::SparseVector;

/// Emits the character count of the (already normalized) text.
///
/// Width is always 1 regardless of the `active` flag; when inactive the
/// extractor emits a constant 0.0 so the combined feature width is the same
/// at every grid point.
#[derive(Clone, Copy, Debug)]
pub struct LengthExtractor {
    active: bool,
}

impl LengthExtractor {
    /// Create a length extractor.
    pub fn new(active: bool) -> Self {
        LengthExtractor { active }
    }

    /// Whether the extractor emits real lengths.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl FeatureExtractor for LengthExtractor {
    fn fit(&mut self, _documents: &[String]) -> Result<()> {
        Ok(())
    }

    fn transform(&self, document: &str) -> Result<SparseVector> {
        if self.active {
            SparseVector::from_entries(1, vec![(0, document.chars().count() as f64)])
        } else {
            Ok(SparseVector::zeros(1))
        }
    }

    fn width(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "length"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_emits_char_count() {
        let extractor = LengthExtractor::new(true);
        let v = extractor.transform("héllo").unwrap();
        assert_eq!(v.width(), 1);
        assert_eq!(v.get(0), 5.0);
    }

    #[test]
    fn test_inactive_keeps_width_but_emits_zero() {
        let extractor = LengthExtractor::new(false);
        let v = extractor.transform("héllo").unwrap();
        assert_eq!(v.width(), 1);
        assert_eq!(v.get(0), 0.0);
    }
}
