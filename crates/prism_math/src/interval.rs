/// Closed range `[min, max]` of ray parameters or box extents along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Inclusive at both ends.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Grow by `delta` in total, half on each end.
    pub fn expand(&self, delta: f32) -> Interval {
        let half = delta * 0.5;
        Interval::new(self.min - half, self.max + half)
    }

    /// Overlap of both ranges; `min > max` when they are disjoint.
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }

    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let range = Interval::new(1e-4, 10.0);

        assert!(range.contains(1e-4));
        assert!(range.contains(10.0));
        assert!(!range.contains(0.0));
        assert!(!range.contains(10.001));
    }

    #[test]
    fn test_expand_pads_both_ends() {
        let flat = Interval::new(3.0, 3.0).expand(0.5);

        assert_eq!(flat, Interval::new(2.75, 3.25));
        assert_eq!(flat.size(), 0.5);
    }

    #[test]
    fn test_intersect_overlap_and_disjoint() {
        let slab = Interval::new(-1.0, 4.0);
        assert_eq!(slab.intersect(&Interval::new(2.0, 9.0)), Interval::new(2.0, 4.0));

        let gap = slab.intersect(&Interval::new(5.0, 6.0));
        assert!(gap.min > gap.max);
    }

    #[test]
    fn test_empty_contains_nothing() {
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(!Interval::EMPTY.contains(f32::MAX));
    }
}
