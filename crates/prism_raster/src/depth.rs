/// Per-pixel depth, smaller is closer.
#[derive(Clone, Debug)]
pub struct DepthBuffer {
    pub width: u32,
    pub height: u32,
    values: Vec<f32>,
}

impl DepthBuffer {
    /// Create a depth buffer with every entry at +infinity.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![f32::INFINITY; (width * height) as usize],
        }
    }

    /// Reset every entry to +infinity.
    pub fn clear(&mut self) {
        self.values.fill(f32::INFINITY);
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[(y * self.width + x) as usize]
    }

    /// Store `depth` if it is strictly closer than the current entry.
    ///
    /// Returns whether the write happened.
    #[inline]
    pub fn test_and_set(&mut self, x: u32, y: u32, depth: f32) -> bool {
        let slot = &mut self.values[(y * self.width + x) as usize];
        if depth < *slot {
            *slot = depth;
            true
        } else {
            false
        }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_infinity() {
        let depth = DepthBuffer::new(3, 2);
        assert!(depth.values().iter().all(|d| *d == f32::INFINITY));
    }

    #[test]
    fn test_strictly_less_wins() {
        let mut depth = DepthBuffer::new(2, 2);

        assert!(depth.test_and_set(1, 1, 0.5));
        assert!(!depth.test_and_set(1, 1, 0.5));
        assert!(!depth.test_and_set(1, 1, 0.7));
        assert!(depth.test_and_set(1, 1, 0.2));
        assert_eq!(depth.get(1, 1), 0.2);
    }

    #[test]
    fn test_clear() {
        let mut depth = DepthBuffer::new(2, 1);
        depth.test_and_set(0, 0, 1.0);
        depth.clear();
        assert_eq!(depth.get(0, 0), f32::INFINITY);
    }
}
