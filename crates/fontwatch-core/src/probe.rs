//! Probe Geometry
//!
//! Value types for probe elements and their measured boxes.

/// Opaque handle to an environment-owned probe element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeId(pub u32);

/// Integer pixel box of a rendered probe (offset-based bounding metrics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeBox {
    pub width: u32,
    pub height: u32,
}

impl ProbeBox {
    /// Create with dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_equality_needs_both_dimensions() {
        let baseline = ProbeBox::new(10, 20);
        assert_eq!(baseline, ProbeBox::new(10, 20));
        assert_ne!(baseline, ProbeBox::new(14, 20));
        assert_ne!(baseline, ProbeBox::new(10, 24));
    }
}
