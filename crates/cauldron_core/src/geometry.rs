use bevy_math::{Rect, Vec2};

/// Axis-aligned bounds check with touching edges counting as overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

pub fn bounds_at(center: Vec2, size: Vec2) -> Rect {
    Rect::from_center_size(center, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_overlap() {
        let a = bounds_at(Vec2::ZERO, Vec2::splat(2.0));
        let b = bounds_at(Vec2::new(2.0, 0.0), Vec2::splat(2.0));
        assert!(overlaps(&a, &b));
        let c = bounds_at(Vec2::new(2.5, 0.0), Vec2::splat(2.0));
        assert!(!overlaps(&a, &c));
    }
}
