//! Overlap tests for the headless host
//!
//! Uses signed distance functions: a shape overlaps a circle when the
//! distance from the circle's centre to the shape is less than its radius.

use glam::Vec2;

use crate::sim::Shape;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box
#[inline]
pub fn sd_box(p: Vec2, center: Vec2, half_size: Vec2) -> f32 {
    let q = (p - center).abs() - half_size;
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0)
}

/// Whether two placed shapes overlap. Touching edges do not count.
pub fn shapes_overlap(a: Shape, a_pos: Vec2, b: Shape, b_pos: Vec2) -> bool {
    match (a, b) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            sd_circle(a_pos, b_pos, ra + rb) < 0.0
        }
        (Shape::Circle { radius }, Shape::Rect { size }) => {
            sd_box(a_pos, b_pos, size / 2.0) < radius
        }
        (Shape::Rect { size }, Shape::Circle { radius }) => {
            sd_box(b_pos, a_pos, size / 2.0) < radius
        }
        (Shape::Rect { size: sa }, Shape::Rect { size: sb }) => {
            let d = (a_pos - b_pos).abs();
            let reach = (sa + sb) / 2.0;
            d.x < reach.x && d.y < reach.y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sd_box_inside_and_outside() {
        let center = Vec2::new(10.0, 0.0);
        let half = Vec2::new(5.0, 2.0);
        assert_eq!(sd_box(center, center, half), -2.0);
        assert_eq!(sd_box(Vec2::new(20.0, 0.0), center, half), 5.0);
        let corner = sd_box(Vec2::new(18.0, 6.0), center, half);
        assert!((corner - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_rect_overlap() {
        let circle = Shape::Circle { radius: 24.0 };
        let ground = Shape::Rect {
            size: Vec2::new(750.0, 1.0),
        };
        let ground_pos = Vec2::new(0.0, -667.0);
        assert!(!shapes_overlap(circle, Vec2::new(0.0, -600.0), ground, ground_pos));
        assert!(shapes_overlap(circle, Vec2::new(0.0, -650.0), ground, ground_pos));
        assert!(shapes_overlap(ground, ground_pos, circle, Vec2::new(0.0, -650.0)));
    }

    #[test]
    fn test_circle_circle_overlap() {
        let c = Shape::Circle { radius: 1.0 };
        assert!(shapes_overlap(c, Vec2::ZERO, c, Vec2::new(1.5, 0.0)));
        assert!(!shapes_overlap(c, Vec2::ZERO, c, Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_rect_rect_touching_is_not_overlap() {
        let r = Shape::Rect {
            size: Vec2::new(2.0, 2.0),
        };
        assert!(!shapes_overlap(r, Vec2::ZERO, r, Vec2::new(2.0, 0.0)));
        assert!(shapes_overlap(r, Vec2::ZERO, r, Vec2::new(1.9, 1.9)));
    }
}
