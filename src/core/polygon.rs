//! Polygon helpers over world-space vertex lists.
//!
//! Shapes are plain `&[Vec2]` slices with a consistent winding. Body shapes
//! are stored in world coordinates, so transforms mutate the vertices in place
//! instead of composing a separate transform.

use super::vec2::Vec2;

/// Signed area (shoelace). Positive for counter-clockwise winding.
pub fn polygon_area(shape: &[Vec2]) -> f64 {
    let n = shape.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        twice_area += shape[i].cross(shape[(i + 1) % n]);
    }
    twice_area / 2.0
}

/// Area-weighted centroid.
///
/// Falls back to the vertex mean for degenerate (zero-area) input so that a
/// collinear outline still has a usable reference point.
pub fn polygon_centroid(shape: &[Vec2]) -> Vec2 {
    let n = shape.len();
    if n == 0 {
        return Vec2::zero();
    }

    let area = polygon_area(shape);
    if area.abs() < 1e-12 {
        let sum = shape.iter().fold(Vec2::zero(), |acc, &v| acc + v);
        return sum / n as f64;
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = shape[i];
        let b = shape[(i + 1) % n];
        let w = a.cross(b);
        cx += (a.x + b.x) * w;
        cy += (a.y + b.y) * w;
    }
    Vec2::new(cx / (6.0 * area), cy / (6.0 * area))
}

pub fn translate_polygon(shape: &mut [Vec2], translation: Vec2) {
    for v in shape.iter_mut() {
        *v += translation;
    }
}

/// Rotate every vertex about `pivot` by `angle` radians.
pub fn rotate_polygon(shape: &mut [Vec2], angle: f64, pivot: Vec2) {
    if angle == 0.0 {
        return;
    }
    let (sin, cos) = angle.sin_cos();
    for v in shape.iter_mut() {
        let dx = v.x - pivot.x;
        let dy = v.y - pivot.y;
        v.x = pivot.x + dx * cos - dy * sin;
        v.y = pivot.y + dx * sin + dy * cos;
    }
}
