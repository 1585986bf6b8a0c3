//! Separating Axis Theorem overlap test
//!
//! Two convex polygons are disjoint iff some edge normal of either polygon
//! separates their projections. Candidate axes are every edge normal of A
//! followed by every edge normal of B; the first separating axis ends the
//! search.
//!
//! On overlap the returned axis is the candidate with the smallest
//! penetration, normalized and pointing from A towards B, so it can be used
//! directly as the collision normal.
//!
//! Cost is O((|A| + |B|)²) per call. There is no broad phase.

use crate::core::Vec2;

/// Result of [`find_collision`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionInfo {
    pub collided: bool,
    /// Unit collision normal from A to B when `collided`; otherwise the
    /// separating axis that was found (unit length, no orientation).
    pub axis: Vec2,
    /// Penetration depth along `axis`; zero when not collided.
    pub depth: f64,
}

impl CollisionInfo {
    const SEPARATED: CollisionInfo = CollisionInfo {
        collided: false,
        axis: Vec2::ZERO,
        depth: 0.0,
    };
}

/// Test two convex polygons (consistent winding, >= 3 vertices each).
pub fn find_collision(shape_a: &[Vec2], shape_b: &[Vec2]) -> CollisionInfo {
    assert!(
        shape_a.len() >= 3 && shape_b.len() >= 3,
        "collision shapes need at least 3 vertices ({} / {})",
        shape_a.len(),
        shape_b.len()
    );

    let mut best_depth = f64::INFINITY;
    let mut best_axis = Vec2::ZERO;

    for shape in [shape_a, shape_b] {
        let n = shape.len();
        for i in 0..n {
            let edge = shape[i] - shape[(i + 1) % n];
            let axis = edge.perp().normalize();
            if axis == Vec2::ZERO {
                // Repeated vertex: no edge, no axis.
                continue;
            }

            let (min_a, max_a) = project_polygon(shape_a, axis);
            let (min_b, max_b) = project_polygon(shape_b, axis);

            if max_b < min_a || max_a < min_b {
                return CollisionInfo {
                    axis,
                    ..CollisionInfo::SEPARATED
                };
            }

            let depth = (max_a - min_b).min(max_b - min_a);
            if depth < best_depth {
                best_depth = depth;
                best_axis = axis;
            }
        }
    }

    if best_depth == f64::INFINITY {
        // Every edge was degenerate; nothing to separate on.
        best_depth = 0.0;
    }

    // Orient A -> B.
    let from_a_to_b = vertex_mean(shape_b) - vertex_mean(shape_a);
    if from_a_to_b.dot(best_axis) < 0.0 {
        best_axis = -best_axis;
    }

    CollisionInfo {
        collided: true,
        axis: best_axis,
        depth: best_depth,
    }
}

/// Overlap-only query for game code ("did the ball reach this pellet").
pub fn polygons_overlap(shape_a: &[Vec2], shape_b: &[Vec2]) -> bool {
    find_collision(shape_a, shape_b).collided
}

/// Project a polygon onto an axis and return (min, max) projections.
fn project_polygon(shape: &[Vec2], axis: Vec2) -> (f64, f64) {
    let mut min_proj = shape[0].dot(axis);
    let mut max_proj = min_proj;

    for v in shape.iter().skip(1) {
        let p = v.dot(axis);
        if p < min_proj {
            min_proj = p;
        }
        if p > max_proj {
            max_proj = p;
        }
    }

    (min_proj, max_proj)
}

fn vertex_mean(shape: &[Vec2]) -> Vec2 {
    let sum = shape.iter().fold(Vec2::zero(), |acc, &v| acc + v);
    sum / shape.len() as f64
}
