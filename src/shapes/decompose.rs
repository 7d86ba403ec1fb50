//! Splits arbitrary simple polygons into convex pieces.
//!
//! Two passes: ear clipping produces triangles, then adjacent triangles are
//! greedily merged while the union stays convex. All outlines are handled as
//! plain point lists so shared vertices stay bit-identical between pieces.

use crate::error::{validate_outline, ShapeError};
use crate::math::vec2::Vec2;
use crate::shapes::polygon::signed_area;

/// Signed turn angle at `b` when walking `a -> b -> c`, in `(-PI, PI]`.
///
/// Non-negative for a left turn, i.e. a convex vertex of a counter-clockwise
/// outline. A straight continuation gives zero.
pub fn angle_around(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    let ab = b - a;
    let bc = c - b;
    // + 0.0 folds a negative zero so a straight vertex never reads as -PI
    (ab.cross(bc) + 0.0).atan2(ab.dot(bc))
}

/// True if every vertex of the outline turns left (or goes straight).
pub fn is_convex(points: &[Vec2]) -> bool {
    let n = points.len();
    (0..n).all(|i| angle_around(points[i], points[(i + 1) % n], points[(i + 2) % n]) >= 0.0)
}

/// Result of ear clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation {
    pub triangles: Vec<[Vec2; 3]>,
    /// `n - 2` for an outline of `n` vertices.
    pub expected: usize,
}

impl Triangulation {
    pub fn is_complete(&self) -> bool {
        self.triangles.len() == self.expected
    }

    pub fn check(&self) -> Result<(), ShapeError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(ShapeError::IncompleteDecomposition {
                emitted: self.triangles.len(),
                expected: self.expected,
            })
        }
    }
}

/// Ear-clipping triangulation of a counter-clockwise outline.
///
/// Stops early, with fewer than `n - 2` triangles, when no vertex qualifies as
/// an ear (self-intersecting or clockwise input).
pub fn triangulate(points: &[Vec2]) -> Triangulation {
    let expected = points.len().saturating_sub(2);
    let mut remaining = points.to_vec();
    let mut triangles = Vec::with_capacity(expected);

    while triangles.len() < expected {
        let Some(i) = find_ear(&remaining) else {
            break;
        };
        let n = remaining.len();
        let mid_index = (i + 1) % n;
        triangles.push([remaining[i], remaining[mid_index], remaining[(i + 2) % n]]);
        remaining.remove(mid_index);
    }

    Triangulation {
        triangles,
        expected,
    }
}

/// Index of the first vertex of an ear `(i, i+1, i+2)`, if any.
fn find_ear(outline: &[Vec2]) -> Option<usize> {
    let n = outline.len();
    if n < 3 {
        return None;
    }
    (0..n).find(|&i| {
        let a = outline[i];
        let b = outline[(i + 1) % n];
        let c = outline[(i + 2) % n];
        let turn = angle_around(a, b, c);
        if turn < 0.0 {
            return false;
        }
        // a straight vertex can always go: its triangle has no interior
        if turn == 0.0 {
            return true;
        }
        !outline
            .iter()
            .filter(|&&p| p != a && p != b && p != c)
            .any(|&p| point_in_triangle(p, a, b, c))
    })
}

/// Closed containment in a counter-clockwise triangle. A vertex lying on the
/// diagonal `a-c` blocks the ear.
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).cross(p - a) >= 0.0 && (c - b).cross(p - b) >= 0.0 && (a - c).cross(p - c) >= 0.0
}

/// True if some edge of `a` appears reversed in `b`, which is how two
/// neighbouring pieces of one counter-clockwise outline see their common edge.
pub fn has_shared_edge(a: &[Vec2], b: &[Vec2]) -> bool {
    let (n, m) = (a.len(), b.len());
    (0..n).any(|i| {
        let (from, to) = (a[i], a[(i + 1) % n]);
        (0..m).any(|j| b[j] == to && b[(j + 1) % m] == from)
    })
}

/// Merges two pieces if their union is convex.
///
/// The combined points are sorted by angle around the midpoint of the two
/// vertex averages, coincident points are dropped, and the result is accepted
/// only if every vertex turns left.
pub fn try_merge_convex(a: &[Vec2], b: &[Vec2]) -> Option<Vec<Vec2>> {
    let avg_a = a.iter().sum::<Vec2>() / a.len() as f64;
    let avg_b = b.iter().sum::<Vec2>() / b.len() as f64;
    let center = (avg_a + avg_b) / 2.0;

    let mut merged: Vec<Vec2> = a.iter().chain(b).copied().collect();
    merged.sort_by(|p, q| {
        let (p, q) = (*p - center, *q - center);
        p.y.atan2(p.x).total_cmp(&q.y.atan2(q.x))
    });
    merged.dedup();

    if merged.len() < 3 || !is_convex(&merged) {
        return None;
    }
    Some(merged)
}

/// Greedily merges neighbouring pieces until no merge succeeds.
pub fn merge_convex(pieces: &[Vec<Vec2>]) -> Vec<Vec<Vec2>> {
    let mut used = vec![false; pieces.len()];
    let mut result = Vec::new();

    for i in 0..pieces.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let mut current = pieces[i].clone();

        loop {
            let next = ((i + 1)..pieces.len())
                .filter(|&j| !used[j] && has_shared_edge(&current, &pieces[j]))
                .find_map(|j| try_merge_convex(&current, &pieces[j]).map(|merged| (j, merged)));
            match next {
                Some((j, merged)) => {
                    used[j] = true;
                    current = merged;
                }
                None => break,
            }
        }
        result.push(current);
    }
    result
}

/// Convex pieces of a simple polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Counter-clockwise outlines, in the coordinates of the input.
    pub pieces: Vec<Vec<Vec2>>,
    pub triangles_emitted: usize,
    pub triangles_expected: usize,
}

impl Decomposition {
    pub fn is_complete(&self) -> bool {
        self.triangles_emitted == self.triangles_expected
    }

    pub fn check(&self) -> Result<(), ShapeError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(ShapeError::IncompleteDecomposition {
                emitted: self.triangles_emitted,
                expected: self.triangles_expected,
            })
        }
    }
}

/// Decomposes an outline of either winding into convex pieces.
///
/// Convex input comes back as a single piece. Fails only on invalid input; a
/// stalled triangulation is reported through [`Decomposition::is_complete`].
pub fn decompose(points: &[Vec2]) -> Result<Decomposition, ShapeError> {
    validate_outline(points)?;

    let mut outline = points.to_vec();
    if signed_area(&outline) < 0.0 {
        outline.reverse();
    }

    if is_convex(&outline) {
        let expected = outline.len() - 2;
        return Ok(Decomposition {
            pieces: vec![outline],
            triangles_emitted: expected,
            triangles_expected: expected,
        });
    }

    let triangulation = triangulate(&outline);
    let triangles: Vec<Vec<Vec2>> = triangulation.triangles.iter().map(|t| t.to_vec()).collect();
    Ok(Decomposition {
        pieces: merge_convex(&triangles),
        triangles_emitted: triangulation.triangles.len(),
        triangles_expected: triangulation.expected,
    })
}
