use tracing::warn;

use crate::error::ShapeError;
use crate::math::vec2::Vec2;
use crate::shapes::decompose::decompose;
use crate::shapes::polygon::ConvexPolygon;

/// An arbitrary simple polygon stored as its convex decomposition.
///
/// Pieces keep their offset from the shape's position so a pose change only
/// re-places them; the decomposition itself is computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcavePolygon {
    pos: Vec2,
    rot: f64,
    pieces: Vec<ConvexPolygon>,
    /// Piece position relative to `pos`, before rotation.
    offsets: Vec<Vec2>,
    complete: bool,
}

impl ConcavePolygon {
    /// Decomposes a world-space outline given in either winding. The vertex
    /// average becomes the shape's position.
    ///
    /// An outline that can't be fully triangulated (self-intersecting) still
    /// yields the pieces found so far; see [`ConcavePolygon::is_complete`].
    pub fn new(points: &[Vec2]) -> Result<Self, ShapeError> {
        let decomposition = decompose(points)?;
        if let Err(err) = decomposition.check() {
            warn!(%err, vertices = points.len(), "keeping partial decomposition");
        }

        let pos = points.iter().sum::<Vec2>() / points.len() as f64;
        let pieces = decomposition
            .pieces
            .iter()
            .map(|piece| ConvexPolygon::from_points(piece))
            .collect::<Result<Vec<_>, _>>()?;
        let offsets = pieces.iter().map(|piece| piece.pos() - pos).collect();

        Ok(Self {
            pos,
            rot: 0.0,
            pieces,
            offsets,
            complete: decomposition.is_complete(),
        })
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn rot(&self) -> f64 {
        self.rot
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.set_transform(pos, self.rot);
    }

    pub fn set_rot(&mut self, rot: f64) {
        self.set_transform(self.pos, rot);
    }

    /// Re-places every piece around the new pose.
    pub fn set_transform(&mut self, pos: Vec2, rot: f64) {
        self.pos = pos;
        self.rot = rot;
        for (piece, offset) in self.pieces.iter_mut().zip(&self.offsets) {
            piece.set_transform(pos + offset.rotate(rot), rot);
        }
    }

    /// World-space convex pieces.
    pub fn polygons(&self) -> &[ConvexPolygon] {
        &self.pieces
    }

    /// Piece offsets from `pos`, in model space.
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    /// False if triangulation stalled and some of the outline is missing.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn area(&self) -> f64 {
        self.pieces.iter().map(ConvexPolygon::area).sum()
    }
}

impl From<ConvexPolygon> for ConcavePolygon {
    fn from(polygon: ConvexPolygon) -> Self {
        Self {
            pos: polygon.pos(),
            rot: polygon.rot(),
            pieces: vec![polygon],
            offsets: vec![Vec2::ZERO],
            complete: true,
        }
    }
}
