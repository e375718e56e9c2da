use std::collections::HashSet;

use ultraviolet::Vec2;

use crate::geom::{point_in_polygon, Bounds2d};

/// Sector value of a polygon that no sector claims.
pub const VOID_SECTOR: u16 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,

    /// The linedef this edge lies on, `None` for internal subdivision edges.
    pub linedef: Option<usize>,
    /// 0 if the edge runs from the linedef's start to its end (the right
    /// sidedef faces the polygon), 1 if it runs the other way.
    pub side: u8,
}

/// [Polygon] is one face of the polygonated map.
///
/// The boundary is a single closed loop walked clockwise. Holes are joined
/// to the outer boundary by a pair of edges without a linedef. A linedef
/// with this polygon on both sides (a dangling or floating line) is walked
/// once per side.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub sector: u16,
    pub edges: Vec<Edge>,
    bounds: Bounds2d,
    /// Linedefs walked on both sides.
    interior_linedefs: HashSet<usize>,
}

impl Polygon {
    pub fn new(sector: u16, edges: Vec<Edge>) -> Self {
        let bounds = Bounds2d::from_points(edges.iter().map(|edge| &edge.start));

        let mut sides_seen: HashSet<(usize, u8)> = HashSet::new();
        let mut interior_linedefs = HashSet::new();
        for edge in &edges {
            let Some(linedef) = edge.linedef else {
                continue;
            };
            sides_seen.insert((linedef, edge.side));
            if sides_seen.contains(&(linedef, edge.side ^ 1)) {
                interior_linedefs.insert(linedef);
            }
        }

        Self {
            sector,
            edges,
            bounds,
            interior_linedefs,
        }
    }

    pub fn is_void(&self) -> bool {
        self.sector == VOID_SECTOR
    }

    /// Points on the boundary are not contained.
    pub fn contains_point(&self, point: Vec2) -> bool {
        if !self.bounds.has_point(point) {
            return false;
        }

        // Bridges and interior linedefs are walked once in each direction
        // and cancel out.
        point_in_polygon(
            point,
            self.edges
                .iter()
                .filter(|edge| {
                    edge.linedef
                        .is_some_and(|linedef| !self.interior_linedefs.contains(&linedef))
                })
                .map(|edge| (edge.start, edge.end)),
        )
    }
}
