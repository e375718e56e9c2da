use id_map_format::Linedef;
use id_polygonator::Edge;
use serde::Serialize;

use crate::{prefab_map::checked_index, PrefabMap};

/// Sector reported for polygons that belong to no sector.
pub const VOID_SECTOR_ID: i32 = -1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopEdge {
    pub x: f32,
    pub y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<usize>,
}

/// A polygon boundary, counter-clockwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonLoop {
    pub sector: i32,
    pub edges: Vec<LoopEdge>,
}

impl PolygonLoop {
    pub fn is_void(&self) -> bool {
        self.sector < 0
    }
}

/// The sidedef on the far side of a polygon edge, looking back at it.
pub fn outer_sidedef(linedef: &Linedef, side: u8) -> Option<u16> {
    match side {
        0 => linedef.left_sidedef_idx,
        _ => linedef.right_sidedef_idx,
    }
}

impl PrefabMap {
    fn loop_edge(&self, edge: &Edge) -> LoopEdge {
        let (line, side) = match edge.linedef {
            Some(line) => {
                let side = outer_sidedef(&self.map().linedefs[line], edge.side);
                (Some(line), side.map(usize::from))
            }
            None => (None, None),
        };

        LoopEdge {
            x: edge.end.x,
            y: edge.end.y,
            line,
            side,
        }
    }

    /// Polygon boundaries are stored clockwise; the loop is handed out
    /// reversed, with each position taking the end point of its edge.
    pub fn get_polygon(&self, index: i32) -> Option<PolygonLoop> {
        let polygon = self
            .polygons()
            .get(checked_index(index, self.num_polygons())?)?;

        let sector = if polygon.is_void() {
            VOID_SECTOR_ID
        } else {
            polygon.sector as i32
        };

        Some(PolygonLoop {
            sector,
            edges: polygon
                .edges
                .iter()
                .rev()
                .map(|edge| self.loop_edge(edge))
                .collect(),
        })
    }
}
