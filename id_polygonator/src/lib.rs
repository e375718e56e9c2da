//! Turns the linedefs of a Doom-format map into closed polygons.
//!
//! Every bounded face of the planar graph formed by the linedefs becomes a
//! [Polygon] with a single clockwise boundary loop, tagged with the sector
//! whose sidedefs face into it (or [VOID_SECTOR]).

pub mod geom;
mod polygon;

use std::collections::{HashMap, HashSet};

use id_map_format::{Map, Vertex};
use thiserror::Error;
use ultraviolet::Vec2;

use geom::{bridge_holes, HalfEdge, HalfEdgeGraph, HalfEdgeLoop, Winding};

pub use polygon::*;

#[derive(Debug, Error)]
pub enum PolyError {
    #[error("bad linedef #{linedef}: {reason}")]
    BadLinedef { linedef: usize, reason: String },
    #[error("bad sidedef #{sidedef}: sector {sector} does not exist")]
    BadSidedef { sidedef: usize, sector: u16 },

    #[error("map is not enclosed by a border (linedef #{linedef} faces the outside)")]
    NotEnclosed { linedef: usize },
    #[error("map has no polygons")]
    NoPolygons,

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Default)]
pub struct PolygonSet {
    pub polygons: Vec<Polygon>,
}

impl PolygonSet {
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Polygon> {
        self.polygons.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }
}

fn validate_map(map: &Map) -> Result<(), PolyError> {
    for (i, linedef) in map.linedefs.iter().enumerate() {
        for vertex in [linedef.start_vertex_idx, linedef.end_vertex_idx] {
            if vertex as usize >= map.vertices.len() {
                return Err(PolyError::BadLinedef {
                    linedef: i,
                    reason: format!("vertex {} does not exist", vertex),
                });
            }
        }

        if linedef.right_sidedef_idx.is_none() && linedef.left_sidedef_idx.is_none() {
            return Err(PolyError::BadLinedef {
                linedef: i,
                reason: "no sidedefs".to_string(),
            });
        }

        for sidedef in [linedef.right_sidedef_idx, linedef.left_sidedef_idx]
            .into_iter()
            .flatten()
        {
            if sidedef as usize >= map.sidedefs.len() {
                return Err(PolyError::BadLinedef {
                    linedef: i,
                    reason: format!("sidedef {} does not exist", sidedef),
                });
            }
        }
    }

    for (i, sidedef) in map.sidedefs.iter().enumerate() {
        if sidedef.sector_idx as usize >= map.sectors.len() {
            return Err(PolyError::BadSidedef {
                sidedef: i,
                sector: sidedef.sector_idx,
            });
        }
    }

    Ok(())
}

/// The sidedef that looks at the face on the right of this half-edge.
fn facing_sidedef(map: &Map, half_edge: &HalfEdge) -> Option<u16> {
    let linedef = &map.linedefs[half_edge.linedef?];
    match half_edge.side {
        0 => linedef.right_sidedef_idx,
        _ => linedef.left_sidedef_idx,
    }
}

fn build_graph(map: &Map) -> HalfEdgeGraph {
    let mut vertices: Vec<Vec2> = Vec::new();
    let mut vert_wad_mapping: HashMap<Vertex, usize> = HashMap::new();

    let mut vertex_index = |vertex: Vertex, vertices: &mut Vec<Vec2>| {
        *vert_wad_mapping.entry(vertex).or_insert_with(|| {
            vertices.push(Vec2::new(vertex.x as f32, vertex.y as f32));
            vertices.len() - 1
        })
    };

    let mut edges = Vec::with_capacity(map.linedefs.len());
    let mut vertex_pairs: HashSet<(usize, usize)> = HashSet::new();
    for (i, linedef) in map.linedefs.iter().enumerate() {
        let start = vertex_index(map.vertices[linedef.start_vertex_idx as usize], &mut vertices);
        let end = vertex_index(map.vertices[linedef.end_vertex_idx as usize], &mut vertices);

        if start == end {
            log::warn!("skipping zero-length linedef #{}", i);
            continue;
        }

        // Overlapping linedefs would enclose a face with no area.
        if !vertex_pairs.insert((start.min(end), start.max(end))) {
            log::warn!("skipping linedef #{}, it duplicates an earlier linedef", i);
            continue;
        }

        edges.push((start, end, i));
    }

    let mut graph = HalfEdgeGraph::new(vertices);
    for (start, end, linedef) in edges {
        graph.add_edge(start, end, Some(linedef));
    }

    graph
}

fn sector_of_face(map: &Map, graph: &HalfEdgeGraph, face: &HalfEdgeLoop, index: usize) -> u16 {
    let mut sector: Option<u16> = None;

    for &h in &face.half_edges {
        let Some(sidedef) = facing_sidedef(map, &graph.half_edges[h]) else {
            continue;
        };

        let facing_sector = map.sidedefs[sidedef as usize].sector_idx;
        match sector {
            None => sector = Some(facing_sector),
            Some(sector) if sector != facing_sector => {
                log::warn!(
                    "polygon #{} is claimed by sectors {} and {}, keeping {}",
                    index,
                    sector,
                    facing_sector,
                    sector
                );
            }
            Some(_) => {}
        }
    }

    sector.unwrap_or(VOID_SECTOR)
}

/// Builds the polygons of a map.
///
/// With `require_border`, every linedef on the outer edge of the map must
/// have void on its outer side, otherwise the map is rejected.
pub fn polygonate(map: &Map, require_border: bool) -> Result<PolygonSet, PolyError> {
    validate_map(map)?;

    let mut graph = build_graph(map);
    let bridges = bridge_holes(&mut graph)?;
    let loops = graph.trace_loops()?;

    let mut polygons = Vec::new();

    for face in &loops {
        match face.winding() {
            Winding::Clockwise => {
                let sector = sector_of_face(map, &graph, face, polygons.len());

                let edges = face
                    .half_edges
                    .iter()
                    .map(|&h| {
                        let half_edge = &graph.half_edges[h];
                        Edge {
                            start: graph.vertices[half_edge.origin],
                            end: graph.vertices[half_edge.target],
                            linedef: half_edge.linedef,
                            side: half_edge.side,
                        }
                    })
                    .collect();

                polygons.push(Polygon::new(sector, edges));
            }
            // What's left after bridging is the outside of the whole map.
            Winding::CounterClockwise if require_border => {
                for &h in &face.half_edges {
                    let half_edge = &graph.half_edges[h];
                    if let (Some(linedef), Some(_)) =
                        (half_edge.linedef, facing_sidedef(map, half_edge))
                    {
                        return Err(PolyError::NotEnclosed { linedef });
                    }
                }
            }
            Winding::CounterClockwise => {}
        }
    }

    if polygons.is_empty() {
        return Err(PolyError::NoPolygons);
    }

    log::debug!(
        "{}: {} vertices, {} half-edges, {} bridges, {} polygons",
        map.name,
        graph.vertices.len(),
        graph.half_edges.len(),
        bridges,
        polygons.len()
    );

    Ok(PolygonSet { polygons })
}
