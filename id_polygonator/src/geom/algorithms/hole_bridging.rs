use std::collections::{BTreeMap, HashSet};

use ultraviolet::Vec2;

use crate::{
    geom::{
        point_in_polygon, segments_touch, GraphVertIndex, HalfEdgeGraph, HalfEdgeLoop, Winding,
    },
    PolyError,
};

fn loop_vertices(graph: &HalfEdgeGraph, l: &HalfEdgeLoop) -> Vec<GraphVertIndex> {
    let mut seen = HashSet::new();
    l.half_edges
        .iter()
        .map(|&h| graph.half_edges[h].origin)
        .filter(|v| seen.insert(*v))
        .collect()
}

fn loop_segments<'a>(
    graph: &'a HalfEdgeGraph,
    l: &'a HalfEdgeLoop,
) -> impl Iterator<Item = (Vec2, Vec2)> + 'a {
    l.half_edges.iter().map(|&h| graph.segment(h))
}

/// Finds the smallest clockwise face of another component that strictly
/// contains a vertex of `hull`.
fn enclosing_face(
    graph: &HalfEdgeGraph,
    loops: &[HalfEdgeLoop],
    components: &[usize],
    hull: usize,
) -> Option<usize> {
    let hull_vertices = loop_vertices(graph, &loops[hull]);
    let hull_component = components[hull_vertices[0]];

    loops
        .iter()
        .enumerate()
        .filter(|(_, face)| face.winding() == Winding::Clockwise)
        .filter(|(_, face)| {
            let face_origin = graph.half_edges[face.half_edges[0]].origin;
            components[face_origin] != hull_component
        })
        .filter(|(_, face)| {
            hull_vertices
                .iter()
                .any(|&v| point_in_polygon(graph.vertices[v], loop_segments(graph, face)))
        })
        .min_by(|(_, a), (_, b)| a.area.abs().total_cmp(&b.area.abs()))
        .map(|(i, _)| i)
}

/// True if the segment between two vertices touches any edge that isn't
/// attached to either of them.
fn bridge_is_blocked(graph: &HalfEdgeGraph, p: GraphVertIndex, q: GraphVertIndex) -> bool {
    let (p_pos, q_pos) = (graph.vertices[p], graph.vertices[q]);

    graph.half_edges.iter().step_by(2).any(|half_edge| {
        if half_edge.origin == p
            || half_edge.origin == q
            || half_edge.target == p
            || half_edge.target == q
        {
            return false;
        }

        segments_touch(
            p_pos,
            q_pos,
            graph.vertices[half_edge.origin],
            graph.vertices[half_edge.target],
        )
    })
}

/// Joins every hole (a connected component sitting inside a face of another
/// component) to its surroundings with a pair of linedef-less half-edges, so
/// that each face can be described by a single closed loop.
///
/// Returns the number of bridges added. Faces must be re-traced afterwards.
pub fn bridge_holes(graph: &mut HalfEdgeGraph) -> Result<usize, PolyError> {
    let loops = graph.trace_loops()?;
    let components = graph.components();

    // Holes grouped by the face they sit in.
    let mut holes_by_face: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, hull) in loops.iter().enumerate() {
        if hull.winding() != Winding::CounterClockwise {
            continue;
        }

        if let Some(face) = enclosing_face(graph, &loops, &components, i) {
            holes_by_face.entry(face).or_default().push(i);
        }
    }

    let mut bridges = 0;

    for (face, mut holes) in holes_by_face {
        // Leftmost holes first, so later ones can also attach to them.
        let min_x = |hull: &usize| {
            loop_vertices(graph, &loops[*hull])
                .iter()
                .map(|&v| graph.vertices[v].x)
                .fold(f32::MAX, f32::min)
        };
        holes.sort_by(|a, b| min_x(a).total_cmp(&min_x(b)));

        let mut targets = loop_vertices(graph, &loops[face]);

        for hole in holes {
            let hole_vertices = loop_vertices(graph, &loops[hole]);

            let mut candidates: Vec<(f32, GraphVertIndex, GraphVertIndex)> = hole_vertices
                .iter()
                .flat_map(|&p| targets.iter().map(move |&q| (p, q)))
                .map(|(p, q)| ((graph.vertices[q] - graph.vertices[p]).mag_sq(), p, q))
                .collect();
            candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (p, q) = candidates
                .iter()
                .map(|&(_, p, q)| (p, q))
                .find(|&(p, q)| !bridge_is_blocked(graph, p, q))
                .ok_or_else(|| {
                    PolyError::Internal(format!(
                        "no unobstructed bridge for the hole at ({}, {})",
                        graph.vertices[hole_vertices[0]].x, graph.vertices[hole_vertices[0]].y,
                    ))
                })?;

            log::debug!(
                "bridging hole at ({}, {}) to ({}, {})",
                graph.vertices[p].x,
                graph.vertices[p].y,
                graph.vertices[q].x,
                graph.vertices[q].y
            );

            graph.add_edge(q, p, None);
            bridges += 1;

            targets.extend(hole_vertices);
        }
    }

    Ok(bridges)
}
