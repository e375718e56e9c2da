use multimap::MultiMap;
use ultraviolet::Vec2;

use crate::PolyError;

use super::Winding;

pub type GraphVertIndex = usize;
pub type HalfEdgeIndex = usize;

/// One direction of an undirected edge.
///
/// Half-edges are stored in pairs, so the twin of `i` is always `i ^ 1`.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    pub origin: GraphVertIndex,
    pub target: GraphVertIndex,

    /// `None` for edges added by the polygonator itself (hole bridges).
    pub linedef: Option<usize>,
    /// 0 when running in the linedef's direction, 1 when running against it.
    pub side: u8,
}

pub fn twin(half_edge: HalfEdgeIndex) -> HalfEdgeIndex {
    half_edge ^ 1
}

/// [HalfEdgeLoop] is a closed walk of half-edges, one face of the graph.
#[derive(Debug, Clone)]
pub struct HalfEdgeLoop {
    pub half_edges: Vec<HalfEdgeIndex>,
    pub area: f64,
}

impl HalfEdgeLoop {
    pub fn winding(&self) -> Winding {
        Winding::from_signed_area(self.area)
    }
}

#[derive(Debug, Clone)]
pub struct HalfEdgeGraph {
    pub vertices: Vec<Vec2>,
    pub half_edges: Vec<HalfEdge>,
    /// Outgoing half-edges per vertex, sorted counter-clockwise by angle.
    outgoing: MultiMap<GraphVertIndex, HalfEdgeIndex>,
}

impl HalfEdgeGraph {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self {
            vertices,
            half_edges: Vec::new(),
            outgoing: MultiMap::new(),
        }
    }

    /// Adds both half-edges of `v1 -> v2`, returning the index of the side 0 one.
    pub fn add_edge(
        &mut self,
        v1: GraphVertIndex,
        v2: GraphVertIndex,
        linedef: Option<usize>,
    ) -> HalfEdgeIndex {
        let index = self.half_edges.len();

        self.half_edges.push(HalfEdge {
            origin: v1,
            target: v2,
            linedef,
            side: 0,
        });
        self.half_edges.push(HalfEdge {
            origin: v2,
            target: v1,
            linedef,
            side: 1,
        });

        self.outgoing.insert(v1, index);
        self.outgoing.insert(v2, index + 1);

        self.sort_outgoing(v1);
        self.sort_outgoing(v2);

        index
    }

    fn sort_outgoing(&mut self, v: GraphVertIndex) {
        let vertices = &self.vertices;
        let half_edges = &self.half_edges;

        if let Some(list) = self.outgoing.get_vec_mut(&v) {
            list.sort_by(|&a, &b| {
                let angle_a = direction(vertices, &half_edges[a]);
                let angle_b = direction(vertices, &half_edges[b]);
                angle_a
                    .y
                    .atan2(angle_a.x)
                    .total_cmp(&angle_b.y.atan2(angle_b.x))
            });
        }
    }

    pub fn segment(&self, half_edge: HalfEdgeIndex) -> (Vec2, Vec2) {
        let half_edge = &self.half_edges[half_edge];
        (self.vertices[half_edge.origin], self.vertices[half_edge.target])
    }

    /// The half-edge that continues the face on the right of `half_edge`.
    ///
    /// This is the outgoing half-edge at the target vertex that follows the
    /// twin counter-clockwise, i.e. the sharpest right turn.
    pub fn next(&self, half_edge: HalfEdgeIndex) -> Option<HalfEdgeIndex> {
        let target = self.half_edges[half_edge].target;
        let list = self.outgoing.get_vec(&target)?;
        let pos = list.iter().position(|&h| h == twin(half_edge))?;

        Some(list[(pos + 1) % list.len()])
    }

    /// Walks every half-edge exactly once, returning the faces of the graph.
    ///
    /// Bounded faces come out clockwise, and the outside of each connected
    /// component comes out counter-clockwise.
    pub fn trace_loops(&self) -> Result<Vec<HalfEdgeLoop>, PolyError> {
        let mut visited = vec![false; self.half_edges.len()];
        let mut loops = Vec::new();

        for start in 0..self.half_edges.len() {
            if visited[start] {
                continue;
            }

            let mut half_edges = Vec::new();
            let mut area = 0.0;
            let mut curr = start;

            loop {
                if visited[curr] {
                    return Err(PolyError::Internal(format!(
                        "half-edge #{} reached twice while tracing",
                        curr
                    )));
                }

                visited[curr] = true;
                half_edges.push(curr);

                let (a, b) = self.segment(curr);
                area += (a.x as f64) * (b.y as f64) - (b.x as f64) * (a.y as f64);

                curr = self.next(curr).ok_or_else(|| {
                    PolyError::Internal(format!("half-edge #{} has no successor", curr))
                })?;

                if curr == start {
                    break;
                }
            }

            loops.push(HalfEdgeLoop {
                half_edges,
                area: area / 2.0,
            });
        }

        Ok(loops)
    }

    /// Labels every vertex with the id of its connected component.
    pub fn components(&self) -> Vec<usize> {
        let mut labels = vec![usize::MAX; self.vertices.len()];
        let mut next_label = 0;

        for root in 0..self.vertices.len() {
            if labels[root] != usize::MAX {
                continue;
            }

            let mut stack = vec![root];
            labels[root] = next_label;

            while let Some(v) = stack.pop() {
                for &h in self.outgoing.get_vec(&v).into_iter().flatten() {
                    let target = self.half_edges[h].target;
                    if labels[target] == usize::MAX {
                        labels[target] = next_label;
                        stack.push(target);
                    }
                }
            }

            next_label += 1;
        }

        labels
    }
}

fn direction(vertices: &[Vec2], half_edge: &HalfEdge) -> Vec2 {
    vertices[half_edge.target] - vertices[half_edge.origin]
}
