mod bounds2d;
mod half_edge_graph;

pub use bounds2d::*;
pub use half_edge_graph::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    /// Classifies a loop by its signed (shoelace) area, with Y pointing up.
    ///
    /// Degenerate loops with zero area count as counter-clockwise.
    pub fn from_signed_area(area: f64) -> Self {
        if area < 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }
}
