mod hole_bridging;
mod point_in_polygon;
mod segments;

pub use hole_bridging::*;
pub use point_in_polygon::*;
pub use segments::*;
