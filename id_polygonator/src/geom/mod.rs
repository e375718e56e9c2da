mod algorithms;
mod structs;

pub use algorithms::*;
pub use structs::*;
