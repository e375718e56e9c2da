mod maps;

pub use maps::*;
