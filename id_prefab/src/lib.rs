//! Exposes a polygonated prefab map to a level generator.
//!
//! A [PrefabSession] finds a WAD by name, opens its first map and turns it
//! into polygons. Once loaded, the [PrefabMap] answers index-based queries
//! for polygons, sectors, sidedefs, linedefs and things. Out of range
//! indices give `None`, so callers can iterate from 0 until exhausted.

mod accessors;
mod config;
mod error;
mod point_location;
mod polygon_loop;
mod prefab_map;
mod session;

#[cfg(test)]
pub(crate) mod test_wad;

pub use accessors::*;
pub use config::*;
pub use error::*;
pub use point_location::*;
pub use polygon_loop::*;
pub use prefab_map::*;
pub use session::*;
