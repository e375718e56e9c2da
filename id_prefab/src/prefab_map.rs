use id_map_format::Map;
use id_polygonator::PolygonSet;

/// A map that has been opened and polygonated.
///
/// Owns the decoded entities and the polygons built from them. Nothing here
/// is modified after construction.
#[derive(Debug, Clone)]
pub struct PrefabMap {
    map: Map,
    polygons: PolygonSet,
}

/// Turns a host-side index into a slice index, `None` if out of range.
pub(crate) fn checked_index(index: i32, count: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < count)
}

impl PrefabMap {
    pub fn new(map: Map, polygons: PolygonSet) -> Self {
        Self { map, polygons }
    }

    /// Marker name of the map, e.g. `MAP01`.
    pub fn map_name(&self) -> &str {
        &self.map.name
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn polygons(&self) -> &PolygonSet {
        &self.polygons
    }

    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }

    pub fn num_sectors(&self) -> usize {
        self.map.sectors.len()
    }

    pub fn num_sidedefs(&self) -> usize {
        self.map.sidedefs.len()
    }

    pub fn num_linedefs(&self) -> usize {
        self.map.linedefs.len()
    }

    pub fn num_things(&self) -> usize {
        self.map.things.len()
    }
}
