use ultraviolet::Vec2;

use crate::PrefabMap;

/// Height reported for points outside every sector.
pub const MISSING_HEIGHT: i32 = 0;

impl PrefabMap {
    /// Floor height of the first non-void polygon containing the point.
    ///
    /// Never fails: a point in the void, or on a polygon boundary, gets
    /// [MISSING_HEIGHT]. That includes a point on a two-sided line between
    /// two sectors. A line with the same sector on both sides does not
    /// count as a boundary.
    pub fn height_at(&self, x: i32, y: i32) -> i32 {
        let point = Vec2::new(x as f32, y as f32);

        self.polygons()
            .iter()
            .filter(|polygon| !polygon.is_void())
            .find(|polygon| polygon.contains_point(point))
            .map(|polygon| self.map().sectors[polygon.sector as usize].floor_height as i32)
            .unwrap_or(MISSING_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use id_polygonator::{polygonate, Polygon, PolygonSet, VOID_SECTOR};

    use id_map_format::Vertex;

    use crate::test_wad::{
        linedef, prefab, room_with_pillar, sector, sidedef, square_room, two_rooms,
    };

    use super::*;

    #[test]
    fn one_room() {
        let map = prefab(square_room("MAP01", 64));

        assert_eq!(map.height_at(128, 128), 64);
        assert_eq!(map.height_at(1, 255), 64);
        assert_eq!(map.height_at(-5000, 5000), MISSING_HEIGHT);
        assert_eq!(map.height_at(300, 128), MISSING_HEIGHT);
    }

    #[test]
    fn each_room_has_its_own_floor() {
        let map = prefab(two_rooms("MAP01"));

        assert_eq!(map.height_at(100, 100), 64);
        assert_eq!(map.height_at(400, 100), -24);
    }

    #[test]
    fn floating_line_is_not_a_boundary() {
        let mut map = square_room("MAP01", 64);
        map.sidedefs.extend([sidedef(0, "-"), sidedef(0, "-")]);
        map.vertices.extend([Vertex { x: 64, y: 100 }, Vertex { x: 192, y: 100 }]);
        map.linedefs.push(linedef(4, 5, Some(4), Some(5)));
        let map = prefab(map);

        assert_eq!(map.num_polygons(), 1);
        assert_eq!(map.height_at(128, 128), 64);
        assert_eq!(map.height_at(128, 100), 64);
        assert_eq!(map.height_at(64, 100), 64);
    }

    #[test]
    fn shared_wall_is_a_boundary() {
        let map = prefab(two_rooms("MAP01"));

        assert_eq!(map.height_at(256, 128), MISSING_HEIGHT);
        assert_eq!(map.height_at(255, 128), 64);
        assert_eq!(map.height_at(257, 128), -24);
    }

    #[test]
    fn void_polygons_are_skipped() {
        let map = prefab(room_with_pillar("MAP01"));

        assert_eq!(map.height_at(20, 200), 32);
        assert_eq!(map.height_at(128, 128), MISSING_HEIGHT);
    }

    #[test]
    fn first_match_wins() {
        let mut map = square_room("MAP01", 64);
        map.sectors.push(sector(-8, "FLAT5"));

        let room = polygonate(&map, true).unwrap().polygons.remove(0);
        let edges = room.edges.clone();

        // Three copies of the same square: void, sector 1, then sector 0.
        let polygons = PolygonSet {
            polygons: vec![
                Polygon::new(VOID_SECTOR, edges.clone()),
                Polygon::new(1, edges.clone()),
                Polygon::new(0, edges),
            ],
        };

        let map = PrefabMap::new(map, polygons);
        assert_eq!(map.height_at(128, 128), -8);
    }
}
