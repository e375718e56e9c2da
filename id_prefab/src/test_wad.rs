//! Fixture maps, and a writer that packs them into PWAD bytes.

use id_map_format::{Linedef, Map, Sector, Sidedef, Thing, Vertex, NO_SIDEDEF};
use id_polygonator::polygonate;

use crate::PrefabMap;

fn name8(name: &str) -> [u8; 8] {
    let mut bytes = [0u8; 8];
    bytes[..name.len()].copy_from_slice(name.as_bytes());
    bytes
}

fn map_lumps(map: &Map) -> Vec<(String, Vec<u8>)> {
    let mut things = Vec::new();
    for thing in &map.things {
        things.extend_from_slice(&thing.x.to_le_bytes());
        things.extend_from_slice(&thing.y.to_le_bytes());
        things.extend_from_slice(&thing.angle.to_le_bytes());
        things.extend_from_slice(&thing.thing_type.to_le_bytes());
        things.extend_from_slice(&thing.spawn_flags.to_le_bytes());
    }

    let mut linedefs = Vec::new();
    for linedef in &map.linedefs {
        linedefs.extend_from_slice(&linedef.start_vertex_idx.to_le_bytes());
        linedefs.extend_from_slice(&linedef.end_vertex_idx.to_le_bytes());
        linedefs.extend_from_slice(&linedef.flags.to_le_bytes());
        linedefs.extend_from_slice(&linedef.line_type.to_le_bytes());
        linedefs.extend_from_slice(&linedef.sector_tag.to_le_bytes());
        linedefs.extend_from_slice(&linedef.right_sidedef_idx.unwrap_or(NO_SIDEDEF).to_le_bytes());
        linedefs.extend_from_slice(&linedef.left_sidedef_idx.unwrap_or(NO_SIDEDEF).to_le_bytes());
    }

    let mut sidedefs = Vec::new();
    for sidedef in &map.sidedefs {
        sidedefs.extend_from_slice(&sidedef.x_offset.to_le_bytes());
        sidedefs.extend_from_slice(&sidedef.y_offset.to_le_bytes());
        sidedefs.extend_from_slice(&name8(&sidedef.upper_texture));
        sidedefs.extend_from_slice(&name8(&sidedef.lower_texture));
        sidedefs.extend_from_slice(&name8(&sidedef.middle_texture));
        sidedefs.extend_from_slice(&sidedef.sector_idx.to_le_bytes());
    }

    let mut vertices = Vec::new();
    for vertex in &map.vertices {
        vertices.extend_from_slice(&vertex.x.to_le_bytes());
        vertices.extend_from_slice(&vertex.y.to_le_bytes());
    }

    let mut sectors = Vec::new();
    for sector in &map.sectors {
        sectors.extend_from_slice(&sector.floor_height.to_le_bytes());
        sectors.extend_from_slice(&sector.ceiling_height.to_le_bytes());
        sectors.extend_from_slice(&name8(&sector.floor_flat));
        sectors.extend_from_slice(&name8(&sector.ceiling_flat));
        sectors.extend_from_slice(&sector.light_level.to_le_bytes());
        sectors.extend_from_slice(&sector.special_type.to_le_bytes());
        sectors.extend_from_slice(&sector.sector_tag.to_le_bytes());
    }

    vec![
        (map.name.clone(), vec![]),
        ("THINGS".to_string(), things),
        ("LINEDEFS".to_string(), linedefs),
        ("SIDEDEFS".to_string(), sidedefs),
        ("VERTEXES".to_string(), vertices),
        ("SECTORS".to_string(), sectors),
    ]
}

/// Packs the maps, in order, into a PWAD.
pub(crate) fn pwad_bytes(maps: &[Map]) -> Vec<u8> {
    let lumps: Vec<(String, Vec<u8>)> = maps.iter().flat_map(map_lumps).collect();

    let mut data = Vec::new();
    let mut directory = Vec::new();
    for (name, bytes) in &lumps {
        let offset = (12 + data.len()) as u32;
        data.extend_from_slice(bytes);

        directory.extend_from_slice(&offset.to_le_bytes());
        directory.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        directory.extend_from_slice(&name8(name));
    }

    let mut wad = Vec::new();
    wad.extend_from_slice(b"PWAD");
    wad.extend_from_slice(&(lumps.len() as u32).to_le_bytes());
    wad.extend_from_slice(&((12 + data.len()) as u32).to_le_bytes());
    wad.extend_from_slice(&data);
    wad.extend_from_slice(&directory);
    wad
}

pub(crate) fn sector(floor_height: i16, floor_flat: &str) -> Sector {
    Sector {
        floor_height,
        ceiling_height: floor_height + 128,
        floor_flat: floor_flat.to_string(),
        ceiling_flat: "CEIL3_5".to_string(),
        light_level: 160,
        special_type: 0,
        sector_tag: 0,
    }
}

pub(crate) fn sidedef(sector_idx: u16, middle_texture: &str) -> Sidedef {
    Sidedef {
        x_offset: 0,
        y_offset: 0,
        upper_texture: "-".to_string(),
        lower_texture: "-".to_string(),
        middle_texture: middle_texture.to_string(),
        sector_idx,
    }
}

pub(crate) fn linedef(start: u16, end: u16, right: Option<u16>, left: Option<u16>) -> Linedef {
    Linedef {
        start_vertex_idx: start,
        end_vertex_idx: end,
        flags: if left.is_some() { 4 } else { 1 },
        line_type: 0,
        sector_tag: 0,
        right_sidedef_idx: right,
        left_sidedef_idx: left,
    }
}

pub(crate) fn thing(x: i16, y: i16, thing_type: u16) -> Thing {
    Thing {
        x,
        y,
        angle: 90,
        thing_type,
        spawn_flags: 7,
    }
}

/// A 256 square room, drawn clockwise so the right sidedefs face in.
pub(crate) fn square_room(name: &str, floor_height: i16) -> Map {
    Map {
        name: name.to_string(),
        things: vec![thing(128, 128, 1), thing(9000, 9000, 2011)],
        sectors: vec![sector(floor_height, "FLOOR4_8")],
        sidedefs: (0..4).map(|_| sidedef(0, "STARTAN3")).collect(),
        linedefs: vec![
            linedef(0, 1, Some(0), None),
            linedef(1, 2, Some(1), None),
            linedef(2, 3, Some(2), None),
            linedef(3, 0, Some(3), None),
        ],
        vertices: vec![
            Vertex { x: 0, y: 0 },
            Vertex { x: 0, y: 256 },
            Vertex { x: 256, y: 256 },
            Vertex { x: 256, y: 0 },
        ],
    }
}

/// The square room plus a second, lower room to the east.
///
/// Linedef 2 is two-sided: sidedef 2 (sector 0) on its right, sidedef 4
/// (sector 1) on its left.
pub(crate) fn two_rooms(name: &str) -> Map {
    let mut map = square_room(name, 64);
    map.sectors.push(sector(-24, "NUKAGE1"));
    map.sidedefs.push(sidedef(1, "-"));
    map.sidedefs.extend((0..3).map(|_| sidedef(1, "BROWN1")));
    map.vertices.extend([Vertex { x: 512, y: 256 }, Vertex { x: 512, y: 0 }]);

    map.linedefs[2] = linedef(2, 3, Some(2), Some(4));
    map.linedefs.extend([
        linedef(2, 4, Some(5), None),
        linedef(4, 5, Some(6), None),
        linedef(5, 3, Some(7), None),
    ]);

    map.things.push(thing(384, 128, 3001));
    map
}

/// The square room with a solid 64 square pillar in the middle.
pub(crate) fn room_with_pillar(name: &str) -> Map {
    let mut map = square_room(name, 32);
    map.sidedefs.extend((0..4).map(|_| sidedef(0, "SUPPORT2")));
    map.vertices.extend([
        Vertex { x: 96, y: 96 },
        Vertex { x: 160, y: 96 },
        Vertex { x: 160, y: 160 },
        Vertex { x: 96, y: 160 },
    ]);
    map.linedefs.extend([
        linedef(4, 5, Some(4), None),
        linedef(5, 6, Some(5), None),
        linedef(6, 7, Some(6), None),
        linedef(7, 4, Some(7), None),
    ]);

    map.things = vec![thing(32, 32, 1), thing(128, 128, 2014)];
    map
}

/// The square room with a sidedef leaking out through linedef 1.
pub(crate) fn leaky_room(name: &str) -> Map {
    let mut map = square_room(name, 0);
    map.sidedefs.push(sidedef(0, "STARTAN3"));
    map.linedefs[1] = linedef(1, 2, Some(1), Some(4));
    map
}

pub(crate) fn prefab(map: Map) -> PrefabMap {
    let polygons = polygonate(&map, true).unwrap();
    PrefabMap::new(map, polygons)
}
