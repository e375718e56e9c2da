use crate::{
    helpers::parse_name8, lump_from_namespace, LumpNamespace, Wad, WadError,
};

/// Sidedef references on a linedef use this value for "no sidedef".
pub const NO_SIDEDEF: u16 = 0xFFFF;

#[derive(Debug, Clone)]
pub struct Thing {
    pub x: i16,
    pub y: i16,
    /// In degrees. Counter-clockwise from east.
    pub angle: u16,

    pub thing_type: u16,
    pub spawn_flags: u16,
}

#[derive(Debug, Clone)]
pub struct Sector {
    pub floor_height: i16,
    pub ceiling_height: i16,

    pub floor_flat: String,
    pub ceiling_flat: String,

    pub light_level: i16,

    pub special_type: u16,
    pub sector_tag: u16,
}

#[derive(Debug, Clone)]
pub struct Sidedef {
    pub x_offset: i16,
    pub y_offset: i16,

    pub upper_texture: String,
    pub lower_texture: String,
    pub middle_texture: String,

    pub sector_idx: u16,
}

#[derive(Debug, Clone)]
pub struct Linedef {
    pub start_vertex_idx: u16,
    pub end_vertex_idx: u16,

    /// Flags are game (and engine) dependent.
    pub flags: u16,

    pub line_type: u16,
    pub sector_tag: u16,

    /// The sidedef on the right when walking from start to end vertex.
    pub right_sidedef_idx: Option<u16>,
    pub left_sidedef_idx: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
}

#[derive(Debug, Clone)]
pub struct Map {
    pub name: String,

    /// "Things" indicate monsters, items, etc.
    pub things: Vec<Thing>,

    /// Sectors are geometry-agnostic, and defined with floor/ceiling height.
    pub sectors: Vec<Sector>,
    /// Sidedefs are keyed on their sector, and provide a geometry-agnostic
    /// texture name for the floor/ceiling.
    pub sidedefs: Vec<Sidedef>,
    /// Linedefs are keyed on their sidedefs, and connect a front/back face
    /// sidedef to a start/end vertex.
    pub linedefs: Vec<Linedef>,
    /// Vertices are just points in X,Y space.
    pub vertices: Vec<Vertex>,
}

fn sidedef_ref(raw: u16) -> Option<u16> {
    match raw {
        NO_SIDEDEF => None,
        idx => Some(idx),
    }
}

/// Splits a lump into fixed-size records and parses each one.
fn parse_records<T>(
    wad: &Wad,
    namespace: &LumpNamespace,
    lump_name: &str,
    record_size: usize,
    parse: impl Fn(&[u8]) -> Result<T, WadError>,
) -> Result<Vec<T>, WadError> {
    let lump = lump_from_namespace(namespace, lump_name, wad)?;

    if lump.size % record_size != 0 {
        return Err(WadError::CorruptedLump(lump.name.clone()));
    }

    lump.bytes().chunks_exact(record_size).map(parse).collect()
}

impl Wad {
    pub fn parse_map(&self, map_name: &str) -> Result<Map, WadError> {
        let namespace = LumpNamespace::Map(map_name.to_string());
        if !self.lump_namespaces.contains_key(&namespace) {
            return Err(WadError::MapDoesNotExist(map_name.to_string()));
        }

        let things = parse_records(self, &namespace, "THINGS", 10, |bytes| {
            Ok(Thing {
                x: i16_le!(&bytes[0..2]),
                y: i16_le!(&bytes[2..4]),
                angle: u16_le!(&bytes[4..6]),
                thing_type: u16_le!(&bytes[6..8]),
                spawn_flags: u16_le!(&bytes[8..10]),
            })
        })?;

        let linedefs = parse_records(self, &namespace, "LINEDEFS", 14, |bytes| {
            Ok(Linedef {
                start_vertex_idx: u16_le!(&bytes[0..2]),
                end_vertex_idx: u16_le!(&bytes[2..4]),
                flags: u16_le!(&bytes[4..6]),
                line_type: u16_le!(&bytes[6..8]),
                sector_tag: u16_le!(&bytes[8..10]),
                right_sidedef_idx: sidedef_ref(u16_le!(&bytes[10..12])),
                left_sidedef_idx: sidedef_ref(u16_le!(&bytes[12..14])),
            })
        })?;

        let sidedefs = parse_records(self, &namespace, "SIDEDEFS", 30, |bytes| {
            Ok(Sidedef {
                x_offset: i16_le!(&bytes[0..2]),
                y_offset: i16_le!(&bytes[2..4]),
                upper_texture: parse_name8(&bytes[4..12])?,
                lower_texture: parse_name8(&bytes[12..20])?,
                middle_texture: parse_name8(&bytes[20..28])?,
                sector_idx: u16_le!(&bytes[28..30]),
            })
        })?;

        let vertices = parse_records(self, &namespace, "VERTEXES", 4, |bytes| {
            Ok(Vertex {
                x: i16_le!(&bytes[0..2]),
                y: i16_le!(&bytes[2..4]),
            })
        })?;

        let sectors = parse_records(self, &namespace, "SECTORS", 26, |bytes| {
            Ok(Sector {
                floor_height: i16_le!(&bytes[0..2]),
                ceiling_height: i16_le!(&bytes[2..4]),
                floor_flat: parse_name8(&bytes[4..12])?,
                ceiling_flat: parse_name8(&bytes[12..20])?,
                light_level: i16_le!(&bytes[20..22]),
                special_type: u16_le!(&bytes[22..24]),
                sector_tag: u16_le!(&bytes[24..26]),
            })
        })?;

        Ok(Map {
            name: map_name.to_string(),
            things,
            sectors,
            sidedefs,
            linedefs,
            vertices,
        })
    }
}
