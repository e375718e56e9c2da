extern crate lazy_static;

#[macro_use]
mod helpers;
mod lumps;

use helpers::parse_bytes_cstr;
use indexmap::IndexMap;
use lazy_static::lazy_static;

use std::{collections::HashSet, path::Path, rc::Rc};

pub use helpers::WadError;
pub use lumps::*;

const HEADER_SIZE: usize = 12;
const DIRECTORY_ENTRY_SIZE: usize = 16;

#[derive(Debug, Clone)]
pub struct Lump {
    pub name: String,
    pub offset: usize,
    pub size: usize,
    bytes: Rc<Vec<u8>>,
}

impl Lump {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[self.offset..self.offset + self.size]
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum LumpNamespace {
    Global,
    Map(String),
    Patch,
    Sprite,
    Flat,
}

pub struct Wad {
    pub is_iwad: bool,
    pub lump_names_in_order: Vec<String>,

    /// For more deterministic parsing, we parse the lumps into these namespaces.
    ///
    /// Namespaces keep the order in which they first appear in the file, so
    /// maps can be enumerated in file order.
    pub lump_namespaces: IndexMap<LumpNamespace, IndexMap<String, Lump>>,
}

pub fn lump_from_namespace<'a>(
    namespace: &LumpNamespace,
    lump_name: &str,
    wad: &'a Wad,
) -> Result<&'a Lump, WadError> {
    let lump_map = match wad.lump_namespaces.get(namespace) {
        Some(lump_map) => lump_map,
        None => {
            return Err(WadError::MissingLump(lump_name.to_string()));
        }
    };

    let lump = match lump_map.get(lump_name) {
        Some(lump) => lump,
        None => {
            return Err(WadError::MissingLump(lump_name.to_string()));
        }
    };

    Ok(lump)
}

lazy_static! {
    // These are the lumps we'll include inside the map's namespace if present.
    static ref ORDERED_MAP_LUMP_NAMES: Vec<&'static str> = vec![
        "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SECTORS",
    ];

    // Lumps a node builder may put between the required ones. We can safely
    // skip them if not present.
    static ref OPTIONAL_MAP_LUMP_NAMES: HashSet<&'static str> =
        vec!["SEGS", "SSECTORS", "NODES", "REJECT", "BLOCKMAP",]
            .into_iter()
            .collect();
}

/// References:
/// - "The Unofficial Doom Specs": `docs/dmsp1666.txt`
/// - https://zdoom.org/wiki/WAD
impl Wad {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WadError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::new(bytes)
    }

    pub fn new(bytes_raw: Vec<u8>) -> Result<Self, WadError> {
        // Parse header.

        if bytes_raw.len() < HEADER_SIZE {
            return Err(WadError::CorruptedBytes);
        }

        let bytes = Rc::new(bytes_raw);

        let header = match parse_bytes_cstr(&bytes[0..4]) {
            Ok(header) => header,
            Err(_) => return Err(WadError::CorruptedBytes),
        };

        if header.as_c_str() != c"IWAD" && header.as_c_str() != c"PWAD" {
            return Err(WadError::InvalidHeader);
        }

        let is_iwad = header.as_c_str() == c"IWAD";
        let num_lumps = u32_le!(&bytes[4..8]) as usize;
        let dir_start_offset = u32_le!(&bytes[8..12]) as usize;

        let dir_end_offset = num_lumps
            .checked_mul(DIRECTORY_ENTRY_SIZE)
            .and_then(|len| len.checked_add(dir_start_offset))
            .ok_or(WadError::CorruptedBytes)?;
        if dir_end_offset > bytes.len() {
            return Err(WadError::CorruptedBytes);
        }

        // Parse directory, get lumps & indices.

        let mut lumps = Vec::<Lump>::with_capacity(num_lumps);

        for i in 0..num_lumps {
            let dir_offset = dir_start_offset + i * DIRECTORY_ENTRY_SIZE;

            let offset = u32_le!(&bytes[dir_offset..dir_offset + 4]) as usize;
            let size = u32_le!(&bytes[dir_offset + 4..dir_offset + 8]) as usize;

            let name_cstr = match parse_bytes_cstr(&bytes[dir_offset + 8..dir_offset + 16]) {
                Ok(name) => name,
                Err(_) => return Err(WadError::CorruptedBytes),
            };

            let name = match name_cstr.to_str() {
                Ok(name) => name.to_string(),
                Err(_) => return Err(WadError::CorruptedString),
            };

            // Zero-sized markers may point anywhere, everything else must fit.
            let in_bounds = size == 0
                || offset
                    .checked_add(size)
                    .is_some_and(|end| end <= bytes.len());
            if !in_bounds {
                return Err(WadError::CorruptedLump(name));
            }

            lumps.push(Lump {
                name,
                bytes: bytes.clone(),
                offset: if size == 0 { 0 } else { offset },
                size,
            });
        }

        // Parse lumps into namespaces.

        let mut curr_namespace = LumpNamespace::Global;
        let mut map_iter_idx: i128 = 0;

        let mut lump_names_in_order = Vec::new();

        let mut lump_namespaces: IndexMap<LumpNamespace, IndexMap<String, Lump>> =
            IndexMap::new();

        for (i, lump) in lumps.iter().enumerate() {
            lump_names_in_order.push(lump.name.clone());

            // Lookahead for the next lump's name. If it's THINGS, we're likely in a map.
            if i + 1 < lumps.len() && lumps[i + 1].name == "THINGS" {
                if let LumpNamespace::Map(_) = curr_namespace {
                    // A new marker right after an unfinished map.
                    if map_iter_idx != ORDERED_MAP_LUMP_NAMES.len() as i128 {
                        return Err(WadError::CorruptedLump(
                            ORDERED_MAP_LUMP_NAMES[map_iter_idx.max(0) as usize].to_string(),
                        ));
                    }
                }

                curr_namespace = LumpNamespace::Map(lump.name.clone());
                map_iter_idx = -1;
            }

            // Entering a patch block.
            if lump.name == "P_START" || lump.name == "PP_START" {
                curr_namespace = LumpNamespace::Patch;
            }

            // Entering a sprite block.
            if lump.name == "S_START" || lump.name == "SS_START" {
                curr_namespace = LumpNamespace::Sprite;
            }

            // Entering a flat block.
            if lump.name == "F_START" || lump.name == "FF_START" {
                curr_namespace = LumpNamespace::Flat;
            }

            if let LumpNamespace::Map(_) = curr_namespace {
                if map_iter_idx == -1 {
                    map_iter_idx = 0;
                } else {
                    let map_iter_idx_usize: usize = map_iter_idx as usize;

                    // If we're in a map, we can check the idx against the "canonical"
                    // order of map lumps.
                    if map_iter_idx_usize < ORDERED_MAP_LUMP_NAMES.len()
                        && lump.name == ORDERED_MAP_LUMP_NAMES[map_iter_idx_usize]
                    {
                        map_iter_idx += 1;
                    } else if !OPTIONAL_MAP_LUMP_NAMES.contains(lump.name.as_str()) {
                        if map_iter_idx != ORDERED_MAP_LUMP_NAMES.len() as i128 {
                            return Err(WadError::CorruptedLump(
                                ORDERED_MAP_LUMP_NAMES[map_iter_idx_usize].to_string(),
                            ));
                        }

                        // If we're in a map, and the lump name doesn't match the
                        // canonical order, and it's not an optional lump, then we
                        // can assume we're not in a map anymore.
                        curr_namespace = LumpNamespace::Global;
                    }
                }
            }

            // Add to the current namespace.
            lump_namespaces
                .entry(curr_namespace.clone())
                .or_default()
                .insert(lump.name.to_uppercase(), lump.clone());

            // Leaving a patch block.
            if lump.name == "P_END" || lump.name == "PP_END" {
                curr_namespace = LumpNamespace::Global;
            }

            // Leaving a sprite block.
            if lump.name == "S_END" || lump.name == "SS_END" {
                curr_namespace = LumpNamespace::Global;
            }

            // Leaving a flat block.
            if lump.name == "F_END" || lump.name == "FF_END" {
                curr_namespace = LumpNamespace::Global;
            }
        }

        // The file ended in the middle of a map.
        if let LumpNamespace::Map(_) = curr_namespace {
            if map_iter_idx != ORDERED_MAP_LUMP_NAMES.len() as i128 {
                return Err(WadError::CorruptedLump(
                    ORDERED_MAP_LUMP_NAMES[map_iter_idx.max(0) as usize].to_string(),
                ));
            }
        }

        Ok(Self {
            is_iwad,
            lump_names_in_order,
            lump_namespaces,
        })
    }

    /// Map marker names, in the order the maps appear in the file.
    pub fn map_names(&self) -> Vec<String> {
        self.lump_namespaces
            .keys()
            .filter_map(|k| match k {
                LumpNamespace::Map(map_name) => Some(map_name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn first_map_name(&self) -> Option<String> {
        self.lump_namespaces.keys().find_map(|k| match k {
            LumpNamespace::Map(map_name) => Some(map_name.clone()),
            _ => None,
        })
    }

    /// Parses whichever map comes first in the file.
    pub fn parse_first_map(&self) -> Result<Map, WadError> {
        let map_name = self.first_map_name().ok_or(WadError::NoMaps)?;
        self.parse_map(&map_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lump(name: &str, data: &[u8]) -> (String, Vec<u8>) {
        (name.to_string(), data.to_vec())
    }

    fn build_wad(magic: &[u8; 4], lumps: &[(String, Vec<u8>)]) -> Vec<u8> {
        let mut data = Vec::new();
        let mut dir = Vec::new();
        for (name, bytes) in lumps {
            let offset = (HEADER_SIZE + data.len()) as u32;
            data.extend_from_slice(bytes);

            let mut name_bytes = [0u8; 8];
            name_bytes[..name.len()].copy_from_slice(name.as_bytes());

            dir.extend_from_slice(&offset.to_le_bytes());
            dir.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            dir.extend_from_slice(&name_bytes);
        }

        let mut out = Vec::new();
        out.extend_from_slice(magic);
        out.extend_from_slice(&(lumps.len() as u32).to_le_bytes());
        out.extend_from_slice(&((HEADER_SIZE + data.len()) as u32).to_le_bytes());
        out.extend_from_slice(&data);
        out.extend_from_slice(&dir);
        out
    }

    fn empty_map(marker: &str) -> Vec<(String, Vec<u8>)> {
        vec![
            lump(marker, &[]),
            lump("THINGS", &[]),
            lump("LINEDEFS", &[]),
            lump("SIDEDEFS", &[]),
            lump("VERTEXES", &[]),
            lump("SECTORS", &[]),
        ]
    }

    #[test]
    fn rejects_bad_magic() {
        let bytes = build_wad(b"JUNK", &[]);
        assert!(matches!(Wad::new(bytes), Err(WadError::InvalidHeader)));
    }

    #[test]
    fn rejects_truncated_files() {
        assert!(matches!(
            Wad::new(b"PWAD".to_vec()),
            Err(WadError::CorruptedBytes)
        ));

        // Directory claims more entries than the file holds.
        let mut bytes = build_wad(b"PWAD", &empty_map("MAP01"));
        bytes[4] = 200;
        assert!(matches!(Wad::new(bytes), Err(WadError::CorruptedBytes)));
    }

    #[test]
    fn empty_container_has_no_maps() {
        let wad = Wad::new(build_wad(b"PWAD", &[])).unwrap();
        assert!(wad.map_names().is_empty());
        assert!(matches!(wad.parse_first_map(), Err(WadError::NoMaps)));
    }

    #[test]
    fn maps_are_listed_in_file_order() {
        let mut lumps = empty_map("MAP07");
        lumps.extend(empty_map("E1M1"));
        lumps.extend(empty_map("MAP01"));

        let wad = Wad::new(build_wad(b"PWAD", &lumps)).unwrap();
        assert!(!wad.is_iwad);
        assert_eq!(wad.map_names(), vec!["MAP07", "E1M1", "MAP01"]);
        assert_eq!(wad.first_map_name().as_deref(), Some("MAP07"));

        let map = wad.parse_first_map().unwrap();
        assert_eq!(map.name, "MAP07");
        assert!(map.things.is_empty());
    }

    #[test]
    fn rejects_out_of_order_map_lumps() {
        let lumps = vec![
            lump("MAP01", &[]),
            lump("THINGS", &[]),
            lump("SIDEDEFS", &[]),
            lump("LINEDEFS", &[]),
            lump("VERTEXES", &[]),
            lump("SECTORS", &[]),
        ];

        match Wad::new(build_wad(b"PWAD", &lumps)) {
            Err(WadError::CorruptedLump(name)) => assert_eq!(name, "LINEDEFS"),
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[test]
    fn skips_node_builder_lumps() {
        let lumps = vec![
            lump("MAP01", &[]),
            lump("THINGS", &[]),
            lump("LINEDEFS", &[]),
            lump("SIDEDEFS", &[]),
            lump("VERTEXES", &[]),
            lump("SEGS", &[1, 2, 3]),
            lump("SECTORS", &[]),
            lump("REJECT", &[]),
            lump("ENDOOM", &[]),
        ];

        let wad = Wad::new(build_wad(b"PWAD", &lumps)).unwrap();
        assert_eq!(wad.map_names(), vec!["MAP01"]);
        assert!(lump_from_namespace(&LumpNamespace::Global, "ENDOOM", &wad).is_ok());
    }

    #[test]
    fn rejects_lumps_past_end_of_file() {
        let mut bytes = build_wad(b"PWAD", &[lump("DATA", &[1, 2, 3, 4])]);
        // Point the lump's offset far past the end.
        let dir_offset = u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize;
        bytes[dir_offset..dir_offset + 4].copy_from_slice(&9000u32.to_le_bytes());

        assert!(matches!(Wad::new(bytes), Err(WadError::CorruptedLump(_))));
    }
}
