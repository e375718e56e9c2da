use serde::Serialize;

use crate::{prefab_map::checked_index, PrefabMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorInfo {
    pub floor_h: i32,
    pub floor_tex: String,
    pub ceil_h: i32,
    pub ceil_tex: String,
    pub special: i32,
    pub tag: i32,
    pub light: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideInfo {
    pub x_offset: i32,
    pub y_offset: i32,
    pub upper_tex: String,
    pub mid_tex: String,
    pub lower_tex: String,
}

/// A linedef as seen by the level generator.
///
/// `right` and `left` are left out entirely when the linedef has no sidedef
/// on that side, which is how one-sided walls are told apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineInfo {
    pub special: i32,
    pub tag: i32,
    pub flags: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<usize>,
}

/// `z` is not stored in the map, it is the floor height under the thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThingInfo {
    pub id: i32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub angle: i32,
    pub flags: i32,
}

impl PrefabMap {
    pub fn get_sector(&self, index: i32) -> Option<SectorInfo> {
        let sector = &self.map().sectors[checked_index(index, self.num_sectors())?];

        Some(SectorInfo {
            floor_h: sector.floor_height as i32,
            floor_tex: sector.floor_flat.clone(),
            ceil_h: sector.ceiling_height as i32,
            ceil_tex: sector.ceiling_flat.clone(),
            special: sector.special_type as i32,
            tag: sector.sector_tag as i32,
            light: sector.light_level as i32,
        })
    }

    pub fn get_side(&self, index: i32) -> Option<SideInfo> {
        let sidedef = &self.map().sidedefs[checked_index(index, self.num_sidedefs())?];

        Some(SideInfo {
            x_offset: sidedef.x_offset as i32,
            y_offset: sidedef.y_offset as i32,
            upper_tex: sidedef.upper_texture.clone(),
            mid_tex: sidedef.middle_texture.clone(),
            lower_tex: sidedef.lower_texture.clone(),
        })
    }

    pub fn get_line(&self, index: i32) -> Option<LineInfo> {
        let linedef = &self.map().linedefs[checked_index(index, self.num_linedefs())?];

        Some(LineInfo {
            special: linedef.line_type as i32,
            tag: linedef.sector_tag as i32,
            flags: linedef.flags as i32,
            right: linedef.right_sidedef_idx.map(usize::from),
            left: linedef.left_sidedef_idx.map(usize::from),
        })
    }

    pub fn get_thing(&self, index: i32) -> Option<ThingInfo> {
        let thing = &self.map().things[checked_index(index, self.num_things())?];

        let x = thing.x as i32;
        let y = thing.y as i32;

        Some(ThingInfo {
            id: thing.thing_type as i32,
            x,
            y,
            z: self.height_at(x, y),
            angle: thing.angle as i32,
            flags: thing.spawn_flags as i32,
        })
    }
}
