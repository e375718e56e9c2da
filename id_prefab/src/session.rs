use std::path::Path;

use id_map_format::{Map, Wad};
use id_polygonator::polygonate;

use crate::{
    LineInfo, LoadPhase, PolygonLoop, PrefabError, PrefabMap, SearchPaths, SectorInfo, SideInfo,
    ThingInfo,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unloaded,
    /// The WAD is read, no map is open yet.
    Loaded,
    MapOpen,
    /// The map is polygonated and can be queried.
    Polygonated,
}

#[derive(Default)]
enum Stage {
    #[default]
    Unloaded,
    Loaded {
        wad: Wad,
    },
    MapOpen {
        wad: Wad,
        map: Map,
    },
    Polygonated {
        _wad: Wad,
        prefab: PrefabMap,
    },
}

impl Stage {
    fn state(&self) -> SessionState {
        match self {
            Stage::Unloaded => SessionState::Unloaded,
            Stage::Loaded { .. } => SessionState::Loaded,
            Stage::MapOpen { .. } => SessionState::MapOpen,
            Stage::Polygonated { .. } => SessionState::Polygonated,
        }
    }
}

/// Owns the currently loaded prefab, if any.
///
/// `load` goes through Loaded and MapOpen to Polygonated, or back to
/// Unloaded on the first failure. Queries only answer when Polygonated.
pub struct PrefabSession {
    paths: SearchPaths,
    stage: Stage,
}

impl PrefabSession {
    /// Unmatched linedefs on the outside of a prefab are an error.
    pub const REQUIRE_BORDER: bool = true;

    pub fn new(paths: SearchPaths) -> Self {
        Self {
            paths,
            stage: Stage::Unloaded,
        }
    }

    pub fn paths(&self) -> &SearchPaths {
        &self.paths
    }

    pub fn state(&self) -> SessionState {
        self.stage.state()
    }

    /// Finds `name` under the search paths, then reads, opens and
    /// polygonates its first map. Replaces whatever was loaded before.
    pub fn load(&mut self, name: &str) -> Result<(), PrefabError> {
        let result = self.load_steps(name);

        if let Err(e) = &result {
            log::debug!("loading {} failed: {}", name, e);
            self.free();
        }

        result
    }

    fn load_steps(&mut self, name: &str) -> Result<(), PrefabError> {
        self.load_wad(name)?;
        self.open_first_map()?;
        self.polygonate()
    }

    /// Releases the map and the WAD. Safe to call in any state.
    pub fn free(&mut self) {
        if self.stage.state() != SessionState::Unloaded {
            log::debug!("freeing {:?} session", self.stage.state());
        }
        self.stage = Stage::Unloaded;
    }

    pub fn load_wad(&mut self, name: &str) -> Result<(), PrefabError> {
        self.free();

        let path = self
            .paths
            .resolve(name)
            .ok_or_else(|| PrefabError::NotFound(name.to_string()))?;

        self.load_wad_file(&path)
    }

    /// Reads a WAD from an explicit path, skipping the search paths.
    pub fn load_wad_file(&mut self, path: &Path) -> Result<(), PrefabError> {
        self.free();

        let wad = Wad::from_file(path).map_err(PrefabError::Load)?;
        log::debug!("read {} ({} lumps)", path.display(), wad.lump_names_in_order.len());

        self.stage = Stage::Loaded { wad };
        Ok(())
    }

    pub fn open_first_map(&mut self) -> Result<(), PrefabError> {
        match std::mem::take(&mut self.stage) {
            Stage::Loaded { wad } => {
                let map = wad.parse_first_map().map_err(PrefabError::OpenMap)?;
                log::debug!(
                    "opened {}: {} sectors, {} linedefs, {} things",
                    map.name,
                    map.sectors.len(),
                    map.linedefs.len(),
                    map.things.len()
                );

                self.stage = Stage::MapOpen { wad, map };
                Ok(())
            }
            other => Err(self.out_of_sequence(other, LoadPhase::OpenMap)),
        }
    }

    pub fn polygonate(&mut self) -> Result<(), PrefabError> {
        match std::mem::take(&mut self.stage) {
            Stage::MapOpen { wad, map } => {
                let polygons = polygonate(&map, Self::REQUIRE_BORDER)?;

                self.stage = Stage::Polygonated {
                    _wad: wad,
                    prefab: PrefabMap::new(map, polygons),
                };
                Ok(())
            }
            other => Err(self.out_of_sequence(other, LoadPhase::Polygonate)),
        }
    }

    fn out_of_sequence(&mut self, stage: Stage, phase: LoadPhase) -> PrefabError {
        let state = stage.state();
        self.stage = stage;
        PrefabError::OutOfSequence { phase, state }
    }

    /// The loaded map, only once polygonated.
    pub fn map(&self) -> Option<&PrefabMap> {
        match &self.stage {
            Stage::Polygonated { prefab, .. } => Some(prefab),
            _ => None,
        }
    }

    pub fn get_polygon(&self, index: i32) -> Option<PolygonLoop> {
        self.map()?.get_polygon(index)
    }

    pub fn get_sector(&self, index: i32) -> Option<SectorInfo> {
        self.map()?.get_sector(index)
    }

    pub fn get_side(&self, index: i32) -> Option<SideInfo> {
        self.map()?.get_side(index)
    }

    pub fn get_line(&self, index: i32) -> Option<LineInfo> {
        self.map()?.get_line(index)
    }

    pub fn get_thing(&self, index: i32) -> Option<ThingInfo> {
        self.map()?.get_thing(index)
    }
}
