use std::fmt;

use id_map_format::WadError;
use id_polygonator::PolyError;
use thiserror::Error;

use crate::SessionState;

/// The step of a load that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Load,
    OpenMap,
    Polygonate,
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPhase::Load => write!(f, "load"),
            LoadPhase::OpenMap => write!(f, "open map"),
            LoadPhase::Polygonate => write!(f, "polygonate"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PrefabError {
    #[error("load: no such file: {0}")]
    NotFound(String),
    #[error("load: {0}")]
    Load(#[source] WadError),
    #[error("open map: {0}")]
    OpenMap(#[source] WadError),
    #[error("polygonate: {0}")]
    Polygonate(#[from] PolyError),

    #[error("{phase}: session is {state:?}")]
    OutOfSequence {
        phase: LoadPhase,
        state: SessionState,
    },
}

impl PrefabError {
    pub fn phase(&self) -> LoadPhase {
        match self {
            PrefabError::NotFound(_) | PrefabError::Load(_) => LoadPhase::Load,
            PrefabError::OpenMap(_) => LoadPhase::OpenMap,
            PrefabError::Polygonate(_) => LoadPhase::Polygonate,
            PrefabError::OutOfSequence { phase, .. } => *phase,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PrefabError::NotFound(_))
    }
}
