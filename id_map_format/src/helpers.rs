use std::ffi::{CString, NulError};

use thiserror::Error;

macro_rules! i16_le {
    ($bytes:expr) => {
        i16::from_le_bytes($bytes.try_into().unwrap())
    };
}

macro_rules! u32_le {
    ($bytes:expr) => {
        u32::from_le_bytes($bytes.try_into().unwrap())
    };
}

macro_rules! u16_le {
    ($bytes:expr) => {
        u16::from_le_bytes($bytes.try_into().unwrap())
    };
}

/// Adds an extra byte to the end of the string.
///
/// This is so if a string is exactly 4 bytes long without a null terminator,
/// it will still be parsed correctly.
pub fn parse_bytes_cstr(bytes: &[u8]) -> Result<CString, NulError> {
    let mut str = Vec::new();
    for byte in bytes {
        if *byte == 0 {
            break;
        }
        str.push(*byte);
    }

    CString::new(str)
}

/// Parses a fixed-width, NUL-padded 8 byte name (textures, flats).
pub fn parse_name8(bytes: &[u8]) -> Result<String, WadError> {
    let name = parse_bytes_cstr(bytes).map_err(|_| WadError::CorruptedBytes)?;
    match name.to_str() {
        Ok(name) => Ok(name.to_string()),
        Err(_) => Err(WadError::CorruptedString),
    }
}

#[derive(Debug, Error)]
pub enum WadError {
    #[error("invalid header")]
    InvalidHeader,
    #[error("corrupted bytes")]
    CorruptedBytes,
    #[error("corrupted string")]
    CorruptedString,

    #[error("missing lump {0}")]
    MissingLump(String),
    #[error("corrupted lump {0}")]
    CorruptedLump(String),

    #[error("requested map {0} not found")]
    MapDoesNotExist(String),
    #[error("no maps found in wad")]
    NoMaps,

    #[error("could not read wad: {0}")]
    Io(#[from] std::io::Error),
}
