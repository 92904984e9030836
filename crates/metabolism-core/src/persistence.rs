//! Save/Load for the player roster
//!
//! Uses bincode for a compact binary file holding every tracked player's
//! `StateRecord`. Transient data (cadence counters, sync shadows, queued
//! messages) is not saved.

use std::io::{Read, Write};

use metabolism_logic::state::StateRecord;
use serde::{Deserialize, Serialize};

use crate::components::PlayerId;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the roster
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub players: Vec<SavedPlayer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub id: PlayerId,
    pub record: StateRecord,
}

/// Write records to a writer
pub fn save_roster<W: Write>(writer: W, records: &[(PlayerId, StateRecord)]) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        players: records
            .iter()
            .map(|&(id, record)| SavedPlayer { id, record })
            .collect(),
    };
    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Read records from a reader, in the order they were saved
pub fn load_roster<R: Read>(reader: R) -> Result<Vec<(PlayerId, StateRecord)>, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(save_data
        .players
        .into_iter()
        .map(|p| (p.id, p.record))
        .collect())
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(f, "Save version mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for SaveError {}
