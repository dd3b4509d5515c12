//! Compiled rule files (SNDR format).
//!
//! Layout: magic `SNDR`, version byte, 3 reserved bytes, CRC32 of the body
//! (little-endian u32), then the bincode-encoded rule data.

use std::fs;
use std::io;
use std::path::Path;

use super::{RuleData, RuleTable};

const MAGIC: &[u8; 4] = b"SNDR";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum RuleIoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected SNDR)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    Checksum { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

impl RuleTable {
    pub fn to_bytes(&self) -> Result<Vec<u8>, RuleIoError> {
        let body = bincode::serialize(&self.data).map_err(RuleIoError::Serialize)?;
        let crc = crc32fast::hash(&body);

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&[0u8; 3]); // reserved
        buf.extend_from_slice(&crc.to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, RuleIoError> {
        if data.len() < 5 {
            return Err(RuleIoError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(RuleIoError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(RuleIoError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(RuleIoError::InvalidHeader);
        }

        let mut crc_bytes = [0u8; 4];
        crc_bytes.copy_from_slice(&data[8..12]);
        let expected = u32::from_le_bytes(crc_bytes);
        let body = &data[HEADER_SIZE..];
        let actual = crc32fast::hash(body);
        if actual != expected {
            return Err(RuleIoError::Checksum { expected, actual });
        }

        let rule_data: RuleData = bincode::deserialize(body).map_err(RuleIoError::Deserialize)?;
        Ok(RuleTable::from_data(rule_data))
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), RuleIoError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn open(path: &Path) -> Result<Self, RuleIoError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
