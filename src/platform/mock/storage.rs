//! Mock persistent storage implementation for testing

use crate::platform::{
    error::{PlatformError, StorageError},
    traits::StorageInterface,
    Result,
};

/// Backing store size in bytes, matching a small EEPROM part
pub const MOCK_STORAGE_SIZE: usize = 64;

/// Mock byte-addressed storage over a fixed array
#[derive(Debug)]
pub struct MockStorage {
    data: [u8; MOCK_STORAGE_SIZE],
    writes: u32,
}

impl MockStorage {
    /// Create a new mock store, erased to 0xFF like a fresh EEPROM
    pub fn new() -> Self {
        Self {
            data: [0xFF; MOCK_STORAGE_SIZE],
            writes: 0,
        }
    }

    /// Number of write operations performed so far
    pub fn write_count(&self) -> u32 {
        self.writes
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageInterface for MockStorage {
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<()> {
        let end = offset
            .checked_add(buf.len())
            .ok_or(PlatformError::Storage(StorageError::OutOfBounds))?;
        if end > MOCK_STORAGE_SIZE {
            return Err(PlatformError::Storage(StorageError::OutOfBounds));
        }
        buf.copy_from_slice(&self.data[offset..end]);
        Ok(())
    }

    fn write(&mut self, offset: usize, buf: &[u8]) -> Result<()> {
        let end = offset
            .checked_add(buf.len())
            .ok_or(PlatformError::Storage(StorageError::OutOfBounds))?;
        if end > MOCK_STORAGE_SIZE {
            return Err(PlatformError::Storage(StorageError::OutOfBounds));
        }
        self.data[offset..end].copy_from_slice(buf);
        self.writes += 1;
        Ok(())
    }
}
