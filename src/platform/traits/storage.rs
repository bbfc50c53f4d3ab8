//! Persistent storage interface trait
//!
//! Byte-addressed EEPROM-style storage for the calibration record. The typed
//! load/save logic (sentinel validation, defaults fallback) lives in
//! [`crate::parameters`]; this trait only moves bytes.

use crate::platform::Result;

/// Persistent storage interface trait
///
/// # Safety Invariants
///
/// - Storage must be initialized before use
/// - Writes are durable once `write` returns Ok
pub trait StorageInterface {
    /// Read `buf.len()` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Storage(StorageError::OutOfBounds)` if the
    /// range does not fit the backing store.
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<()>;

    /// Write `buf` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Storage(StorageError::OutOfBounds)` if the
    /// range does not fit the backing store.
    fn write(&mut self, offset: usize, buf: &[u8]) -> Result<()>;
}
