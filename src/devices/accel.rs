//! Accelerometer collaborator trait
//!
//! The register-level I2C driver is out of scope. The control core only needs
//! the scale-converted G readings: the magnitude used for RPM estimation and
//! the raw axes for telemetry.

/// Accelerometer interface
///
/// # Safety Invariants
///
/// - Readings are already scale-converted to G
/// - A read glitch returns the last good value rather than failing; the
///   control loop treats every returned value as usable
pub trait Accelerometer {
    /// Current G-force magnitude in the board frame
    fn read_g_force(&mut self) -> f32;

    /// Raw per-axis readings (x, y, z) in G
    fn read_axes(&mut self) -> (f32, f32, f32);
}

/// Mock accelerometer with scripted readings
#[cfg(any(test, feature = "mock"))]
#[derive(Debug)]
pub struct MockAccel {
    g_force: f32,
    axes: (f32, f32, f32),
}

#[cfg(any(test, feature = "mock"))]
impl MockAccel {
    /// Create a mock reading 1 G at rest on the z axis
    pub fn new() -> Self {
        Self {
            g_force: 1.0,
            axes: (0.0, 0.0, 1.0),
        }
    }

    /// Set the G-force magnitude returned by subsequent reads
    pub fn set_g_force(&mut self, g: f32) {
        self.g_force = g;
    }

    /// Set the per-axis readings returned by subsequent reads
    pub fn set_axes(&mut self, x: f32, y: f32, z: f32) {
        self.axes = (x, y, z);
    }
}

#[cfg(any(test, feature = "mock"))]
impl Default for MockAccel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "mock"))]
impl Accelerometer for MockAccel {
    fn read_g_force(&mut self) -> f32 {
        self.g_force
    }

    fn read_axes(&mut self) -> (f32, f32, f32) {
        self.axes
    }
}
