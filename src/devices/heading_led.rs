//! Heading indicator collaborator trait
//!
//! During each rotation the heading LED is lit for the arc that corresponds
//! to "forward", giving the driver a visible heading reference. Rendering
//! (pin, color, brightness) is out of scope.

/// Heading indicator interface
pub trait HeadingIndicator {
    /// Light the indicator for the heading arc
    ///
    /// `shimmer` requests a flicker pattern, used to signal config mode.
    fn indicator_on(&mut self, shimmer: bool);

    /// Extinguish the indicator
    fn indicator_off(&mut self);
}

/// Mock heading indicator recording on/off activity
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MockHeadingIndicator {
    on: bool,
    shimmer: bool,
    transitions: u32,
}

#[cfg(any(test, feature = "mock"))]
impl MockHeadingIndicator {
    /// Create a new mock indicator, off
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the indicator is currently lit
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Whether the last on-command requested shimmer
    pub fn is_shimmering(&self) -> bool {
        self.on && self.shimmer
    }

    /// Number of on/off state changes observed
    pub fn transition_count(&self) -> u32 {
        self.transitions
    }
}

#[cfg(any(test, feature = "mock"))]
impl HeadingIndicator for MockHeadingIndicator {
    fn indicator_on(&mut self, shimmer: bool) {
        if !self.on {
            self.transitions += 1;
        }
        self.on = true;
        self.shimmer = shimmer;
    }

    fn indicator_off(&mut self) {
        if self.on {
            self.transitions += 1;
        }
        self.on = false;
        self.shimmer = false;
    }
}
