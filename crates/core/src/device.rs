//! Device Class

use serde::Serialize;

/// Widest viewport, in logical pixels, still treated as mobile.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Device class derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Narrow viewports.
    Mobile,

    /// Everything wider than the breakpoint.
    Desktop,
}

/// Runtime viewport, sampled at mount and on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: u32,

    /// Breakpoint used to classify the width.
    pub breakpoint: u32,
}

impl Viewport {
    /// Viewport of the given width using the default breakpoint.
    #[must_use]
    pub const fn new(width: u32) -> Self {
        Self {
            width,
            breakpoint: MOBILE_BREAKPOINT_PX,
        }
    }

    /// Viewport with an explicit breakpoint.
    #[must_use]
    pub const fn with_breakpoint(width: u32, breakpoint: u32) -> Self {
        Self { width, breakpoint }
    }

    /// Same breakpoint, new width.
    #[must_use]
    pub const fn resized(self, width: u32) -> Self {
        Self { width, ..self }
    }

    /// Classify the width against the breakpoint.
    #[must_use]
    pub const fn device_class(&self) -> DeviceClass {
        if self.width <= self.breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_itself_is_mobile() {
        assert_eq!(Viewport::new(768).device_class(), DeviceClass::Mobile);
        assert_eq!(Viewport::new(769).device_class(), DeviceClass::Desktop);
        assert_eq!(Viewport::new(400).device_class(), DeviceClass::Mobile);
    }

    #[test]
    fn resize_keeps_custom_breakpoint() {
        let viewport = Viewport::with_breakpoint(500, 480).resized(470);

        assert_eq!(viewport.breakpoint, 480);
        assert_eq!(viewport.device_class(), DeviceClass::Mobile);
    }
}
