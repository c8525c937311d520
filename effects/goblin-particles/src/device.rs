//! Coarse device classification by viewport width

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Viewport width below which the page treats the device as a phone
pub const DEFAULT_MOBILE_BREAKPOINT: f32 = 768.0;

/// Device class used to scale decorative effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceClass {
    /// Narrow viewport: fewer particles, no parallax or tilt
    Mobile,
    /// Wide viewport: full effects
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classify a viewport width against a breakpoint
    pub fn from_viewport_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Classify a viewport width against the default 768px breakpoint
    pub fn from_width(width: f32) -> Self {
        Self::from_viewport_width(width, DEFAULT_MOBILE_BREAKPOINT)
    }

    #[inline]
    pub fn is_mobile(self) -> bool {
        self == DeviceClass::Mobile
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Mobile => write!(f, "mobile"),
            DeviceClass::Desktop => write!(f, "desktop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint() {
        assert_eq!(DeviceClass::from_width(320.0), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_width(767.9), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_width(768.0), DeviceClass::Desktop);
        assert_eq!(DeviceClass::from_width(1024.0), DeviceClass::Desktop);
    }

    #[test]
    fn test_display() {
        assert_eq!(DeviceClass::Mobile.to_string(), "mobile");
        assert_eq!(DeviceClass::Desktop.to_string(), "desktop");
    }
}
