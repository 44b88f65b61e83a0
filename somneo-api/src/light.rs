//! Wake-up light curves

use std::fmt;
use std::str::FromStr;

use crate::ApiError;

/// Sunrise colour scheme (`ctype`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightCurve {
    #[default]
    SunnyDay,
    IslandRed,
    NordicWhite,
    CaribbeanRed,
    NoLight,
}

impl LightCurve {
    pub const ALL: [LightCurve; 5] = [
        LightCurve::SunnyDay,
        LightCurve::IslandRed,
        LightCurve::NordicWhite,
        LightCurve::CaribbeanRed,
        LightCurve::NoLight,
    ];

    /// Device code written to `ctype`
    pub fn code(&self) -> u8 {
        match self {
            LightCurve::SunnyDay => 0,
            LightCurve::IslandRed => 1,
            LightCurve::NordicWhite => 2,
            LightCurve::CaribbeanRed => 3,
            LightCurve::NoLight => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|curve| curve.code() == code)
    }

    /// Name as shown by the device's app
    pub fn name(&self) -> &'static str {
        match self {
            LightCurve::SunnyDay => "sunny day",
            LightCurve::IslandRed => "island red",
            LightCurve::NordicWhite => "nordic white",
            // Spelled this way by the device firmware
            LightCurve::CaribbeanRed => "carribean red",
            LightCurve::NoLight => "No Light",
        }
    }
}

impl fmt::Display for LightCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LightCurve {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.name() == s)
            .ok_or_else(|| ApiError::unknown("light curve", s))
    }
}
