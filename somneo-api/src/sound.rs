//! Sound sources and wake-up tracks

use std::fmt;
use std::str::FromStr;

use crate::ApiError;

/// Audio source code used by the device (`snddv`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundDevice {
    /// Built-in wake-up sounds
    WakeUp,
    /// FM radio
    Radio,
    Off,
    /// Built-in dusk sounds, only valid for the sunset simulation
    Dusk,
}

impl SoundDevice {
    pub fn code(&self) -> &'static str {
        match self {
            SoundDevice::WakeUp => "wus",
            SoundDevice::Radio => "fmr",
            SoundDevice::Off => "off",
            SoundDevice::Dusk => "dus",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "wus" => Some(SoundDevice::WakeUp),
            "fmr" => Some(SoundDevice::Radio),
            "off" => Some(SoundDevice::Off),
            "dus" => Some(SoundDevice::Dusk),
            _ => None,
        }
    }
}

impl fmt::Display for SoundDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Built-in wake-up sound tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WakeUpSound {
    #[default]
    ForestBirds,
    SummerBirds,
    BuddhaWakeup,
    MorningAlps,
    YogaHarmony,
    NepalBowls,
    SummerLake,
    OceanWaves,
}

impl WakeUpSound {
    pub const ALL: [WakeUpSound; 8] = [
        WakeUpSound::ForestBirds,
        WakeUpSound::SummerBirds,
        WakeUpSound::BuddhaWakeup,
        WakeUpSound::MorningAlps,
        WakeUpSound::YogaHarmony,
        WakeUpSound::NepalBowls,
        WakeUpSound::SummerLake,
        WakeUpSound::OceanWaves,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WakeUpSound::ForestBirds => "forest birds",
            WakeUpSound::SummerBirds => "summer birds",
            WakeUpSound::BuddhaWakeup => "buddha wakeup",
            WakeUpSound::MorningAlps => "morning alps",
            WakeUpSound::YogaHarmony => "yoga harmony",
            WakeUpSound::NepalBowls => "nepal bowls",
            WakeUpSound::SummerLake => "summer lake",
            WakeUpSound::OceanWaves => "ocean waves",
        }
    }

    /// Channel string sent as `sndch` ("1" through "8")
    pub fn channel(&self) -> &'static str {
        match self {
            WakeUpSound::ForestBirds => "1",
            WakeUpSound::SummerBirds => "2",
            WakeUpSound::BuddhaWakeup => "3",
            WakeUpSound::MorningAlps => "4",
            WakeUpSound::YogaHarmony => "5",
            WakeUpSound::NepalBowls => "6",
            WakeUpSound::SummerLake => "7",
            WakeUpSound::OceanWaves => "8",
        }
    }

    pub fn from_channel(channel: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sound| sound.channel() == channel)
    }
}

impl FromStr for WakeUpSound {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sound| sound.name() == s)
            .ok_or_else(|| ApiError::unknown("wake-up sound", s))
    }
}

/// Sound played by an alarm
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlarmSound {
    WakeUp(WakeUpSound),
    /// FM radio preset, passed to the device verbatim
    Radio(String),
    Off,
}

impl AlarmSound {
    /// Resolve the string surface used by the host platform
    ///
    /// `source` is one of `"wake-up"`, `"radio"` or `"off"`. The channel is a
    /// track name for wake-up sounds, a preset id for the radio and ignored
    /// when the sound is off.
    pub fn from_names(source: &str, channel: &str) -> Result<Self, ApiError> {
        match source {
            "wake-up" => Ok(AlarmSound::WakeUp(channel.parse()?)),
            "radio" => Ok(AlarmSound::Radio(channel.to_string())),
            "off" => Ok(AlarmSound::Off),
            _ => Err(ApiError::unknown("sound source", source)),
        }
    }

    pub fn device(&self) -> SoundDevice {
        match self {
            AlarmSound::WakeUp(_) => SoundDevice::WakeUp,
            AlarmSound::Radio(_) => SoundDevice::Radio,
            AlarmSound::Off => SoundDevice::Off,
        }
    }

    /// Channel string for `sndch`; the device expects a single space when off
    pub fn channel(&self) -> String {
        match self {
            AlarmSound::WakeUp(sound) => sound.channel().to_string(),
            AlarmSound::Radio(preset) => preset.clone(),
            AlarmSound::Off => " ".to_string(),
        }
    }
}

impl Default for AlarmSound {
    fn default() -> Self {
        AlarmSound::WakeUp(WakeUpSound::default())
    }
}
