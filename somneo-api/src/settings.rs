//! Light, audio and dusk settings merged into cached device blobs
//!
//! The device expects the whole blob back on `PUT`, so a change is applied
//! field by field onto the last fetched copy. Every optional field is
//! written only when it is `Some`, which means `Some(0)` is a real write.

use serde_json::{Map, Value};

use crate::validate::check_range;
use crate::{LightCurve, Result, SoundDevice};

/// Opaque device document: field code → scalar
pub type Blob = Map<String, Value>;

/// Lamp settings for `PUT wulgt`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightSettings {
    pub enabled: bool,
    /// Brightness, 0-25
    pub level: Option<u8>,
    /// Colour scheme. [`LightCurve::NoLight`] is not a lamp colour and is
    /// never written to the blob.
    pub curve: Option<LightCurve>,
}

impl LightSettings {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn curve(mut self, curve: LightCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn apply(&self, blob: &mut Blob) -> Result<()> {
        if let Some(level) = self.level {
            check_range("ltlvl", level, 0, 25)?;
        }

        blob.insert("onoff".into(), self.enabled.into());
        if let Some(level) = self.level {
            blob.insert("ltlvl".into(), level.into());
        }
        if let Some(curve) = self.curve.filter(|c| *c != LightCurve::NoLight) {
            blob.insert("ctype".into(), curve.code().into());
        }
        Ok(())
    }
}

/// Radio / sound playback for `PUT wuply`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSettings {
    pub enabled: bool,
    pub device: SoundDevice,
    /// Volume, 0-25
    pub volume: Option<u8>,
    /// Radio preset or wake-up track channel
    pub channel: Option<String>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            device: SoundDevice::Radio,
            volume: None,
            channel: None,
        }
    }
}

impl AudioSettings {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    pub fn device(mut self, device: SoundDevice) -> Self {
        self.device = device;
        self
    }

    pub fn volume(mut self, volume: u8) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn apply(&self, blob: &mut Blob) -> Result<()> {
        if let Some(volume) = self.volume {
            check_range("sdvol", volume, 0, 25)?;
        }

        blob.insert("onoff".into(), self.enabled.into());
        blob.insert("snddv".into(), self.device.code().into());
        if let Some(volume) = self.volume {
            blob.insert("sdvol".into(), volume.into());
        }
        if let Some(channel) = &self.channel {
            blob.insert("sndch".into(), channel.clone().into());
        }
        Ok(())
    }
}

/// Sunset simulation for `PUT wudsk`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuskSettings {
    pub enabled: bool,
    /// Minutes, 5-60
    pub duration: Option<u8>,
    /// Starting light level, 0-25
    pub level: Option<u8>,
    pub curve: Option<LightCurve>,
    pub sound_device: Option<SoundDevice>,
    pub sound_channel: Option<String>,
    /// Volume, 0-25
    pub volume: Option<u8>,
}

impl Default for DuskSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            duration: None,
            level: None,
            curve: None,
            sound_device: Some(SoundDevice::Dusk),
            sound_channel: None,
            volume: None,
        }
    }
}

impl DuskSettings {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    pub fn duration(mut self, minutes: u8) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn curve(mut self, curve: LightCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn sound(mut self, device: SoundDevice, channel: impl Into<String>) -> Self {
        self.sound_device = Some(device);
        self.sound_channel = Some(channel.into());
        self
    }

    pub fn volume(mut self, volume: u8) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn apply(&self, blob: &mut Blob) -> Result<()> {
        if let Some(duration) = self.duration {
            check_range("durat", duration, 5, 60)?;
        }
        if let Some(level) = self.level {
            check_range("curve", level, 0, 25)?;
        }
        if let Some(volume) = self.volume {
            check_range("sndlv", volume, 0, 25)?;
        }

        blob.insert("onoff".into(), self.enabled.into());
        if let Some(level) = self.level {
            blob.insert("curve".into(), level.into());
        }
        if let Some(duration) = self.duration {
            blob.insert("durat".into(), duration.into());
        }
        if let Some(curve) = self.curve {
            blob.insert("ctype".into(), curve.code().into());
        }
        if let Some(device) = self.sound_device {
            blob.insert("snddv".into(), device.code().into());
        }
        if let Some(channel) = &self.sound_channel {
            blob.insert("sndch".into(), channel.clone().into());
        }
        if let Some(volume) = self.volume {
            blob.insert("sndlv".into(), volume.into());
        }
        Ok(())
    }
}
