/// Represents the REST resources exposed by the wake-up light
///
/// Every resource lives under the product-scoped base path and is
/// addressed by a short device code (e.g. `wulgt` for the light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Lamp state (level, on/off, colour scheme)
    Light,

    /// FM radio / wake-up sound playback
    Audio,

    /// Sunset simulation settings
    Dusk,

    /// Ambient sensors (lux, temperature, humidity, noise)
    Sensor,

    /// Clock and timezone settings
    Timezone,

    /// Relax-breathe program status
    Relax,

    /// Remaining time of running relax/dusk timers
    TimerRuntime,

    /// General device settings
    Settings,

    /// Night / bedtime tracking
    Night,

    /// Product identification (model, serial, software versions)
    DeviceInfo,

    /// Firmware update status
    Firmware,

    /// Global alarm settings (snooze time) and per-slot settings lookup
    Alarms,

    /// Enabled flag per alarm slot
    AlarmEnabled,

    /// Hour, minute and repeat days per alarm slot
    AlarmSchedule,

    /// Per-slot alarm profile writes
    AlarmProfile,
}

impl Endpoint {
    /// Read-only and writable status blobs fetched on every refresh
    pub const STATUS_BLOBS: [Endpoint; 10] = [
        Endpoint::Timezone,
        Endpoint::Relax,
        Endpoint::Dusk,
        Endpoint::TimerRuntime,
        Endpoint::Settings,
        Endpoint::Light,
        Endpoint::Sensor,
        Endpoint::DeviceInfo,
        Endpoint::Audio,
        Endpoint::Night,
    ];

    /// Path relative to the product base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Light => "wulgt",
            Endpoint::Audio => "wuply",
            Endpoint::Dusk => "wudsk",
            Endpoint::Sensor => "wusrd",
            Endpoint::Timezone => "wutms",
            Endpoint::Relax => "wurlx",
            Endpoint::TimerRuntime => "wutmr",
            Endpoint::Settings => "wusts",
            Endpoint::Night => "wungt",
            Endpoint::DeviceInfo => "device",
            Endpoint::Firmware => "firmware",
            Endpoint::Alarms => "wualm",
            Endpoint::AlarmEnabled => "wualm/aenvs",
            Endpoint::AlarmSchedule => "wualm/aalms",
            Endpoint::AlarmProfile => "wualm/prfwu",
        }
    }

    /// Human readable name, used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Light => "light",
            Endpoint::Audio => "audio",
            Endpoint::Dusk => "dusk",
            Endpoint::Sensor => "sensor",
            Endpoint::Timezone => "timezone",
            Endpoint::Relax => "relax",
            Endpoint::TimerRuntime => "timer runtime",
            Endpoint::Settings => "settings",
            Endpoint::Night => "night",
            Endpoint::DeviceInfo => "device info",
            Endpoint::Firmware => "firmware",
            Endpoint::Alarms => "alarms",
            Endpoint::AlarmEnabled => "alarm enabled flags",
            Endpoint::AlarmSchedule => "alarm schedule",
            Endpoint::AlarmProfile => "alarm profile",
        }
    }

    /// Whether this library ever writes to the endpoint
    pub fn is_writable(&self) -> bool {
        matches!(
            self,
            Endpoint::Light
                | Endpoint::Audio
                | Endpoint::Dusk
                | Endpoint::Alarms
                | Endpoint::AlarmProfile
        )
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
