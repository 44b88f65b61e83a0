//! Somneo SDK - client for the Philips Somneo wake-up light
//!
//! The device exposes a local HTTPS/JSON API. [`Somneo`] wraps it with a
//! refresh-then-read model: [`Somneo::refresh`] pulls every status document
//! and the alarm table into a versioned [`DeviceSnapshot`], accessors read
//! from that snapshot, and mutations write to the device and fold the change
//! back into the snapshot.
//!
//! ```rust,no_run
//! use somneo_sdk::{AlarmId, Somneo, WeekdayPattern};
//!
//! fn main() -> Result<(), somneo_sdk::SdkError> {
//!     let mut somneo = Somneo::new("192.168.1.50")?;
//!     somneo.refresh()?;
//!
//!     for alarm in somneo.alarms().iter() {
//!         let (time, days) = alarm.settings();
//!         println!("{}: {} {} {:?}", alarm.id, alarm.enabled, time, days);
//!     }
//!
//!     somneo.set_weekday_pattern(AlarmId::new(1), WeekdayPattern::Workdays)?;
//!     somneo.enable_alarm(AlarmId::new(1), true)?;
//!     Ok(())
//! }
//! ```

mod alarms;
mod cache;
mod config;
mod device;
mod error;
pub mod logging;

#[cfg(test)]
mod testing;

pub use cache::DeviceSnapshot;
pub use config::SomneoConfig;
pub use device::Somneo;
pub use error::{Result, SdkError};

pub use somneo_api::{
    AlarmId, AlarmRecord, AlarmRegistry, AlarmSound, AudioSettings, Blob, DuskSettings, Endpoint,
    LightCurve, LightSettings, RepeatMask, SoundDevice, WakeUpSound, WeekdayPattern,
};
pub use somneo_transport::{HttpTransport, RetryPolicy, Transport, TransportConfig, TransportError};
