//! Typed model of the Somneo wake-up light REST API
//!
//! This crate knows what the device's JSON documents mean but never talks to
//! the network. It covers:
//!
//! - [`Endpoint`]: the resource paths under the product base URL
//! - the alarm model: [`AlarmRecord`], [`AlarmRegistry`], the
//!   [`RepeatMask`] day bitfield and the [`next_alarm`] scheduler
//! - payload builders such as [`AlarmUpdate`] for `PUT wualm/prfwu`
//! - closed enumerations for light curves and sounds, with the device codes
//!   they encode to
//! - [`LightSettings`], [`AudioSettings`] and [`DuskSettings`], which merge a
//!   change into a cached [`Blob`]
//!
//! ```rust
//! use chrono::NaiveDate;
//! use somneo_api::{AlarmEnabledResponse, AlarmRegistry, AlarmScheduleResponse};
//!
//! let enabled = AlarmEnabledResponse { prfen: vec![true, false] };
//! let schedule = AlarmScheduleResponse {
//!     almhr: vec![7, 9],
//!     almmn: vec![0, 30],
//!     daynm: vec![254, 0],
//! };
//! let registry = AlarmRegistry::from_responses(&enabled, &schedule)?;
//!
//! // Wednesday 08:00: today's 07:00 has passed, so Thursday 07:00
//! let now = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let next = registry.next_alarm(now).unwrap();
//! assert_eq!(next.to_string(), "2024-05-16 07:00:00");
//! # Ok::<(), somneo_api::ApiError>(())
//! ```

pub mod alarm;
pub mod endpoint;
pub mod error;
pub mod light;
pub mod settings;
pub mod sound;

mod validate;

pub use alarm::{
    next_alarm, next_firing, AlarmEnabledResponse, AlarmId, AlarmQuery, AlarmRecord, AlarmRegistry,
    AlarmScheduleResponse, AlarmUpdate, RepeatMask, SnoozeResponse, SnoozeUpdate, WeekdayPattern,
};
pub use endpoint::Endpoint;
pub use error::{ApiError, Result};
pub use light::LightCurve;
pub use settings::{AudioSettings, Blob, DuskSettings, LightSettings};
pub use sound::{AlarmSound, SoundDevice, WakeUpSound};
