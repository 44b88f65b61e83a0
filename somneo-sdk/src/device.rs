//! Somneo - handle for one wake-up light
//!
//! Holds the transport and the last [`DeviceSnapshot`]. Reads are served from
//! the snapshot; writes go straight to the device and are then folded back
//! into the snapshot.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use somneo_api::{
    AlarmEnabledResponse, AlarmRegistry, AlarmScheduleResponse, AudioSettings, Blob,
    DuskSettings, Endpoint, LightSettings, Result as ApiResult, SnoozeResponse,
};
use somneo_transport::{HttpTransport, Transport};
use tracing::{debug, info};

use crate::cache::DeviceSnapshot;
use crate::{Result, SdkError, SomneoConfig};

/// Handle for a single Somneo device
///
/// The handle is the only way to mutate the device. Every mutation takes
/// `&mut self`, so calls through one handle are serialized by the borrow
/// checker. Mutations are read-modify-write against the cached snapshot with
/// no version check at the device, so sharing a handle across threads needs
/// an external `Mutex`, and two handles for the same device can overwrite
/// each other's changes.
///
/// # Example
///
/// ```rust,no_run
/// use somneo_sdk::{LightSettings, Somneo};
///
/// fn main() -> Result<(), somneo_sdk::SdkError> {
///     let mut somneo = Somneo::new("192.168.1.50")?;
///     somneo.refresh()?;
///
///     if let Some(next) = somneo.next_alarm() {
///         println!("Next alarm: {next}");
///     }
///
///     somneo.set_light(&LightSettings::new(true).level(12))?;
///     Ok(())
/// }
/// ```
pub struct Somneo<T: Transport = HttpTransport> {
    pub(crate) transport: T,
    config: SomneoConfig,
    pub(crate) snapshot: DeviceSnapshot,
}

impl Somneo<HttpTransport> {
    /// Create a handle for the device at `host` with default settings
    pub fn new(host: &str) -> Result<Self> {
        Self::with_config(host, SomneoConfig::default())
    }

    pub fn with_config(host: &str, config: SomneoConfig) -> Result<Self> {
        let transport = HttpTransport::new(host, config.transport.clone())?;
        Ok(Self {
            transport,
            config,
            snapshot: DeviceSnapshot::new(),
        })
    }
}

impl<T: Transport> Somneo<T> {
    /// Create a handle over a caller-supplied transport
    pub fn with_transport(transport: T) -> Self {
        Self::with_transport_and_config(transport, SomneoConfig::default())
    }

    pub fn with_transport_and_config(transport: T, config: SomneoConfig) -> Self {
        Self {
            transport,
            config,
            snapshot: DeviceSnapshot::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &SomneoConfig {
        &self.config
    }

    /// Re-read every status blob, the snooze time and the alarm arrays
    ///
    /// The cached snapshot is replaced only when every request succeeds; on
    /// error the previous snapshot is left as it was.
    pub fn refresh(&mut self) -> Result<()> {
        let mut blobs = HashMap::new();
        for endpoint in Endpoint::STATUS_BLOBS {
            blobs.insert(endpoint, self.fetch_blob(endpoint)?);
        }
        if self.config.fetch_firmware {
            blobs.insert(Endpoint::Firmware, self.fetch_blob(Endpoint::Firmware)?);
        }

        let snooze: SnoozeResponse = self.fetch(Endpoint::Alarms)?;
        let enabled: AlarmEnabledResponse = self.fetch(Endpoint::AlarmEnabled)?;
        let schedule: AlarmScheduleResponse = self.fetch(Endpoint::AlarmSchedule)?;
        let alarms = AlarmRegistry::from_responses(&enabled, &schedule)?;

        let version = self.snapshot.version() + 1;
        info!(
            version,
            alarms = alarms.len(),
            snooze_minutes = snooze.snztm,
            "Refreshed device state"
        );
        self.snapshot = DeviceSnapshot::refreshed(version, blobs, alarms, snooze.snztm);
        Ok(())
    }

    /// The state read by the last refresh, plus any local changes since
    pub fn snapshot(&self) -> &DeviceSnapshot {
        &self.snapshot
    }

    pub fn blob(&self, endpoint: Endpoint) -> Option<&Blob> {
        self.snapshot.blob(endpoint)
    }

    pub fn light(&self) -> Option<&Blob> {
        self.blob(Endpoint::Light)
    }

    pub fn audio(&self) -> Option<&Blob> {
        self.blob(Endpoint::Audio)
    }

    pub fn dusk(&self) -> Option<&Blob> {
        self.blob(Endpoint::Dusk)
    }

    /// Temperature, humidity, light and noise readings
    pub fn sensor(&self) -> Option<&Blob> {
        self.blob(Endpoint::Sensor)
    }

    pub fn night(&self) -> Option<&Blob> {
        self.blob(Endpoint::Night)
    }

    pub fn timezone(&self) -> Option<&Blob> {
        self.blob(Endpoint::Timezone)
    }

    pub fn settings(&self) -> Option<&Blob> {
        self.blob(Endpoint::Settings)
    }

    pub fn relax(&self) -> Option<&Blob> {
        self.blob(Endpoint::Relax)
    }

    pub fn timer_runtime(&self) -> Option<&Blob> {
        self.blob(Endpoint::TimerRuntime)
    }

    /// Only present when [`SomneoConfig::fetch_firmware`] is set
    pub fn firmware(&self) -> Option<&Blob> {
        self.blob(Endpoint::Firmware)
    }

    pub fn device_info(&self) -> Option<&Blob> {
        self.blob(Endpoint::DeviceInfo)
    }

    pub fn snooze_minutes(&self) -> Option<u8> {
        self.snapshot.snooze_minutes()
    }

    /// Switch the main light and optionally change its level or curve
    pub fn set_light(&mut self, settings: &LightSettings) -> Result<Value> {
        self.update_blob(Endpoint::Light, |blob| settings.apply(blob))
    }

    pub fn set_audio(&mut self, settings: &AudioSettings) -> Result<Value> {
        self.update_blob(Endpoint::Audio, |blob| settings.apply(blob))
    }

    /// Configure sunset simulation
    pub fn set_dusk(&mut self, settings: &DuskSettings) -> Result<Value> {
        self.update_blob(Endpoint::Dusk, |blob| settings.apply(blob))
    }

    /// Apply a change to a copy of the cached blob and write the whole blob back
    fn update_blob<F>(&mut self, endpoint: Endpoint, apply: F) -> Result<Value>
    where
        F: FnOnce(&mut Blob) -> ApiResult<()>,
    {
        let mut blob = self
            .snapshot
            .blob(endpoint)
            .cloned()
            .ok_or(SdkError::NotLoaded(endpoint))?;
        apply(&mut blob)?;

        debug!(endpoint = endpoint.name(), "Writing blob");
        let response = self
            .transport
            .put(endpoint.path(), &Value::Object(blob.clone()))?;
        self.snapshot.store_blob(endpoint, blob);
        Ok(response)
    }

    fn fetch<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<R> {
        let value = self.transport.get(endpoint.path())?;
        decode(endpoint, value)
    }

    fn fetch_blob(&self, endpoint: Endpoint) -> Result<Blob> {
        match self.transport.get(endpoint.path())? {
            Value::Object(blob) => Ok(blob),
            other => Err(SdkError::UnexpectedResponse {
                endpoint,
                message: format!("expected a JSON object, got {other}"),
            }),
        }
    }
}

fn decode<R: DeserializeOwned>(endpoint: Endpoint, value: Value) -> Result<R> {
    serde_json::from_value(value).map_err(|e| SdkError::UnexpectedResponse {
        endpoint,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use serde_json::json;

    fn loaded() -> Somneo<RecordingTransport> {
        let transport = RecordingTransport::with_device_state();
        let mut somneo = Somneo::with_transport(transport);
        somneo.refresh().unwrap();
        somneo
    }

    #[test]
    fn test_refresh_populates_snapshot() {
        let somneo = loaded();
        assert_eq!(somneo.snapshot().version(), 1);
        assert_eq!(somneo.light().unwrap()["ltlvl"], 10);
        assert_eq!(somneo.sensor().unwrap()["mstmp"], 21.5);
        assert_eq!(somneo.snooze_minutes(), Some(9));
        assert_eq!(somneo.snapshot().alarms().len(), 3);
        assert!(somneo.firmware().is_none());
    }

    #[test]
    fn test_refresh_bumps_version() {
        let mut somneo = loaded();
        somneo.refresh().unwrap();
        assert_eq!(somneo.snapshot().version(), 2);
    }

    #[test]
    fn test_refresh_fetches_firmware_when_configured() {
        let transport = RecordingTransport::with_device_state();
        let config = SomneoConfig::new().with_firmware(true);
        let mut somneo = Somneo::with_transport_and_config(transport, config);
        somneo.refresh().unwrap();

        assert!(somneo.firmware().is_some());
        assert!(somneo.transport().gets().contains(&"firmware".to_string()));
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let mut somneo = loaded();
        somneo
            .transport
            .respond("wualm/aalms", json!({"almhr": [7], "almmn": [0], "daynm": [0]}));

        let err = somneo.refresh().unwrap_err();
        assert!(err.is_data_integrity());
        assert_eq!(somneo.snapshot().version(), 1);
        assert_eq!(somneo.snapshot().alarms().len(), 3);
    }

    #[test]
    fn test_non_object_blob_is_rejected() {
        let transport = RecordingTransport::with_device_state();
        transport.respond("wusrd", json!([1, 2, 3]));
        let mut somneo = Somneo::with_transport(transport);

        let err = somneo.refresh().unwrap_err();
        assert!(matches!(
            err,
            SdkError::UnexpectedResponse { endpoint: Endpoint::Sensor, .. }
        ));
        assert!(!somneo.snapshot().is_loaded());
    }

    #[test]
    fn test_set_light_writes_whole_blob() {
        let mut somneo = loaded();
        somneo
            .set_light(&LightSettings::new(true).level(0))
            .unwrap();

        let (path, payload) = somneo.transport().last_put().unwrap();
        assert_eq!(path, "wulgt");
        assert_eq!(payload, json!({"ltlvl": 0, "onoff": true, "ctype": 0, "tempy": false}));
        assert_eq!(somneo.light().unwrap()["ltlvl"], 0);
        assert!(somneo.snapshot().is_locally_modified());
        assert_eq!(somneo.snapshot().version(), 1);
    }

    #[test]
    fn test_setter_before_refresh_is_not_loaded() {
        let mut somneo = Somneo::with_transport(RecordingTransport::with_device_state());
        let err = somneo.set_audio(&AudioSettings::new(false)).unwrap_err();

        assert!(matches!(err, SdkError::NotLoaded(Endpoint::Audio)));
        assert!(somneo.transport().puts().is_empty());
    }

    #[test]
    fn test_invalid_setting_sends_nothing() {
        let mut somneo = loaded();
        let err = somneo
            .set_dusk(&DuskSettings::new(true).duration(90))
            .unwrap_err();

        assert!(matches!(err, SdkError::Api(_)));
        assert!(somneo.transport().puts().is_empty());
        assert_eq!(somneo.dusk().unwrap()["durat"], 30);
    }
}
