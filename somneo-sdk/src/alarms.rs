//! Alarm reads and mutations on [`Somneo`]
//!
//! Every mutation builds one `PUT wualm/prfwu` payload containing only the
//! fields it changes. The cached record is updated after the device accepts
//! the write; nothing is re-fetched.

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use std::collections::BTreeMap;

use somneo_api::{
    AlarmId, AlarmQuery, ApiError, AlarmRecord, AlarmRegistry, AlarmSound, AlarmUpdate, Blob, Endpoint,
    LightCurve, RepeatMask, SnoozeUpdate, WeekdayPattern,
};
use somneo_transport::Transport;
use tracing::debug;

use crate::{Result, SdkError, Somneo};

impl<T: Transport> Somneo<T> {
    pub fn alarms(&self) -> &AlarmRegistry {
        self.snapshot.alarms()
    }

    pub fn alarm(&self, id: AlarmId) -> Option<&AlarmRecord> {
        self.snapshot.alarm(id)
    }

    /// Enabled flag per slot
    pub fn alarm_states(&self) -> BTreeMap<AlarmId, bool> {
        self.alarms().enabled_states()
    }

    /// Full settings of one slot as the device reports them
    ///
    /// The device only answers per-slot queries on `PUT wualm`.
    pub fn alarm_settings(&self, id: AlarmId) -> Result<Blob> {
        self.record(id)?;
        let query = serde_json::to_value(AlarmQuery::new(id)).map_err(ApiError::from)?;
        match self.transport.put(Endpoint::Alarms.path(), &query)? {
            Value::Object(blob) => Ok(blob),
            other => Err(SdkError::UnexpectedResponse {
                endpoint: Endpoint::Alarms,
                message: format!("expected a JSON object, got {other}"),
            }),
        }
    }

    /// Earliest upcoming firing of any enabled alarm, in local time
    pub fn next_alarm(&self) -> Option<NaiveDateTime> {
        self.next_alarm_at(Local::now().naive_local())
    }

    pub fn next_alarm_at(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.alarms().next_alarm(now)
    }

    /// Change any subset of hour, minute and repeat days
    ///
    /// Omitted fields are left out of the payload, so the device keeps them.
    pub fn set_alarm_time(
        &mut self,
        id: AlarmId,
        hour: Option<u8>,
        minute: Option<u8>,
        repeat: Option<RepeatMask>,
    ) -> Result<()> {
        let mut record = self.record(id)?.clone();
        record.set_time(hour, minute)?;

        let mut update = AlarmUpdate::for_alarm(id);
        if let Some(hour) = hour {
            update = update.hour(hour)?;
        }
        if let Some(minute) = minute {
            update = update.minute(minute)?;
        }
        if let Some(mask) = repeat {
            update = update.repeat(mask);
            record.repeat = mask;
        }

        self.push(&update)?;
        self.snapshot.store_alarm(record);
        Ok(())
    }

    pub fn set_weekday_pattern(&mut self, id: AlarmId, pattern: WeekdayPattern) -> Result<()> {
        self.set_alarm_time(id, None, None, Some(pattern.mask()))
    }

    /// Enabling also puts the alarm back on the device's list
    ///
    /// Disabling leaves `prfvs` out of the payload, so a disabled alarm stays
    /// on the list. Use [`remove_from_list`](Self::remove_from_list) to take
    /// it off.
    pub fn enable_alarm(&mut self, id: AlarmId, enabled: bool) -> Result<()> {
        let mut record = self.record(id)?.clone();
        self.push(&AlarmUpdate::for_alarm(id).enabled(enabled))?;

        record.enabled = enabled;
        self.snapshot.store_alarm(record);
        Ok(())
    }

    pub fn add_to_list(&mut self, id: AlarmId) -> Result<()> {
        self.record(id)?;
        self.push(&AlarmUpdate::for_alarm(id).listed(true))
    }

    /// Take the alarm off the list, which also resets it to device defaults
    pub fn remove_from_list(&mut self, id: AlarmId) -> Result<()> {
        let mut record = self.record(id)?.clone();
        let update = AlarmUpdate::removal(id);
        self.push(&update)?;

        if let (Some(hour), Some(minute), Some(mask)) = update.time_fields() {
            record.set_time(Some(hour), Some(minute))?;
            record.repeat = mask;
        }
        record.enabled = update.enabled_field().unwrap_or(false);
        self.snapshot.store_alarm(record);
        Ok(())
    }

    /// Sunrise colour, peak level (0-25) and duration in minutes (5-40)
    pub fn set_light_curve(
        &mut self,
        id: AlarmId,
        curve: LightCurve,
        level: u8,
        duration: u8,
    ) -> Result<()> {
        self.record(id)?;
        let update = AlarmUpdate::for_alarm(id).light_curve(curve, level, duration)?;
        self.push(&update)
    }

    pub fn set_alarm_sound(&mut self, id: AlarmId, sound: &AlarmSound, level: u8) -> Result<()> {
        self.record(id)?;
        let update = AlarmUpdate::for_alarm(id).sound(sound, level)?;
        self.push(&update)
    }

    /// Secondary power wake time, independent of the alarm time
    pub fn set_power_assist(
        &mut self,
        id: AlarmId,
        enabled: bool,
        hour: u8,
        minute: u8,
    ) -> Result<()> {
        self.record(id)?;
        let update = AlarmUpdate::for_alarm(id).power_wake(enabled, hour, minute)?;
        self.push(&update)
    }

    /// Snooze duration shared by every alarm
    pub fn set_snooze_minutes(&mut self, minutes: u8) -> Result<()> {
        let update = SnoozeUpdate::new(minutes)?;
        let payload = serde_json::to_value(update).map_err(ApiError::from)?;
        debug!(minutes, "Setting snooze time");
        self.transport.put(Endpoint::Alarms.path(), &payload)?;

        self.snapshot.store_snooze(update.minutes());
        Ok(())
    }

    fn record(&self, id: AlarmId) -> Result<&AlarmRecord> {
        self.alarm(id).ok_or(SdkError::AlarmNotFound(id))
    }

    fn push(&self, update: &AlarmUpdate) -> Result<()> {
        let payload = serde_json::to_value(update).map_err(ApiError::from)?;
        debug!(alarm = %update.id(), payload = %payload, "Updating alarm");
        self.transport.put(Endpoint::AlarmProfile.path(), &payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use chrono::{Days, NaiveDate};
    use rstest::rstest;
    use serde_json::json;
    use somneo_api::WakeUpSound;

    fn loaded() -> Somneo<RecordingTransport> {
        let mut somneo = Somneo::with_transport(RecordingTransport::with_device_state());
        somneo.refresh().unwrap();
        somneo
    }

    fn wednesday(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_alarm_states() {
        let somneo = loaded();
        let states: Vec<_> = somneo.alarm_states().into_iter().collect();
        assert_eq!(
            states,
            vec![(AlarmId::new(1), true), (AlarmId::new(2), false), (AlarmId::new(3), true)]
        );
    }

    #[test]
    fn test_set_alarm_time_partial_payload() {
        let mut somneo = loaded();
        somneo
            .set_alarm_time(AlarmId::new(1), Some(6), None, None)
            .unwrap();

        let (path, payload) = somneo.transport().last_put().unwrap();
        assert_eq!(path, "wualm/prfwu");
        assert_eq!(payload, json!({"prfnr": 1, "almhr": 6}));

        let record = somneo.alarm(AlarmId::new(1)).unwrap();
        assert_eq!((record.hour(), record.minute()), (6, 0));
        assert_eq!(record.repeat, RepeatMask::WORKDAYS);
    }

    #[test]
    fn test_invalid_time_sends_nothing() {
        let mut somneo = loaded();
        let err = somneo
            .set_alarm_time(AlarmId::new(1), Some(24), Some(0), None)
            .unwrap_err();

        assert!(matches!(err, SdkError::Api(_)));
        assert!(somneo.transport().puts().is_empty());
        assert_eq!(somneo.alarm(AlarmId::new(1)).unwrap().hour(), 7);
    }

    #[rstest]
    #[case(WeekdayPattern::Workdays, 62)]
    #[case(WeekdayPattern::Weekend, 192)]
    #[case(WeekdayPattern::Everyday, 254)]
    #[case(WeekdayPattern::Once, 0)]
    fn test_weekday_pattern_payload(#[case] pattern: WeekdayPattern, #[case] mask: u8) {
        let mut somneo = loaded();
        somneo.set_weekday_pattern(AlarmId::new(2), pattern).unwrap();

        let (_, payload) = somneo.transport().last_put().unwrap();
        assert_eq!(payload, json!({"prfnr": 2, "daynm": mask}));
        assert_eq!(somneo.alarm(AlarmId::new(2)).unwrap().repeat.bits(), mask);
    }

    #[test]
    fn test_enable_alarm_lists_it() {
        let mut somneo = loaded();
        somneo.enable_alarm(AlarmId::new(2), true).unwrap();

        let (_, payload) = somneo.transport().last_put().unwrap();
        assert_eq!(payload, json!({"prfnr": 2, "prfvs": true, "prfen": true}));
        assert!(somneo.alarm(AlarmId::new(2)).unwrap().enabled);
    }

    #[test]
    fn test_disable_alarm_keeps_listing() {
        let mut somneo = loaded();
        somneo.enable_alarm(AlarmId::new(1), false).unwrap();

        let (_, payload) = somneo.transport().last_put().unwrap();
        assert_eq!(payload, json!({"prfnr": 1, "prfen": false}));
    }

    #[test]
    fn test_remove_from_list_resets_alarm() {
        let mut somneo = loaded();
        somneo.set_power_assist(AlarmId::new(3), true, 5, 45).unwrap();
        somneo.remove_from_list(AlarmId::new(3)).unwrap();

        let (_, payload) = somneo.transport().last_put().unwrap();
        assert_eq!(payload["prfvs"], false);
        assert_eq!(payload["almhr"], 7);
        assert_eq!(payload["almmn"], 0);
        assert_eq!(payload["daynm"], 0);
        assert_eq!(payload["pwrsz"], 0);

        let record = somneo.alarm(AlarmId::new(3)).unwrap();
        assert!(!record.enabled);
        assert_eq!((record.hour(), record.minute()), (7, 0));
        assert!(record.repeat.is_once());
    }

    #[test]
    fn test_set_light_curve_payload() {
        let mut somneo = loaded();
        somneo
            .set_light_curve(AlarmId::new(1), LightCurve::NordicWhite, 18, 25)
            .unwrap();

        let (_, payload) = somneo.transport().last_put().unwrap();
        assert_eq!(payload, json!({"prfnr": 1, "ctype": 2, "curve": 18, "durat": 25}));
    }

    #[test]
    fn test_light_curve_out_of_range() {
        let mut somneo = loaded();
        let err = somneo
            .set_light_curve(AlarmId::new(1), LightCurve::SunnyDay, 20, 45)
            .unwrap_err();
        assert!(matches!(err, SdkError::Api(_)));
        assert!(somneo.transport().puts().is_empty());
    }

    #[rstest]
    #[case(AlarmSound::WakeUp(WakeUpSound::ForestBirds), "wus", "1")]
    #[case(AlarmSound::Radio("3".to_string()), "fmr", "3")]
    #[case(AlarmSound::Off, "off", " ")]
    fn test_alarm_sound_payload(
        #[case] sound: AlarmSound,
        #[case] device: &str,
        #[case] channel: &str,
    ) {
        let mut somneo = loaded();
        somneo.set_alarm_sound(AlarmId::new(1), &sound, 15).unwrap();

        let (_, payload) = somneo.transport().last_put().unwrap();
        assert_eq!(
            payload,
            json!({"prfnr": 1, "snddv": device, "sndch": channel, "sndlv": 15})
        );
    }

    #[test]
    fn test_set_snooze_minutes() {
        let mut somneo = loaded();
        somneo.set_snooze_minutes(15).unwrap();

        let (path, payload) = somneo.transport().last_put().unwrap();
        assert_eq!(path, "wualm");
        assert_eq!(payload, json!({"snztm": 15}));
        assert_eq!(somneo.snooze_minutes(), Some(15));
    }

    #[test]
    fn test_unknown_alarm_sends_nothing() {
        let mut somneo = loaded();
        let err = somneo.enable_alarm(AlarmId::new(16), true).unwrap_err();

        assert!(matches!(err, SdkError::AlarmNotFound(id) if id == AlarmId::new(16)));
        assert!(err.is_data_integrity());
        assert!(somneo.transport().puts().is_empty());
    }

    #[test]
    fn test_rejected_update_leaves_cache() {
        let mut somneo = loaded();
        somneo.transport().reject_puts("{\"error\":\"bad value\"}");

        let err = somneo
            .set_alarm_time(AlarmId::new(1), Some(5), Some(30), None)
            .unwrap_err();
        assert!(err.is_invalid_request());
        assert_eq!(somneo.alarm(AlarmId::new(1)).unwrap().hour(), 7);
        assert!(!somneo.snapshot().is_locally_modified());
    }

    #[test]
    fn test_alarm_settings_queries_slot() {
        let somneo = loaded();
        let settings = somneo.alarm_settings(AlarmId::new(2)).unwrap();

        assert_eq!(settings["prfnr"], 2);
        let (path, _) = somneo.transport().last_put().unwrap();
        assert_eq!(path, "wualm");
    }

    #[test]
    fn test_next_alarm_follows_enabled_flags() {
        let mut somneo = loaded();
        // Alarm 1: workdays 07:00, alarm 3: weekend 06:15
        let thursday = wednesday(7, 0) + Days::new(1);
        assert_eq!(somneo.next_alarm_at(wednesday(8, 0)), Some(thursday));

        somneo.enable_alarm(AlarmId::new(1), false).unwrap();
        let saturday = wednesday(6, 15) + Days::new(3);
        assert_eq!(somneo.next_alarm_at(wednesday(8, 0)), Some(saturday));

        somneo.enable_alarm(AlarmId::new(3), false).unwrap();
        assert_eq!(somneo.next_alarm_at(wednesday(8, 0)), None);
    }
}
