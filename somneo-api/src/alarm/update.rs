//! Payloads written to the alarm endpoints

use serde::Serialize;

use super::{AlarmId, RepeatMask, DEFAULT_ALARM_HOUR, DEFAULT_ALARM_MINUTE};
use crate::validate::check_range;
use crate::{AlarmSound, LightCurve, Result};

pub const DEFAULT_CURVE_LEVEL: u8 = 20;
pub const DEFAULT_CURVE_DURATION: u8 = 30;
pub const DEFAULT_SOUND_LEVEL: u8 = 12;

/// Partial alarm profile for `PUT wualm/prfwu`
///
/// Only fields that are set are serialized; the device keeps its current
/// value for everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlarmUpdate {
    prfnr: u8,
    /// Alarm is shown in the device's alarm list
    #[serde(skip_serializing_if = "Option::is_none")]
    prfvs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prfen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    almhr: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    almmn: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    daynm: Option<RepeatMask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pwrsz: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pszhr: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pszmn: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ctype: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    durat: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snddv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sndch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sndlv: Option<u8>,
}

impl AlarmUpdate {
    pub fn for_alarm(id: AlarmId) -> Self {
        Self {
            prfnr: id.position(),
            ..Default::default()
        }
    }

    /// Reset-on-remove profile
    ///
    /// Removing an alarm from the list also disables it and puts every
    /// setting back to the device defaults: 07:00, once, no power wake,
    /// sunny day at 20 over 30 minutes, forest birds at level 12.
    pub fn removal(id: AlarmId) -> Self {
        Self {
            prfnr: id.position(),
            prfvs: Some(false),
            prfen: Some(false),
            almhr: Some(DEFAULT_ALARM_HOUR),
            almmn: Some(DEFAULT_ALARM_MINUTE),
            daynm: Some(RepeatMask::ONCE),
            pwrsz: Some(0),
            pszhr: Some(0),
            pszmn: Some(0),
            ctype: Some(LightCurve::SunnyDay.code()),
            curve: Some(DEFAULT_CURVE_LEVEL),
            durat: Some(DEFAULT_CURVE_DURATION),
            snddv: Some(AlarmSound::default().device().code().to_string()),
            sndch: Some(AlarmSound::default().channel()),
            sndlv: Some(DEFAULT_SOUND_LEVEL),
        }
    }

    pub fn id(&self) -> AlarmId {
        AlarmId::new(self.prfnr)
    }

    pub fn listed(mut self, listed: bool) -> Self {
        self.prfvs = Some(listed);
        self
    }

    /// Enable or disable; enabling also puts the alarm on the list
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.prfen = Some(enabled);
        if enabled {
            self.prfvs = Some(true);
        }
        self
    }

    pub fn hour(mut self, hour: u8) -> Result<Self> {
        check_range("almhr", hour, 0, 23)?;
        self.almhr = Some(hour);
        Ok(self)
    }

    pub fn minute(mut self, minute: u8) -> Result<Self> {
        check_range("almmn", minute, 0, 59)?;
        self.almmn = Some(minute);
        Ok(self)
    }

    pub fn repeat(mut self, mask: RepeatMask) -> Self {
        self.daynm = Some(mask);
        self
    }

    /// Secondary boost time layered on top of the alarm time
    pub fn power_wake(mut self, enabled: bool, hour: u8, minute: u8) -> Result<Self> {
        check_range("pszhr", hour, 0, 23)?;
        check_range("pszmn", minute, 0, 59)?;
        self.pwrsz = Some(u8::from(enabled));
        self.pszhr = Some(hour);
        self.pszmn = Some(minute);
        Ok(self)
    }

    /// Sunrise colour, peak level (0-25) and duration in minutes (5-40)
    pub fn light_curve(mut self, curve: LightCurve, level: u8, duration: u8) -> Result<Self> {
        check_range("curve", level, 0, 25)?;
        check_range("durat", duration, 5, 40)?;
        self.ctype = Some(curve.code());
        self.curve = Some(level);
        self.durat = Some(duration);
        Ok(self)
    }

    /// Alarm sound and its volume (0-25)
    pub fn sound(mut self, sound: &AlarmSound, level: u8) -> Result<Self> {
        check_range("sndlv", level, 0, 25)?;
        self.snddv = Some(sound.device().code().to_string());
        self.sndch = Some(sound.channel());
        self.sndlv = Some(level);
        Ok(self)
    }

    pub fn time_fields(&self) -> (Option<u8>, Option<u8>, Option<RepeatMask>) {
        (self.almhr, self.almmn, self.daynm)
    }

    pub fn enabled_field(&self) -> Option<bool> {
        self.prfen
    }
}

/// Per-slot settings lookup for `PUT wualm`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlarmQuery {
    prfnr: u8,
}

impl AlarmQuery {
    pub fn new(id: AlarmId) -> Self {
        Self { prfnr: id.position() }
    }
}

/// Global snooze time for `PUT wualm`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnoozeUpdate {
    snztm: u8,
}

impl SnoozeUpdate {
    /// Snooze duration in minutes; zero is rejected
    pub fn new(minutes: u8) -> Result<Self> {
        check_range("snztm", minutes, 1, u8::MAX)?;
        Ok(Self { snztm: minutes })
    }

    pub fn minutes(&self) -> u8 {
        self.snztm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiError, WakeUpSound};
    use serde_json::json;

    #[test]
    fn test_partial_time_update_omits_unset_fields() {
        let update = AlarmUpdate::for_alarm(AlarmId::new(2)).hour(6).unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"prfnr": 2, "almhr": 6})
        );

        let update = AlarmUpdate::for_alarm(AlarmId::new(2))
            .minute(0)
            .unwrap()
            .repeat(RepeatMask::WEEKEND);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"prfnr": 2, "almmn": 0, "daynm": 192})
        );
    }

    #[test]
    fn test_enable_asserts_listed() {
        let update = AlarmUpdate::for_alarm(AlarmId::new(1)).enabled(true);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"prfnr": 1, "prfvs": true, "prfen": true})
        );

        let update = AlarmUpdate::for_alarm(AlarmId::new(1)).enabled(false);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"prfnr": 1, "prfen": false})
        );
    }

    #[test]
    fn test_removal_resets_everything() {
        let update = AlarmUpdate::removal(AlarmId::new(3));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "prfnr": 3,
                "prfvs": false,
                "prfen": false,
                "almhr": 7,
                "almmn": 0,
                "daynm": 0,
                "pwrsz": 0,
                "pszhr": 0,
                "pszmn": 0,
                "ctype": 0,
                "curve": 20,
                "durat": 30,
                "snddv": "wus",
                "sndch": "1",
                "sndlv": 12
            })
        );
    }

    #[test]
    fn test_light_curve_and_sound() {
        let update = AlarmUpdate::for_alarm(AlarmId::new(1))
            .light_curve(LightCurve::NordicWhite, 0, 40)
            .unwrap()
            .sound(&AlarmSound::WakeUp(WakeUpSound::NepalBowls), 5)
            .unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "prfnr": 1,
                "ctype": 2,
                "curve": 0,
                "durat": 40,
                "snddv": "wus",
                "sndch": "6",
                "sndlv": 5
            })
        );
    }

    #[test]
    fn test_sound_off_uses_blank_channel() {
        let update = AlarmUpdate::for_alarm(AlarmId::new(1))
            .sound(&AlarmSound::Off, 0)
            .unwrap();
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["snddv"], "off");
        assert_eq!(value["sndch"], " ");
    }

    #[test]
    fn test_power_wake() {
        let update = AlarmUpdate::for_alarm(AlarmId::new(4))
            .power_wake(true, 6, 50)
            .unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"prfnr": 4, "pwrsz": 1, "pszhr": 6, "pszmn": 50})
        );
    }

    #[test]
    fn test_range_validation() {
        let base = AlarmUpdate::for_alarm(AlarmId::new(1));
        assert!(matches!(base.clone().hour(24), Err(ApiError::InvalidParameter(_))));
        assert!(base.clone().minute(60).is_err());
        assert!(base.clone().light_curve(LightCurve::SunnyDay, 26, 30).is_err());
        assert!(base.clone().light_curve(LightCurve::SunnyDay, 20, 4).is_err());
        assert!(base.clone().sound(&AlarmSound::Off, 26).is_err());
        assert!(base.power_wake(true, 6, 61).is_err());
        assert!(SnoozeUpdate::new(0).is_err());
    }

    #[test]
    fn test_query_and_snooze_payloads() {
        assert_eq!(
            serde_json::to_value(AlarmQuery::new(AlarmId::new(5))).unwrap(),
            json!({"prfnr": 5})
        );
        assert_eq!(
            serde_json::to_value(SnoozeUpdate::new(9).unwrap()).unwrap(),
            json!({"snztm": 9})
        );
    }
}
