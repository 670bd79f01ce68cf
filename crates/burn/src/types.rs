//! Core data types for the burn scheduling system.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lower bound for the burn percentage.
pub const PERCENT_MIN: f64 = 9.0;
/// Upper bound for the burn percentage.
pub const PERCENT_MAX: f64 = 50.0;

/// Which asset a firing targets. Wire names match the stored settings format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenKind {
    #[serde(rename = "ETH")]
    Eth,
    #[serde(rename = "369_ETERNAL")]
    Eternal369,
    #[serde(rename = "SOL")]
    Sol,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eth => "ETH",
            Self::Eternal369 => "369_ETERNAL",
            Self::Sol => "SOL",
        };
        f.write_str(name)
    }
}

/// Wall-clock time of day, minute precision. Serialized as `"HH:MM"` (24h).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> crate::Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(crate::Error::invalid_schedule(format!(
                "time of day out of range: {hour:02}:{minute:02}"
            )));
        }
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| crate::Error::invalid_schedule(format!("expected HH:MM, got '{s}'")))?;
        let hour: u8 = h
            .parse()
            .map_err(|_| crate::Error::invalid_schedule(format!("invalid hour in '{s}'")))?;
        let minute: u8 = m
            .parse()
            .map_err(|_| crate::Error::invalid_schedule(format!("invalid minute in '{s}'")))?;
        Self::new(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Outcome of a single firing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RecordStatus {
    Pending,
    Executed,
    Failed,
    Skipped,
}

/// The weekly burn schedule. Singleton, one per installation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BurnSchedule {
    pub enabled: bool,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    pub time_of_day: TimeOfDay,
    /// IANA timezone for interpreting `day_of_week`/`time_of_day`; UTC when
    /// unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
    /// Share of the source wallet balance to burn, clamped to
    /// [`PERCENT_MIN`]..=[`PERCENT_MAX`] on every save.
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_wallet_id: Option<String>,
    pub token_kind: TokenKind,
    /// Set only after an executed or skipped firing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_executed_ms: Option<u64>,
    pub next_scheduled_ms: u64,
}

/// Patch for updating the schedule. Empty strings clear `tz` and
/// `source_wallet_id` (the stored format has no explicit null for them).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BurnSchedulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_wallet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_kind: Option<TokenKind>,
}

/// Record of one firing, stored newest-first in the capped history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BurnRecord {
    pub id: String,
    pub created_at_ms: u64,
    /// The occurrence this record corresponds to.
    pub scheduled_for_ms: u64,
    /// String-encoded decimal with 6 fractional digits; `"0"` on failures.
    pub amount: String,
    pub token_kind: TokenKind,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of the scheduler for UI/API consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnStatus {
    pub running: bool,
    pub enabled: bool,
    pub next_scheduled_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_executed_ms: Option<u64>,
    pub ms_until_next: u64,
}

/// Clamp a requested percentage into the allowed band.
#[must_use]
pub fn clamp_percentage(pct: f64) -> f64 {
    pct.clamp(PERCENT_MIN, PERCENT_MAX)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> BurnSchedule {
        BurnSchedule {
            enabled: true,
            day_of_week: 1,
            time_of_day: TimeOfDay { hour: 9, minute: 0 },
            tz: None,
            percentage: 9.0,
            source_wallet_id: Some("wallet_1".into()),
            token_kind: TokenKind::Eth,
            last_executed_ms: None,
            next_scheduled_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_time_of_day_parse() {
        let t: TimeOfDay = "09:30".parse().unwrap();
        assert_eq!(t, TimeOfDay { hour: 9, minute: 30 });
        assert_eq!(t.to_string(), "09:30");
    }

    #[test]
    fn test_time_of_day_rejects_garbage() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("09:60".parse::<TimeOfDay>().is_err());
        assert!("0900".parse::<TimeOfDay>().is_err());
        assert!("nine".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_schedule_roundtrip() {
        let schedule = sample_schedule();
        let json = serde_json::to_string(&schedule).unwrap();
        let back: BurnSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(schedule, back);
    }

    #[test]
    fn test_schedule_wire_format() {
        let v = serde_json::to_value(sample_schedule()).unwrap();
        assert_eq!(v["dayOfWeek"], 1);
        assert_eq!(v["timeOfDay"], "09:00");
        assert_eq!(v["tokenKind"], "ETH");
        assert_eq!(v["sourceWalletId"], "wallet_1");
        assert!(v.get("lastExecutedMs").is_none());
    }

    #[test]
    fn test_token_kind_wire_names() {
        assert_eq!(
            serde_json::to_value(TokenKind::Eternal369).unwrap(),
            "369_ETERNAL"
        );
        assert_eq!(serde_json::to_value(TokenKind::Sol).unwrap(), "SOL");
        let back: TokenKind = serde_json::from_str("\"369_ETERNAL\"").unwrap();
        assert_eq!(back, TokenKind::Eternal369);
    }

    #[test]
    fn test_record_status_wire_names() {
        assert_eq!(
            serde_json::to_value(RecordStatus::Executed).unwrap(),
            "executed"
        );
        assert_eq!(
            serde_json::to_value(RecordStatus::Skipped).unwrap(),
            "skipped"
        );
    }

    #[test]
    fn test_clamp_percentage() {
        assert_eq!(clamp_percentage(3.0), 9.0);
        assert_eq!(clamp_percentage(9.0), 9.0);
        assert_eq!(clamp_percentage(25.0), 25.0);
        assert_eq!(clamp_percentage(80.0), 50.0);
    }

    #[test]
    fn test_patch_deserializes_partial() {
        let patch: BurnSchedulePatch =
            serde_json::from_str(r#"{"enabled": true, "percentage": 12}"#).unwrap();
        assert_eq!(patch.enabled, Some(true));
        assert_eq!(patch.percentage, Some(12.0));
        assert!(patch.day_of_week.is_none());
    }
}
