//! Islamic maturity level (tingkat kedewasaan) of a household member.
//!
//! Everything here is pure: the reference date is always passed in, so the
//! same inputs give the same level on any thread at any time.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Age above which a child is treated as baligh.
const BALIGH_AFTER: i32 = 12;
/// First age of tamyiz.
const TAMYIZ_FROM: i32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Parent,
    Child,
    Other(String),
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "parent" => Role::Parent,
            "child" => Role::Child,
            _ => Role::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Parent => "parent".to_string(),
            Role::Child => "child".to_string(),
            Role::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IslamicLevel {
    Parent,
    Baligh,
    Tamyiz,
    GhairuTamyiz,
}

impl IslamicLevel {
    pub const ALL: [IslamicLevel; 4] = [
        IslamicLevel::Parent,
        IslamicLevel::Baligh,
        IslamicLevel::Tamyiz,
        IslamicLevel::GhairuTamyiz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IslamicLevel::Parent => "parent",
            IslamicLevel::Baligh => "baligh",
            IslamicLevel::Tamyiz => "tamyiz",
            IslamicLevel::GhairuTamyiz => "ghairu_tamyiz",
        }
    }

    /// Display label shown next to a member's name.
    pub fn label(&self) -> &'static str {
        match self {
            IslamicLevel::Parent => "Orang Tua",
            IslamicLevel::Baligh => "Baligh",
            IslamicLevel::Tamyiz => "Tamyiz",
            IslamicLevel::GhairuTamyiz => "Ghairu Tamyiz",
        }
    }
}

impl fmt::Display for IslamicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IslamicLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IslamicLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("unknown islamic level: {}", s))
    }
}

fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        // 取字面上的日期部分，不做時區換算
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            // 無時區的 ISO-8601 與 SQLite TEXT 時間戳
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Whole calendar years between `birth_date` and `today`.
///
/// Returns `None` when the date is absent or cannot be parsed. A birth date
/// in the future yields a negative age, which is returned unchanged.
pub fn calculate_age(birth_date: Option<&str>, today: NaiveDate) -> Option<i32> {
    let birth = parse_birth_date(birth_date?)?;

    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age)
}

/// [`calculate_age`] against the local wall-clock date.
pub fn calculate_age_today(birth_date: Option<&str>) -> Option<i32> {
    calculate_age(birth_date, Local::now().date_naive())
}

pub fn get_islamic_level(age: Option<i32>, role: &Role) -> IslamicLevel {
    if *role == Role::Parent {
        return IslamicLevel::Parent;
    }

    match age {
        None => IslamicLevel::Baligh,
        Some(age) if age > BALIGH_AFTER => IslamicLevel::Baligh,
        Some(age) if age >= TAMYIZ_FROM => IslamicLevel::Tamyiz,
        Some(_) => IslamicLevel::GhairuTamyiz,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonInput {
    #[serde(default, alias = "birthDate")]
    pub birth_date: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub age: Option<i32>,
    pub level: IslamicLevel,
    pub label: &'static str,
}

pub fn classify(input: &PersonInput, today: NaiveDate) -> Classification {
    let age = calculate_age(input.birth_date.as_deref(), today);
    let level = get_islamic_level(age, &input.role);
    Classification {
        age,
        level,
        label: level.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_on_birth_day_is_zero() {
        let today = date(2024, 3, 15);
        assert_eq!(calculate_age(Some("2024-03-15"), today), Some(0));
    }

    #[test]
    fn test_age_decrements_before_birthday() {
        let today = date(2024, 3, 15);
        // 明天生日：還沒滿 10 歲
        assert_eq!(calculate_age(Some("2014-03-16"), today), Some(9));
        // 昨天生日：已滿
        assert_eq!(calculate_age(Some("2014-03-14"), today), Some(10));
        assert_eq!(calculate_age(Some("2014-03-15"), today), Some(10));
        // 同日但月份較晚
        assert_eq!(calculate_age(Some("2014-04-01"), today), Some(9));
    }

    #[test]
    fn test_age_unknown_for_missing_or_malformed() {
        let today = date(2024, 3, 15);
        assert_eq!(calculate_age(None, today), None);
        assert_eq!(calculate_age(Some(""), today), None);
        assert_eq!(calculate_age(Some("   "), today), None);
        assert_eq!(calculate_age(Some("not-a-date"), today), None);
        assert_eq!(calculate_age(Some("2014-02-30"), today), None);
    }

    #[test]
    fn test_future_birth_date_keeps_negative_age() {
        let today = date(2024, 3, 15);
        assert_eq!(calculate_age(Some("2026-03-15"), today), Some(-2));
        assert_eq!(calculate_age(Some("2024-12-01"), today), Some(-1));
    }

    #[test]
    fn test_age_accepts_rfc3339() {
        let today = date(2024, 3, 15);
        assert_eq!(
            calculate_age(Some("2010-03-15T23:30:00+07:00"), today),
            Some(14)
        );
        assert_eq!(calculate_age(Some("2010-03-16T00:00:00Z"), today), Some(13));
        assert_eq!(calculate_age(Some("2010-03-15T00:00:00"), today), Some(14));
        assert_eq!(calculate_age(Some("2010-03-16T08:15:00.250"), today), Some(13));
        assert_eq!(calculate_age(Some("2010-03-15 00:00:00"), today), Some(14));
        assert_eq!(calculate_age(Some("2010-03-16 23:59:59"), today), Some(13));
    }

    #[test]
    fn test_naive_timestamps_classify_by_age() {
        let today = date(2025, 7, 20);
        for raw in ["2018-05-01T00:00:00", "2018-05-01 00:00:00"] {
            let age = calculate_age(Some(raw), today);
            assert_eq!(age, Some(7), "{}", raw);
            assert_eq!(get_islamic_level(age, &Role::Child), IslamicLevel::Tamyiz);
        }
    }

    #[test]
    fn test_leap_day_birthday() {
        // 2/29 出生，平年的 3/1 才算過生日
        assert_eq!(calculate_age(Some("2016-02-29"), date(2023, 2, 28)), Some(6));
        assert_eq!(calculate_age(Some("2016-02-29"), date(2023, 3, 1)), Some(7));
    }

    #[test]
    fn test_level_boundaries() {
        let child = Role::Child;
        assert_eq!(get_islamic_level(Some(6), &child), IslamicLevel::GhairuTamyiz);
        assert_eq!(get_islamic_level(Some(7), &child), IslamicLevel::Tamyiz);
        assert_eq!(get_islamic_level(Some(12), &child), IslamicLevel::Tamyiz);
        assert_eq!(get_islamic_level(Some(13), &child), IslamicLevel::Baligh);
        assert_eq!(get_islamic_level(Some(0), &child), IslamicLevel::GhairuTamyiz);
        assert_eq!(get_islamic_level(Some(-3), &child), IslamicLevel::GhairuTamyiz);
    }

    #[test]
    fn test_unknown_age_defaults_to_baligh() {
        assert_eq!(get_islamic_level(None, &Role::Child), IslamicLevel::Baligh);
        assert_eq!(
            get_islamic_level(None, &Role::Other("guest".into())),
            IslamicLevel::Baligh
        );
    }

    #[test]
    fn test_parent_role_short_circuits() {
        for age in [None, Some(-5), Some(0), Some(6), Some(10), Some(40), Some(i32::MAX)] {
            assert_eq!(get_islamic_level(age, &Role::Parent), IslamicLevel::Parent);
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from("Parent"), Role::Parent);
        assert_eq!(Role::from(" child "), Role::Child);
        assert_eq!(Role::from("grandparent"), Role::Other("grandparent".into()));
    }

    #[test]
    fn test_every_level_has_label() {
        for level in IslamicLevel::ALL {
            assert!(!level.label().is_empty());
            assert_eq!(level.as_str().parse::<IslamicLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_classify_serializes_tags() {
        let input: PersonInput =
            serde_json::from_str(r#"{"birthDate": "2015-06-01", "role": "child"}"#).unwrap();
        let result = classify(&input, date(2024, 3, 15));

        assert_eq!(result.age, Some(8));
        assert_eq!(result.level, IslamicLevel::Tamyiz);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["level"], "tamyiz");
        assert_eq!(json["label"], "Tamyiz");
    }

    #[test]
    fn test_classify_without_birth_date() {
        let input = PersonInput {
            birth_date: None,
            role: Role::Child,
        };
        let result = classify(&input, date(2024, 3, 15));
        assert_eq!(result.age, None);
        assert_eq!(result.level, IslamicLevel::Baligh);
        assert_eq!(serde_json::to_value(&result).unwrap()["age"], serde_json::Value::Null);
    }
}
