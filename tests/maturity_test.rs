use chrono::{Datelike, Duration, NaiveDate};
use sakinah::{calculate_age, classify, get_islamic_level, IslamicLevel, Role};
use sakinah::domain::maturity::PersonInput;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 20).unwrap()
}

fn years_before(date: NaiveDate, years: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() - years, date.month(), date.day()).unwrap()
}

#[test]
fn test_birthday_tomorrow_vs_yesterday() {
    let today = today();
    for years in [1, 7, 12, 13, 40] {
        let tomorrow = years_before(today + Duration::days(1), years).to_string();
        let yesterday = years_before(today - Duration::days(1), years).to_string();

        assert_eq!(calculate_age(Some(&tomorrow), today), Some(years - 1));
        assert_eq!(calculate_age(Some(&yesterday), today), Some(years));
    }
}

#[test]
fn test_birth_date_today_is_age_zero() {
    let today = today();
    assert_eq!(calculate_age(Some(&today.to_string()), today), Some(0));
}

#[test]
fn test_child_levels_across_ages() {
    let expected = [
        (0, IslamicLevel::GhairuTamyiz),
        (6, IslamicLevel::GhairuTamyiz),
        (7, IslamicLevel::Tamyiz),
        (12, IslamicLevel::Tamyiz),
        (13, IslamicLevel::Baligh),
        (70, IslamicLevel::Baligh),
    ];
    for (age, level) in expected {
        assert_eq!(get_islamic_level(Some(age), &Role::Child), level, "age {}", age);
    }
}

#[test]
fn test_turning_seven_moves_to_tamyiz() {
    let today = today();
    let day_before = years_before(today + Duration::days(1), 7).to_string();
    let on_the_day = years_before(today, 7).to_string();

    let child = |birth: &str| PersonInput {
        birth_date: Some(birth.to_string()),
        role: Role::Child,
    };

    assert_eq!(classify(&child(&day_before), today).level, IslamicLevel::GhairuTamyiz);
    assert_eq!(classify(&child(&on_the_day), today).level, IslamicLevel::Tamyiz);
}

#[test]
fn test_parent_ignores_birth_date() {
    let input = PersonInput {
        birth_date: Some("2020-01-01".to_string()),
        role: Role::from("parent"),
    };
    let result = classify(&input, today());
    assert_eq!(result.level, IslamicLevel::Parent);
    assert_eq!(result.label, "Orang Tua");
}

#[test]
fn test_malformed_birth_date_defaults_to_baligh() {
    let input = PersonInput {
        birth_date: Some("20/07/2018".to_string()),
        role: Role::Child,
    };
    let result = classify(&input, today());
    assert_eq!(result.age, None);
    assert_eq!(result.level, IslamicLevel::Baligh);
}
