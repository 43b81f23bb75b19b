//! Daily record model and profile validation.
//!
//! The only mutation path for a day's metrics is [`apply_delta`]: every
//! change is expressed as a signed delta and the result is floored at
//! zero. Direct field overwrite is not part of the contract.

use std::str::FromStr;
use thiserror::Error;
use vitalog_client::{DailyRecord, UserProfile};

/// Today's date in the store's document-key form.
pub fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// The all-zero record used until something is logged for a day.
pub fn empty_record(date: &str) -> DailyRecord {
    DailyRecord {
        date: date.to_string(),
        steps: 0,
        water: 0,
        sleep: 0.0,
        calories: 0,
        protein: None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Steps,
    Water,
    Sleep,
    Calories,
    Protein,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::Water => "water",
            Self::Sleep => "sleep",
            Self::Calories => "calories",
            Self::Protein => "protein",
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steps" => Ok(Self::Steps),
            "water" => Ok(Self::Water),
            "sleep" => Ok(Self::Sleep),
            "calories" => Ok(Self::Calories),
            "protein" => Ok(Self::Protein),
            other => Err(format!("unknown metric {other:?}")),
        }
    }
}

fn clamped(value: f64) -> u32 {
    if value <= 0.0 { 0 } else { value.round() as u32 }
}

/// New record with `metric` set to `max(0, old + delta)`. A delta applied
/// to a day with no protein logged starts from zero and marks it logged.
pub fn apply_delta(record: &DailyRecord, metric: Metric, delta: f64) -> DailyRecord {
    let mut next = record.clone();
    match metric {
        Metric::Steps => next.steps = clamped(f64::from(record.steps) + delta),
        Metric::Water => next.water = clamped(f64::from(record.water) + delta),
        Metric::Sleep => next.sleep = (record.sleep + delta).max(0.0),
        Metric::Calories => next.calories = clamped(f64::from(record.calories) + delta),
        Metric::Protein => {
            let current = record.protein.unwrap_or(0.0);
            next.protein = Some((current + delta).max(0.0));
        }
    }
    next
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("height must be greater than zero")]
    InvalidHeight,
    #[error("weight must be greater than zero")]
    InvalidWeight,
    #[error("age must be a positive whole number")]
    InvalidAge,
}

/// Pre-submission profile check. Gender validity is carried by the enum
/// type; the blood group is accepted as-is.
pub fn validate_profile(profile: &UserProfile) -> Result<(), ProfileError> {
    if profile.height <= 0.0 {
        return Err(ProfileError::InvalidHeight);
    }
    if profile.weight <= 0.0 {
        return Err(ProfileError::InvalidWeight);
    }
    if profile.age == 0 {
        return Err(ProfileError::InvalidAge);
    }
    Ok(())
}
