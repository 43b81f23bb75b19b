//! Derived-indicator calculators.
//!
//! All functions are total for numeric input: invalid values clamp to a
//! neutral result instead of failing, because the results feed directly
//! into display surfaces.

use vitalog_client::UserProfile;

/// ml of water per kg of body weight per day.
const WATER_ML_PER_KG: f64 = 35.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    /// Fixed display color per category.
    pub fn color(self) -> &'static str {
        match self {
            Self::Underweight => "#FF9800",
            Self::Normal => "#4CAF50",
            Self::Overweight => "#FF5722",
            Self::Obese => "#D32F2F",
        }
    }
}

/// BMI to one decimal place, or 0 when either input is non-positive.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    (weight_kg / (height_m * height_m) * 10.0).round() / 10.0
}

/// Category thresholds: < 18.5, < 24.9, < 29.9. A value exactly on a
/// boundary lands in the higher category.
pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 24.9 {
        BmiCategory::Normal
    } else if bmi < 29.9 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Daily water goal in milliliters.
pub fn water_goal_ml(weight_kg: f64) -> u32 {
    if weight_kg <= 0.0 {
        return 0;
    }
    (weight_kg * WATER_ML_PER_KG).round() as u32
}

/// Epley one-rep-max estimate. `None` unless both inputs are positive; the
/// caller is expected not to display anything in that case.
pub fn one_rep_max(weight_kg: f64, reps: u32) -> Option<u32> {
    if weight_kg <= 0.0 || reps == 0 {
        return None;
    }
    Some((weight_kg * (1.0 + f64::from(reps) / 30.0)).round() as u32)
}

/// The dashboard's computed view of a profile. Never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedIndicators {
    pub bmi: f64,
    pub category: BmiCategory,
    pub water_goal_ml: u32,
}

impl DerivedIndicators {
    pub fn for_profile(profile: &UserProfile) -> Self {
        let bmi = calculate_bmi(profile.height, profile.weight);
        Self {
            bmi,
            category: bmi_category(bmi),
            water_goal_ml: water_goal_ml(profile.weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalog_client::Gender;

    #[test]
    fn bmi_matches_reference_formula() {
        assert_eq!(calculate_bmi(170.0, 70.0), 24.2);
        assert_eq!(calculate_bmi(180.0, 81.0), 25.0);
    }

    #[test]
    fn bmi_guards_non_positive_inputs() {
        assert_eq!(calculate_bmi(0.0, 70.0), 0.0);
        assert_eq!(calculate_bmi(170.0, 0.0), 0.0);
        assert_eq!(calculate_bmi(-170.0, 70.0), 0.0);
    }

    #[test]
    fn category_boundaries_land_in_the_higher_bucket() {
        assert_eq!(bmi_category(18.4), BmiCategory::Underweight);
        assert_eq!(bmi_category(18.5), BmiCategory::Normal);
        assert_eq!(bmi_category(24.9), BmiCategory::Overweight);
        assert_eq!(bmi_category(29.9), BmiCategory::Obese);
        assert_eq!(bmi_category(24.2), BmiCategory::Normal);
    }

    #[test]
    fn category_colors_are_fixed() {
        assert_eq!(BmiCategory::Underweight.color(), "#FF9800");
        assert_eq!(BmiCategory::Normal.color(), "#4CAF50");
        assert_eq!(BmiCategory::Overweight.color(), "#FF5722");
        assert_eq!(BmiCategory::Obese.color(), "#D32F2F");
    }

    #[test]
    fn water_goal_is_35ml_per_kg() {
        assert_eq!(water_goal_ml(70.0), 2450);
        assert_eq!(water_goal_ml(0.0), 0);
        assert_eq!(water_goal_ml(-5.0), 0);
    }

    #[test]
    fn one_rep_max_uses_epley() {
        assert_eq!(one_rep_max(60.0, 8), Some(76));
        assert_eq!(one_rep_max(100.0, 1), Some(103));
        assert_eq!(one_rep_max(0.0, 8), None);
        assert_eq!(one_rep_max(60.0, 0), None);
    }

    #[test]
    fn indicators_derive_from_profile() {
        let profile = UserProfile {
            name: None,
            age: 25,
            height: 170.0,
            weight: 70.0,
            blood_group: "O+".into(),
            gender: Gender::Male,
        };
        let derived = DerivedIndicators::for_profile(&profile);
        assert_eq!(derived.bmi, 24.2);
        assert_eq!(derived.category, BmiCategory::Normal);
        assert_eq!(derived.water_goal_ml, 2450);
    }
}
