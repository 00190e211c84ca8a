//! User profile and preference models.

use serde::{Deserialize, Serialize};

/// Body measurements in centimeters (weight in kilograms).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
    pub height: f64,
    pub weight: f64,
    pub bust: f64,
    pub waist: f64,
    pub hips: f64,
    pub inseam: f64,
}

impl Default for Measurements {
    fn default() -> Self {
        Self {
            height: 170.0,
            weight: 65.0,
            bust: 90.0,
            waist: 70.0,
            hips: 95.0,
            inseam: 80.0,
        }
    }
}

/// User profile domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    /// Account identifier; `None` until the user signs in.
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    /// Avatar image reference.
    pub avatar: Option<String>,
    pub style: String,
    pub body_type: String,
    pub preferences: Vec<String>,
    pub budget: String,
    pub measurements: Measurements,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            avatar: None,
            style: "Classic".to_string(),
            body_type: "Average".to_string(),
            preferences: vec!["Comfortable".to_string(), "Trendy".to_string()],
            budget: "Mid-range".to_string(),
            measurements: Measurements::default(),
        }
    }
}

/// Closed price interval with `low <= high`.
///
/// Stored as a two-element array, e.g. `[50, 500]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct BudgetRange {
    low: f64,
    high: f64,
}

impl BudgetRange {
    /// Builds a range, swapping the bounds if given in the wrong order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, price: f64) -> bool {
        (self.low..=self.high).contains(&price)
    }
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self::new(50.0, 500.0)
    }
}

impl From<[f64; 2]> for BudgetRange {
    fn from([a, b]: [f64; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<BudgetRange> for [f64; 2] {
    fn from(range: BudgetRange) -> Self {
        [range.low, range.high]
    }
}

/// Shopping preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    pub favorite_colors: Vec<String>,
    pub favorite_styles: Vec<String>,
    pub size_preferences: Vec<String>,
    pub budget_range: BudgetRange,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            favorite_colors: strings(&["Blue", "Black", "White"]),
            favorite_styles: strings(&["Casual", "Professional", "Elegant"]),
            size_preferences: strings(&["M", "L"]),
            budget_range: BudgetRange::default(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ============================================================================
// Partial updates
// ============================================================================

/// Shallow partial update of [`UserProfile`]: `Some` fields replace, `None` keep.
///
/// `id` and `avatar` are doubly optional so they can be cleared:
/// `Some(None)` sets them back to null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub id: Option<Option<String>>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<Option<String>>,
    pub style: Option<String>,
    pub body_type: Option<String>,
    pub preferences: Option<Vec<String>>,
    pub budget: Option<String>,
    pub measurements: Option<Measurements>,
}

impl ProfileUpdate {
    pub fn apply(self, profile: &UserProfile) -> UserProfile {
        UserProfile {
            id: self.id.unwrap_or_else(|| profile.id.clone()),
            name: self.name.unwrap_or_else(|| profile.name.clone()),
            email: self.email.unwrap_or_else(|| profile.email.clone()),
            avatar: self.avatar.unwrap_or_else(|| profile.avatar.clone()),
            style: self.style.unwrap_or_else(|| profile.style.clone()),
            body_type: self.body_type.unwrap_or_else(|| profile.body_type.clone()),
            preferences: self
                .preferences
                .unwrap_or_else(|| profile.preferences.clone()),
            budget: self.budget.unwrap_or_else(|| profile.budget.clone()),
            measurements: self.measurements.unwrap_or(profile.measurements),
        }
    }
}

/// Shallow partial update of [`UserPreferences`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesUpdate {
    pub favorite_colors: Option<Vec<String>>,
    pub favorite_styles: Option<Vec<String>>,
    pub size_preferences: Option<Vec<String>>,
    pub budget_range: Option<BudgetRange>,
}

impl PreferencesUpdate {
    pub fn apply(self, preferences: &UserPreferences) -> UserPreferences {
        UserPreferences {
            favorite_colors: self
                .favorite_colors
                .unwrap_or_else(|| preferences.favorite_colors.clone()),
            favorite_styles: self
                .favorite_styles
                .unwrap_or_else(|| preferences.favorite_styles.clone()),
            size_preferences: self
                .size_preferences
                .unwrap_or_else(|| preferences.size_preferences.clone()),
            budget_range: self.budget_range.unwrap_or(preferences.budget_range),
        }
    }
}
