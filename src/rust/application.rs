//! Raw applicant inputs and the categorical code tables the model was trained with.

use serde::{Deserialize, Serialize};

/// A fixed table mapping a form option to the integer code the model expects.
///
/// Lookups are exact, case-sensitive string matches. A value that is not in the
/// table resolves to [`CategoryMap::UNKNOWN`] instead of failing; that code was
/// never seen during training, so the prediction for such an input is a
/// degenerate case rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMap {
    entries: &'static [(&'static str, u8)],
}

impl CategoryMap {
    /// Code used for any value missing from the table.
    pub const UNKNOWN: u8 = 0;

    pub const fn new(entries: &'static [(&'static str, u8)]) -> Self {
        Self { entries }
    }

    /// Returns the trained code for `value`, or [`CategoryMap::UNKNOWN`].
    pub fn code(&self, value: &str) -> u8 {
        self.entries
            .iter()
            .find(|(key, _)| *key == value)
            .map(|(_, code)| *code)
            .unwrap_or(Self::UNKNOWN)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|(key, _)| *key == value)
    }

    /// Option labels in table order. The first one is the widget default.
    pub fn options(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }
}

pub const GENDER: CategoryMap = CategoryMap::new(&[("Male", 1), ("Female", 2)]);

/// Shared by the "Married" and "Self Employed" questions.
pub const YES_NO: CategoryMap = CategoryMap::new(&[("No", 1), ("Yes", 2)]);

pub const EDUCATION: CategoryMap = CategoryMap::new(&[("Graduate", 1), ("Not Graduate", 2)]);

/// Number-of-dependents bucket, one-hot encoded into four slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependents {
    Zero,
    One,
    Two,
    ThreeOrMore,
}

impl Dependents {
    pub const OPTIONS: [&'static str; 4] = ["0", "1", "2", "3+"];

    /// Anything other than "0", "1" or "2" lands in the last bucket.
    pub fn from_label(label: &str) -> Self {
        match label {
            "0" => Self::Zero,
            "1" => Self::One,
            "2" => Self::Two,
            _ => Self::ThreeOrMore,
        }
    }

    pub fn one_hot(self) -> [f64; 4] {
        let mut slots = [0.0; 4];
        slots[self as usize] = 1.0;
        slots
    }
}

/// Property location, one-hot encoded as (rural, urban, semiurban).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyArea {
    Rural,
    Urban,
    Semiurban,
}

impl PropertyArea {
    pub const OPTIONS: [&'static str; 3] = ["Rural", "Urban", "Semiurban"];

    /// Anything other than "Urban" or "Semiurban" is treated as rural.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Urban" => Self::Urban,
            "Semiurban" => Self::Semiurban,
            _ => Self::Rural,
        }
    }

    pub fn one_hot(self) -> [f64; 3] {
        match self {
            Self::Rural => [1.0, 0.0, 0.0],
            Self::Urban => [0.0, 1.0, 0.0],
            Self::Semiurban => [0.0, 0.0, 1.0],
        }
    }
}

/// Everything the applicant entered on the prediction form, as entered.
///
/// Categorical answers are kept as the raw option strings so that the encoder
/// alone decides how unexpected values degrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawApplication {
    pub applicant_income: f64,
    pub coapplicant_income: f64,
    /// In thousands of dollars.
    pub loan_amount: f64,
    /// In months.
    pub loan_term: f64,
    /// 1.0 when the applicant has a credit history that meets guidelines.
    pub credit_history: f64,
    pub gender: String,
    pub married: String,
    pub self_employed: String,
    pub dependents: String,
    pub education: String,
    pub property_area: String,
}
