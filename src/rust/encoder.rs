//! Turns a [`RawApplication`] into the fixed 16-value row the classifier was trained on.

use std::fmt;

use ndarray::Array2;

use crate::application::{Dependents, PropertyArea, RawApplication, EDUCATION, GENDER, YES_NO};

pub const FEATURE_COUNT: usize = 16;

/// Column names in model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "ApplicantIncome",
    "CoapplicantIncome",
    "LoanAmount",
    "Loan_Amount_Term",
    "Credit_History",
    "Gender",
    "Married",
    "Dependents_0",
    "Dependents_1",
    "Dependents_2",
    "Dependents_3+",
    "Education",
    "Self_Employed",
    "Property_Area_Rural",
    "Property_Area_Urban",
    "Property_Area_Semiurban",
];

/// One encoded sample. The length is fixed by the type, the order by [`FEATURE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The vector as a single-row matrix, the shape models predict on.
    pub fn to_sample(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, column)| self.0[column])
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// Encodes an application. Never fails: unknown categorical answers become
/// code 0 or fall into the catch-all one-hot slot.
pub fn encode(application: &RawApplication) -> FeatureVector {
    let dependents = Dependents::from_label(&application.dependents).one_hot();
    let property = PropertyArea::from_label(&application.property_area).one_hot();

    FeatureVector([
        application.applicant_income,
        application.coapplicant_income,
        application.loan_amount,
        application.loan_term,
        application.credit_history,
        f64::from(GENDER.code(&application.gender)),
        f64::from(YES_NO.code(&application.married)),
        dependents[0],
        dependents[1],
        dependents[2],
        dependents[3],
        f64::from(EDUCATION.code(&application.education)),
        f64::from(YES_NO.code(&application.self_employed)),
        property[0],
        property[1],
        property[2],
    ])
}
