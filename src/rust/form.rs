//! The prediction page's input widgets and the collector that turns widget
//! values into a [`RawApplication`].

use std::fmt;

use log::warn;

use crate::application::{CategoryMap, Dependents, PropertyArea, RawApplication, EDUCATION, GENDER, YES_NO};

pub const PAGE_PROMPT: &str =
    "YOU need to fill all necessary information in order to get a reply to your loan request!";
pub const SIDEBAR_HEADER: &str = "Information about the client:";

/// Inclusive range and starting value of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl SliderBounds {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const INCOME_SLIDER: SliderBounds = SliderBounds { min: 0.0, max: 10000.0, default: 0.0 };
pub const LOAN_AMOUNT_SLIDER: SliderBounds = SliderBounds { min: 9.0, max: 700.0, default: 200.0 };

/// Loan terms offered by the select box, in months.
pub const LOAN_TERMS: [f64; 9] = [12.0, 36.0, 60.0, 84.0, 120.0, 180.0, 240.0, 300.0, 360.0];
pub const CREDIT_HISTORY_OPTIONS: [f64; 2] = [0.0, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Slider(SliderBounds),
    /// A single choice among numbers (select box or radio).
    NumberChoice(&'static [f64]),
    /// A single choice among labels (radio).
    LabelChoice(Vec<&'static str>),
}

/// One labelled input on the prediction page.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub widget: Widget,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.widget {
            Widget::Slider(bounds) => write!(
                f,
                "{}: slider {}..={} (default {})",
                self.label, bounds.min, bounds.max, bounds.default
            ),
            Widget::NumberChoice(options) => {
                let options: Vec<String> = options.iter().map(|o| format!("{:.1}", o)).collect();
                write!(f, "{}: one of {}", self.label, options.join(", "))
            }
            Widget::LabelChoice(options) => write!(f, "{}: one of {}", self.label, options.join(", ")),
        }
    }
}

/// The widgets of the prediction page, in display order.
pub fn prediction_form() -> Vec<FormField> {
    vec![
        FormField { label: "ApplicantIncome", widget: Widget::Slider(INCOME_SLIDER) },
        FormField { label: "CoapplicantIncome", widget: Widget::Slider(INCOME_SLIDER) },
        FormField { label: "LoanAmount in K$", widget: Widget::Slider(LOAN_AMOUNT_SLIDER) },
        FormField { label: "Loan_Amount_Term", widget: Widget::NumberChoice(&LOAN_TERMS) },
        FormField { label: "Credit_History", widget: Widget::NumberChoice(&CREDIT_HISTORY_OPTIONS) },
        FormField { label: "Gender", widget: Widget::LabelChoice(GENDER.options().collect()) },
        FormField { label: "Married", widget: Widget::LabelChoice(YES_NO.options().collect()) },
        FormField { label: "Self Employed", widget: Widget::LabelChoice(YES_NO.options().collect()) },
        FormField { label: "Dependents", widget: Widget::LabelChoice(Dependents::OPTIONS.to_vec()) },
        FormField { label: "Education", widget: Widget::LabelChoice(EDUCATION.options().collect()) },
        FormField { label: "Property_Area", widget: Widget::LabelChoice(PropertyArea::OPTIONS.to_vec()) },
    ]
}

/// A numeric value no widget on the form could have produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be one of {options:?}, got {value}")]
    NotAnOption {
        field: &'static str,
        value: f64,
        options: Vec<f64>,
    },
}

/// Collects widget values into a [`RawApplication`].
///
/// Starts from the widget defaults. Numeric setters reject values outside the
/// widget's range or options. Categorical setters accept any string unchanged
/// and only warn, leaving unknown values to the encoder's fallback rules.
///
/// # Example
/// ```
/// use loanwise::FormCollector;
///
/// let application = FormCollector::new()
///     .applicant_income(5000.0)?
///     .loan_term(360.0)?
///     .married("Yes")
///     .collect();
/// assert_eq!(application.gender, "Male");
/// # Ok::<(), loanwise::FormError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormCollector {
    application: RawApplication,
}

impl Default for FormCollector {
    fn default() -> Self {
        Self {
            application: RawApplication {
                applicant_income: INCOME_SLIDER.default,
                coapplicant_income: INCOME_SLIDER.default,
                loan_amount: LOAN_AMOUNT_SLIDER.default,
                loan_term: LOAN_TERMS[0],
                credit_history: CREDIT_HISTORY_OPTIONS[0],
                gender: first_option(&GENDER),
                married: first_option(&YES_NO),
                self_employed: first_option(&YES_NO),
                dependents: Dependents::OPTIONS[0].to_string(),
                education: first_option(&EDUCATION),
                property_area: PropertyArea::OPTIONS[0].to_string(),
            },
        }
    }
}

fn first_option(map: &CategoryMap) -> String {
    map.options().next().unwrap_or_default().to_string()
}

fn check_slider(field: &'static str, value: f64, bounds: SliderBounds) -> Result<f64, FormError> {
    if bounds.contains(value) {
        Ok(value)
    } else {
        Err(FormError::OutOfRange { field, value, min: bounds.min, max: bounds.max })
    }
}

fn check_choice(field: &'static str, value: f64, options: &[f64]) -> Result<f64, FormError> {
    if options.contains(&value) {
        Ok(value)
    } else {
        Err(FormError::NotAnOption { field, value, options: options.to_vec() })
    }
}

fn warn_unless_offered(field: &str, value: &str, offered: bool) {
    if !offered {
        warn!("{} value '{}' is not one of the form options", field, value);
    }
}

impl FormCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applicant_income(mut self, value: f64) -> Result<Self, FormError> {
        self.application.applicant_income = check_slider("ApplicantIncome", value, INCOME_SLIDER)?;
        Ok(self)
    }

    pub fn coapplicant_income(mut self, value: f64) -> Result<Self, FormError> {
        self.application.coapplicant_income = check_slider("CoapplicantIncome", value, INCOME_SLIDER)?;
        Ok(self)
    }

    pub fn loan_amount(mut self, value: f64) -> Result<Self, FormError> {
        self.application.loan_amount = check_slider("LoanAmount", value, LOAN_AMOUNT_SLIDER)?;
        Ok(self)
    }

    pub fn loan_term(mut self, value: f64) -> Result<Self, FormError> {
        self.application.loan_term = check_choice("Loan_Amount_Term", value, &LOAN_TERMS)?;
        Ok(self)
    }

    pub fn credit_history(mut self, value: f64) -> Result<Self, FormError> {
        self.application.credit_history = check_choice("Credit_History", value, &CREDIT_HISTORY_OPTIONS)?;
        Ok(self)
    }

    pub fn gender(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        warn_unless_offered("Gender", &value, GENDER.contains(&value));
        self.application.gender = value;
        self
    }

    pub fn married(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        warn_unless_offered("Married", &value, YES_NO.contains(&value));
        self.application.married = value;
        self
    }

    pub fn self_employed(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        warn_unless_offered("Self Employed", &value, YES_NO.contains(&value));
        self.application.self_employed = value;
        self
    }

    pub fn dependents(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        warn_unless_offered("Dependents", &value, Dependents::OPTIONS.contains(&value.as_str()));
        self.application.dependents = value;
        self
    }

    pub fn education(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        warn_unless_offered("Education", &value, EDUCATION.contains(&value));
        self.application.education = value;
        self
    }

    pub fn property_area(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        warn_unless_offered("Property_Area", &value, PropertyArea::OPTIONS.contains(&value.as_str()));
        self.application.property_area = value;
        self
    }

    pub fn collect(self) -> RawApplication {
        self.application
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_widgets() {
        let application = FormCollector::new().collect();
        assert_eq!(application.applicant_income, 0.0);
        assert_eq!(application.loan_amount, 200.0);
        assert_eq!(application.loan_term, 12.0);
        assert_eq!(application.credit_history, 0.0);
        assert_eq!(application.gender, "Male");
        assert_eq!(application.married, "No");
        assert_eq!(application.self_employed, "No");
        assert_eq!(application.dependents, "0");
        assert_eq!(application.education, "Graduate");
        assert_eq!(application.property_area, "Rural");
    }

    #[test]
    fn test_slider_bounds() {
        assert!(FormCollector::new().applicant_income(10000.0).is_ok());
        assert!(FormCollector::new().loan_amount(9.0).is_ok());

        let err = FormCollector::new().loan_amount(8.5).unwrap_err();
        assert_eq!(
            err,
            FormError::OutOfRange { field: "LoanAmount", value: 8.5, min: 9.0, max: 700.0 }
        );
        assert!(FormCollector::new().coapplicant_income(-1.0).is_err());
        assert!(FormCollector::new().applicant_income(f64::NAN).is_err());
    }

    #[test]
    fn test_choice_options() {
        assert!(FormCollector::new().loan_term(84.0).is_ok());
        assert!(matches!(
            FormCollector::new().loan_term(100.0),
            Err(FormError::NotAnOption { field: "Loan_Amount_Term", .. })
        ));
        assert!(FormCollector::new().credit_history(0.5).is_err());
    }

    #[test]
    fn test_unknown_labels_pass_through() {
        let application = FormCollector::new().gender("Other").dependents("5").collect();
        assert_eq!(application.gender, "Other");
        assert_eq!(application.dependents, "5");
    }

    #[test]
    fn test_form_layout() {
        let form = prediction_form();
        assert_eq!(form.len(), 11);
        assert_eq!(form[2].to_string(), "LoanAmount in K$: slider 9..=700 (default 200)");
        assert_eq!(form[10].to_string(), "Property_Area: one of Rural, Urban, Semiurban");
        assert_eq!(form[4].to_string(), "Credit_History: one of 0.0, 1.0");
    }
}
