//! Client-side checks for the quest answer forms.
//!
//! Every form whose id ends in `Form` refuses to submit while a required input
//! is blank; blank inputs flash a red border and a banner appears above the
//! first form on the page.

mod dom;

pub use dom::mount;

pub const TRACKED_FORM_SUFFIX: &str = "Form";
pub const REQUIRED_INPUTS_SELECTOR: &str = "input[required]";
pub const TYPED_INPUTS_SELECTOR: &str = "input[type=\"text\"], input[type=\"number\"]";

pub const ERROR_BORDER_COLOR: &str = "#d32f2f";
pub const BORDER_RESET_MS: u32 = 2000;
pub const BANNER_MS: u32 = 3000;
pub const BANNER_TEXT: &str = "Please fill in all required fields.";
pub const BANNER_CLASSES: &str = "error-message client-error";
pub const BANNER_SELECTOR: &str = ".client-error";
pub const BANNER_ANIMATION: &str = "shake 0.5s";

/// Forms whose `#answer` field submits on Enter.
pub const ENTER_SUBMIT_FORMS: [&str; 2] = ["bitwiseForm", "base64Form"];
pub const ANSWER_INPUT_SELECTOR: &str = "#answer";

pub fn is_tracked_form(id: &str) -> bool {
    id.ends_with(TRACKED_FORM_SUFFIX)
}

pub fn submits_on_enter(form_id: &str) -> bool {
    ENTER_SUBMIT_FORMS.contains(&form_id)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormVerdict {
    Valid,
    /// Indices of the blank required inputs, in document order.
    Blank(Vec<usize>),
}

impl FormVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, FormVerdict::Valid)
    }
}

/// Judge the values of a form's required inputs.
pub fn check_required<S: AsRef<str>>(values: &[S]) -> FormVerdict {
    let blank: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.as_ref().trim().is_empty())
        .map(|(i, _)| i)
        .collect();
    if blank.is_empty() { FormVerdict::Valid } else { FormVerdict::Blank(blank) }
}
