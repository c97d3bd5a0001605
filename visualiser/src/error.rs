use thiserror::Error;

/// Everything that can abort a report generation pass
///
/// There is no partial-success mode; the first failing record stops the whole run with a
/// message naming the offending scenario.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("input is not a scenario record or an array of scenario records: {message}")]
    Input { message: String },

    #[error("couldn't shape metrics for the {scenario} scenario: {message}")]
    Transform { scenario: String, message: String },

    #[error("no template registered for the {scenario} scenario")]
    MissingTemplate { scenario: String },

    #[error("couldn't generate HTML for the {scenario} scenario: {message}")]
    Render { scenario: String, message: String },
}

impl ReportError {
    pub(crate) fn transform(scenario: &str, message: impl ToString) -> Self {
        Self::Transform {
            scenario: scenario.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn render(scenario: &str, message: impl ToString) -> Self {
        Self::Render {
            scenario: scenario.to_string(),
            message: message.to_string(),
        }
    }
}
