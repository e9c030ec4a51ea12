//! Result of an action as shown in the output panel.

/// Colour class of an output message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStatus {
    /// Regular program output and the idle placeholder
    #[default]
    Neutral,
    /// Progress and "not supported" notices
    Info,
    Success,
    Warning,
    Error,
}

/// Text plus colour class for the output panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub text: String,
    pub status: OutputStatus,
}

impl RunReport {
    pub fn new(text: impl Into<String>, status: OutputStatus) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }

    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, OutputStatus::Neutral)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, OutputStatus::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, OutputStatus::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, OutputStatus::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, OutputStatus::Error)
    }
}
