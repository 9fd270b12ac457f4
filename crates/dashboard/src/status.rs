use airquality::GENERIC_FAILURE;

/// API health as shown in the header.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Status {
    Active,
    /// Also the state before the first response arrives.
    #[default]
    Error,
}

impl Status {
    pub fn is_ok(self) -> bool {
        self == Status::Active
    }

    pub fn text(self) -> &'static str {
        match self {
            Status::Active => "API: Active",
            Status::Error => "API: Error",
        }
    }

    /// CSS class toggled on the indicator.
    pub fn class(self) -> &'static str {
        match self {
            Status::Active => "ok",
            Status::Error => "bad",
        }
    }
}

/// The single dismissible error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBanner {
    message: Option<String>,
}

impl ErrorBanner {
    /// Shows `message`, or the generic failure text when it is empty.
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.message = Some(if message.is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        });
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    /// Current text; empty while hidden.
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    pub fn class(&self) -> &'static str {
        if self.is_visible() {
            "error-visible"
        } else {
            "error-hidden"
        }
    }
}
