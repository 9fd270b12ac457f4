use airquality::GENERIC_FAILURE;

/// Why a dispatched lookup produced no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The request never produced an HTTP response.
    Transport(String),
    /// The server answered with a non-success status.
    Server { status: u16, message: Option<String> },
    /// A newer request superseded this one.
    Cancelled,
}

impl RequestError {
    /// Text for the error banner.
    pub fn banner_text(&self) -> &str {
        match self {
            RequestError::Transport(msg) if !msg.is_empty() => msg.as_str(),
            RequestError::Server {
                message: Some(msg), ..
            } => msg.as_str(),
            _ => GENERIC_FAILURE,
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::Transport(msg) => write!(f, "request failed: {msg}"),
            RequestError::Server { status, message } => write!(
                f,
                "server returned {status}: {}",
                message.as_deref().unwrap_or(GENERIC_FAILURE)
            ),
            RequestError::Cancelled => write!(f, "request superseded"),
        }
    }
}

impl std::error::Error for RequestError {}

/// Form input rejected before any request is made.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputError {
    EmptyAddress,
    MissingCoordinate,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::EmptyAddress => write!(f, "Enter an address before searching."),
            InputError::MissingCoordinate => write!(f, "Enter both latitude and longitude."),
        }
    }
}

impl std::error::Error for InputError {}

/// Device location could not be used.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The platform has no location service.
    Unsupported,
    /// Permission denied, position unavailable, or the lookup timed out.
    Unavailable,
}

impl std::fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeolocationError::Unsupported => {
                write!(f, "Geolocation is not supported in this browser.")
            }
            GeolocationError::Unavailable => write!(f, "Unable to get your location."),
        }
    }
}

impl std::error::Error for GeolocationError {}
