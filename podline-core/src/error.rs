use thiserror::Error;

/// Failure of a single outbound GET.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("response from {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: usize },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &url::Url, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                source: err,
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Cover sampling failures. These never reach API callers; the pipeline
/// falls back to the default gradient instead.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image decode task did not complete: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

/// Errors that abort card generation.
#[derive(Error, Debug)]
pub enum CardError {
    #[error("URL is required")]
    MissingLink,

    #[error("invalid URL {link:?}: {reason}")]
    InvalidLink { link: String, reason: String },

    #[error("failed to fetch page: {0}")]
    PageFetch(#[from] FetchError),

    #[error("required metadata missing: {0}")]
    MetadataMissing(&'static str),
}

impl CardError {
    /// Rejected before any network traffic.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingLink | Self::InvalidLink { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::PageFetch(err) if err.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, CardError>;
