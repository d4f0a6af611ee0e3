use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("No choice matching '{value}' for field '{field}'")]
    ChoiceNotFound { field: String, value: String },

    #[error("Select '{0}' does not allow multiple values")]
    MultipleNotAllowed(String),

    #[error("Element is not a form: <{0}>")]
    NotAForm(String),

    #[error("Form has neither an action nor a base URL to submit to")]
    NoSubmitUrl,

    #[error("Form has no submit control")]
    NoSubmitButton,

    #[error("Submit control selection did not match exactly one control: {0}")]
    SubmitNotFound(String),

    #[error("No form matched selector: {0}")]
    FormNotFound(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BrowserError>;
