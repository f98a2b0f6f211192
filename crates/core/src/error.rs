use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("container has no tab links")]
    NoTabs,

    #[error("no browser window or document")]
    NoDocument,

    /// Shown to the user through `Surface::report_error`.
    #[error("There is no such container.")]
    MissingSection { fragment: Option<String> },

    #[error("invalid tab options: {0}")]
    InvalidOptions(String),
}
