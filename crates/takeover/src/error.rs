use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    CliUsage(String),
    InvalidLogLevel(String),
    ScannerNotFound(String),

    #[from]
    LogInit(tracing_appender::rolling::InitError),

    #[from]
    File(std::io::Error),

    #[from]
    Reqwest(reqwest::Error),
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
