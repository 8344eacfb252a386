use std::fmt;

use thiserror::Error;

/// The step of the extraction session an error surfaced in.
///
/// Expected UI absences (a scroll control at its end-stop, an empty label
/// region) never reach this type; they are turned into control-flow signals
/// at the call site. Everything else carries the phase it failed in so the
/// terminal error names the last step that broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Connect,
    Navigate,
    FillForm,
    ListFlights,
    OpenGraph,
    Paginate,
    Persist,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Connect => "connect",
            Phase::Navigate => "navigate",
            Phase::FillForm => "fill search form",
            Phase::ListFlights => "list flights",
            Phase::OpenGraph => "open price graph",
            Phase::Paginate => "paginate price graph",
            Phase::Persist => "persist results",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not start a webdriver session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[error("{phase} failed: {source}")]
    Command {
        phase: Phase,
        #[source]
        source: fantoccini::error::CmdError,
    },

    #[error("{phase} failed: {reason}")]
    Page { phase: Phase, reason: String },

    #[error("selector error: {0}")]
    Selector(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("all {attempts} attempts failed, last failure: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<ExtractError>,
    },
}

impl ExtractError {
    /// Wrap a webdriver command error with the phase it happened in.
    pub fn command(phase: Phase, source: fantoccini::error::CmdError) -> Self {
        ExtractError::Command { phase, source }
    }

    /// A phase-scoped failure that is not a webdriver command error,
    /// e.g. an element that never appeared within its bounded wait.
    pub fn page(phase: Phase, reason: impl Into<String>) -> Self {
        ExtractError::Page {
            phase,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
