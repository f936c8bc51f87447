use std::fmt;
use std::io;
use std::path::PathBuf;

/// Machine-readable error codes for scripts that wrap the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    GraphFileNotFound,
    GraphUnreadable,
    GraphSyntax,
    GraphStructure,
    GraphPrematureEof,
    GraphUnexpectedToken,
    ConfigParseError,
    InvalidParameter,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::GraphFileNotFound => "E1001",
            Self::GraphUnreadable => "E1006",
            Self::GraphSyntax => "E1002",
            Self::GraphStructure => "E1003",
            Self::GraphPrematureEof => "E1004",
            Self::GraphUnexpectedToken => "E1005",
            Self::ConfigParseError => "E2001",
            Self::InvalidParameter => "E2002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::GraphFileNotFound => "Graph file not found",
            Self::GraphUnreadable => "Graph file could not be read",
            Self::GraphSyntax => "Graph file is not valid GML",
            Self::GraphStructure => "Graph structure is invalid",
            Self::GraphPrematureEof => "Graph file ended unexpectedly",
            Self::GraphUnexpectedToken => "Unexpected character in graph file",
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidParameter => "Invalid solver or output parameter",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::GraphFileNotFound => Some("Check the path of the graph file."),
            Self::GraphUnreadable => {
                Some("Check read permissions and that the path names a regular file.")
            }
            Self::GraphSyntax => {
                Some("Check that every key has a value and that brackets are balanced.")
            }
            Self::GraphStructure => Some(
                "Every node needs a unique integer `id`; every edge needs `source` and `target` ids of existing nodes.",
            ),
            Self::GraphPrematureEof => Some("Look for an unterminated string or a key without a value."),
            Self::GraphUnexpectedToken => {
                Some("Keys are identifiers; values are numbers, quoted strings, or [ lists ].")
            }
            Self::ConfigParseError => Some("Fix syntax in linkrank.toml and retry."),
            Self::InvalidParameter => {
                Some("Damping must lie in [0, 1]; tolerance must be positive and finite.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    FileNotFound,
    Unreadable,
    MalformedSyntax,
    StructuralViolation,
    PrematureEndOfInput,
    UnexpectedToken,
}

impl LoadErrorKind {
    /// The [`ErrorCode`] reported for this kind.
    #[must_use]
    pub const fn error_code(self) -> ErrorCode {
        match self {
            Self::FileNotFound => ErrorCode::GraphFileNotFound,
            Self::Unreadable => ErrorCode::GraphUnreadable,
            Self::MalformedSyntax => ErrorCode::GraphSyntax,
            Self::StructuralViolation => ErrorCode::GraphStructure,
            Self::PrematureEndOfInput => ErrorCode::GraphPrematureEof,
            Self::UnexpectedToken => ErrorCode::GraphUnexpectedToken,
        }
    }
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FileNotFound => "file-not-found",
            Self::Unreadable => "unreadable",
            Self::MalformedSyntax => "malformed-syntax",
            Self::StructuralViolation => "structural-violation",
            Self::PrematureEndOfInput => "premature-end-of-input",
            Self::UnexpectedToken => "unexpected-token",
        };
        f.write_str(name)
    }
}

/// Errors raised while reading a graph description.
///
/// Any of these is fatal: the run aborts before a solver starts.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The graph file does not exist.
    #[error("graph file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The graph file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key/value structure is broken (missing value, stray `]`, unclosed `[`).
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A number literal exceeded the digit limit.
    #[error("number on line {line} has more than {limit} digits")]
    TooManyDigits { line: usize, limit: usize },

    /// Input ended inside a string or before a key received its value.
    #[error("unexpected end of input on line {line}: {message}")]
    PrematureEof { line: usize, message: String },

    /// A character that cannot start any token.
    #[error("unexpected character {found:?} on line {line}")]
    Unexpected { line: usize, found: char },

    /// Well-formed GML that does not describe a usable graph.
    #[error("invalid graph structure: {0}")]
    Structure(String),
}

impl LoadError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> LoadErrorKind {
        match self {
            Self::FileNotFound(_) => LoadErrorKind::FileNotFound,
            Self::Io { .. } => LoadErrorKind::Unreadable,
            Self::Syntax { .. } | Self::TooManyDigits { .. } => LoadErrorKind::MalformedSyntax,
            Self::PrematureEof { .. } => LoadErrorKind::PrematureEndOfInput,
            Self::Unexpected { .. } => LoadErrorKind::UnexpectedToken,
            Self::Structure(_) => LoadErrorKind::StructuralViolation,
        }
    }

    /// Shorthand for `self.kind().error_code()`.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.kind().error_code()
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("damping factor must lie in [0, 1], got {0}")]
    Damping(f64),

    #[error("tolerance must be positive and finite, got {0}")]
    Tolerance(f64),

    #[error("precision must be at most {max} digits, got {got}")]
    Precision { got: usize, max: usize },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } | Self::Parse { .. } => ErrorCode::ConfigParseError,
            Self::Damping(_) | Self::Tolerance(_) | Self::Precision { .. } => {
                ErrorCode::InvalidParameter
            }
        }
    }
}
