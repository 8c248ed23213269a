use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Rule violations found while validating a contract are *not* errors: they are reported as
/// [`crate::metadata::diagnostics::Diagnostic`] values. This enum only covers failures of the
/// integration boundary, i.e. symbol data handed over by the host that cannot be interpreted at
/// all. The batch driver treats these as "skip this type" and keeps going.
///
/// # Error Categories
///
/// ## Host Data Errors
/// - [`Error::Malformed`] - Symbol data that violates basic structural expectations
/// - [`Error::NotAType`] - A symbol handed to the type visitor is not a type declaration
///
/// ## Catalog Errors
/// - [`Error::UnknownRule`] - A rule identifier that is not part of the diagnostic catalog
///
/// # Examples
///
/// ```rust
/// use protoscope::{Error, metadata::validation::Rule};
///
/// match Rule::from_id("rule-9999") {
///     Ok(rule) => println!("found {}", rule.id()),
///     Err(Error::UnknownRule(id)) => eprintln!("no such rule: {}", id),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The host supplied symbol data that could not be interpreted.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The visited symbol is not a type declaration.
    #[error("Symbol '{0}' is not a type declaration")]
    NotAType(String),

    /// The requested rule identifier is not part of the catalog.
    #[error("Unknown rule identifier - {0}")]
    UnknownRule(String),
}
