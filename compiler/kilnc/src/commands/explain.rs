//! The `--explain` command: documentation for error codes.

use kiln_diagnostic::{ErrorCode, ErrorDocs};

use crate::DriverError;

/// The documentation of `code_str`.
pub fn explain(code_str: &str) -> Result<&'static str, DriverError> {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        return Err(DriverError::Usage(format!(
            "unknown error code: {code_str}\n\
             Codes have the format KXXXX where X is a digit, for example K2006."
        )));
    };
    ErrorDocs::get(code).ok_or_else(|| {
        DriverError::Usage(format!("no documentation available for {code}"))
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
