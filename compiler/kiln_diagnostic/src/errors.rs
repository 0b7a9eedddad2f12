//! Embedded error documentation for `--explain` support.
//!
//! Each error code has a markdown file in this directory explaining the
//! problem and how to fix it. The files are embedded at compile time.

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Markdown documentation for `code`, if any.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// Get all documented error codes.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    (ErrorCode::K0001, include_str!("errors/K0001.md")),
    (ErrorCode::K0002, include_str!("errors/K0002.md")),
    (ErrorCode::K0003, include_str!("errors/K0003.md")),
    (ErrorCode::K1001, include_str!("errors/K1001.md")),
    (ErrorCode::K1002, include_str!("errors/K1002.md")),
    (ErrorCode::K1003, include_str!("errors/K1003.md")),
    (ErrorCode::K1004, include_str!("errors/K1004.md")),
    (ErrorCode::K1005, include_str!("errors/K1005.md")),
    (ErrorCode::K1006, include_str!("errors/K1006.md")),
    (ErrorCode::K1007, include_str!("errors/K1007.md")),
    (ErrorCode::K2001, include_str!("errors/K2001.md")),
    (ErrorCode::K2002, include_str!("errors/K2002.md")),
    (ErrorCode::K2003, include_str!("errors/K2003.md")),
    (ErrorCode::K2004, include_str!("errors/K2004.md")),
    (ErrorCode::K2005, include_str!("errors/K2005.md")),
    (ErrorCode::K2006, include_str!("errors/K2006.md")),
    (ErrorCode::K2007, include_str!("errors/K2007.md")),
    (ErrorCode::K2008, include_str!("errors/K2008.md")),
    (ErrorCode::K2009, include_str!("errors/K2009.md")),
    (ErrorCode::K2010, include_str!("errors/K2010.md")),
    (ErrorCode::K3001, include_str!("errors/K3001.md")),
    (ErrorCode::K3002, include_str!("errors/K3002.md")),
    (ErrorCode::K3003, include_str!("errors/K3003.md")),
    (ErrorCode::K3004, include_str!("errors/K3004.md")),
    (ErrorCode::K3005, include_str!("errors/K3005.md")),
];
