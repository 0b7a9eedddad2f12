//! Error codes for every generator diagnostic.
//!
//! Each code is a unique identifier (e.g., `K2004`) whose first digit names
//! the phase that reports it. Used for `--explain` lookups and documentation.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error codes for all generator diagnostics.
///
/// Format: K#### where the first digit indicates the phase:
/// - K0xxx: Model and configuration
/// - K1xxx: Equality generator
/// - K2xxx: Immutable generator
/// - K3xxx: Lifecycle generator
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Model / Config (K0xxx)
    /// A required well-known type is missing from the compilation
    K0001,
    /// Copy-ignore pattern is not a valid regular expression
    K0002,
    /// Program model could not be loaded
    K0003,

    // Equality (K1xxx)
    /// Equality target is not declared `partial`
    K1001,
    /// Base type does not override `Equals`
    K1002,
    /// Base type does not override `GetHashCode`
    K1003,
    /// No members take part in equality
    K1004,
    /// No members take part in hashing
    K1005,
    /// Key equality requested but `IKeyEquatable` is not referenced
    K1006,
    /// Member type does not implement `GetHashCode`
    K1007,

    // Immutable (K2xxx)
    /// Immutable target is not declared `partial`
    K2001,
    /// Immutable target is a value type
    K2002,
    /// Immutable base type has no resolvable builder
    K2003,
    /// Property has a setter
    K2004,
    /// Instance field is not `readonly`
    K2005,
    /// Member type is not immutable
    K2006,
    /// Generic parameter is not constrained to an immutable type
    K2007,
    /// Member type is a builder
    K2008,
    /// Indexers are not supported
    K2009,
    /// Base type is not immutable
    K2010,

    // Lifecycle (K3xxx)
    /// Lifecycle target is not declared `partial`
    K3001,
    /// Constructor methods disagree on a shared parameter
    K3002,
    /// Dispose or finalizer method takes parameters or returns a value
    K3003,
    /// Lifecycle method is static
    K3004,
    /// Base type's `Dispose` cannot be overridden
    K3005,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()`; the `all_variants_classified` test
    /// catches an omission.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::K0001,
        ErrorCode::K0002,
        ErrorCode::K0003,
        ErrorCode::K1001,
        ErrorCode::K1002,
        ErrorCode::K1003,
        ErrorCode::K1004,
        ErrorCode::K1005,
        ErrorCode::K1006,
        ErrorCode::K1007,
        ErrorCode::K2001,
        ErrorCode::K2002,
        ErrorCode::K2003,
        ErrorCode::K2004,
        ErrorCode::K2005,
        ErrorCode::K2006,
        ErrorCode::K2007,
        ErrorCode::K2008,
        ErrorCode::K2009,
        ErrorCode::K2010,
        ErrorCode::K3001,
        ErrorCode::K3002,
        ErrorCode::K3003,
        ErrorCode::K3004,
        ErrorCode::K3005,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::K0001 => "K0001",
            ErrorCode::K0002 => "K0002",
            ErrorCode::K0003 => "K0003",
            ErrorCode::K1001 => "K1001",
            ErrorCode::K1002 => "K1002",
            ErrorCode::K1003 => "K1003",
            ErrorCode::K1004 => "K1004",
            ErrorCode::K1005 => "K1005",
            ErrorCode::K1006 => "K1006",
            ErrorCode::K1007 => "K1007",
            ErrorCode::K2001 => "K2001",
            ErrorCode::K2002 => "K2002",
            ErrorCode::K2003 => "K2003",
            ErrorCode::K2004 => "K2004",
            ErrorCode::K2005 => "K2005",
            ErrorCode::K2006 => "K2006",
            ErrorCode::K2007 => "K2007",
            ErrorCode::K2008 => "K2008",
            ErrorCode::K2009 => "K2009",
            ErrorCode::K2010 => "K2010",
            ErrorCode::K3001 => "K3001",
            ErrorCode::K3002 => "K3002",
            ErrorCode::K3003 => "K3003",
            ErrorCode::K3004 => "K3004",
            ErrorCode::K3005 => "K3005",
        }
    }

    /// One-line summary, shown next to the code in `--explain` listings.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::K0001 => "required well-known type is missing",
            ErrorCode::K0002 => "invalid copy-ignore pattern",
            ErrorCode::K0003 => "program model could not be loaded",
            ErrorCode::K1001 | ErrorCode::K2001 | ErrorCode::K3001 => "type is not partial",
            ErrorCode::K1002 => "base type does not override Equals",
            ErrorCode::K1003 => "base type does not override GetHashCode",
            ErrorCode::K1004 => "no members used for equality",
            ErrorCode::K1005 => "no members used for hashing",
            ErrorCode::K1006 => "key equality support is not referenced",
            ErrorCode::K1007 => "member type does not implement GetHashCode",
            ErrorCode::K2002 => "immutable type must be a class",
            ErrorCode::K2003 => "base builder cannot be resolved",
            ErrorCode::K2004 => "property has a setter",
            ErrorCode::K2005 => "field is not readonly",
            ErrorCode::K2006 => "member type is not immutable",
            ErrorCode::K2007 => "generic parameter is not constrained to an immutable type",
            ErrorCode::K2008 => "member type is a builder",
            ErrorCode::K2009 => "indexers are not supported",
            ErrorCode::K2010 => "base type is not immutable",
            ErrorCode::K3002 => "constructor methods disagree on a parameter",
            ErrorCode::K3003 => "dispose or finalizer method has a wrong signature",
            ErrorCode::K3004 => "lifecycle method is static",
            ErrorCode::K3005 => "base Dispose cannot be overridden",
        }
    }

    /// Check if this is a model or configuration error (K0xxx range).
    pub fn is_model_error(&self) -> bool {
        matches!(self, ErrorCode::K0001 | ErrorCode::K0002 | ErrorCode::K0003)
    }

    /// Check if this is an equality generator code (K1xxx range).
    pub fn is_equality_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::K1001
                | ErrorCode::K1002
                | ErrorCode::K1003
                | ErrorCode::K1004
                | ErrorCode::K1005
                | ErrorCode::K1006
                | ErrorCode::K1007
        )
    }

    /// Check if this is an immutable generator code (K2xxx range).
    pub fn is_immutable_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::K2001
                | ErrorCode::K2002
                | ErrorCode::K2003
                | ErrorCode::K2004
                | ErrorCode::K2005
                | ErrorCode::K2006
                | ErrorCode::K2007
                | ErrorCode::K2008
                | ErrorCode::K2009
                | ErrorCode::K2010
        )
    }

    /// Check if this is a lifecycle generator code (K3xxx range).
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::K3001
                | ErrorCode::K3002
                | ErrorCode::K3003
                | ErrorCode::K3004
                | ErrorCode::K3005
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"K2004"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
