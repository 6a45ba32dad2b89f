//! Unified error interface for the overlord crates.
//!
//! This module provides the [`ErrorCode`] trait implemented by every error
//! enum in the workspace, plus test helpers that keep the code namespace
//! consistent.
//!
//! # Error Code Convention
//!
//! | Crate | Prefix |
//! |-------|--------|
//! | overlord-event | `EVENT_` |
//! | overlord-runtime | `RUNTIME_`, `HOST_` |
//!
//! Codes are UPPER_SNAKE_CASE and stable: changing one is an API break.
//!
//! # Example
//!
//! ```
//! use overlord_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     NotFound,
//!     Busy,
//! }
//!
//! impl ErrorCode for MyError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound => "MY_NOT_FOUND",
//!             Self::Busy => "MY_BUSY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! assert_eq!(MyError::Busy.code(), "MY_BUSY");
//! assert!(MyError::Busy.is_recoverable());
//! ```

/// Machine-readable error code contract.
///
/// Implementing this trait gives an error a stable UPPER_SNAKE_CASE code
/// for logging and programmatic handling, and a recoverability hint for
/// hosts deciding whether a retry could ever help.
pub trait ErrorCode {
    /// Returns the machine-readable code for this error.
    ///
    /// Codes are UPPER_SNAKE_CASE, prefixed with the owning layer's
    /// namespace (`EVENT_`, `RUNTIME_`, `HOST_`), and never change once
    /// published.
    fn code(&self) -> &'static str;

    /// Returns whether retrying the failed operation may succeed.
    ///
    /// Malformed input and logic errors are not recoverable; transient
    /// host conditions (a collaborator briefly unavailable) are.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that one error's code is well-formed and carries the prefix.
///
/// # Panics
///
/// Panics with a descriptive message when the code is empty, not
/// UPPER_SNAKE_CASE, or missing the prefix.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();
    assert!(
        code.starts_with(expected_prefix),
        "error code {code:?} must start with prefix {expected_prefix:?}"
    );
    assert!(
        is_upper_snake_case(code),
        "error code {code:?} must be UPPER_SNAKE_CASE"
    );
}

/// Asserts every listed error variant against [`assert_error_code`].
///
/// Sibling crates call this from a single test over an
/// `all_variants()` helper so a new variant cannot ship with a
/// malformed or mis-prefixed code.
///
/// # Example
///
/// ```
/// use overlord_types::{assert_error_codes, ErrorCode};
///
/// #[derive(Debug)]
/// enum MyError { A, B }
///
/// impl ErrorCode for MyError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::A => "MY_A",
///             Self::B => "MY_B",
///         }
///     }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_codes(&[MyError::A, MyError::B], "MY_");
/// ```
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum TestError {
        Transient,
        Permanent,
    }

    impl ErrorCode for TestError {
        fn code(&self) -> &'static str {
            match self {
                Self::Transient => "TEST_TRANSIENT",
                Self::Permanent => "TEST_PERMANENT",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn well_formed_codes_pass() {
        assert_error_codes(&[TestError::Transient, TestError::Permanent], "TEST_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn wrong_prefix_panics() {
        assert_error_code(&TestError::Transient, "WRONG_");
    }

    #[test]
    fn upper_snake_case_rules() {
        assert!(is_upper_snake_case("EVENT_TIMEOUT"));
        assert!(is_upper_snake_case("HOST_2_FAILED"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("_LEADING"));
        assert!(!is_upper_snake_case("TRAILING_"));
        assert!(!is_upper_snake_case("DOUBLE__UNDERSCORE"));
        assert!(!is_upper_snake_case("lower_case"));
    }
}
