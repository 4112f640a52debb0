//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part
//! of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                                  |
//! |-------|-----------|----------------------------------------------|
//! | 0     | Universal | Success                                      |
//! | 1     | Universal | General error (unspecified)                  |
//! | 2     | Universal | CLI usage error (bad args)                   |
//! | 3-9   | run       | Reconciliation-specific codes                |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Runtime failure: unreadable input file, missing column, bad order
/// preamble, artifact write error.
pub const EXIT_RUNTIME: u8 = 4;

/// Every order line failed to match (or the order was empty).
/// No artifacts are written.
pub const EXIT_NO_MATCHES: u8 = 5;

/// Some order lines failed to match. Artifacts for the matched set
/// were written; warn-level, not a hard failure.
pub const EXIT_UNMATCHED: u8 = 6;
