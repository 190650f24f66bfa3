//! CLI exit code registry.
//!
//! Exit codes are part of the shell contract; scripts rely on them.
//! clap owns exit 2 for usage errors.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Runtime failure: unreadable input, bad table data, unwritable output.
pub const EXIT_RUNTIME: u8 = 4;
