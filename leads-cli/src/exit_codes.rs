//! Process exit codes

/// The command did what was asked
pub const EXIT_SUCCESS: i32 = 0;

/// The command ran but only partly succeeded, e.g. some leads stayed behind
pub const EXIT_WARNING: i32 = 1;

/// The command failed
pub const EXIT_ERROR: i32 = 2;
