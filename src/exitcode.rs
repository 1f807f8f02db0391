//! Standard exit codes (BSD sysexits.h compatible)

/// Dataset loaded but unusable (malformed, empty, no root)
pub const DATAERR: i32 = 65;

/// A collection could not be fetched
pub const NOINPUT: i32 = 66;

/// Remote data source unavailable
pub const UNAVAILABLE: i32 = 69;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
