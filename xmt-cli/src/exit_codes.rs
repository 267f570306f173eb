//! Stable exit codes for `xmt` commands.

/// Command succeeded, or `xmt confirm` was answered yes.
pub const OK: i32 = 0;
/// Invalid config, closed input, or any other error.
pub const FAILURE: i32 = 1;
/// `xmt confirm` was answered no.
pub const DECLINED: i32 = 2;
