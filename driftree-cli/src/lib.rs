//! Support library for the driftree CLI binary.
//!
//! Re-exports the command and logging modules so doctests and unit tests can
//! drive a sweep without forking a subprocess.

pub mod cli;
pub mod logging;
