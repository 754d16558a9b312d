//! Library components of the `nutri` command line.

pub mod logging;
pub mod session;
pub mod settings;
