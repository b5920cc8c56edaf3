#![forbid(unsafe_code)]

pub mod adjust;
pub mod cli;
pub mod error;
pub mod palettes;
pub mod resolve;
pub mod util;

pub use cli::run_from_env;
pub use error::{CliError, Result};
