//! # Autolink Configuration
//!
//! Settings for the autolink engine and loading of the authored
//! `(pattern, target)` definition pairs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autolink_config::ConfigLoader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("autolink.toml")?;
//!     let pairs = ConfigLoader::load_definitions("definitions.toml")?;
//!     let filter = config.pair_filter()?;
//!     let kept = pairs.iter().filter(|p| filter.allows(&p.pattern, &p.target)).count();
//!     println!("{kept} definitions after exclusions");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod loader;

pub use config::*;
pub use error::*;
pub use loader::*;
