//! Application-level configuration.
//!
//! Learning hyperparameters live here so that grids, agents and pipelines can
//! share one validated description of a run.
//!
//! ```
//! use qmaze::app::LearningConfig;
//!
//! let config = LearningConfig::default()
//!     .with_epsilon(0.2)
//!     .with_step_limit(10_000)
//!     .with_seed(42);
//! config.validate()?;
//! # Ok::<(), qmaze::Error>(())
//! ```

pub mod config;

pub use config::LearningConfig;
