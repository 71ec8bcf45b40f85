//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports the domain models and owns config loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use entitle_kernel::config::load_config;
//! use entitle_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap();
//! assert!(!cfg.log.level.is_empty());
//! ```
pub mod config;

pub use entitle_domain as domain;
