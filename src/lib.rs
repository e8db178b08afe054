//! atelier: terminal dashboard for a fashion manufacturing marketplace
//!
//! Designers create projects, upload their design files through a short
//! wizard, browse and filter a manufacturer catalog, contact a manufacturer
//! and follow up on samples, while each project's lifecycle stage is tracked.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::AppConfig;
pub use error::{AppError, Result};
