pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::session::{FormHandle, FormSession};
pub use config::toml_config::{FieldConfig, FormConfig};
pub use core::form::{FormEvent, RegistrationForm};
pub use domain::model::{FieldStatus, FormState, Registration};
pub use domain::ports::FormObserver;
pub use utils::error::{FormError, Result};
