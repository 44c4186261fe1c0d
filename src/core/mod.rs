pub mod aggregator;
pub mod debounce;
pub mod field;
pub mod form;

pub use crate::domain::model::{FieldRule, FieldSnapshot, FieldState, FieldStatus, FormState};
pub use crate::domain::ports::FormObserver;
pub use crate::utils::error::Result;
