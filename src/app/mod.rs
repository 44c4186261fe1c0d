pub mod session;

pub use session::{FormHandle, FormSession};
