// Domain layer: form models and the observer port. No runtime dependencies beyond regex/serde.

pub mod model;
pub mod ports;
