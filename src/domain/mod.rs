// Domain layer: catalog model and ports (interfaces). No IO here beyond serde.

pub mod model;
pub mod ports;
