// Domain layer: portal models and ports (storage + auth interfaces).

pub mod model;
pub mod ports;
