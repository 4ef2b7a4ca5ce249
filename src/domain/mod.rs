// Domain layer: core models, the output contract and ports (interfaces).

pub mod contract;
pub mod model;
pub mod ports;
