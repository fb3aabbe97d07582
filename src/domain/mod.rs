// Domain layer: models, the maturity classifier and ports. No I/O here.

pub mod maturity;
pub mod model;
pub mod ports;
pub mod schema;
