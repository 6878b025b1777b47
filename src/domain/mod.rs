// Domain layer: snapshot models and the ports the client and storage implement.

pub mod model;
pub mod ports;
