// Domain layer: submission/record types and the store port.

pub mod model;
pub mod ports;
