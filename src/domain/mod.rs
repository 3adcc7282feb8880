// Domain layer: entity models, store request/response shapes and the ports
// (interfaces) that adapters implement.

pub mod model;
pub mod ports;
pub mod query;
