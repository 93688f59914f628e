// Domain layer: scrape result models and the browser capability ports.

pub mod model;
pub mod ports;
