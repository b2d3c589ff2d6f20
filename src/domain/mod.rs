// Domain layer: models and ports. Nothing here touches processes or the filesystem.

pub mod model;
pub mod ports;
