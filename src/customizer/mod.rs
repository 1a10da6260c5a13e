mod camera;
mod plugin;

pub use camera::*;
pub use plugin::*;
