pub mod camera;
pub mod components;
pub mod config;
pub mod earth;
pub mod materials;
pub mod mode;
pub mod prefabs;
pub mod splash;
pub mod transition;

pub use camera::*;
pub use config::*;
pub use earth::*;
pub use mode::*;
pub use transition::*;
