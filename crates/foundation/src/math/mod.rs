pub mod spherical;
pub mod vec;

pub use spherical::*;
pub use vec::*;
