pub mod blit;
pub mod glutils;
pub mod shaders;
pub mod system;

pub use system::{SdlPlatform, System};
