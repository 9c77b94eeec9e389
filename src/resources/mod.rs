//! Engine-owned per-context state: frame time, sampled input, live texture
//! handles and configuration.

pub mod engineconfig;
pub mod frameclock;
pub mod input;
pub mod texturestore;

pub use engineconfig::EngineConfig;
pub use frameclock::FrameClock;
pub use input::{FrameInput, InputSnapshot, Key, MouseButton};
pub use texturestore::{TextureHandle, TextureStore};
