//! Infinite-grid block sequencer.
//!
//! The platform-agnostic core (`core`, `input`, `scene`) builds and tests on
//! the host. The browser frontend (canvas drawing, WebAudio, DOM listeners)
//! is compiled only for `wasm32`.

pub mod constants;
pub mod core;
pub mod input;
pub mod scene;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use app::start;
