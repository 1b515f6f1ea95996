//! Lesson progress tracker for a static course site, compiled to wasm.
//!
//! On a course index it decorates every lesson entry with a status indicator
//! and fills in the course progress bar. On a lesson page it marks the lesson
//! started, then completed once the reader scrolls near the end. State lives in
//! `localStorage` as a flat `{"lesson-01": "completed", ...}` object.
//!
//! The logic modules are plain Rust and tested natively. Browser access is
//! confined to `dom` and `exports`, which only build for `wasm32`.

pub mod config;
pub mod indicator;
pub mod latch;
pub mod logging;
pub mod page;
pub mod status;
pub mod store;
pub mod summary;
pub mod tracker;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod exports;

pub use config::TrackerConfig;
pub use status::{LessonId, LessonStatus, ProgressRecord};
pub use store::{KeyValueStore, MemoryStore, ProgressRepository, StoreError};
pub use tracker::{LessonSession, Tracker};
