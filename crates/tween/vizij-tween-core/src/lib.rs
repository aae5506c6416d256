//! Vizij Tween Core (engine-agnostic)
//!
//! Per-frame scheduler for running tweens. The host frame loop owns a
//! [`TweenManager`] and calls [`TweenManager::tick`] once per frame; tween
//! implementations plug in through the [`Tweenable`] / [`TweenControl`] contracts.
//! Easing math and concrete value tweens live outside this crate.

pub mod config;
pub mod error;
pub mod ids;
pub mod manager;
pub mod tweenable;

// Re-exports for consumers (adapters)
pub use config::{CacheRules, Config, EaseType};
pub use error::TweenError;
pub use ids::{IdAllocator, ObjectId};
pub use manager::TweenManager;
pub use tweenable::{same_tween, TweenControl, TweenHandle, Tweenable};
