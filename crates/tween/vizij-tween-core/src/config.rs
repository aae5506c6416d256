//! Scheduler-wide configuration record.
//!
//! These flags are read by tween factories and host integrations; the manager only
//! stores them and hands them out through [`crate::TweenManager::config`].

use serde::{Deserialize, Serialize};

use crate::error::TweenError;

/// Easing curve selector used when a factory is not given an explicit ease.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EaseType {
    Linear,
    SineIn,
    SineOut,
    SineInOut,
    QuadIn,
    QuadOut,
    QuadInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    #[default]
    QuartIn,
    QuartOut,
    QuartInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircleIn,
    CircleOut,
    CircleInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    Punch,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
}

/// Per-value-kind tween caching toggles.
///
/// Caching only applies to tweens created through factories that consult these
/// flags; custom tweens manage their own reuse.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheRules {
    pub int: bool,
    pub float: bool,
    pub vector2: bool,
    pub vector3: bool,
    pub vector4: bool,
    pub quaternion: bool,
    pub color: bool,
    pub rect: bool,
}

impl Default for CacheRules {
    fn default() -> Self {
        Self {
            int: true,
            float: true,
            vector2: true,
            vector3: false,
            vector4: false,
            quaternion: false,
            color: true,
            rect: false,
        }
    }
}

/// Configuration shared by the scheduler owner and tween factories.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_ease_type: EaseType,
    /// When set, tween targets validate the tweened object before writing to it.
    /// Custom targets opt in by doing the check themselves.
    pub enable_babysitter: bool,
    /// When set, hosts clear the active registry on level load.
    pub remove_all_tweens_on_level_load: bool,
    pub cache: CacheRules,
}

impl Config {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, TweenError> {
        Ok(serde_json::from_str(s)?)
    }
}
