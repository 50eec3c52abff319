//! Engine configuration.

use std::str::FromStr;

use crate::types::{DEFAULT_MAX_DELTA_SECS, DEFAULT_TARGET_FPS};

/// Which terminal protocol drives the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Console screen-buffer protocol: positioned per-cell writes.
    Native,
    /// Terminal-library protocol: batched escape sequences.
    Posix,
}

impl BackendKind {
    /// Native console on Windows, POSIX terminal elsewhere.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::Native
        } else {
            Self::Posix
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Posix => "posix",
        }
    }
}

impl FromStr for BackendKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "console" | "windows" => Ok(Self::Native),
            "posix" | "curses" | "unix" => Ok(Self::Posix),
            _ => Err(()),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Frame rate cap; 0 disables pacing.
    pub target_fps: u32,
    /// Upper bound on the delta handed to animation code, in seconds.
    pub max_delta: f32,
    pub backend: BackendKind,
    /// Use the alternate screen.
    pub double_buffered: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            max_delta: DEFAULT_MAX_DELTA_SECS,
            backend: BackendKind::platform_default(),
            double_buffered: true,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let target_fps = lookup("THREES_FPS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.target_fps);

        let max_delta = lookup("THREES_MAX_DELTA")
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.max_delta);

        let backend = lookup("THREES_BACKEND")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.backend);

        let double_buffered = lookup("THREES_DOUBLE_BUFFER")
            .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(defaults.double_buffered);

        Self {
            target_fps,
            max_delta,
            backend,
            double_buffered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> EngineConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.target_fps, 60);
        assert!((cfg.max_delta - 0.03).abs() < f32::EPSILON);
        assert!(cfg.double_buffered);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("THREES_FPS", "0"),
            ("THREES_MAX_DELTA", "0.1"),
            ("THREES_BACKEND", "Native"),
            ("THREES_DOUBLE_BUFFER", "false"),
        ]);
        assert_eq!(cfg.target_fps, 0);
        assert!((cfg.max_delta - 0.1).abs() < f32::EPSILON);
        assert_eq!(cfg.backend, BackendKind::Native);
        assert!(!cfg.double_buffered);
    }

    #[test]
    fn test_garbage_keeps_defaults() {
        let cfg = config(&[
            ("THREES_FPS", "fast"),
            ("THREES_MAX_DELTA", "-1"),
            ("THREES_BACKEND", "gtk"),
        ]);
        assert_eq!(cfg.target_fps, 60);
        assert!((cfg.max_delta - 0.03).abs() < f32::EPSILON);
        assert_eq!(cfg.backend, BackendKind::platform_default());
    }

    #[test]
    fn test_backend_names() {
        assert_eq!("posix".parse(), Ok(BackendKind::Posix));
        assert_eq!(BackendKind::Native.name(), "native");
        assert!("".parse::<BackendKind>().is_err());
    }
}
