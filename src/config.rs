//! Centralized configuration for RecordKit tooling.
//!
//! Goals:
//! - One place for the traversal defaults the CLI uses, instead of scattered env lookups.
//! - IterConfig::from_env() reads RK_* variables; unparsable values are ignored.
//! - ConfigBuilder (and with_* setters) override individual fields.
//!
//! Library calls never read the environment on their own: a `Window` is always
//! passed explicitly. `IterConfig::window()` turns the config into one.

use std::fmt;

use crate::iterate::Window;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IterConfig {
    /// Start index. None = 0 (or the last index for a negative step).
    /// Env: RK_START
    pub start: Option<isize>,

    /// Exclusive end index. None = unbounded.
    /// Env: RK_END
    pub end: Option<isize>,

    /// Increment per step.
    /// Env: RK_STEP (default 1)
    pub step: isize,

    /// Drop absent mapper results from map output.
    /// Env: RK_FILTER_ABSENT (default true; "0|false|off|no" => false)
    pub filter_absent: bool,

    /// Emit JSON instead of text.
    /// Env: RK_JSON (default false; "1|true|on|yes" => true)
    pub json: bool,
}

impl Default for IterConfig {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            step: 1,
            filter_absent: true,
            json: false,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl IterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("RK_START") {
            if let Ok(n) = v.trim().parse::<isize>() {
                cfg.start = Some(n);
            }
        }

        if let Some(v) = lookup("RK_END") {
            if let Ok(n) = v.trim().parse::<isize>() {
                cfg.end = Some(n);
            }
        }

        if let Some(v) = lookup("RK_STEP") {
            if let Ok(n) = v.trim().parse::<isize>() {
                cfg.step = n;
            }
        }

        if let Some(on) = lookup("RK_FILTER_ABSENT").as_deref().and_then(parse_flag) {
            cfg.filter_absent = on;
        }

        if let Some(on) = lookup("RK_JSON").as_deref().and_then(parse_flag) {
            cfg.json = on;
        }

        cfg
    }

    pub fn with_start(mut self, start: Option<isize>) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: Option<isize>) -> Self {
        self.end = end;
        self
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = step;
        self
    }

    pub fn with_filter_absent(mut self, on: bool) -> Self {
        self.filter_absent = on;
        self
    }

    pub fn with_json(mut self, on: bool) -> Self {
        self.json = on;
        self
    }

    pub fn build(self) -> Self {
        self
    }

    pub fn window(&self) -> Window {
        Window {
            start: self.start,
            end: self.end,
            step: self.step,
        }
    }
}

impl fmt::Display for IterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IterConfig {{ start: {}, end: {}, step: {}, filter_absent: {}, json: {} }}",
            self.start
                .map(|v| v.to_string())
                .unwrap_or_else(|| "default".to_string()),
            self.end
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unbounded".to_string()),
            self.step,
            self.filter_absent,
            self.json,
        )
    }
}

/// Builder that produces an IterConfig; starts from the environment.
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    cfg: IterConfig,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            cfg: IterConfig::from_env(),
        }
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: IterConfig::default(),
        }
    }

    pub fn start(mut self, start: Option<isize>) -> Self {
        self.cfg.start = start;
        self
    }

    pub fn end(mut self, end: Option<isize>) -> Self {
        self.cfg.end = end;
        self
    }

    pub fn step(mut self, step: isize) -> Self {
        self.cfg.step = step;
        self
    }

    pub fn filter_absent(mut self, on: bool) -> Self {
        self.cfg.filter_absent = on;
        self
    }

    pub fn json(mut self, on: bool) -> Self {
        self.cfg.json = on;
        self
    }

    pub fn build(self) -> IterConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_overrides_and_ignores_garbage() {
        let env: HashMap<&str, &str> = [
            ("RK_START", " 2 "),
            ("RK_END", "nope"),
            ("RK_STEP", "-1"),
            ("RK_FILTER_ABSENT", "off"),
            ("RK_JSON", "YES"),
        ]
        .into_iter()
        .collect();
        let cfg = IterConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.start, Some(2));
        assert_eq!(cfg.end, None);
        assert_eq!(cfg.step, -1);
        assert!(!cfg.filter_absent);
        assert!(cfg.json);
        assert_eq!(cfg.window(), Window::new().with_start(2).with_step(-1));
    }

    #[test]
    fn display_mentions_defaults() {
        let s = IterConfig::default().to_string();
        assert!(s.contains("start: default"));
        assert!(s.contains("end: unbounded"));
    }
}
