// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./dispatch.toml` > `~/.config/dispatch/dispatch.toml`
//! > `/etc/dispatch/dispatch.toml` with environment variable overrides via
//! the `DISPATCH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DispatchConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults (built-in roster and tables)
/// 2. `/etc/dispatch/dispatch.toml` (system-wide)
/// 3. `~/.config/dispatch/dispatch.toml` (user XDG config)
/// 4. `./dispatch.toml` (local directory)
/// 5. `DISPATCH_*` environment variables
pub fn load_config() -> Result<DispatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DispatchConfig::default()))
        .merge(Toml::file("/etc/dispatch/dispatch.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("dispatch/dispatch.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("dispatch.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DispatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DispatchConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DispatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DispatchConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `DISPATCH_ROUTER_ASSUMED_TASK_TOKENS`
/// must map to `router.assumed_task_tokens`, not `router.assumed.task.tokens`.
fn env_provider() -> Env {
    Env::prefixed("DISPATCH_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let mapped = key
            .as_str()
            .replacen("router_", "router.", 1)
            .replacen("stats_", "stats.", 1);
        mapped.into()
    })
}
