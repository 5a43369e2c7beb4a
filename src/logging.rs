// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! env_logger setup for binaries

/// Install `env_logger` with `antelope` logging at `level`.
///
/// `RUST_LOG`, when set, replaces the configured filter entirely. Calling
/// this twice is harmless; the second logger is ignored.
pub fn init_with_level(level: log::LevelFilter) {
    let filter = format!("{}={}", env!("CARGO_CRATE_NAME"), level.as_str().to_lowercase());
    let env = env_logger::Env::default().default_filter_or(filter);
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        log::debug!("logger already installed: {}", e);
    }
}
