//! Rolldown plugins contributed by libroll.
//!
//! Module resolution, JSON loading and CommonJS interop are built into
//! rolldown, so the chain only carries the transform-config plugin.

pub mod babel_config;

use std::sync::Arc;

use libroll_config::TransformConfig;
use rolldown_plugin::__inner::SharedPluginable;

pub use babel_config::BabelConfigPlugin;

/// Ordered plugin chain for one build.
pub fn plugin_chain(config: &TransformConfig) -> Vec<SharedPluginable> {
    vec![Arc::new(BabelConfigPlugin::new(config.clone()))]
}
