//! Transform plugin driven by `.babelrc`-style configuration.
//!
//! Rolldown's built-in transformer does the actual work; this plugin decides,
//! per module, how a plain `.js` source should be parsed given the configured
//! presets, and keeps `ignore`/`only` paths out of that decision.

use std::borrow::Cow;

use libroll_config::TransformConfig;
use rolldown_common::ModuleType;
use rolldown_plugin::{
    HookTransformArgs, HookTransformOutput, HookTransformReturn, HookUsage, Plugin,
    SharedTransformPluginContext,
};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct BabelConfigPlugin {
    config: TransformConfig,
}

impl BabelConfigPlugin {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Module type a source should be parsed as, if different from rolldown's default.
    pub fn module_type_for(&self, id: &str) -> Option<ModuleType> {
        if id.contains("/node_modules/") || !self.config.applies_to(id) {
            return None;
        }

        let is_plain_js = matches!(extension(id), Some("js" | "mjs" | "cjs"));
        if !is_plain_js {
            return None;
        }

        let jsx = self.config.has_preset("react") || self.config.has_plugin("transform-react-jsx");
        let typescript = self.config.has_preset("typescript");

        match (typescript, jsx) {
            (true, true) => Some(ModuleType::Tsx),
            (true, false) => Some(ModuleType::Ts),
            (false, true) => Some(ModuleType::Jsx),
            (false, false) => None,
        }
    }
}

impl Plugin for BabelConfigPlugin {
    fn name(&self) -> Cow<'static, str> {
        "libroll-babelrc".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Transform
    }

    fn transform(
        &self,
        _ctx: SharedTransformPluginContext,
        args: &HookTransformArgs<'_>,
    ) -> impl std::future::Future<Output = HookTransformReturn> + Send {
        let id = args.id.to_string();
        let module_type = self.module_type_for(&id);

        async move {
            let Some(module_type) = module_type else {
                return Ok(None);
            };

            trace!("[libroll-babelrc] {} parsed as {:?}", id, module_type);
            Ok(Some(HookTransformOutput {
                code: None,
                map: None,
                side_effects: None,
                module_type: Some(module_type),
            }))
        }
    }
}

fn extension(id: &str) -> Option<&str> {
    let file = id.rsplit(['/', '\\']).next()?;
    let (_, ext) = file.rsplit_once('.')?;
    Some(ext)
}
