/// Shader registry
///
/// Allocation-tracking list of every shader object created, compiled or not,
/// plus the defines preamble prepended to all sources. Shaders are never
/// deleted one at a time: [`shutdown`](ShaderRegistry::shutdown) deletes all
/// native objects at once.

use std::fmt::Debug;
use slotmap::DenseSlotMap;
use crate::config::{ShaderSystemConfig, bounded_name};
use crate::device::{GraphicsDevice, ShaderStage};
use crate::error::{Error, Result};
use crate::{engine_bail_with, engine_debug, engine_info, engine_warn};
use super::info_log::format_info_log;
use super::shader::{Shader, ShaderKey};

const SOURCE: &str = "shaderkit::ShaderRegistry";

/// Registry of shader objects
pub struct ShaderRegistry<S> {
    shaders: DenseSlotMap<ShaderKey, Shader<S>>,
    capacity: usize,
    max_name_length: usize,
    info_log_capacity: usize,
    default_defines: String,
    defines: String,
}

impl<S: Copy + Debug> ShaderRegistry<S> {
    /// Create an empty registry with the limits and preamble of `config`
    pub fn new(config: &ShaderSystemConfig) -> Self {
        Self {
            shaders: DenseSlotMap::with_key(),
            capacity: config.max_shaders,
            max_name_length: config.max_name_length,
            info_log_capacity: config.info_log_capacity,
            default_defines: config.default_defines.clone(),
            defines: config.default_defines.clone(),
        }
    }

    // ===== LIFECYCLE =====

    /// Reset the defines preamble to its default
    pub fn init(&mut self) {
        self.defines = self.default_defines.clone();
    }

    /// Delete every native shader and empty the registry
    pub fn shutdown<D>(&mut self, device: &mut D)
    where
        D: GraphicsDevice<Shader = S> + ?Sized,
    {
        let count = self.shaders.len();
        for (_, shader) in self.shaders.iter() {
            device.delete_shader(shader.native());
        }
        self.shaders.clear();

        engine_debug!(SOURCE, "Deleted {} shaders", count);
    }

    // ===== LOADING =====

    /// Register and compile a new shader from source text
    ///
    /// The shader stays registered even when compilation fails; check
    /// [`Shader::is_compiled`]. Diagnostics are logged whenever the compiler
    /// produced any.
    ///
    /// # Errors
    ///
    /// - `CapacityExceeded` when the registry is full (nothing is created)
    /// - `BackendError` when the native shader object cannot be created
    pub fn compile<D>(
        &mut self,
        device: &mut D,
        name: &str,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderKey>
    where
        D: GraphicsDevice<Shader = S> + ?Sized,
    {
        if self.shaders.len() >= self.capacity {
            engine_bail_with!(SOURCE, Error::CapacityExceeded {
                resource: "shaders".to_string(),
                capacity: self.capacity,
            });
        }

        let name = bounded_name(name, self.max_name_length);
        engine_debug!(SOURCE, "Compiling GLSL {} shader '{}'...", stage.label(), name);

        let native = device.create_shader(stage)?;
        let key = self.shaders.insert(Shader::new(name, stage, native));

        device.shader_source(native, &[self.defines.as_str(), source]);
        device.compile_shader(native);

        let log = device.shader_info_log(native);
        if let Some(block) = format_info_log("Shader Info Log", &log, self.info_log_capacity) {
            engine_info!(SOURCE, "{}", block);
        }

        let compiled = device.shader_compile_status(native);
        if let Some(shader) = self.shaders.get_mut(key) {
            shader.set_compiled(compiled);
            if !compiled {
                engine_warn!(SOURCE, "Failed to compile {} shader '{}'", stage.label(), shader.name());
            }
        }

        Ok(key)
    }

    // ===== DEFINES =====

    /// Preamble prepended to every shader source
    pub fn defines(&self) -> &str {
        &self.defines
    }

    /// Replace the preamble until the next [`init`](Self::init)
    pub fn set_defines(&mut self, defines: impl Into<String>) {
        self.defines = defines.into();
    }

    // ===== ACCESS =====

    /// Get a shader by key
    pub fn get(&self, key: ShaderKey) -> Option<&Shader<S>> {
        self.shaders.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: ShaderKey) -> Option<&mut Shader<S>> {
        self.shaders.get_mut(key)
    }

    /// Iterate shaders in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ShaderKey, &Shader<S>)> {
        self.shaders.iter()
    }

    /// Number of registered shaders (compiled or not)
    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    /// Whether no shader is registered
    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    /// Number of successfully compiled shaders
    pub fn compiled_count(&self) -> usize {
        self.shaders.values().filter(|s| s.is_compiled()).count()
    }

    /// Maximum number of shaders
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[path = "shader_registry_tests.rs"]
mod tests;
