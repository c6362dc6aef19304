/// Compiled shader object
///
/// A shader is a single vertex or fragment stage. It is created by every load
/// request (no deduplication) and lives until the registry shuts down.

use crate::device::ShaderStage;

slotmap::new_key_type! {
    /// Non-owning handle to a shader in a [`ShaderRegistry`](super::ShaderRegistry)
    pub struct ShaderKey;
}

/// Shader object, generic over the device's native shader handle
#[derive(Debug)]
pub struct Shader<S> {
    name: String,
    stage: ShaderStage,
    native: S,
    compiled: bool,
    references: u32,
}

impl<S: Copy> Shader<S> {
    pub(crate) fn new(name: String, stage: ShaderStage, native: S) -> Self {
        Self {
            name,
            stage,
            native,
            compiled: false,
            references: 0,
        }
    }

    /// Shader name (without directory or extension)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pipeline stage
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Native handle
    pub fn native(&self) -> S {
        self.native
    }

    /// Whether the last compile succeeded
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Number of programs linked against this shader
    ///
    /// Informational only, shaders are never evicted.
    pub fn references(&self) -> u32 {
        self.references
    }

    pub(crate) fn set_compiled(&mut self, compiled: bool) {
        self.compiled = compiled;
    }

    pub(crate) fn add_reference(&mut self) {
        self.references += 1;
    }
}
