/// Shader system - the owned context for shaders, programs and uniforms
///
/// Owns the graphics device, the file system, both registries and the
/// current-program slot. Every operation goes through it, so independent
/// instances never share state (apart from the global logger).

use crate::config::ShaderSystemConfig;
use crate::device::{GraphicsDevice, ShaderStage, UniformFormat};
use crate::error::{Error, Result};
use crate::file_system::FileSystem;
use crate::program::{
    Program, ProgramKey, ProgramRegistry, Uniform, UniformHandle, UniformUpdater,
    normalize_uniform_name,
};
use crate::program::uniform_update::bind_sampler_unit;
use crate::shader::{Shader, ShaderKey, ShaderRegistry};
use crate::{engine_bail_with, engine_debug, engine_info, engine_warn};

const SOURCE: &str = "shaderkit::ShaderSystem";

/// Registry counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShaderSystemStats {
    /// Registered shaders, compiled or not
    pub shaders: usize,
    pub compiled_shaders: usize,
    /// Registered programs, linked or not
    pub programs: usize,
    pub linked_programs: usize,
    /// Uniforms across all programs
    pub uniforms: usize,
}

/// Shader and program manager bound to one graphics device
///
/// # Example
///
/// ```no_run
/// use shader_kit::shaderkit::{ShaderSystem, ShaderSystemConfig};
/// use shader_kit::shaderkit::device::{GraphicsDevice, ShaderStage};
/// use shader_kit::shaderkit::file_system::DiskFileSystem;
///
/// fn load<D: GraphicsDevice>(device: D) -> shader_kit::shaderkit::Result<()> {
///     let mut system = ShaderSystem::new(
///         ShaderSystemConfig::default(),
///         device,
///         Box::new(DiskFileSystem::new("base")),
///     );
///
///     let vs = system.find_shader("interaction", ShaderStage::Vertex)?;
///     let fs = system.find_shader("interaction", ShaderStage::Fragment)?;
///     if let Some(program) = system.find_program(None, vs, fs)? {
///         system.bind_program(Some(program))?;
///         if let Some(origin) = system.program_uniform(program, "u_ViewOrigin") {
///             system.uniform_mut(origin)?.set_float3(0.0, 0.0, 64.0);
///         }
///     }
///
///     system.shutdown();
///     Ok(())
/// }
/// ```
pub struct ShaderSystem<D: GraphicsDevice> {
    /// Graphics device every verb goes through
    device: D,
    /// Source of shader text
    file_system: Box<dyn FileSystem>,
    config: ShaderSystemConfig,
    shaders: ShaderRegistry<D::Shader>,
    programs: ProgramRegistry<D::Program, D::UniformLocation>,
    /// Program last bound through `bind_program`
    bound_program: Option<ProgramKey>,
    /// False between `shutdown` and the next `init`
    initialized: bool,
}

impl<D: GraphicsDevice> ShaderSystem<D> {
    /// Create and initialize a shader system
    ///
    /// # Arguments
    ///
    /// * `config` - Capacities, source path prefix and default defines
    /// * `device` - Graphics device bound to the calling thread
    /// * `file_system` - Where shader sources are read from
    pub fn new(config: ShaderSystemConfig, device: D, file_system: Box<dyn FileSystem>) -> Self {
        let mut system = Self {
            device,
            file_system,
            shaders: ShaderRegistry::new(&config),
            programs: ProgramRegistry::new(&config),
            config,
            bound_program: None,
            initialized: false,
        };
        system.init();
        system
    }

    pub fn config(&self) -> &ShaderSystemConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        self.file_system.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ===== LIFECYCLE =====

    /// Initialize both registries
    pub fn init(&mut self) {
        self.init_shaders();
        self.init_programs();
    }

    /// Tear down programs, then shaders
    pub fn shutdown(&mut self) {
        self.shutdown_programs();
        self.shutdown_shaders();
    }

    /// Restore the default defines preamble
    pub fn init_shaders(&mut self) {
        self.shaders.init();
        self.initialized = true;
        engine_debug!(SOURCE, "Shaders initialized");
    }

    /// Delete every shader
    ///
    /// Programs still registered keep stale shader keys; shut programs down
    /// first.
    pub fn shutdown_shaders(&mut self) {
        self.shaders.shutdown(&mut self.device);
        self.initialized = false;
    }

    pub fn init_programs(&mut self) {
        self.programs.init();
    }

    /// Unbind, detach and delete every program
    pub fn shutdown_programs(&mut self) {
        self.programs.shutdown(&mut self.device, &self.shaders);
        self.bound_program = None;
    }

    // ===== SHADERS =====

    /// Load and compile `<prefix>/<name>.<vs|fs>`
    ///
    /// Returns `Ok(None)` for an empty name, a missing file, a failed compile
    /// (the shader stays registered) or an uninitialized system.
    ///
    /// # Errors
    ///
    /// Fatal errors of [`compile_shader`](Self::compile_shader).
    pub fn find_shader(&mut self, name: &str, stage: ShaderStage) -> Result<Option<ShaderKey>> {
        if name.is_empty() {
            return Ok(None);
        }
        if !self.initialized {
            engine_warn!(SOURCE, "Shader system not initialized, can't load '{}'", name);
            return Ok(None);
        }

        let path = format!("{}/{}.{}", self.config.shader_path_prefix, name, stage.extension());
        engine_info!(SOURCE, "{}", path);

        let Some(buffer) = self.file_system.read_file(&path) else {
            engine_warn!(SOURCE, "File not found: {}", path);
            return Ok(None);
        };

        let result = {
            let source = String::from_utf8_lossy(&buffer);
            self.shaders.compile(&mut self.device, name, stage, &source)
        };
        self.file_system.free_file(buffer);

        let key = result?;
        Ok(self.shaders.get(key).filter(|s| s.is_compiled()).map(|_| key))
    }

    /// Register and compile a shader from source text
    ///
    /// The key is returned even when compilation failed.
    ///
    /// # Errors
    ///
    /// - `CapacityExceeded` when `max_shaders` shaders are registered
    /// - `BackendError` when the native shader cannot be created
    pub fn compile_shader(&mut self, name: &str, stage: ShaderStage, source: &str) -> Result<ShaderKey> {
        self.shaders.compile(&mut self.device, name, stage, source)
    }

    pub fn shader(&self, key: ShaderKey) -> Option<&Shader<D::Shader>> {
        self.shaders.get(key)
    }

    /// Registered shaders in creation order
    pub fn shaders(&self) -> impl Iterator<Item = (ShaderKey, &Shader<D::Shader>)> {
        self.shaders.iter()
    }

    /// Preamble prepended to every shader source
    pub fn shader_defines(&self) -> &str {
        self.shaders.defines()
    }

    /// Replace the preamble until the next `init_shaders`
    pub fn set_shader_defines(&mut self, defines: impl Into<String>) {
        self.shaders.set_defines(defines);
    }

    // ===== PROGRAMS =====

    /// Link a program from two shaders
    ///
    /// Returns `Ok(None)` when linking fails (the program stays registered).
    ///
    /// # Errors
    ///
    /// - `MissingShader` when either shader is absent or stale
    /// - `CapacityExceeded` for the program registry or a program's uniforms
    /// - `UniformMismatch` when a well-known uniform is declared differently
    /// - `BackendError` when the native program cannot be created
    pub fn find_program(
        &mut self,
        name: Option<&str>,
        vertex: Option<ShaderKey>,
        fragment: Option<ShaderKey>,
    ) -> Result<Option<ProgramKey>> {
        self.programs.link(&mut self.device, &mut self.shaders, name, vertex, fragment)
    }

    pub fn program(&self, key: ProgramKey) -> Option<&Program<D::Program, D::UniformLocation>> {
        self.programs.get(key)
    }

    /// Registered programs in creation order
    pub fn programs(&self) -> impl Iterator<Item = (ProgramKey, &Program<D::Program, D::UniformLocation>)> {
        self.programs.iter()
    }

    /// Make `program` current, or unbind with `None`
    ///
    /// Binding the program that is already current is skipped.
    ///
    /// # Errors
    ///
    /// `InvalidResource` for a stale key.
    pub fn bind_program(&mut self, program: Option<ProgramKey>) -> Result<()> {
        if program == self.bound_program {
            return Ok(());
        }

        let native = match program {
            Some(key) => match self.programs.get(key) {
                Some(program) => Some(program.native()),
                None => engine_bail_with!(SOURCE, Error::InvalidResource("stale program key".to_string())),
            },
            None => None,
        };

        self.device.use_program(native);
        self.bound_program = program;
        Ok(())
    }

    /// Program made current by the last `bind_program`
    pub fn bound_program(&self) -> Option<ProgramKey> {
        self.bound_program
    }

    // ===== UNIFORMS =====

    /// Find a uniform by name (`u_Foo[0]` and `u_Foo` are equivalent)
    pub fn program_uniform(&self, program: ProgramKey, name: &str) -> Option<UniformHandle> {
        let index = self.programs.get(program)?.find_uniform(normalize_uniform_name(name))?;
        Some(UniformHandle { program, index })
    }

    /// Find a uniform matching name, size and format exactly
    ///
    /// # Errors
    ///
    /// - `InvalidResource` for a stale program key
    /// - `UniformNotFound` when no uniform matches
    pub fn program_uniform_explicit(
        &self,
        program: ProgramKey,
        name: &str,
        size: i32,
        format: UniformFormat,
    ) -> Result<UniformHandle> {
        let Some(target) = self.programs.get(program) else {
            engine_bail_with!(SOURCE, Error::InvalidResource("stale program key".to_string()));
        };
        match target.find_uniform_explicit(name, size, format) {
            Some(index) => Ok(UniformHandle { program, index }),
            None => engine_bail_with!(SOURCE, Error::UniformNotFound {
                uniform: name.to_string(),
                program: target.name().to_string(),
            }),
        }
    }

    pub fn uniform(&self, handle: UniformHandle) -> Option<&Uniform<D::UniformLocation>> {
        self.programs.get(handle.program)?.uniform(handle.index)
    }

    /// Setters for one uniform
    ///
    /// Uploads target the currently bound program; bind the owning program
    /// with [`bind_program`](Self::bind_program) first.
    ///
    /// # Errors
    ///
    /// `InvalidResource` for a stale handle.
    pub fn uniform_mut(&mut self, handle: UniformHandle) -> Result<UniformUpdater<'_, D>> {
        let Some(uniform) = self.programs
            .get_mut(handle.program)
            .and_then(|p| p.uniform_mut(handle.index))
        else {
            engine_bail_with!(SOURCE, Error::InvalidResource("stale uniform handle".to_string()));
        };
        Ok(UniformUpdater::new(uniform, &mut self.device))
    }

    /// Bind a texture unit to a sampler uniform
    ///
    /// Returns `Ok(false)` when the uniform is already bound to `unit`.
    /// Otherwise the owning program is bound for the upload and the previously
    /// bound program restored afterwards.
    ///
    /// # Errors
    ///
    /// - `InvalidResource` for a stale handle
    /// - `InvalidSamplerUnit` when `unit` exceeds `i32::MAX`
    pub fn set_program_sampler(&mut self, uniform: UniformHandle, unit: u32) -> Result<bool> {
        let previous = self.bound_program
            .and_then(|key| self.programs.get(key))
            .map(|p| p.native());

        let Some(program) = self.programs.get_mut(uniform.program) else {
            engine_bail_with!(SOURCE, Error::InvalidResource("stale program key".to_string()));
        };
        let native = program.native();
        let Some(target) = program.uniform_mut(uniform.index) else {
            engine_bail_with!(SOURCE, Error::InvalidResource("stale uniform handle".to_string()));
        };

        bind_sampler_unit(&mut self.device, native, previous, target, unit)
    }

    /// Bind a texture unit to the sampler matching name, size and format
    ///
    /// # Errors
    ///
    /// - `UniformNotFound` when no uniform matches
    /// - `InvalidResource` for a stale program key
    pub fn set_program_sampler_explicit(
        &mut self,
        program: ProgramKey,
        name: &str,
        size: i32,
        format: UniformFormat,
        unit: u32,
    ) -> Result<bool> {
        let handle = self.program_uniform_explicit(program, name, size, format)?;
        self.set_program_sampler(handle, unit)
    }

    // ===== STATS =====

    pub fn stats(&self) -> ShaderSystemStats {
        ShaderSystemStats {
            shaders: self.shaders.len(),
            compiled_shaders: self.shaders.compiled_count(),
            programs: self.programs.len(),
            linked_programs: self.programs.linked_count(),
            uniforms: self.programs.uniform_count(),
        }
    }
}

#[cfg(test)]
#[path = "shader_system_tests.rs"]
mod tests;
