/// GraphicsDevice trait - the fixed set of verbs the shader system drives
///
/// This is the only way shader_kit talks to a graphics API. A backend
/// (e.g. `shader_kit_glow`) implements it on top of a live context bound to
/// the calling thread. All calls are synchronous.

use std::fmt::Debug;
use crate::error::Result;
use crate::device::UniformFormat;

// ============================================================================
// Common types
// ============================================================================

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// File extension of shader source for this stage
    pub fn extension(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Fragment => "fs",
        }
    }

    /// Human readable stage name used in log messages
    pub fn label(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// An active uniform as reported by the graphics API after linking
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveUniform {
    /// Name as reported, array uniforms typically end in `[0]`
    pub name: String,
    /// Declared element count (1 for non-arrays)
    pub size: i32,
    /// Declared data format
    pub format: UniformFormat,
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Graphics API boundary
///
/// Handles are opaque to the shader system; it only stores and hands them
/// back. Query methods take `&self`, state-changing verbs take `&mut self`.
pub trait GraphicsDevice {
    /// Native shader object
    type Shader: Copy + Debug;
    /// Native program object
    type Program: Copy + PartialEq + Debug;
    /// Native uniform location
    type UniformLocation: Clone + Debug;

    // ===== SHADER OBJECTS =====

    /// Create an empty shader object for `stage`
    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader>;

    /// Upload source, given as consecutive strings
    fn shader_source(&mut self, shader: Self::Shader, sources: &[&str]);

    /// Compile the uploaded source
    fn compile_shader(&mut self, shader: Self::Shader);

    /// Whether the last compile succeeded
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;

    /// Compiler diagnostics (empty when there are none)
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    /// Delete a shader object
    fn delete_shader(&mut self, shader: Self::Shader);

    // ===== PROGRAM OBJECTS =====

    /// Create an empty program object
    fn create_program(&mut self) -> Result<Self::Program>;

    /// Attach a shader to a program
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);

    /// Detach a shader from a program
    fn detach_shader(&mut self, program: Self::Program, shader: Self::Shader);

    /// Bind a named vertex attribute to a fixed index (effective at next link)
    fn bind_attrib_location(&mut self, program: Self::Program, index: u32, name: &str);

    /// Link the attached shaders
    fn link_program(&mut self, program: Self::Program);

    /// Whether the last link succeeded
    fn program_link_status(&self, program: Self::Program) -> bool;

    /// Linker diagnostics (empty when there are none)
    fn program_info_log(&self, program: Self::Program) -> String;

    /// Delete a program object
    fn delete_program(&mut self, program: Self::Program);

    /// Make `program` current, or unbind with `None`
    fn use_program(&mut self, program: Option<Self::Program>);

    // ===== REFLECTION =====

    /// Location of an active vertex attribute
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    /// Number of active uniforms
    fn active_uniform_count(&self, program: Self::Program) -> u32;

    /// Describe the active uniform at `index`
    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveUniform>;

    /// Location of a uniform, `None` for built-ins and unknown names
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    // ===== UNIFORM UPLOADS (current program) =====

    fn uniform_1_i32(&mut self, location: &Self::UniformLocation, v0: i32);
    fn uniform_1_f32(&mut self, location: &Self::UniformLocation, v0: f32);
    fn uniform_2_f32(&mut self, location: &Self::UniformLocation, v0: f32, v1: f32);
    fn uniform_3_f32(&mut self, location: &Self::UniformLocation, v0: f32, v1: f32, v2: f32);
    fn uniform_4_f32(&mut self, location: &Self::UniformLocation, v0: f32, v1: f32, v2: f32, v3: f32);

    /// Upload `values.len()` floats
    fn uniform_1_f32_slice(&mut self, location: &Self::UniformLocation, values: &[f32]);
    /// Upload `values.len() / 2` vec2 elements
    fn uniform_2_f32_slice(&mut self, location: &Self::UniformLocation, values: &[f32]);
    /// Upload `values.len() / 3` vec3 elements
    fn uniform_3_f32_slice(&mut self, location: &Self::UniformLocation, values: &[f32]);
    /// Upload `values.len() / 4` vec4 elements
    fn uniform_4_f32_slice(&mut self, location: &Self::UniformLocation, values: &[f32]);

    /// Upload `values.len() / 9` 3x3 matrices
    fn uniform_matrix_3_f32_slice(&mut self, location: &Self::UniformLocation, transpose: bool, values: &[f32]);
    /// Upload `values.len() / 16` 4x4 matrices
    fn uniform_matrix_4_f32_slice(&mut self, location: &Self::UniformLocation, transpose: bool, values: &[f32]);
}
