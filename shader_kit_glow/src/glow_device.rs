/// glow implementation of GraphicsDevice

use glow::HasContext;
use shader_kit::engine_err;
use shader_kit::engine_info;
use shader_kit::shaderkit::Result;
use shader_kit::shaderkit::device::{ActiveUniform, GraphicsDevice, ShaderStage};
use crate::glow_format::{stage_to_gl, uniform_format_from_gl};

const SOURCE: &str = "shaderkit::glow";

/// Graphics device backed by a [`glow`] context
pub struct GlowGraphicsDevice<H: HasContext> {
    context: H,
}

impl<H: HasContext> GlowGraphicsDevice<H> {
    /// Wrap a glow context
    ///
    /// # Safety
    ///
    /// The context must be current on the calling thread while this device
    /// (or a `ShaderSystem` owning it) is used, and when it is dropped.
    pub unsafe fn new(context: H) -> Self {
        let version = context.version();
        engine_info!(SOURCE, "OpenGL {}{}.{} ({})",
            if version.is_embedded { "ES " } else { "" },
            version.major,
            version.minor,
            version.vendor_info);

        Self { context }
    }

    /// The wrapped glow context
    pub fn context(&self) -> &H {
        &self.context
    }

    /// Unwrap the glow context
    pub fn into_inner(self) -> H {
        self.context
    }
}

// Safety for every block below: `new` requires the context to be current.
impl<H: HasContext> GraphicsDevice for GlowGraphicsDevice<H> {
    type Shader = H::Shader;
    type Program = H::Program;
    type UniformLocation = H::UniformLocation;

    // ===== SHADER OBJECTS =====

    fn create_shader(&mut self, stage: ShaderStage) -> Result<H::Shader> {
        let shader = unsafe { self.context.create_shader(stage_to_gl(stage)) };
        shader.map_err(|e| engine_err!(SOURCE, "Failed to create {} shader: {}", stage.label(), e))
    }

    fn shader_source(&mut self, shader: H::Shader, sources: &[&str]) {
        let source = sources.concat();
        unsafe { self.context.shader_source(shader, &source) }
    }

    fn compile_shader(&mut self, shader: H::Shader) {
        unsafe { self.context.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: H::Shader) -> bool {
        unsafe { self.context.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: H::Shader) -> String {
        unsafe { self.context.get_shader_info_log(shader) }
    }

    fn delete_shader(&mut self, shader: H::Shader) {
        unsafe { self.context.delete_shader(shader) }
    }

    // ===== PROGRAM OBJECTS =====

    fn create_program(&mut self) -> Result<H::Program> {
        let program = unsafe { self.context.create_program() };
        program.map_err(|e| engine_err!(SOURCE, "Failed to create program: {}", e))
    }

    fn attach_shader(&mut self, program: H::Program, shader: H::Shader) {
        unsafe { self.context.attach_shader(program, shader) }
    }

    fn detach_shader(&mut self, program: H::Program, shader: H::Shader) {
        unsafe { self.context.detach_shader(program, shader) }
    }

    fn bind_attrib_location(&mut self, program: H::Program, index: u32, name: &str) {
        unsafe { self.context.bind_attrib_location(program, index, name) }
    }

    fn link_program(&mut self, program: H::Program) {
        unsafe { self.context.link_program(program) }
    }

    fn program_link_status(&self, program: H::Program) -> bool {
        unsafe { self.context.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: H::Program) -> String {
        unsafe { self.context.get_program_info_log(program) }
    }

    fn delete_program(&mut self, program: H::Program) {
        unsafe { self.context.delete_program(program) }
    }

    fn use_program(&mut self, program: Option<H::Program>) {
        unsafe { self.context.use_program(program) }
    }

    // ===== REFLECTION =====

    fn attrib_location(&self, program: H::Program, name: &str) -> Option<u32> {
        unsafe { self.context.get_attrib_location(program, name) }
    }

    fn active_uniform_count(&self, program: H::Program) -> u32 {
        unsafe { self.context.get_active_uniforms(program) }
    }

    fn active_uniform(&self, program: H::Program, index: u32) -> Option<ActiveUniform> {
        let active = unsafe { self.context.get_active_uniform(program, index) }?;
        Some(ActiveUniform {
            name: active.name,
            size: active.size,
            format: uniform_format_from_gl(active.utype),
        })
    }

    fn uniform_location(&self, program: H::Program, name: &str) -> Option<H::UniformLocation> {
        unsafe { self.context.get_uniform_location(program, name) }
    }

    // ===== UNIFORM UPLOADS =====

    fn uniform_1_i32(&mut self, location: &H::UniformLocation, v0: i32) {
        unsafe { self.context.uniform_1_i32(Some(location), v0) }
    }

    fn uniform_1_f32(&mut self, location: &H::UniformLocation, v0: f32) {
        unsafe { self.context.uniform_1_f32(Some(location), v0) }
    }

    fn uniform_2_f32(&mut self, location: &H::UniformLocation, v0: f32, v1: f32) {
        unsafe { self.context.uniform_2_f32(Some(location), v0, v1) }
    }

    fn uniform_3_f32(&mut self, location: &H::UniformLocation, v0: f32, v1: f32, v2: f32) {
        unsafe { self.context.uniform_3_f32(Some(location), v0, v1, v2) }
    }

    fn uniform_4_f32(&mut self, location: &H::UniformLocation, v0: f32, v1: f32, v2: f32, v3: f32) {
        unsafe { self.context.uniform_4_f32(Some(location), v0, v1, v2, v3) }
    }

    fn uniform_1_f32_slice(&mut self, location: &H::UniformLocation, values: &[f32]) {
        unsafe { self.context.uniform_1_f32_slice(Some(location), values) }
    }

    fn uniform_2_f32_slice(&mut self, location: &H::UniformLocation, values: &[f32]) {
        unsafe { self.context.uniform_2_f32_slice(Some(location), values) }
    }

    fn uniform_3_f32_slice(&mut self, location: &H::UniformLocation, values: &[f32]) {
        unsafe { self.context.uniform_3_f32_slice(Some(location), values) }
    }

    fn uniform_4_f32_slice(&mut self, location: &H::UniformLocation, values: &[f32]) {
        unsafe { self.context.uniform_4_f32_slice(Some(location), values) }
    }

    fn uniform_matrix_3_f32_slice(&mut self, location: &H::UniformLocation, transpose: bool, values: &[f32]) {
        unsafe { self.context.uniform_matrix_3_f32_slice(Some(location), transpose, values) }
    }

    fn uniform_matrix_4_f32_slice(&mut self, location: &H::UniformLocation, transpose: bool, values: &[f32]) {
        unsafe { self.context.uniform_matrix_4_f32_slice(Some(location), transpose, values) }
    }
}
