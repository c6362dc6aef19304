/// Shader system configuration
///
/// Capacities replace the fixed-size arrays of a classic renderer: each
/// registry grows on demand but refuses to go past its limit.

/// Configuration for a [`ShaderSystem`](crate::shaderkit::ShaderSystem)
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSystemConfig {
    /// Maximum number of shader objects (compiled or not) kept registered
    pub max_shaders: usize,
    /// Maximum number of program objects (linked or not) kept registered
    pub max_programs: usize,
    /// Maximum number of active uniforms recorded per program
    pub max_program_uniforms: usize,
    /// Shader and program names are truncated to this many bytes
    pub max_name_length: usize,
    /// Uniform names are truncated to this many bytes
    pub max_uniform_name_length: usize,
    /// Compiler/linker diagnostics longer than this are truncated
    pub info_log_capacity: usize,
    /// Directory prefix of shader source files (`<prefix>/<name>.vs`)
    pub shader_path_prefix: String,
    /// Preamble prepended to every shader source, restored by `init_shaders`
    pub default_defines: String,
}

impl Default for ShaderSystemConfig {
    fn default() -> Self {
        Self {
            max_shaders: 256,
            max_programs: 256,
            max_program_uniforms: 64,
            max_name_length: 64,
            max_uniform_name_length: 64,
            info_log_capacity: 4096,
            shader_path_prefix: "gl2progs".to_string(),
            default_defines: "#version 120\n".to_string(),
        }
    }
}

impl ShaderSystemConfig {
    /// Override the shader capacity
    pub fn with_max_shaders(mut self, max_shaders: usize) -> Self {
        self.max_shaders = max_shaders;
        self
    }

    /// Override the program capacity
    pub fn with_max_programs(mut self, max_programs: usize) -> Self {
        self.max_programs = max_programs;
        self
    }

    /// Override the per-program uniform capacity
    pub fn with_max_program_uniforms(mut self, max_program_uniforms: usize) -> Self {
        self.max_program_uniforms = max_program_uniforms;
        self
    }

    /// Override the diagnostics buffer size
    pub fn with_info_log_capacity(mut self, info_log_capacity: usize) -> Self {
        self.info_log_capacity = info_log_capacity;
        self
    }

    /// Override the source directory prefix
    pub fn with_shader_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.shader_path_prefix = prefix.into();
        self
    }

    /// Override the default defines preamble
    pub fn with_default_defines(mut self, defines: impl Into<String>) -> Self {
        self.default_defines = defines.into();
        self
    }
}

/// Truncate `name` to at most `max_len` bytes on a char boundary
pub(crate) fn bounded_name(name: &str, max_len: usize) -> String {
    if name.len() <= max_len {
        return name.to_string();
    }
    let mut end = max_len;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
