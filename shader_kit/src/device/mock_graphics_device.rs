/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every call in order and emulates just enough of a GLSL driver to
/// exercise the registries: a shader compiles when its source has a `main`
/// and no `#error`, a program links when both attached shaders compiled, and
/// `uniform`/`attribute` declarations in the uploaded source become the
/// program's active uniforms and attributes.
///
/// Source conventions understood by the mock:
/// - `// warn: <text>` adds `<text>` to the compile info log
/// - `#error <text>` fails the compile with `<text>` in the info log
/// - `// link-error` fails the link of any program the shader is attached to

use crate::error::Result;
use crate::engine_bail;
use crate::device::{ActiveUniform, GraphicsDevice, ShaderStage, UniformFormat};

// ============================================================================
// Handles and recorded calls
// ============================================================================

/// Mock native shader handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockShaderId(pub u32);

/// Mock native program handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockProgramId(pub u32);

/// Payload of a recorded uniform upload
#[derive(Debug, Clone, PartialEq)]
pub enum UniformUpload {
    Int1(i32),
    Float1(f32),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
    Float1v(Vec<f32>),
    Float2v(Vec<f32>),
    Float3v(Vec<f32>),
    Float4v(Vec<f32>),
    Matrix3 { transpose: bool, values: Vec<f32> },
    Matrix4 { transpose: bool, values: Vec<f32> },
}

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    CreateShader(MockShaderId, ShaderStage),
    ShaderSource(MockShaderId, String),
    CompileShader(MockShaderId),
    DeleteShader(MockShaderId),
    CreateProgram(MockProgramId),
    AttachShader(MockProgramId, MockShaderId),
    DetachShader(MockProgramId, MockShaderId),
    BindAttribLocation(MockProgramId, u32, String),
    LinkProgram(MockProgramId),
    DeleteProgram(MockProgramId),
    UseProgram(Option<MockProgramId>),
    Uniform {
        /// Program current at the time of the upload
        program: Option<MockProgramId>,
        location: i32,
        upload: UniformUpload,
    },
}

// ============================================================================
// Emulated objects
// ============================================================================

#[derive(Debug)]
struct MockShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    info_log: String,
    deleted: bool,
}

#[derive(Debug, Default)]
struct MockProgramObject {
    attached: Vec<MockShaderId>,
    attrib_bindings: Vec<(u32, String)>,
    linked: bool,
    info_log: String,
    attributes: Vec<(String, u32)>,
    uniforms: Vec<(ActiveUniform, Option<i32>)>,
    deleted: bool,
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock graphics device that emulates a GLSL driver in memory
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    calls: Vec<MockCall>,
    shaders: Vec<MockShaderObject>,
    programs: Vec<MockProgramObject>,
    current_program: Option<MockProgramId>,
    forced_attrib_locations: Vec<(String, u32)>,
    /// Make the next `create_program` fail
    pub fail_create_program: bool,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, in order
    pub fn calls(&self) -> &[MockCall] {
        &self.calls
    }

    /// Forget recorded calls (emulated objects are kept)
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Recorded uniform uploads, in order
    pub fn uniform_uploads(&self) -> Vec<&MockCall> {
        self.calls.iter().filter(|c| matches!(c, MockCall::Uniform { .. })).collect()
    }

    /// Count recorded calls matching `predicate`
    pub fn count_calls(&self, predicate: impl Fn(&MockCall) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    /// Currently bound program
    pub fn current_program(&self) -> Option<MockProgramId> {
        self.current_program
    }

    /// Full source uploaded to a shader
    pub fn shader_source_text(&self, shader: MockShaderId) -> Option<&str> {
        self.shader(shader).map(|s| s.source.as_str())
    }

    /// Number of shader objects not yet deleted
    pub fn live_shader_count(&self) -> usize {
        self.shaders.iter().filter(|s| !s.deleted).count()
    }

    /// Number of program objects not yet deleted
    pub fn live_program_count(&self) -> usize {
        self.programs.iter().filter(|p| !p.deleted).count()
    }

    /// Report `location` for attribute `name` after linking, whatever was bound
    pub fn force_attrib_location(&mut self, name: &str, location: u32) {
        self.forced_attrib_locations.push((name.to_string(), location));
    }

    fn shader(&self, id: MockShaderId) -> Option<&MockShaderObject> {
        self.shaders.get((id.0 as usize).checked_sub(1)?)
    }

    fn program(&self, id: MockProgramId) -> Option<&MockProgramObject> {
        self.programs.get((id.0 as usize).checked_sub(1)?)
    }

    fn program_mut(&mut self, id: MockProgramId) -> Option<&mut MockProgramObject> {
        self.programs.get_mut((id.0 as usize).checked_sub(1)?)
    }

    fn record_uniform(&mut self, location: i32, upload: UniformUpload) {
        self.calls.push(MockCall::Uniform {
            program: self.current_program,
            location,
            upload,
        });
    }

    /// Emulated link: validates the attached stages and reflects the sources
    fn link(&mut self, id: MockProgramId) {
        let Some(program) = self.program(id) else { return };

        let attached: Vec<&MockShaderObject> = program.attached
            .iter()
            .filter_map(|s| self.shader(*s))
            .collect();

        let vertex_count = attached.iter().filter(|s| s.stage == ShaderStage::Vertex).count();
        let fragment_count = attached.iter().filter(|s| s.stage == ShaderStage::Fragment).count();

        let mut info_log = String::new();
        let mut linked = true;
        if attached.iter().any(|s| !s.compiled) {
            info_log.push_str("ERROR: One or more attached shaders not successfully compiled\n");
            linked = false;
        } else if vertex_count != 1 || fragment_count != 1 {
            info_log.push_str("ERROR: Program needs one vertex and one fragment shader\n");
            linked = false;
        } else if attached.iter().any(|s| s.source.contains("// link-error")) {
            info_log.push_str("ERROR: Linking failed: unresolved varying\n");
            linked = false;
        }

        let mut uniforms: Vec<(ActiveUniform, Option<i32>)> = Vec::new();
        let mut attributes: Vec<(String, u32)> = Vec::new();
        if linked {
            let mut next_location = 0i32;
            for shader in &attached {
                for active in parse_uniform_declarations(&shader.source) {
                    if uniforms.iter().any(|(u, _)| u.name == active.name) {
                        continue;
                    }
                    let location = if active.name.starts_with("gl_") {
                        None
                    } else {
                        next_location += 1;
                        Some(next_location - 1)
                    };
                    uniforms.push((active, location));
                }
            }

            let mut next_free = 0u32;
            for shader in attached.iter().filter(|s| s.stage == ShaderStage::Vertex) {
                for name in parse_attribute_declarations(&shader.source) {
                    let bound = program.attrib_bindings
                        .iter()
                        .find(|(_, n)| *n == name)
                        .map(|(index, _)| *index);
                    let forced = self.forced_attrib_locations
                        .iter()
                        .find(|(n, _)| *n == name)
                        .map(|(_, loc)| *loc);
                    let location = match forced.or(bound) {
                        Some(location) => location,
                        None => {
                            next_free += 1;
                            next_free - 1
                        }
                    };
                    attributes.push((name, location));
                }
            }
        }

        if let Some(program) = self.program_mut(id) {
            program.linked = linked;
            program.info_log = info_log;
            program.uniforms = uniforms;
            program.attributes = attributes;
        }
    }
}

/// Parse `uniform <type> <name>[<n>];` lines into active uniforms
fn parse_uniform_declarations(source: &str) -> Vec<ActiveUniform> {
    source
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("uniform ")?;
            let mut tokens = rest
                .split_whitespace()
                .filter(|t| !matches!(*t, "lowp" | "mediump" | "highp"));
            let type_name = tokens.next()?;
            let declarator = tokens.next()?.trim_end_matches(';');
            let format = UniformFormat::from_glsl(type_name)
                .unwrap_or(UniformFormat::Other(0));

            match declarator.split_once('[') {
                Some((name, count)) => {
                    let size = count.trim_end_matches(']').parse::<i32>().ok()?;
                    Some(ActiveUniform { name: format!("{}[0]", name), size, format })
                }
                None => Some(ActiveUniform { name: declarator.to_string(), size: 1, format }),
            }
        })
        .collect()
}

/// Parse `attribute <type> <name>;` / `in <type> <name>;` lines
fn parse_attribute_declarations(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let rest = line.strip_prefix("attribute ").or_else(|| line.strip_prefix("in "))?;
            let mut tokens = rest.split_whitespace();
            let _type_name = tokens.next()?;
            Some(tokens.next()?.trim_end_matches(';').to_string())
        })
        .collect()
}

/// Build the compile info log and status for a source text
fn emulate_compile(source: &str) -> (bool, String) {
    let mut info_log = String::new();
    for line in source.lines() {
        if let Some(text) = line.trim().strip_prefix("// warn:") {
            info_log.push_str(&format!("WARNING: 0:0: {}\n", text.trim()));
        }
    }

    if let Some(line) = source.lines().find(|l| l.trim().starts_with("#error")) {
        let text = line.trim().trim_start_matches("#error").trim();
        info_log.push_str(&format!("ERROR: 0:1: '#error' : {}\n", text));
        return (false, info_log);
    }

    if !source.contains("void main") {
        info_log.push_str("ERROR: 0:1: 'main' : function not defined\n");
        return (false, info_log);
    }

    (true, info_log)
}

impl GraphicsDevice for MockGraphicsDevice {
    type Shader = MockShaderId;
    type Program = MockProgramId;
    type UniformLocation = i32;

    fn create_shader(&mut self, stage: ShaderStage) -> Result<MockShaderId> {
        self.shaders.push(MockShaderObject {
            stage,
            source: String::new(),
            compiled: false,
            info_log: String::new(),
            deleted: false,
        });
        let id = MockShaderId(self.shaders.len() as u32);
        self.calls.push(MockCall::CreateShader(id, stage));
        Ok(id)
    }

    fn shader_source(&mut self, shader: MockShaderId, sources: &[&str]) {
        let text = sources.concat();
        if let Some(object) = (shader.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.shaders.get_mut(i))
        {
            object.source = text.clone();
        }
        self.calls.push(MockCall::ShaderSource(shader, text));
    }

    fn compile_shader(&mut self, shader: MockShaderId) {
        if let Some(object) = (shader.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.shaders.get_mut(i))
        {
            let (compiled, info_log) = emulate_compile(&object.source);
            object.compiled = compiled;
            object.info_log = info_log;
        }
        self.calls.push(MockCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: MockShaderId) -> bool {
        self.shader(shader).map(|s| s.compiled).unwrap_or(false)
    }

    fn shader_info_log(&self, shader: MockShaderId) -> String {
        self.shader(shader).map(|s| s.info_log.clone()).unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: MockShaderId) {
        if let Some(object) = (shader.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.shaders.get_mut(i))
        {
            object.deleted = true;
        }
        self.calls.push(MockCall::DeleteShader(shader));
    }

    fn create_program(&mut self) -> Result<MockProgramId> {
        if self.fail_create_program {
            self.fail_create_program = false;
            engine_bail!("shaderkit::mock", "create_program: out of program names");
        }
        self.programs.push(MockProgramObject::default());
        let id = MockProgramId(self.programs.len() as u32);
        self.calls.push(MockCall::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&mut self, program: MockProgramId, shader: MockShaderId) {
        if let Some(object) = self.program_mut(program) {
            object.attached.push(shader);
        }
        self.calls.push(MockCall::AttachShader(program, shader));
    }

    fn detach_shader(&mut self, program: MockProgramId, shader: MockShaderId) {
        if let Some(object) = self.program_mut(program) {
            object.attached.retain(|s| *s != shader);
        }
        self.calls.push(MockCall::DetachShader(program, shader));
    }

    fn bind_attrib_location(&mut self, program: MockProgramId, index: u32, name: &str) {
        if let Some(object) = self.program_mut(program) {
            object.attrib_bindings.push((index, name.to_string()));
        }
        self.calls.push(MockCall::BindAttribLocation(program, index, name.to_string()));
    }

    fn link_program(&mut self, program: MockProgramId) {
        self.link(program);
        self.calls.push(MockCall::LinkProgram(program));
    }

    fn program_link_status(&self, program: MockProgramId) -> bool {
        self.program(program).map(|p| p.linked).unwrap_or(false)
    }

    fn program_info_log(&self, program: MockProgramId) -> String {
        self.program(program).map(|p| p.info_log.clone()).unwrap_or_default()
    }

    fn delete_program(&mut self, program: MockProgramId) {
        if let Some(object) = self.program_mut(program) {
            object.deleted = true;
        }
        self.calls.push(MockCall::DeleteProgram(program));
    }

    fn use_program(&mut self, program: Option<MockProgramId>) {
        self.current_program = program;
        self.calls.push(MockCall::UseProgram(program));
    }

    fn attrib_location(&self, program: MockProgramId, name: &str) -> Option<u32> {
        let program = self.program(program)?;
        program.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, location)| *location)
    }

    fn active_uniform_count(&self, program: MockProgramId) -> u32 {
        self.program(program).map(|p| p.uniforms.len() as u32).unwrap_or(0)
    }

    fn active_uniform(&self, program: MockProgramId, index: u32) -> Option<ActiveUniform> {
        let program = self.program(program)?;
        program.uniforms.get(index as usize).map(|(u, _)| u.clone())
    }

    fn uniform_location(&self, program: MockProgramId, name: &str) -> Option<i32> {
        let program = self.program(program)?;
        if !program.linked {
            return None;
        }
        let base = name.strip_suffix("[0]").unwrap_or(name);
        program.uniforms
            .iter()
            .find(|(u, _)| u.name == name || u.name.strip_suffix("[0]") == Some(base))
            .and_then(|(_, location)| *location)
    }

    fn uniform_1_i32(&mut self, location: &i32, v0: i32) {
        self.record_uniform(*location, UniformUpload::Int1(v0));
    }

    fn uniform_1_f32(&mut self, location: &i32, v0: f32) {
        self.record_uniform(*location, UniformUpload::Float1(v0));
    }

    fn uniform_2_f32(&mut self, location: &i32, v0: f32, v1: f32) {
        self.record_uniform(*location, UniformUpload::Float2([v0, v1]));
    }

    fn uniform_3_f32(&mut self, location: &i32, v0: f32, v1: f32, v2: f32) {
        self.record_uniform(*location, UniformUpload::Float3([v0, v1, v2]));
    }

    fn uniform_4_f32(&mut self, location: &i32, v0: f32, v1: f32, v2: f32, v3: f32) {
        self.record_uniform(*location, UniformUpload::Float4([v0, v1, v2, v3]));
    }

    fn uniform_1_f32_slice(&mut self, location: &i32, values: &[f32]) {
        self.record_uniform(*location, UniformUpload::Float1v(values.to_vec()));
    }

    fn uniform_2_f32_slice(&mut self, location: &i32, values: &[f32]) {
        self.record_uniform(*location, UniformUpload::Float2v(values.to_vec()));
    }

    fn uniform_3_f32_slice(&mut self, location: &i32, values: &[f32]) {
        self.record_uniform(*location, UniformUpload::Float3v(values.to_vec()));
    }

    fn uniform_4_f32_slice(&mut self, location: &i32, values: &[f32]) {
        self.record_uniform(*location, UniformUpload::Float4v(values.to_vec()));
    }

    fn uniform_matrix_3_f32_slice(&mut self, location: &i32, transpose: bool, values: &[f32]) {
        self.record_uniform(*location, UniformUpload::Matrix3 { transpose, values: values.to_vec() });
    }

    fn uniform_matrix_4_f32_slice(&mut self, location: &i32, transpose: bool, values: &[f32]) {
        self.record_uniform(*location, UniformUpload::Matrix4 { transpose, values: values.to_vec() });
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
