/// Linked shader program
///
/// A program pairs one vertex and one fragment shader from the shader
/// registry. Its shader references are non-owning keys: the shaders belong to
/// the [`ShaderRegistry`](crate::shader::ShaderRegistry) and must outlive the
/// program, which is why programs are always shut down first.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use slotmap::new_key_type;
use crate::device::UniformFormat;
use crate::shader::ShaderKey;
use super::uniform::Uniform;

new_key_type! {
    /// Non-owning handle to a program in a [`ProgramRegistry`](super::ProgramRegistry)
    pub struct ProgramKey;
}

bitflags! {
    /// Engine vertex attributes a program consumes at their fixed slots
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VertexAttribs: u32 {
        const TEXCOORD = 1 << 0;
        const TANGENT = 1 << 1;
        const BITANGENT = 1 << 2;
        const NORMAL = 1 << 3;
    }
}

/// Engine attribute bound to a fixed slot before linking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAttribute {
    pub name: &'static str,
    pub index: u32,
    pub flag: VertexAttribs,
}

/// Fixed attribute slots, bound on every program before it links
pub const FIXED_ATTRIBUTES: [FixedAttribute; 4] = [
    FixedAttribute { name: "attr_TexCoord", index: 8, flag: VertexAttribs::TEXCOORD },
    FixedAttribute { name: "attr_Tangent", index: 9, flag: VertexAttribs::TANGENT },
    FixedAttribute { name: "attr_Bitangent", index: 10, flag: VertexAttribs::BITANGENT },
    FixedAttribute { name: "attr_Normal", index: 11, flag: VertexAttribs::NORMAL },
];

/// Program object, generic over the device's native program and location handles
#[derive(Debug)]
pub struct Program<P, L> {
    name: String,
    vertex_shader: ShaderKey,
    fragment_shader: ShaderKey,
    native: P,
    linked: bool,
    vertex_attribs: VertexAttribs,
    uniforms: Vec<Uniform<L>>,
    uniform_lookup: FxHashMap<String, usize>,
}

impl<P: Copy, L> Program<P, L> {
    pub(crate) fn new(name: String, vertex_shader: ShaderKey, fragment_shader: ShaderKey, native: P) -> Self {
        Self {
            name,
            vertex_shader,
            fragment_shader,
            native,
            linked: false,
            vertex_attribs: VertexAttribs::empty(),
            uniforms: Vec::new(),
            uniform_lookup: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_shader(&self) -> ShaderKey {
        self.vertex_shader
    }

    pub fn fragment_shader(&self) -> ShaderKey {
        self.fragment_shader
    }

    /// Native handle
    pub fn native(&self) -> P {
        self.native
    }

    /// Whether the link succeeded
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Engine attributes found at their fixed slots
    pub fn vertex_attribs(&self) -> VertexAttribs {
        self.vertex_attribs
    }

    /// Active uniforms in discovery order (empty when the link failed)
    pub fn uniforms(&self) -> &[Uniform<L>] {
        &self.uniforms
    }

    pub fn uniform(&self, index: usize) -> Option<&Uniform<L>> {
        self.uniforms.get(index)
    }

    /// Index of the uniform with this normalized name
    pub fn find_uniform(&self, name: &str) -> Option<usize> {
        self.uniform_lookup.get(name).copied()
    }

    /// Index of the uniform matching name, size and format exactly
    pub fn find_uniform_explicit(&self, name: &str, size: i32, format: UniformFormat) -> Option<usize> {
        self.uniforms.iter().position(|u| u.matches(name, size, format))
    }

    pub(crate) fn uniform_mut(&mut self, index: usize) -> Option<&mut Uniform<L>> {
        self.uniforms.get_mut(index)
    }

    pub(crate) fn set_linked(&mut self, linked: bool) {
        self.linked = linked;
    }

    pub(crate) fn set_vertex_attribs(&mut self, attribs: VertexAttribs) {
        self.vertex_attribs = attribs;
    }

    /// Replace the uniform table in one step
    pub(crate) fn commit_uniforms(&mut self, uniforms: Vec<Uniform<L>>) {
        self.uniform_lookup = uniforms
            .iter()
            .enumerate()
            .map(|(index, uniform)| (uniform.name.clone(), index))
            .collect();
        self.uniforms = uniforms;
    }
}
