/// Program registry
///
/// Allocation-tracking list of every program object created, linked or not.
/// Linking runs the post-link introspection: engine attributes at their
/// fixed slots, then active uniform discovery against the well-known table.

use std::fmt::Debug;
use rustc_hash::FxHashSet;
use slotmap::DenseSlotMap;
use crate::config::{ShaderSystemConfig, bounded_name};
use crate::device::GraphicsDevice;
use crate::error::{Error, Result};
use crate::shader::{ShaderKey, ShaderRegistry};
use crate::shader::info_log::format_info_log;
use crate::{engine_bail_with, engine_debug, engine_trace, engine_warn};
use super::program::{Program, ProgramKey, VertexAttribs, FIXED_ATTRIBUTES};
use super::uniform::{Uniform, UniformKind, normalize_uniform_name, well_known_uniform};

const SOURCE: &str = "shaderkit::ProgramRegistry";

/// Registry of program objects
pub struct ProgramRegistry<P, L> {
    programs: DenseSlotMap<ProgramKey, Program<P, L>>,
    capacity: usize,
    max_name_length: usize,
    max_program_uniforms: usize,
    max_uniform_name_length: usize,
    info_log_capacity: usize,
}

impl<P: Copy + PartialEq + Debug, L: Clone + Debug> ProgramRegistry<P, L> {
    /// Create an empty registry with the limits of `config`
    pub fn new(config: &ShaderSystemConfig) -> Self {
        Self {
            programs: DenseSlotMap::with_key(),
            capacity: config.max_programs,
            max_name_length: config.max_name_length,
            max_program_uniforms: config.max_program_uniforms,
            max_uniform_name_length: config.max_uniform_name_length,
            info_log_capacity: config.info_log_capacity,
        }
    }

    // ===== LIFECYCLE =====

    pub fn init(&mut self) {
        engine_debug!(SOURCE, "Program registry ready ({} slots)", self.capacity);
    }

    /// Unbind, detach and delete every native program, then empty the registry
    ///
    /// Must run before the shader registry shuts down: detaching needs the
    /// shaders' native handles.
    pub fn shutdown<D>(&mut self, device: &mut D, shaders: &ShaderRegistry<D::Shader>)
    where
        D: GraphicsDevice<Program = P, UniformLocation = L> + ?Sized,
    {
        device.use_program(None);

        let count = self.programs.len();
        for (_, program) in self.programs.iter() {
            for key in [program.vertex_shader(), program.fragment_shader()] {
                match shaders.get(key) {
                    Some(shader) => device.detach_shader(program.native(), shader.native()),
                    None => engine_warn!(SOURCE,
                        "Program '{}' references a shader that is no longer registered", program.name()),
                }
            }
            device.delete_program(program.native());
        }
        self.programs.clear();

        engine_debug!(SOURCE, "Deleted {} programs", count);
    }

    // ===== LINKING =====

    /// Register and link a program from a vertex and a fragment shader
    ///
    /// Returns `Ok(None)` when linking fails; the program stays registered
    /// with no uniforms. An absent or empty `name` becomes
    /// `"<vertex name> & <fragment name>"`.
    ///
    /// # Errors
    ///
    /// - `MissingShader` when either shader is absent or no longer registered
    /// - `CapacityExceeded` when the registry or a program's uniform list is full
    /// - `UniformMismatch` when a well-known uniform has an unexpected declaration
    /// - `BackendError` when the native program cannot be created
    pub fn link<D>(
        &mut self,
        device: &mut D,
        shaders: &mut ShaderRegistry<D::Shader>,
        name: Option<&str>,
        vertex: Option<ShaderKey>,
        fragment: Option<ShaderKey>,
    ) -> Result<Option<ProgramKey>>
    where
        D: GraphicsDevice<Program = P, UniformLocation = L> + ?Sized,
    {
        let (vertex, vertex_native, vertex_name) = match vertex.and_then(|k| shaders.get(k).map(|s| (k, s))) {
            Some((key, shader)) => (key, shader.native(), shader.name().to_string()),
            None => engine_bail_with!(SOURCE, Error::MissingShader("vertex shader is None".to_string())),
        };
        let (fragment, fragment_native, fragment_name) = match fragment.and_then(|k| shaders.get(k).map(|s| (k, s))) {
            Some((key, shader)) => (key, shader.native(), shader.name().to_string()),
            None => engine_bail_with!(SOURCE, Error::MissingShader("fragment shader is None".to_string())),
        };

        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{} & {}", vertex_name, fragment_name),
        };
        let name = bounded_name(&name, self.max_name_length);

        if self.programs.len() >= self.capacity {
            engine_bail_with!(SOURCE, Error::CapacityExceeded {
                resource: "programs".to_string(),
                capacity: self.capacity,
            });
        }

        let native = device.create_program()?;
        let key = self.programs.insert(Program::new(name.clone(), vertex, fragment, native));

        device.attach_shader(native, vertex_native);
        device.attach_shader(native, fragment_native);
        for key in [vertex, fragment] {
            if let Some(shader) = shaders.get_mut(key) {
                shader.add_reference();
            }
        }

        for attribute in &FIXED_ATTRIBUTES {
            device.bind_attrib_location(native, attribute.index, attribute.name);
        }

        device.link_program(native);

        let log = device.program_info_log(native);
        if let Some(block) = format_info_log("Program Info Log", &log, self.info_log_capacity) {
            engine_debug!(SOURCE, "{}", block);
        }

        if !device.program_link_status(native) {
            engine_warn!(SOURCE, "Failed to link program '{}'", name);
            return Ok(None);
        }

        let attribs = detect_vertex_attribs(device, native);
        let uniforms = self.discover_uniforms(device, native, &name)?;

        if let Some(program) = self.programs.get_mut(key) {
            program.set_linked(true);
            program.set_vertex_attribs(attribs);
            program.commit_uniforms(uniforms);
        }

        Ok(Some(key))
    }

    /// Build the uniform table of a freshly linked program
    fn discover_uniforms<D>(&self, device: &D, native: P, program_name: &str) -> Result<Vec<Uniform<L>>>
    where
        D: GraphicsDevice<Program = P, UniformLocation = L> + ?Sized,
    {
        let count = device.active_uniform_count(native);
        let mut uniforms: Vec<Uniform<L>> = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for index in 0..count {
            let Some(active) = device.active_uniform(native, index) else {
                continue;
            };
            let reported = bounded_name(&active.name, self.max_uniform_name_length);

            // built-ins (gl_*) have no location
            let Some(location) = device.uniform_location(native, &reported) else {
                engine_trace!(SOURCE, "Skipping uniform '{}' without location", reported);
                continue;
            };

            let name = normalize_uniform_name(&reported).to_string();
            let kind = match well_known_uniform(&name) {
                Some(expected) => {
                    if active.size != expected.size {
                        engine_bail_with!(SOURCE, Error::UniformMismatch {
                            uniform: name,
                            program: program_name.to_string(),
                            detail: format!("size {} (expected {})", active.size, expected.size),
                        });
                    }
                    if active.format != expected.format {
                        engine_bail_with!(SOURCE, Error::UniformMismatch {
                            uniform: name,
                            program: program_name.to_string(),
                            detail: format!("format {:?} (expected {:?})", active.format, expected.format),
                        });
                    }
                    expected.kind
                }
                None => UniformKind::Custom,
            };

            if seen.contains(&name) {
                engine_warn!(SOURCE, "Duplicate uniform '{}' in program '{}'", name, program_name);
                continue;
            }

            if uniforms.len() >= self.max_program_uniforms {
                engine_bail_with!(SOURCE, Error::CapacityExceeded {
                    resource: format!("uniforms in program '{}'", program_name),
                    capacity: self.max_program_uniforms,
                });
            }

            seen.insert(name.clone());
            uniforms.push(Uniform::new(name, kind, active.size, active.format, location));
        }

        Ok(uniforms)
    }

    // ===== ACCESS =====

    /// Get a program by key
    pub fn get(&self, key: ProgramKey) -> Option<&Program<P, L>> {
        self.programs.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: ProgramKey) -> Option<&mut Program<P, L>> {
        self.programs.get_mut(key)
    }

    /// Iterate programs in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ProgramKey, &Program<P, L>)> {
        self.programs.iter()
    }

    /// Number of registered programs (linked or not)
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Number of successfully linked programs
    pub fn linked_count(&self) -> usize {
        self.programs.values().filter(|p| p.is_linked()).count()
    }

    /// Total uniforms across all programs
    pub fn uniform_count(&self) -> usize {
        self.programs.values().map(|p| p.uniforms().len()).sum()
    }

    /// Maximum number of programs
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Set a bit for each engine attribute the linker left at its fixed slot
fn detect_vertex_attribs<D>(device: &D, native: D::Program) -> VertexAttribs
where
    D: GraphicsDevice + ?Sized,
{
    FIXED_ATTRIBUTES
        .iter()
        .filter(|attribute| device.attrib_location(native, attribute.name) == Some(attribute.index))
        .fold(VertexAttribs::empty(), |attribs, attribute| attribs | attribute.flag)
}

#[cfg(test)]
#[path = "program_registry_tests.rs"]
mod tests;
