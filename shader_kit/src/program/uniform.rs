/// Uniform introspection types
///
/// A [`Uniform`] is one active uniform of a linked program, discovered after
/// linking. Engine-reserved names are listed in a static well-known table
/// and must be declared with exactly the expected size and format.

use std::sync::OnceLock;
use rustc_hash::FxHashMap;
use crate::device::UniformFormat;
use super::program::ProgramKey;

// ===== WELL-KNOWN UNIFORMS =====

/// Kind of a uniform: one of the engine-reserved names, or `Custom`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    ClipPlane,
    ViewOrigin,
    ViewAxis,
    EntityOrigin,
    EntityAxis,
    SunOrigin,
    SunDirection,
    SunColor,
    ScreenMatrix,
    CoordScaleAndBias,
    ColorScaleAndBias,
    /// Any name not in the well-known table
    Custom,
}

/// Expected declaration of an engine-reserved uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellKnownUniform {
    pub name: &'static str,
    pub kind: UniformKind,
    pub size: i32,
    pub format: UniformFormat,
}

const fn well_known(name: &'static str, kind: UniformKind, format: UniformFormat) -> WellKnownUniform {
    WellKnownUniform { name, kind, size: 1, format }
}

static WELL_KNOWN_UNIFORMS: [WellKnownUniform; 11] = [
    well_known("u_ClipPlane", UniformKind::ClipPlane, UniformFormat::FloatVec4),
    well_known("u_ViewOrigin", UniformKind::ViewOrigin, UniformFormat::FloatVec3),
    well_known("u_ViewAxis", UniformKind::ViewAxis, UniformFormat::FloatMat3),
    well_known("u_EntityOrigin", UniformKind::EntityOrigin, UniformFormat::FloatVec3),
    well_known("u_EntityAxis", UniformKind::EntityAxis, UniformFormat::FloatMat3),
    well_known("u_SunOrigin", UniformKind::SunOrigin, UniformFormat::FloatVec3),
    well_known("u_SunDirection", UniformKind::SunDirection, UniformFormat::FloatVec3),
    well_known("u_SunColor", UniformKind::SunColor, UniformFormat::FloatVec3),
    well_known("u_ScreenMatrix", UniformKind::ScreenMatrix, UniformFormat::FloatMat4),
    well_known("u_CoordScaleAndBias", UniformKind::CoordScaleAndBias, UniformFormat::FloatVec4),
    well_known("u_ColorScaleAndBias", UniformKind::ColorScaleAndBias, UniformFormat::FloatVec2),
];

static WELL_KNOWN_LOOKUP: OnceLock<FxHashMap<&'static str, usize>> = OnceLock::new();

/// The full well-known uniform table
pub fn well_known_uniforms() -> &'static [WellKnownUniform] {
    &WELL_KNOWN_UNIFORMS
}

/// Look up an engine-reserved uniform by (normalized) name
pub fn well_known_uniform(name: &str) -> Option<&'static WellKnownUniform> {
    let lookup = WELL_KNOWN_LOOKUP.get_or_init(|| {
        WELL_KNOWN_UNIFORMS
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.name, index))
            .collect()
    });
    lookup.get(name).map(|&index| &WELL_KNOWN_UNIFORMS[index])
}

/// Strip the `[0]` suffix drivers append to array uniform names
pub fn normalize_uniform_name(name: &str) -> &str {
    name.strip_suffix("[0]").unwrap_or(name)
}

// ===== UNIFORM =====

/// Active uniform of a linked program
///
/// Shape is fixed at link time. Only the bound sampler unit and the
/// last-written value cache change afterwards.
#[derive(Debug, Clone)]
pub struct Uniform<L> {
    pub(crate) name: String,
    pub(crate) kind: UniformKind,
    pub(crate) size: i32,
    pub(crate) format: UniformFormat,
    pub(crate) location: L,
    pub(crate) sampler_unit: Option<u32>,
    /// `None` once an array or matrix write made the cache meaningless
    pub(crate) last_value: Option<[f32; 4]>,
}

impl<L> Uniform<L> {
    /// New uniform with no sampler unit and a zeroed cache
    ///
    /// Linking zero-initializes every uniform, so the zero cache matches the
    /// device state.
    pub(crate) fn new(name: String, kind: UniformKind, size: i32, format: UniformFormat, location: L) -> Self {
        Self {
            name,
            kind,
            size,
            format,
            location,
            sampler_unit: None,
            last_value: Some([0.0; 4]),
        }
    }

    /// Normalized name (no `[0]` suffix)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> UniformKind {
        self.kind
    }

    /// Declared element count
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn format(&self) -> UniformFormat {
        self.format
    }

    /// Native location
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Texture unit bound through the sampler helpers, if any
    pub fn sampler_unit(&self) -> Option<u32> {
        self.sampler_unit
    }

    /// Last value written through a scalar or vector setter
    pub fn last_value(&self) -> Option<[f32; 4]> {
        self.last_value
    }

    /// Whether this uniform matches an explicit name/size/format request
    pub fn matches(&self, name: &str, size: i32, format: UniformFormat) -> bool {
        self.name == name && self.size == size && self.format == format
    }
}

// ===== HANDLE =====

/// Copyable handle to a uniform of a registered program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformHandle {
    pub(crate) program: ProgramKey,
    pub(crate) index: usize,
}

impl UniformHandle {
    /// Owning program
    pub fn program(&self) -> ProgramKey {
        self.program
    }

    /// Position in the program's uniform list
    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;
