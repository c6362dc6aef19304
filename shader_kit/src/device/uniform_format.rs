/// Declared data format of an active uniform
///
/// Mirrors the GLSL uniform types a program can expose. Backends translate
/// their native type enum into this one when reporting active uniforms.

/// GLSL uniform data format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformFormat {
    Float,
    FloatVec2,
    FloatVec3,
    FloatVec4,
    Int,
    IntVec2,
    IntVec3,
    IntVec4,
    Bool,
    BoolVec2,
    BoolVec3,
    BoolVec4,
    FloatMat2,
    FloatMat3,
    FloatMat4,
    Sampler1D,
    Sampler2D,
    Sampler3D,
    SamplerCube,
    Sampler1DShadow,
    Sampler2DShadow,
    /// A native type this crate has no name for
    Other(u32),
}

impl UniformFormat {
    /// Parse a GLSL type keyword (`vec3`, `sampler2D`, ...)
    pub fn from_glsl(keyword: &str) -> Option<Self> {
        let format = match keyword {
            "float" => UniformFormat::Float,
            "vec2" => UniformFormat::FloatVec2,
            "vec3" => UniformFormat::FloatVec3,
            "vec4" => UniformFormat::FloatVec4,
            "int" => UniformFormat::Int,
            "ivec2" => UniformFormat::IntVec2,
            "ivec3" => UniformFormat::IntVec3,
            "ivec4" => UniformFormat::IntVec4,
            "bool" => UniformFormat::Bool,
            "bvec2" => UniformFormat::BoolVec2,
            "bvec3" => UniformFormat::BoolVec3,
            "bvec4" => UniformFormat::BoolVec4,
            "mat2" => UniformFormat::FloatMat2,
            "mat3" => UniformFormat::FloatMat3,
            "mat4" => UniformFormat::FloatMat4,
            "sampler1D" => UniformFormat::Sampler1D,
            "sampler2D" => UniformFormat::Sampler2D,
            "sampler3D" => UniformFormat::Sampler3D,
            "samplerCube" => UniformFormat::SamplerCube,
            "sampler1DShadow" => UniformFormat::Sampler1DShadow,
            "sampler2DShadow" => UniformFormat::Sampler2DShadow,
            _ => return None,
        };
        Some(format)
    }
}

#[cfg(test)]
#[path = "uniform_format_tests.rs"]
mod tests;
