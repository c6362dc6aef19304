/// Conversions between GL enums and shader_kit types

use shader_kit::shaderkit::device::{ShaderStage, UniformFormat};

/// GL shader type of a stage
pub fn stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Uniform format of a GL uniform type enum (`GL_FLOAT_VEC3`, ...)
pub fn uniform_format_from_gl(utype: u32) -> UniformFormat {
    match utype {
        glow::FLOAT => UniformFormat::Float,
        glow::FLOAT_VEC2 => UniformFormat::FloatVec2,
        glow::FLOAT_VEC3 => UniformFormat::FloatVec3,
        glow::FLOAT_VEC4 => UniformFormat::FloatVec4,
        glow::INT => UniformFormat::Int,
        glow::INT_VEC2 => UniformFormat::IntVec2,
        glow::INT_VEC3 => UniformFormat::IntVec3,
        glow::INT_VEC4 => UniformFormat::IntVec4,
        glow::BOOL => UniformFormat::Bool,
        glow::BOOL_VEC2 => UniformFormat::BoolVec2,
        glow::BOOL_VEC3 => UniformFormat::BoolVec3,
        glow::BOOL_VEC4 => UniformFormat::BoolVec4,
        glow::FLOAT_MAT2 => UniformFormat::FloatMat2,
        glow::FLOAT_MAT3 => UniformFormat::FloatMat3,
        glow::FLOAT_MAT4 => UniformFormat::FloatMat4,
        glow::SAMPLER_1D => UniformFormat::Sampler1D,
        glow::SAMPLER_2D => UniformFormat::Sampler2D,
        glow::SAMPLER_3D => UniformFormat::Sampler3D,
        glow::SAMPLER_CUBE => UniformFormat::SamplerCube,
        glow::SAMPLER_1D_SHADOW => UniformFormat::Sampler1DShadow,
        glow::SAMPLER_2D_SHADOW => UniformFormat::Sampler2DShadow,
        other => UniformFormat::Other(other),
    }
}

/// GL uniform type enum of a uniform format
pub fn uniform_format_to_gl(format: UniformFormat) -> u32 {
    match format {
        UniformFormat::Float => glow::FLOAT,
        UniformFormat::FloatVec2 => glow::FLOAT_VEC2,
        UniformFormat::FloatVec3 => glow::FLOAT_VEC3,
        UniformFormat::FloatVec4 => glow::FLOAT_VEC4,
        UniformFormat::Int => glow::INT,
        UniformFormat::IntVec2 => glow::INT_VEC2,
        UniformFormat::IntVec3 => glow::INT_VEC3,
        UniformFormat::IntVec4 => glow::INT_VEC4,
        UniformFormat::Bool => glow::BOOL,
        UniformFormat::BoolVec2 => glow::BOOL_VEC2,
        UniformFormat::BoolVec3 => glow::BOOL_VEC3,
        UniformFormat::BoolVec4 => glow::BOOL_VEC4,
        UniformFormat::FloatMat2 => glow::FLOAT_MAT2,
        UniformFormat::FloatMat3 => glow::FLOAT_MAT3,
        UniformFormat::FloatMat4 => glow::FLOAT_MAT4,
        UniformFormat::Sampler1D => glow::SAMPLER_1D,
        UniformFormat::Sampler2D => glow::SAMPLER_2D,
        UniformFormat::Sampler3D => glow::SAMPLER_3D,
        UniformFormat::SamplerCube => glow::SAMPLER_CUBE,
        UniformFormat::Sampler1DShadow => glow::SAMPLER_1D_SHADOW,
        UniformFormat::Sampler2DShadow => glow::SAMPLER_2D_SHADOW,
        UniformFormat::Other(utype) => utype,
    }
}

#[cfg(test)]
#[path = "glow_format_tests.rs"]
mod tests;
