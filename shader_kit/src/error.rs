//! Error types for shader_kit
//!
//! Fatal failures of the shader and program registries are reported through
//! this enum. Soft failures (missing source file, compile or link failure) are
//! not errors: they surface as `Ok(None)` from the `find_*` operations.

use std::fmt;

/// Result type for shader_kit operations
pub type Result<T> = std::result::Result<T, Error>;

/// shader_kit errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (native object creation failed, etc.)
    BackendError(String),

    /// Stale or foreign handle
    InvalidResource(String),

    /// A registry reached its configured capacity
    CapacityExceeded {
        /// What overflowed ("shaders", "programs", "uniforms in program 'x'")
        resource: String,
        /// The configured limit
        capacity: usize,
    },

    /// A well-known uniform was declared with an unexpected size or format
    UniformMismatch {
        uniform: String,
        program: String,
        detail: String,
    },

    /// A program was requested without one of its two shaders
    MissingShader(String),

    /// An explicit uniform or sampler lookup found no match
    UniformNotFound {
        uniform: String,
        program: String,
    },

    /// A sampler unit too large for the device's integer uniform
    InvalidSamplerUnit {
        uniform: String,
        unit: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::CapacityExceeded { resource, capacity } => {
                write!(f, "Capacity exceeded: {} (max {})", resource, capacity)
            }
            Error::UniformMismatch { uniform, program, detail } => {
                write!(f, "Uniform '{}' in program '{}' has {}", uniform, program, detail)
            }
            Error::MissingShader(msg) => write!(f, "Missing shader: {}", msg),
            Error::UniformNotFound { uniform, program } => {
                write!(f, "Couldn't find uniform '{}' in program '{}'", uniform, program)
            }
            Error::InvalidSamplerUnit { uniform, unit } => {
                write!(f, "Sampler unit {} out of range for uniform '{}'", unit, uniform)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
