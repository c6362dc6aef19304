/*!
# Shader Kit

Shader and program management for a real-time OpenGL-style renderer.

This crate is platform-agnostic: it drives the graphics API through the
[`GraphicsDevice`](shaderkit::device::GraphicsDevice) trait and reads shader
sources through the [`FileSystem`](shaderkit::file_system::FileSystem) trait.
Backend implementations (e.g. `shader_kit_glow`) provide the device.

## Architecture

- **ShaderSystem**: Owned context, entry point for every operation
- **ShaderRegistry**: Every compiled shader object, torn down in bulk
- **ProgramRegistry**: Every linked program, with post-link introspection
- **UniformUpdater**: Change-tracked uniform setters
- **Engine**: Global, swappable logger
*/

// Internal modules
mod error;
mod engine;
mod config;
mod shader_system;
pub mod log;
pub mod device;
pub mod file_system;
pub mod shader;
pub mod program;

#[cfg(test)]
mod test_support;

// Main shaderkit namespace module
pub mod shaderkit {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Owned context and its configuration
    pub use crate::config::ShaderSystemConfig;
    pub use crate::shader_system::{ShaderSystem, ShaderSystemStats};

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Graphics API boundary
    pub mod device {
        pub use crate::device::*;
    }

    // Shader source loading
    pub mod file_system {
        pub use crate::file_system::*;
    }

    // Shader objects
    pub mod shader {
        pub use crate::shader::*;
    }

    // Programs and uniforms
    pub mod program {
        pub use crate::program::*;
    }
}

// Re-export math library at crate root
pub use glam;
