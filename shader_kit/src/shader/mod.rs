/// Shader module - shader objects and their registry

pub mod shader;
pub mod shader_registry;
pub(crate) mod info_log;

pub use shader::*;
pub use shader_registry::*;
