/// Program module - linked programs, uniform introspection and uniform updates

pub mod program;
pub mod program_registry;
pub mod uniform;
pub mod uniform_update;

pub use program::*;
pub use program_registry::*;
pub use uniform::*;
pub use uniform_update::UniformUpdater;
