/// Graphics device module - the graphics API boundary

// Module declarations
pub mod graphics_device;
pub mod uniform_format;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;
pub use uniform_format::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
