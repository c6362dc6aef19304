/*!
# Shader Kit - glow Backend

OpenGL implementation of the shader_kit [`GraphicsDevice`] trait.

This crate drives a [`glow`] context: every verb of the shader system maps
to the matching GL call. The context must stay current on the calling thread
for as long as the device is used.

# Example

```no_run
use shader_kit::shaderkit::{ShaderSystem, ShaderSystemConfig};
use shader_kit::shaderkit::file_system::DiskFileSystem;
use shader_kit_glow::GlowGraphicsDevice;

fn start(gl: glow::Context) -> ShaderSystem<GlowGraphicsDevice<glow::Context>> {
    // Safety: `gl` is current on this thread for the lifetime of the system
    let device = unsafe { GlowGraphicsDevice::new(gl) };
    ShaderSystem::new(ShaderSystemConfig::default(), device, Box::new(DiskFileSystem::new("base")))
}
```

[`GraphicsDevice`]: shader_kit::shaderkit::device::GraphicsDevice
*/

mod glow_device;
mod glow_format;

pub use glow_device::GlowGraphicsDevice;
pub use glow_format::{stage_to_gl, uniform_format_from_gl, uniform_format_to_gl};
