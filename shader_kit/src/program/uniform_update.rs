/// Change-tracked uniform setters
///
/// Scalar and vector setters compare against the uniform's last-written
/// value and only reach the device when a component changed. Array and
/// matrix setters always write, and drop the scalar cache so the next scalar
/// or vector write is issued unconditionally.
///
/// Every setter returns whether a device call was issued. Uploads go to the
/// currently bound program; binding is the caller's job.

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::device::GraphicsDevice;
use crate::error::{Error, Result};
use crate::{engine_bail_with, engine_trace};
use super::uniform::Uniform;

const SOURCE: &str = "shaderkit::UniformUpdater";

/// Mutable access to one uniform together with the device that uploads it
pub struct UniformUpdater<'a, D: GraphicsDevice + ?Sized> {
    uniform: &'a mut Uniform<D::UniformLocation>,
    device: &'a mut D,
}

impl<'a, D: GraphicsDevice + ?Sized> UniformUpdater<'a, D> {
    pub(crate) fn new(uniform: &'a mut Uniform<D::UniformLocation>, device: &'a mut D) -> Self {
        Self { uniform, device }
    }

    /// The uniform being updated
    pub fn uniform(&self) -> &Uniform<D::UniformLocation> {
        self.uniform
    }

    /// Compare `values` against the cache and record them when they differ
    fn changed(&mut self, values: &[f32]) -> bool {
        let n = values.len();
        if let Some(cache) = self.uniform.last_value {
            if cache[..n] == *values {
                engine_trace!(SOURCE, "Skipping unchanged uniform '{}'", self.uniform.name);
                return false;
            }
        }

        let mut cache = self.uniform.last_value.unwrap_or([0.0; 4]);
        cache[..n].copy_from_slice(values);
        self.uniform.last_value = Some(cache);
        true
    }

    fn invalidate(&mut self) {
        self.uniform.last_value = None;
    }

    // ===== SCALARS =====

    pub fn set_float(&mut self, x: f32) -> bool {
        if !self.changed(&[x]) {
            return false;
        }
        self.device.uniform_1_f32(&self.uniform.location, x);
        true
    }

    pub fn set_float2(&mut self, x: f32, y: f32) -> bool {
        if !self.changed(&[x, y]) {
            return false;
        }
        self.device.uniform_2_f32(&self.uniform.location, x, y);
        true
    }

    pub fn set_float3(&mut self, x: f32, y: f32, z: f32) -> bool {
        if !self.changed(&[x, y, z]) {
            return false;
        }
        self.device.uniform_3_f32(&self.uniform.location, x, y, z);
        true
    }

    pub fn set_float4(&mut self, x: f32, y: f32, z: f32, w: f32) -> bool {
        if !self.changed(&[x, y, z, w]) {
            return false;
        }
        self.device.uniform_4_f32(&self.uniform.location, x, y, z, w);
        true
    }

    // ===== VECTORS =====

    pub fn set_vec2(&mut self, v: Vec2) -> bool {
        let values = v.to_array();
        if !self.changed(&values) {
            return false;
        }
        self.device.uniform_2_f32_slice(&self.uniform.location, &values);
        true
    }

    pub fn set_vec3(&mut self, v: Vec3) -> bool {
        let values = v.to_array();
        if !self.changed(&values) {
            return false;
        }
        self.device.uniform_3_f32_slice(&self.uniform.location, &values);
        true
    }

    pub fn set_vec4(&mut self, v: Vec4) -> bool {
        let values = v.to_array();
        if !self.changed(&values) {
            return false;
        }
        self.device.uniform_4_f32_slice(&self.uniform.location, &values);
        true
    }

    // ===== ARRAYS (always written) =====

    pub fn set_float_array(&mut self, values: &[f32]) -> bool {
        self.invalidate();
        self.device.uniform_1_f32_slice(&self.uniform.location, values);
        true
    }

    pub fn set_vec2_array(&mut self, values: &[Vec2]) -> bool {
        self.invalidate();
        self.device.uniform_2_f32_slice(&self.uniform.location, bytemuck::cast_slice(values));
        true
    }

    pub fn set_vec3_array(&mut self, values: &[Vec3]) -> bool {
        self.invalidate();
        self.device.uniform_3_f32_slice(&self.uniform.location, bytemuck::cast_slice(values));
        true
    }

    pub fn set_vec4_array(&mut self, values: &[Vec4]) -> bool {
        self.invalidate();
        self.device.uniform_4_f32_slice(&self.uniform.location, bytemuck::cast_slice(values));
        true
    }

    // ===== MATRICES (always written, row-major with transpose) =====

    pub fn set_mat3(&mut self, m: &Mat3) -> bool {
        self.set_mat3_array(std::slice::from_ref(m))
    }

    pub fn set_mat3_array(&mut self, matrices: &[Mat3]) -> bool {
        self.invalidate();
        let rows: Vec<f32> = matrices
            .iter()
            .flat_map(|m| m.transpose().to_cols_array())
            .collect();
        self.device.uniform_matrix_3_f32_slice(&self.uniform.location, true, &rows);
        true
    }

    pub fn set_mat4(&mut self, m: &Mat4) -> bool {
        self.set_mat4_array(std::slice::from_ref(m))
    }

    pub fn set_mat4_array(&mut self, matrices: &[Mat4]) -> bool {
        self.invalidate();
        let rows: Vec<f32> = matrices
            .iter()
            .flat_map(|m| m.transpose().to_cols_array())
            .collect();
        self.device.uniform_matrix_4_f32_slice(&self.uniform.location, true, &rows);
        true
    }
}

/// Bind `unit` to a sampler uniform unless it is already bound to it
///
/// Binds `program` for the upload, then restores `previous`. Returns whether
/// the device was touched.
///
/// # Errors
///
/// `InvalidSamplerUnit` when `unit` does not fit the device's integer
/// uniform. The uniform is left untouched.
pub(crate) fn bind_sampler_unit<D>(
    device: &mut D,
    program: D::Program,
    previous: Option<D::Program>,
    uniform: &mut Uniform<D::UniformLocation>,
    unit: u32,
) -> Result<bool>
where
    D: GraphicsDevice + ?Sized,
{
    if uniform.sampler_unit == Some(unit) {
        return Ok(false);
    }

    let Ok(value) = i32::try_from(unit) else {
        engine_bail_with!(SOURCE, Error::InvalidSamplerUnit {
            uniform: uniform.name.clone(),
            unit,
        });
    };

    uniform.sampler_unit = Some(unit);
    device.use_program(Some(program));
    device.uniform_1_i32(&uniform.location, value);
    device.use_program(previous);
    Ok(true)
}

#[cfg(test)]
#[path = "uniform_update_tests.rs"]
mod tests;
