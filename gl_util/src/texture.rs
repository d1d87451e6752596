use std::ffi::c_void;
use thiserror::Error;

/// RGBA bytes of the 1x1 stand-in uploaded before the real image arrives.
pub const PLACEHOLDER_PIXEL: [u8; 4] = [0, 0, 255, 255];

/// Filtering decided once per uploaded image.
///
/// Mipmaps are only requested for power-of-two dimensions; everything else
/// gets edge clamping and plain linear minification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterPolicy {
    Mipmapped,
    ClampedLinear,
}

impl FilterPolicy {
    pub fn for_size(width: u32, height: u32) -> Self {
        if width.is_power_of_two() && height.is_power_of_two() {
            FilterPolicy::Mipmapped
        } else {
            FilterPolicy::ClampedLinear
        }
    }
}

pub struct Texture2D {
    id: u32,
}

impl Texture2D {
    /// Creates the texture with the opaque-blue placeholder pixel, usable
    /// immediately.
    pub fn placeholder() -> Self {
        let mut id = 0;

        unsafe {
            gl::GenTextures(1, (&mut id) as *mut u32);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as i32);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as i32,
                1,
                1,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                PLACEHOLDER_PIXEL.as_ptr() as *const c_void,
            );
        }

        Self { id }
    }

    /// Replaces the contents in place, keeping the same texture object, and
    /// applies the filter policy for the new dimensions.
    pub fn update_rgba(&self, width: u32, height: u32, data: &[u8]) -> Result<(), TextureError> {
        if (width as usize * height as usize * 4) != data.len() {
            return Err(TextureError::InvalidSrcLength);
        }

        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.id);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                data.as_ptr() as *const c_void,
            );

            match FilterPolicy::for_size(width, height) {
                FilterPolicy::Mipmapped => {
                    gl::GenerateMipmap(gl::TEXTURE_2D);
                    gl::TexParameteri(
                        gl::TEXTURE_2D,
                        gl::TEXTURE_MIN_FILTER,
                        gl::LINEAR_MIPMAP_LINEAR as i32,
                    );
                    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
                }
                FilterPolicy::ClampedLinear => {
                    gl::TexParameteri(
                        gl::TEXTURE_2D,
                        gl::TEXTURE_WRAP_S,
                        gl::CLAMP_TO_EDGE as i32,
                    );
                    gl::TexParameteri(
                        gl::TEXTURE_2D,
                        gl::TEXTURE_WRAP_T,
                        gl::CLAMP_TO_EDGE as i32,
                    );
                    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
                    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
                }
            }
        }

        Ok(())
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.id)
        }
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, (&self.id) as *const u32);
        }
    }
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("Invalid source data length")]
    InvalidSrcLength,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_opaque_blue() {
        assert_eq!(PLACEHOLDER_PIXEL, [0, 0, 255, 255]);
    }

    #[test]
    fn power_of_two_gets_mipmaps() {
        assert_eq!(FilterPolicy::for_size(256, 256), FilterPolicy::Mipmapped);
        assert_eq!(FilterPolicy::for_size(1, 1), FilterPolicy::Mipmapped);
        assert_eq!(FilterPolicy::for_size(512, 64), FilterPolicy::Mipmapped);
    }

    #[test]
    fn odd_sizes_get_clamped() {
        assert_eq!(
            FilterPolicy::for_size(300, 200),
            FilterPolicy::ClampedLinear
        );
        assert_eq!(
            FilterPolicy::for_size(256, 200),
            FilterPolicy::ClampedLinear
        );
        assert_eq!(
            FilterPolicy::for_size(200, 256),
            FilterPolicy::ClampedLinear
        );
    }
}
