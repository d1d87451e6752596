use gl::types::GLint;
use std::ffi::c_void;
use thiserror::Error;

/// Vertex buffer with fixed contents, uploaded once with STATIC_DRAW.
pub struct ArrayBuffer {
    id: u32,
}

impl ArrayBuffer {
    pub fn new(data: &[f32]) -> Self {
        let mut id = 0;

        unsafe {
            gl::GenBuffers(1, (&mut id) as *mut u32);
            gl::BindBuffer(gl::ARRAY_BUFFER, id);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(data) as isize,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Self { id }
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, self.id) }
    }
}

impl Drop for ArrayBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, (&self.id) as *const u32) }
    }
}

/// Element buffer of 16-bit indices, uploaded once with STATIC_DRAW.
pub struct IndexBuffer {
    id: u32,
    len: usize,
}

impl IndexBuffer {
    pub fn new(indices: &[u16]) -> Self {
        let mut id = 0;

        unsafe {
            gl::GenBuffers(1, (&mut id) as *mut u32);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);

            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                std::mem::size_of_val(indices) as isize,
                indices.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }

        Self {
            id,
            len: indices.len(),
        }
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.id) }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, (&self.id) as *const u32) }
    }
}

/// Core profile requires one; attribute pointers recorded each frame land in
/// here.
pub struct VertexArray {
    id: u32,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut id) as *mut u32);
        }

        Self { id }
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) }
    }
}

impl Default for VertexArray {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, (&self.id) as *const u32) }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexAttribute {
    Vec2,
    Vec3,
    Vec4,
}

impl VertexAttribute {
    pub fn components(self) -> usize {
        match self {
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
            VertexAttribute::Vec4 => 4,
        }
    }
}

/// Interleaved float attribute layout over a single [`ArrayBuffer`].
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    pub fn new(attributes: Vec<VertexAttribute>) -> Self {
        Self { attributes }
    }

    fn floats_per_vertex(&self) -> usize {
        self.attributes.iter().map(|a| a.components()).sum()
    }

    /// Byte distance between consecutive vertex records.
    pub fn stride(&self) -> usize {
        self.floats_per_vertex() * std::mem::size_of::<f32>()
    }

    /// Byte position of attribute `index` within one record.
    pub fn offset(&self, index: usize) -> usize {
        self.attributes[..index]
            .iter()
            .map(|a| a.components() * std::mem::size_of::<f32>())
            .sum()
    }

    pub fn vertex_count(&self, data: &[f32]) -> Result<usize, LayoutError> {
        let per_vertex = self.floats_per_vertex();

        if per_vertex == 0 || data.len() % per_vertex != 0 {
            return Err(LayoutError::InvalidDataLength);
        }

        Ok(data.len() / per_vertex)
    }

    /// Points `location` at attribute `index` of the currently bound array
    /// buffer and enables the slot. A -1 location is skipped.
    pub fn bind_attribute(&self, index: usize, location: GLint) {
        if location < 0 {
            return;
        }

        let attr = self.attributes[index];

        unsafe {
            gl::VertexAttribPointer(
                location as u32,
                attr.components() as i32,
                gl::FLOAT,
                gl::FALSE,
                self.stride() as i32,
                self.offset(index) as *const c_void,
            );
            gl::EnableVertexAttribArray(location as u32);
        }
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_layout() -> VertexLayout {
        VertexLayout::new(vec![
            VertexAttribute::Vec2,
            VertexAttribute::Vec4,
            VertexAttribute::Vec2,
        ])
    }

    #[test]
    fn interleaved_stride_and_offsets() {
        let layout = demo_layout();

        assert_eq!(layout.stride(), 32);
        assert_eq!(layout.offset(0), 0);
        assert_eq!(layout.offset(1), 8);
        assert_eq!(layout.offset(2), 24);
    }

    #[test]
    fn vertex_count_accepts_whole_records_only() {
        let layout = demo_layout();

        assert_eq!(layout.vertex_count(&[0.0; 32]).unwrap(), 4);
        assert!(layout.vertex_count(&[0.0; 30]).is_err());
    }
}
