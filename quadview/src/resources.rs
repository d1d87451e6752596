use gl_util::buffer::{ArrayBuffer, IndexBuffer, VertexArray, VertexAttribute, VertexLayout};
use gl_util::program::{Program, ProgramBuilder, ProgramError};
use gl_util::texture::Texture2D;

pub const QUAD_POSITIONS: [f32; 8] = [
    100.0, 100.0, //
    200.0, 100.0, //
    200.0, 200.0, //
    100.0, 200.0,
];

#[rustfmt::skip]
pub const QUAD_COLORS: [f32; 16] = [
    1.0, 1.0, 1.0, 1.0, // white
    1.0, 0.0, 0.0, 1.0, // red
    0.0, 1.0, 0.0, 1.0, // green
    0.0, 0.0, 1.0, 1.0, // blue
];

pub const QUAD_TEXCOORDS: [f32; 8] = [
    0.0, 0.0, //
    1.0, 0.0, //
    1.0, 1.0, //
    0.0, 1.0,
];

/// Two triangles sharing the 0-2 diagonal.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Position, color and texture coordinate interleaved per vertex; this is
/// the one buffer the draw path consumes.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 32] = [
    100.0, 150.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0,
    200.0, 150.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0,
    200.0, 250.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0,
    100.0, 250.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0,
];

pub fn quad_layout() -> VertexLayout {
    VertexLayout::new(vec![
        VertexAttribute::Vec2,
        VertexAttribute::Vec4,
        VertexAttribute::Vec2,
    ])
}

/// Attribute slots resolved once after linking; -1 where the name is
/// unknown, which leaves that binding inert.
pub struct AttribLocations {
    pub position: i32,
    pub color: i32,
    pub tex_coord: i32,
}

pub struct UniformLocations {
    pub matrix: i32,
    pub sampler: i32,
    pub use_tex: i32,
}

/// Everything the frame step needs, created once and owned for the life of
/// the window.
pub struct RenderResources {
    pub program: Program,
    pub attribs: AttribLocations,
    pub uniforms: UniformLocations,
    pub layout: VertexLayout,
    pub vertex_array: VertexArray,
    pub positions: ArrayBuffer,
    pub colors: ArrayBuffer,
    pub tex_coords: ArrayBuffer,
    pub indices: IndexBuffer,
    pub vertices: ArrayBuffer,
    pub texture: Texture2D,
}

impl RenderResources {
    /// Requires a current GL context. Fails on shader compile or link
    /// errors; no buffers are allocated in that case.
    pub fn create() -> Result<Self, ProgramError> {
        let program = ProgramBuilder::new(
            include_str!("gl_shaders/quad.glsl"),
            include_str!("gl_shaders/textured.glsl"),
        )
        .build()?;

        let attribs = AttribLocations {
            position: lookup_attrib(&program, "aVertexPosition"),
            color: lookup_attrib(&program, "aVertexColor"),
            tex_coord: lookup_attrib(&program, "aTextureCoord"),
        };

        let uniforms = UniformLocations {
            matrix: lookup_uniform(&program, "uMatrix"),
            sampler: lookup_uniform(&program, "uSampler"),
            use_tex: lookup_uniform(&program, "useTex"),
        };

        let vertex_array = VertexArray::new();
        vertex_array.bind();

        // The three standalone buffers mirror the separate-stream setup and
        // are not read by the frame step.
        let positions = ArrayBuffer::new(&QUAD_POSITIONS);
        let colors = ArrayBuffer::new(&QUAD_COLORS);
        let tex_coords = ArrayBuffer::new(&QUAD_TEXCOORDS);

        let indices = IndexBuffer::new(&QUAD_INDICES);
        let vertices = ArrayBuffer::new(&QUAD_VERTICES);

        let texture = Texture2D::placeholder();

        Ok(Self {
            program,
            attribs,
            uniforms,
            layout: quad_layout(),
            vertex_array,
            positions,
            colors,
            tex_coords,
            indices,
            vertices,
            texture,
        })
    }
}

fn lookup_attrib(program: &Program, name: &str) -> i32 {
    let location = program.attrib_location(name);
    if location < 0 {
        log::warn!("attribute {name} not found in shader program");
    }

    location
}

fn lookup_uniform(program: &Program, name: &str) -> i32 {
    let location = program.uniform_location(name);
    if location < 0 {
        log::warn!("uniform {name} not found in shader program");
    }

    location
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_describe_two_triangles_over_four_vertices() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert_eq!(QUAD_INDICES.iter().max(), Some(&3));
        assert_eq!(&QUAD_INDICES[..3], &[0, 1, 2]);
        assert_eq!(&QUAD_INDICES[3..], &[0, 2, 3]);
    }

    #[test]
    fn interleaved_data_matches_the_layout() {
        let layout = quad_layout();

        assert_eq!(layout.vertex_count(&QUAD_VERTICES).unwrap(), 4);
        assert_eq!(layout.stride(), 32);
        assert_eq!(layout.offset(1), 8);
        assert_eq!(layout.offset(2), 24);
    }

    #[test]
    fn separate_streams_cover_the_same_four_vertices() {
        assert_eq!(QUAD_POSITIONS.len(), 8);
        assert_eq!(QUAD_COLORS.len(), 16);
        assert_eq!(QUAD_TEXCOORDS.len(), 8);
    }
}
