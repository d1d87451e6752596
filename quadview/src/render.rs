use gl_util::renderer::GlRenderer;

use crate::math::pixel_projection;
use crate::resources::RenderResources;

/// One frame: clear, project, bind, draw. Reads only immutable state, so
/// repeated calls with the same viewport issue identical draw parameters.
pub fn draw_frame(renderer: &mut GlRenderer, resources: &RenderResources, viewport: (u32, u32)) {
    renderer.begin_frame();

    let matrix = pixel_projection(viewport.0 as f32, viewport.1 as f32);

    // One interleaved buffer, bound once per attribute slot.
    resources.vertices.bind();
    resources.layout.bind_attribute(0, resources.attribs.position);
    resources.vertices.bind();
    resources.layout.bind_attribute(1, resources.attribs.color);
    resources.vertices.bind();
    resources
        .layout
        .bind_attribute(2, resources.attribs.tex_coord);

    renderer.use_program(&resources.program);
    resources.indices.bind();

    resources
        .program
        .set_mat4(resources.uniforms.matrix, matrix.as_ref());

    resources.texture.bind(0);
    resources.program.set_int(resources.uniforms.sampler, 0);
    resources.program.set_bool(resources.uniforms.use_tex, true);

    renderer.draw_indexed(resources.indices.len() as i32);
}
