use crate::program::Program;

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    /// Clears color and depth and arms the depth test for the coming draw.
    pub fn begin_frame(&self) {
        unsafe {
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
            gl::ClearDepth(1.0);
            gl::Enable(gl::DEPTH_TEST);
            gl::DepthFunc(gl::LEQUAL);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    pub fn use_program(&mut self, program: &Program) {
        let p_id = program.id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    /// One indexed draw from the bound element buffer, 16-bit indices.
    pub fn draw_indexed(&self, indices: i32) {
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                indices,
                gl::UNSIGNED_SHORT,
                std::ptr::null(),
            );
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
