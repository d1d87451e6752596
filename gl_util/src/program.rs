use gl::types::{GLint, GLuint};
use std::ffi::{c_char, CString};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_kind(self) -> u32 {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

pub struct ProgramBuilder {
    vert: CString,
    frag: CString,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: CString::new(vert_src).unwrap(),
            frag: CString::new(frag_src).unwrap(),
        }
    }

    /// Compiles both stages and links them. On a compile error the failing
    /// shader object is deleted before returning; nothing of the program
    /// survives a failed build.
    pub fn build(self) -> Result<Program, ProgramError> {
        unsafe {
            let vert = compile_stage(ShaderStage::Vertex, &self.vert)?;

            let frag = match compile_stage(ShaderStage::Fragment, &self.frag) {
                Ok(id) => id,
                Err(e) => {
                    gl::DeleteShader(vert);
                    return Err(e);
                }
            };

            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            let mut success = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut i32);

            // The stage objects are owned by the program from here on.
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            if success != 1 {
                let log = info_log(|len, buf| unsafe {
                    gl::GetProgramInfoLog(program, len, std::ptr::null_mut(), buf)
                });
                gl::DeleteProgram(program);

                return Err(ProgramError::Link(log));
            }

            Ok(Program { id: program })
        }
    }
}

unsafe fn compile_stage(stage: ShaderStage, src: &CString) -> Result<GLuint, ProgramError> {
    let shader = gl::CreateShader(stage.gl_kind());

    gl::ShaderSource(
        shader,
        1,
        (&src.as_ptr()) as *const *const c_char,
        std::ptr::null(),
    );

    gl::CompileShader(shader);

    let mut success = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut i32);

    if success != 1 {
        let log = info_log(|len, buf| unsafe {
            gl::GetShaderInfoLog(shader, len, std::ptr::null_mut(), buf)
        });
        gl::DeleteShader(shader);

        return Err(ProgramError::Compile { stage, log });
    }

    Ok(shader)
}

fn info_log(get: impl FnOnce(i32, *mut c_char)) -> String {
    let mut buf = [0_u8; 1024];

    get(buf.len() as i32, buf.as_mut_ptr() as *mut c_char);

    let data = match buf.iter().position(|b| *b == 0) {
        Some(end) => &buf[..end],
        None => &buf[..],
    };

    String::from_utf8_lossy(data).into_owned()
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program failed to link: {0}")]
    Link(String),
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Location of a vertex attribute, -1 when the linker stripped or never
    /// saw the name.
    pub fn attrib_location(&self, name: &str) -> GLint {
        let name = CString::new(name).unwrap();

        unsafe { gl::GetAttribLocation(self.id, name.as_ptr()) }
    }

    /// Location of a uniform, -1 when unknown.
    pub fn uniform_location(&self, name: &str) -> GLint {
        let name = CString::new(name).unwrap();

        unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) }
    }

    /// The program must be in use; a -1 location is silently skipped.
    pub fn set_mat4(&self, location: GLint, value: &[f32; 16]) {
        if location < 0 {
            return;
        }

        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()) }
    }

    pub fn set_int(&self, location: GLint, value: i32) {
        if location < 0 {
            return;
        }

        unsafe { gl::Uniform1i(location, value) }
    }

    pub fn set_bool(&self, location: GLint, value: bool) {
        self.set_int(location, value as i32);
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}
