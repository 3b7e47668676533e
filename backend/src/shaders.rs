use super::glutils::*;
use gl::{types::*, *};
use std::ffi::CString;

/// A linked vertex + fragment program. Deleted on drop, so it must not
/// outlive its GL context.
pub struct Shaders {
    program_id: u32,
}

impl Shaders {
    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<Shaders, String> {
        let vertex_shader = Self::create(VERTEX_SHADER, vertex_code)
            .map_err(|e| format!("vertex shader compilation error: {}", e))?;
        let fragment_shader = match Self::create(FRAGMENT_SHADER, fragment_code) {
            Ok(s) => s,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex_shader) };
                return Err(format!("fragment shader compilation error: {}", e));
            }
        };

        // create program and link shaders
        let shader_program = unsafe { gl::CreateProgram() };
        unsafe { gl::AttachShader(shader_program, vertex_shader) };
        unsafe { gl::AttachShader(shader_program, fragment_shader) };
        unsafe { gl::LinkProgram(shader_program) };

        // not needed anymore
        unsafe { gl::DeleteShader(vertex_shader) };
        unsafe { gl::DeleteShader(fragment_shader) };

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(shader_program, LINK_STATUS, &mut success);
        }
        if success == 0 {
            let log = Self::info_log(|cap, len, buf| unsafe {
                gl::GetProgramInfoLog(shader_program, cap, len, buf)
            });
            unsafe { gl::DeleteProgram(shader_program) };
            return Err(format!("program link error: {}", log));
        }

        Ok(Shaders {
            program_id: shader_program,
        })
    }

    fn create(kind: GLenum, shader_code: &str) -> Result<u32, String> {
        let shader_id = unsafe { gl::CreateShader(kind) };
        if shader_id == 0 {
            return Err(format!("gl::CreateShader({:#x}) failed", kind));
        }
        let len = i32::try_from(shader_code.len()).map_err(|e| e.to_string())?;
        unsafe {
            gl::ShaderSource(shader_id, 1, &(shader_code.as_bytes().as_ptr().cast()), &len);
            gl::CompileShader(shader_id);
        }

        // check if there are compilation errors
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success);
        }
        if success == 0 {
            let log = Self::info_log(|cap, len, buf| unsafe {
                gl::GetShaderInfoLog(shader_id, cap, len, buf)
            });
            unsafe { gl::DeleteShader(shader_id) };
            return Err(log);
        }
        Ok(shader_id)
    }

    fn info_log(read: impl Fn(i32, &mut i32, *mut GLchar)) -> String {
        let mut v: Vec<u8> = vec![0; 1024];
        let mut log_len = 0_i32;
        read(v.len() as i32, &mut log_len, v.as_mut_ptr().cast());
        v.truncate(log_len.clamp(0, 1024) as usize);
        String::from_utf8_lossy(&v).to_string()
    }

    fn get_uniform_location(&self, name: &str) -> Result<i32, String> {
        let c_name = CString::new(name).map_err(|e| format!("uniform name '{}': {}", name, e))?;
        let location = unsafe { gl::GetUniformLocation(self.program_id, c_name.as_ptr().cast()) };
        check_gl_err()?;
        if location == -1 {
            return Err(format!(
                "program({}): location '{}' does not correspond to an active uniform variable in program",
                self.program_id, name
            ));
        }
        Ok(location)
    }

    pub fn use_program(&self) -> Result<(), String> {
        unsafe { gl::UseProgram(self.program_id) };
        check_gl_err()
    }

    pub fn set_i32(&self, name: &str, value: i32) -> Result<(), String> {
        let location = self.get_uniform_location(name)?;
        unsafe { gl::Uniform1i(location, value) };
        Ok(())
    }
}

impl Drop for Shaders {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}
