//! Puts a CPU rendered frame on screen as one textured triangle covering
//! the viewport.

use harness::FramePixels;

use crate::glutils::{check_gl_err, create_texture, upload_rgba};
use crate::shaders::Shaders;

const VERTEX: &str = r#"#version 330 core
out vec2 uv;
void main() {
    vec2 pos = vec2(float((gl_VertexID << 1) & 2), float(gl_VertexID & 2));
    // frame rows start at the top
    uv = vec2(pos.x, 1.0 - pos.y);
    gl_Position = vec4(pos * 2.0 - 1.0, 0.0, 1.0);
}
"#;

const FRAGMENT: &str = r#"#version 330 core
in vec2 uv;
out vec4 color;
uniform sampler2D frame;
void main() {
    color = texture(frame, uv);
}
"#;

pub struct Blitter {
    shaders: Shaders,
    vao: u32,
    texture: u32,
    size: (u32, u32),
}

impl Blitter {
    pub fn new() -> Result<Blitter, String> {
        let shaders = Shaders::from_str(VERTEX, FRAGMENT)?;
        shaders.use_program()?;
        shaders.set_i32("frame", 0)?;

        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        let texture = create_texture()?;
        check_gl_err()?;

        Ok(Blitter {
            shaders,
            vao,
            texture,
            size: (0, 0),
        })
    }

    pub fn draw(&mut self, frame: FramePixels<'_>) -> Result<(), String> {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, self.texture);
        }
        let realloc = self.size != (frame.width, frame.height);
        upload_rgba(frame.width, frame.height, frame.data, realloc)?;
        self.size = (frame.width, frame.height);

        self.shaders.use_program()?;
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
            gl::BindVertexArray(0);
        }
        check_gl_err()
    }
}

impl Drop for Blitter {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.texture);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
