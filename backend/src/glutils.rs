use gl::{types::*, *};
use harness::Color;

pub fn check_gl_err() -> Result<(), String> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return Ok(());
    }
    Err(format!("GL error: 0x{:x}", err))
}

pub fn print_opengl_info() {
    let mut mtu: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_SIZE, &mut mtu) };
    log::debug!("MAX_TEXTURE_SIZE = {}", mtu);
}

/// Blending for premultiplied alpha, black clear color.
pub fn basic_gl_setup() {
    unsafe {
        gl::Enable(BLEND);
        gl::BlendFunc(ONE, ONE_MINUS_SRC_ALPHA);
        gl::ClearColor(0.0, 0.0, 0.0, 1.0);
    }
}

pub fn clear_screen(color: Color) {
    unsafe {
        gl::ClearColor(color.r, color.g, color.b, color.a);
        gl::Clear(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT | STENCIL_BUFFER_BIT);
    }
}

pub fn set_viewport(width: u32, height: u32) {
    unsafe { gl::Viewport(0, 0, width as i32, height as i32) };
}

/// Creates an empty 2D texture and applies `params`.
pub fn create_texture_params(params: &[(GLenum, GLenum, GLenum)]) -> Result<u32, String> {
    let mut texture = 0;
    unsafe { gl::GenTextures(1, &mut texture) };
    unsafe { gl::BindTexture(TEXTURE_2D, texture) };

    for (t, n, p) in params {
        unsafe { gl::TexParameteri(*t, *n, *p as i32) };
    }
    check_gl_err()?;
    Ok(texture)
}

pub fn create_texture() -> Result<u32, String> {
    let params = [
        (TEXTURE_2D, TEXTURE_WRAP_S, CLAMP_TO_EDGE),
        (TEXTURE_2D, TEXTURE_WRAP_T, CLAMP_TO_EDGE),
        (TEXTURE_2D, TEXTURE_MIN_FILTER, NEAREST),
        (TEXTURE_2D, TEXTURE_MAG_FILTER, NEAREST),
    ];
    create_texture_params(&params)
}

/// Uploads tightly packed RGBA8 pixels into the bound 2D texture.
/// `realloc` re-creates the storage, otherwise the existing one is
/// overwritten.
pub fn upload_rgba(width: u32, height: u32, data: &[u8], realloc: bool) -> Result<(), String> {
    if data.len() != (width * height * 4) as usize {
        return Err(format!(
            "pixel data of {} bytes does not match {}x{}",
            data.len(),
            width,
            height
        ));
    }
    unsafe { gl::PixelStorei(UNPACK_ALIGNMENT, 4) };
    if realloc {
        unsafe {
            gl::TexImage2D(
                TEXTURE_2D,
                0,
                RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                RGBA,
                UNSIGNED_BYTE,
                data.as_ptr().cast(),
            )
        };
    } else {
        unsafe {
            gl::TexSubImage2D(
                TEXTURE_2D,
                0,
                0,
                0,
                width as i32,
                height as i32,
                RGBA,
                UNSIGNED_BYTE,
                data.as_ptr().cast(),
            )
        };
    }
    check_gl_err()
}
