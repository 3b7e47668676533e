use std::path::Path;

use harness::{AssetLoadError, ImageFlags};
use log::debug;
use tiny_skia::Pixmap;

pub(crate) struct Image {
    pub pixmap: Pixmap,
    pub repeat: bool,
}

impl Image {
    pub fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }
}

pub(crate) fn load_image(path: &Path, flags: ImageFlags) -> Result<Image, AssetLoadError> {
    let bytes = std::fs::read(path).map_err(|source| AssetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image_err = |reason: String| AssetLoadError::Image {
        path: path.to_path_buf(),
        reason,
    };

    let img = match stb_image::image::load_from_memory_with_depth(&bytes, 4, false) {
        stb_image::image::LoadResult::ImageF32(_) => {
            return Err(image_err("32-bit images not supported here".to_string()));
        }
        stb_image::image::LoadResult::ImageU8(img) => img,
        stb_image::image::LoadResult::Error(e) => return Err(image_err(e)),
    };
    if img.data.len() != img.width * img.height * 4 {
        return Err(image_err(format!("expected RGBA data, got {} channels", img.depth)));
    }

    let mut pixmap = Pixmap::new(img.width as u32, img.height as u32)
        .ok_or_else(|| image_err(format!("invalid size {}x{}", img.width, img.height)))?;
    premultiply_into(pixmap.data_mut(), &img.data, img.width * 4, flags.flip_y);

    debug!("loaded image {} ({}x{})", path.display(), img.width, img.height);
    Ok(Image {
        pixmap,
        repeat: flags.repeat,
    })
}

/// Copies straight RGBA rows of `stride` bytes into `dst`, premultiplying
/// color by alpha and optionally reversing the row order.
fn premultiply_into(dst: &mut [u8], src: &[u8], stride: usize, flip_y: bool) {
    let rows = src.chunks_exact(stride);
    let dst_rows = dst.chunks_exact_mut(stride);
    let copy = |d: &mut [u8], s: &[u8]| {
        for (dp, sp) in d.chunks_exact_mut(4).zip(s.chunks_exact(4)) {
            let a = sp[3] as u16;
            dp[0] = ((sp[0] as u16 * a + 127) / 255) as u8;
            dp[1] = ((sp[1] as u16 * a + 127) / 255) as u8;
            dp[2] = ((sp[2] as u16 * a + 127) / 255) as u8;
            dp[3] = sp[3];
        }
    };
    if flip_y {
        for (d, s) in dst_rows.zip(rows.rev()) {
            copy(d, s);
        }
    } else {
        for (d, s) in dst_rows.zip(rows) {
            copy(d, s);
        }
    }
}
