use crate::foundation::error::{RevealError, RevealResult};
use crate::render::target::FrameRGBA;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if src == [0, 0, 0, 0] {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// `dst = src over dst` for two equal-length premultiplied buffers.
pub fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> RevealResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RevealError::validation(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `src` over `dst` with `src`'s top-left at `(x, y)`. Out-of-bounds parts are clipped.
pub fn blit_over(dst: &mut FrameRGBA, src: &FrameRGBA, x: i32, y: i32) {
    let x0 = i64::from(x).max(0);
    let y0 = i64::from(y).max(0);
    let x1 = (i64::from(x) + i64::from(src.width)).min(i64::from(dst.width));
    let y1 = (i64::from(y) + i64::from(src.height)).min(i64::from(dst.height));
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let dst_stride = dst.width as usize * 4;
    let src_stride = src.width as usize * 4;
    for dy in y0..y1 {
        let sy = (dy - i64::from(y)) as usize;
        let sx0 = (x0 - i64::from(x)) as usize;
        let run = (x1 - x0) as usize * 4;
        let d_off = dy as usize * dst_stride + x0 as usize * 4;
        let s_off = sy * src_stride + sx0 * 4;
        let d_row = &mut dst.data[d_off..d_off + run];
        let s_row = &src.data[s_off..s_off + run];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = mul_div255(u16::from(*c), a);
        }
    }
}

pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        match a {
            255 => {}
            0 => px[..3].fill(0),
            _ => {
                for c in &mut px[..3] {
                    *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
