// Drawing primitives for the softbuffer framebuffer (u32 per pixel, 0x00RRGGBB).
// Higher level layout lives in `ViewerState::render`.

use image::RgbaImage;

pub const BG_COLOR: [u8; 4] = [31, 31, 31, 255];
pub const BAR_COLOR: (u8, u8, u8, u8) = (48, 48, 48, 255);
pub const ICON_COLOR: (u8, u8, u8, u8) = (230, 230, 230, 255);
pub const ICON_DISABLED: (u8, u8, u8, u8) = (100, 100, 100, 255);

/// Pack RGB into softbuffer u32 format: 0x00RRGGBB.
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Unpack softbuffer u32 into (r, g, b).
fn unpack_rgb(v: u32) -> (u8, u8, u8) {
    ((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

fn blend(dst: u32, r: u8, g: u8, b: u8, a: u8) -> u32 {
    match a {
        255 => rgb(r, g, b),
        0 => dst,
        _ => {
            let a = a as u32;
            let inv = 255 - a;
            let (dr, dg, db) = unpack_rgb(dst);
            rgb(
                ((r as u32 * a + dr as u32 * inv) / 255) as u8,
                ((g as u32 * a + dg as u32 * inv) / 255) as u8,
                ((b as u32 * a + db as u32 * inv) / 255) as u8,
            )
        }
    }
}

fn put(buf: &mut [u32], stride: u32, buf_h: u32, x: i32, y: i32, color: (u8, u8, u8, u8)) {
    if x >= 0 && y >= 0 && (x as u32) < stride && (y as u32) < buf_h {
        let off = (y as u32 * stride + x as u32) as usize;
        buf[off] = blend(buf[off], color.0, color.1, color.2, color.3);
    }
}

/// Fill a rectangle with a color (with alpha blending).
pub fn fill_rect(buf: &mut [u32], stride: u32, buf_h: u32, rx: i32, ry: i32, rw: u32, rh: u32, color: (u8, u8, u8, u8)) {
    for row in 0..rh as i32 {
        for col in 0..rw as i32 {
            put(buf, stride, buf_h, rx + col, ry + row, color);
        }
    }
}

/// Two filled arrowheads centred on (cx, cy), pointing left or right.
/// `size` is the height of one arrowhead.
pub fn draw_chevrons(buf: &mut [u32], stride: u32, buf_h: u32, cx: i32, cy: i32, size: u32, left: bool, color: (u8, u8, u8, u8)) {
    let half = (size / 2) as i32;
    let bases = if left { [cx + half, cx] } else { [cx - half, cx] };
    for base in bases {
        // Tip is `half` pixels from the base, towards the pointing side.
        for dy in -half..=half {
            let span = half - dy.abs();
            for dx in 0..=span {
                let x = if left { base - dx } else { base + dx };
                put(buf, stride, buf_h, x, cy + dy, color);
            }
        }
    }
}

/// An X of the given size centred on (cx, cy).
pub fn draw_cross(buf: &mut [u32], stride: u32, buf_h: u32, cx: i32, cy: i32, size: u32, color: (u8, u8, u8, u8)) {
    let half = (size / 2) as i32;
    for d in -half..=half {
        for t in 0..2 {
            put(buf, stride, buf_h, cx + d + t, cy + d, color);
            put(buf, stride, buf_h, cx + d + t, cy - d, color);
        }
    }
}

/// Copy `src` centred into the top `area_h` rows of the framebuffer,
/// clipping whatever falls outside.
pub fn blit_centered(dst: &mut [u32], dst_w: u32, area_h: u32, src: &RgbaImage) {
    let (src_w, src_h) = src.dimensions();
    let x0 = (dst_w as i64 - src_w as i64) / 2;
    let y0 = (area_h as i64 - src_h as i64) / 2;

    let dy_start = y0.max(0);
    let dy_end = (y0 + src_h as i64).min(area_h as i64);
    let dx_start = x0.max(0);
    let dx_end = (x0 + src_w as i64).min(dst_w as i64);

    for dy in dy_start..dy_end {
        let sy = (dy - y0) as u32;
        for dx in dx_start..dx_end {
            let sx = (dx - x0) as u32;
            let p = src.get_pixel(sx, sy).0;
            let di = dy as usize * dst_w as usize + dx as usize;
            dst[di] = blend(dst[di], p[0], p[1], p[2], p[3]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn blit_centres_small_image() {
        let mut buf = vec![0u32; 10 * 10];
        let src = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        blit_centered(&mut buf, 10, 6, &src);
        // x0 = 4, y0 = 2
        assert_eq!(buf[2 * 10 + 4], rgb(255, 0, 0));
        assert_eq!(buf[3 * 10 + 5], rgb(255, 0, 0));
        assert_eq!(buf[2 * 10 + 3], 0);
        assert_eq!(buf[4 * 10 + 4], 0);
    }

    #[test]
    fn blit_clips_large_image_to_area() {
        let mut buf = vec![0u32; 4 * 4];
        let src = RgbaImage::from_pixel(10, 10, Rgba([0, 255, 0, 255]));
        blit_centered(&mut buf, 4, 3, &src);
        assert!(buf[..12].iter().all(|&p| p == rgb(0, 255, 0)));
        // The last row belongs to the button bar and must stay untouched.
        assert!(buf[12..].iter().all(|&p| p == 0));
    }

    #[test]
    fn fill_rect_blends_alpha() {
        let mut buf = vec![rgb(0, 0, 0); 4];
        fill_rect(&mut buf, 2, 2, 0, 0, 1, 1, (255, 255, 255, 255));
        fill_rect(&mut buf, 2, 2, 1, 0, 5, 5, (200, 100, 0, 0));
        assert_eq!(buf[0], rgb(255, 255, 255));
        assert_eq!(buf[1], 0);
    }
}
