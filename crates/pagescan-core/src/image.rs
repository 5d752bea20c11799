#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height],
        }
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Interleaved RGBA8 view, row-major, len = w*h*4.
#[derive(Clone, Copy, Debug)]
pub struct RgbaImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

#[derive(Clone, Debug)]
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbaImage {
    #[inline]
    pub fn view(&self) -> RgbaImageView<'_> {
        RgbaImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

#[inline]
fn get_gray(src: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return 0;
    }
    src.data[y as usize * src.width + x as usize]
}

#[inline]
fn get_rgba(src: &RgbaImageView<'_>, x: i32, y: i32) -> [u8; 4] {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return [0, 0, 0, 0];
    }
    let i = (y as usize * src.width + x as usize) * 4;
    [src.data[i], src.data[i + 1], src.data[i + 2], src.data[i + 3]]
}

#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_gray(src, x0, y0) as f32;
    let p10 = get_gray(src, x0 + 1, y0) as f32;
    let p01 = get_gray(src, x0, y0 + 1) as f32;
    let p11 = get_gray(src, x0 + 1, y0 + 1) as f32;

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

#[inline]
pub fn sample_bilinear_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    sample_bilinear(src, x, y).clamp(0.0, 255.0) as u8
}

#[inline]
pub fn sample_bilinear_rgba(src: &RgbaImageView<'_>, x: f32, y: f32) -> [u8; 4] {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_rgba(src, x0, y0);
    let p10 = get_rgba(src, x0 + 1, y0);
    let p01 = get_rgba(src, x0, y0 + 1);
    let p11 = get_rgba(src, x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let a = p00[c] as f32 + fx * (p10[c] as f32 - p00[c] as f32);
        let b = p01[c] as f32 + fx * (p11[c] as f32 - p01[c] as f32);
        out[c] = (a + fy * (b - a)).clamp(0.0, 255.0) as u8;
    }
    out
}

/// Convert an interleaved RGBA frame to single-channel gray (BT.601 weights).
pub fn rgba_to_gray(src: &RgbaImageView<'_>) -> GrayImage {
    let mut data = Vec::with_capacity(src.width * src.height);
    for px in src.data.chunks_exact(4) {
        let v = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
        data.push(v.clamp(0.0, 255.0) as u8);
    }
    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}
