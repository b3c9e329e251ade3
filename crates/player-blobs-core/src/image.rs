use crate::PixelRect;

/// Borrowed binary mask, row-major, `len = width * height`. Nonzero = foreground.
#[derive(Clone, Copy, Debug)]
pub struct MaskView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned binary mask.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaskImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Borrowed RGB image, row-major interleaved, `len = width * height * 3`.
#[derive(Clone, Copy, Debug)]
pub struct ColorView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned RGB image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl MaskView<'_> {
    #[inline]
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] != 0
    }

    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn to_owned_image(&self) -> MaskImage {
        MaskImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }

    /// Deep copy of `rect` clipped to the mask. Empty if they do not overlap.
    pub fn crop(&self, rect: &PixelRect) -> MaskImage {
        let (width, height, data) = crop_channels(self.width, self.height, 1, self.data, rect);
        MaskImage {
            width,
            height,
            data,
        }
    }
}

impl MaskImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn view(&self) -> MaskView<'_> {
        MaskView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Mark every pixel of `rect` (clipped) as foreground.
    pub fn fill_rect(&mut self, rect: &PixelRect) {
        if let Some(r) = rect.clamp_to(self.width, self.height) {
            for y in r.y as usize..r.bottom() as usize {
                let row = y * self.width;
                self.data[row + r.x as usize..row + r.right() as usize].fill(255);
            }
        }
    }

    pub fn crop(&self, rect: &PixelRect) -> MaskImage {
        self.view().crop(rect)
    }
}

impl ColorView<'_> {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn to_owned_image(&self) -> ColorImage {
        ColorImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }

    /// Deep copy of `rect` clipped to the image. Empty if they do not overlap.
    pub fn crop(&self, rect: &PixelRect) -> ColorImage {
        let (width, height, data) = crop_channels(self.width, self.height, 3, self.data, rect);
        ColorImage {
            width,
            height,
            data,
        }
    }
}

impl ColorImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    pub fn view(&self) -> ColorView<'_> {
        ColorView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.view().pixel(x, y)
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    pub fn crop(&self, rect: &PixelRect) -> ColorImage {
        self.view().crop(rect)
    }
}

fn crop_channels(
    width: usize,
    height: usize,
    channels: usize,
    data: &[u8],
    rect: &PixelRect,
) -> (usize, usize, Vec<u8>) {
    let Some(r) = rect.clamp_to(width, height) else {
        return (0, 0, Vec::new());
    };
    let (x0, y0) = (r.x as usize, r.y as usize);
    let (w, h) = (r.width as usize, r.height as usize);

    let mut out = Vec::with_capacity(w * h * channels);
    for y in y0..y0 + h {
        let start = (y * width + x0) * channels;
        out.extend_from_slice(&data[start..start + w * channels]);
    }
    (w, h, out)
}
