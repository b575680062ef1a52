//! Binary masks and square-kernel morphology.

/// Binary image; foreground pixels are 255, background 0.
#[derive(Clone, Debug)]
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] != 0
    }

    /// Out-of-bounds coordinates read as background.
    #[inline]
    pub fn get_i32(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.data[y as usize * self.width + x as usize] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.data[y * self.width + x] = if on { 255 } else { 0 };
    }

    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&p| p != 0).count()
    }

    /// Bitwise OR with a mask of identical dimensions.
    pub fn or_assign(&mut self, other: &Mask) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            if b != 0 {
                *a = 255;
            }
        }
    }

    /// Erosion with a `kernel x kernel` square structuring element.
    ///
    /// A pixel survives if every in-bounds pixel under the kernel is set.
    pub fn eroded(&self, kernel: usize) -> Mask {
        self.morph(kernel, true)
    }

    /// Dilation with a `kernel x kernel` square structuring element.
    pub fn dilated(&self, kernel: usize) -> Mask {
        self.morph(kernel, false)
    }

    /// Opening: erosion then dilation. Removes speckle noise smaller than the
    /// kernel.
    pub fn opened(&self, kernel: usize) -> Mask {
        self.eroded(kernel).dilated(kernel)
    }

    /// Closing: dilation then erosion. Bridges gaps smaller than the kernel.
    pub fn closed(&self, kernel: usize) -> Mask {
        self.dilated(kernel).eroded(kernel)
    }

    fn morph(&self, kernel: usize, erode: bool) -> Mask {
        let r = (kernel / 2) as i32;
        let mut out = Mask::new(self.width, self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let mut on = erode;
                'window: for dy in -r..=r {
                    for dx in -r..=r {
                        let (nx, ny) = (x + dx, y + dy);
                        if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
                            continue;
                        }
                        let set = self.data[ny as usize * self.width + nx as usize] != 0;
                        if erode && !set {
                            on = false;
                            break 'window;
                        }
                        if !erode && set {
                            on = true;
                            break 'window;
                        }
                    }
                }
                out.set(x as usize, y as usize, on);
            }
        }
        out
    }
}
