use crate::grid::Grid;

/// Hex values of braille dots
///
/// ```text
///      1   8
///      2  10
///      4  20
///     40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Rasterizes a board into lines of braille characters, packing 2x4 cells
/// into each character.
///
/// Strictly a reader: the camera never touches simulation state.
pub struct Camera {
    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// The frame buffer.
    fb: String,

    /// Width of the framebuffer, in braille characters
    bw: usize,
}

impl Camera {
    /// A camera covering a `w x h` cell board.
    pub fn new(w: usize, h: usize) -> Self {
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        // Each braille character is 3 bytes in UTF-8, and each line ends in
        // a one byte newline, giving a framebuffer of `3 * (bw * bh) + bh`
        // bytes.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        Self {
            cp: vec![BRAILLE_EMPTY; bw * bh],
            fb,
            bw,
        }
    }

    /// Rasterize `grid` and return the finished frame.
    pub fn render(&mut self, grid: &Grid) -> &str {
        self.cp.fill(BRAILLE_EMPTY);

        for (x, y) in grid.live_cells() {
            let (x, y) = (x as usize, y as usize);

            self.cp[(y / 4) * self.bw + (x / 2)] += Self::dot_value(x, y);
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % self.bw == 0 {
                self.fb.push('\n');
            }

            // BRAILLE_EMPTY plus any sum of distinct dot values stays a
            // valid codepoint
            self.fb.push(::std::char::from_u32(c).unwrap());
        }
        self.fb.push('\n');

        &self.fb
    }

    fn dot_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Camera;
    use crate::grid::Grid;
    use crate::grid::WrapMode;

    #[test]
    fn single_cell_lights_one_dot() {
        let mut grid = Grid::new(2, 4).unwrap();
        grid.set(0, 0, true, WrapMode::Plane).unwrap();

        let mut cam = Camera::new(2, 4);

        assert_eq!(cam.render(&grid), "\u{2801}\n");
    }

    #[test]
    fn full_block_lights_all_dots() {
        let mut grid = Grid::new(2, 4).unwrap();
        grid.fill(true);

        let mut cam = Camera::new(2, 4);

        assert_eq!(cam.render(&grid), "\u{28FF}\n");
    }

    #[test]
    fn frames_are_rebuilt_from_scratch() {
        let mut grid = Grid::new(2, 4).unwrap();
        grid.fill(true);

        let mut cam = Camera::new(2, 4);
        cam.render(&grid);

        grid.fill(false);

        assert_eq!(cam.render(&grid), "\u{2800}\n");
    }
}
