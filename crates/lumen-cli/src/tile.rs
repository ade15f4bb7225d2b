/// A rectangular block of pixels, end exclusive.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub x_start: u32,
    pub x_end: u32,
    pub y_start: u32,
    pub y_end: u32,
}

impl Tile {
    pub fn width(&self) -> usize {
        (self.x_end - self.x_start) as usize
    }

    pub fn height(&self) -> usize {
        (self.y_end - self.y_start) as usize
    }

    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Pixels in row major order, matching the tile data layout.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (x_start, x_end) = (self.x_start, self.x_end);
        (self.y_start..self.y_end).flat_map(move |y| (x_start..x_end).map(move |x| (x, y)))
    }
}

/// Cuts an image into square-ish tiles, the unit of parallel work.
#[derive(Debug, Clone, Copy)]
pub struct Tiler {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
}

impl Tiler {
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = Vec::new();
        let mut y = 0;
        while y < self.height {
            let mut x = 0;
            while x < self.width {
                tiles.push(Tile {
                    x_start: x,
                    x_end: u32::min(x + self.tile_size, self.width),
                    y_start: y,
                    y_end: u32::min(y + self.tile_size, self.height),
                });
                x += self.tile_size;
            }
            y += self.tile_size;
        }
        tiles
    }

    pub fn tile_count(&self) -> usize {
        let div_ceil = |a: u32, b: u32| ((a + b - 1) / b) as usize;
        div_ceil(self.width, self.tile_size) * div_ceil(self.height, self.tile_size)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn tiles_cover_every_pixel_exactly_once() {
        let tiler = Tiler {
            width: 37,
            height: 23,
            tile_size: 8,
        };
        let tiles = tiler.tiles();
        assert_eq!(tiles.len(), tiler.tile_count());

        let mut seen = HashSet::new();
        for tile in &tiles {
            assert_eq!(tile.pixels().count(), tile.len());
            for pixel in tile.pixels() {
                assert!(seen.insert(pixel), "pixel {pixel:?} covered twice");
            }
        }
        assert_eq!(seen.len(), 37 * 23);
    }

    #[test]
    fn oversized_tile_size_yields_one_tile() {
        let tiler = Tiler {
            width: 5,
            height: 4,
            tile_size: 64,
        };
        let tiles = tiler.tiles();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].len(), 20);
    }
}
