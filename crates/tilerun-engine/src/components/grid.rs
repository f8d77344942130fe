//! Static tile grid used for collision.
//!
//! Cells are stored in row-major order: index = row * width + col.
//! Lookups outside the authored grid always report [`Cell::Empty`], so the
//! collision code never has to special-case map edges. Keeping the body
//! inside the world is the job of [`crate::core::bounds`].

use crate::renderer::camera::Camera2D;
use glam::{IVec2, Vec2};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Solid,
}

impl Cell {
    pub fn is_solid(self) -> bool {
        self == Cell::Solid
    }
}

/// Half-open range of cells, `[min, max)` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub min: IVec2,
    pub max: IVec2,
}

impl CellRange {
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Iterate `(col, row)` pairs, row by row.
    pub fn iter(&self) -> impl Iterator<Item = IVec2> + '_ {
        (self.min.y..self.max.y)
            .flat_map(move |row| (self.min.x..self.max.x).map(move |col| IVec2::new(col, row)))
    }
}

/// Rectangular grid of cells with a uniform cell size.
#[derive(Debug, Clone)]
pub struct GridMap {
    /// Width in cells.
    width: u32,
    /// Height in cells.
    height: u32,
    /// Side length of a cell in world units.
    cell_size: f32,
    /// Cached `(width, height) * cell_size`.
    world_size: Vec2,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Create an all-empty grid.
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        let count = (width * height) as usize;
        Self {
            width,
            height,
            cell_size,
            world_size: Vec2::new(width as f32 * cell_size, height as f32 * cell_size),
            cells: vec![Cell::Empty; count],
        }
    }

    /// Build from rows of `'#'` (solid) and anything else (empty).
    /// Rows shorter than the first are padded with empty cells.
    pub fn from_ascii(rows: &[&str], cell_size: f32) -> Self {
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut grid = Self::new(width, rows.len() as u32, cell_size);
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate().take(width as usize) {
                if ch == '#' {
                    grid.set(col as u32, row as u32, Cell::Solid);
                }
            }
        }
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Size of the playable world in world units.
    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    /// World-space bounds. The grid origin is always (0, 0).
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (Vec2::ZERO, self.world_size)
    }

    /// Cell at `(col, row)`. Anything outside the grid is `Empty`.
    pub fn cell_at(&self, col: i32, row: i32) -> Cell {
        if col < 0 || row < 0 || col as u32 >= self.width || row as u32 >= self.height {
            return Cell::Empty;
        }
        self.cells[(row as u32 * self.width + col as u32) as usize]
    }

    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        self.cell_at(col, row).is_solid()
    }

    /// Set a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, col: u32, row: u32, cell: Cell) {
        if col < self.width && row < self.height {
            self.cells[(row * self.width + col) as usize] = cell;
        }
    }

    /// Fill a rectangular region, clipped to the grid.
    pub fn fill_rect(&mut self, col: u32, row: u32, w: u32, h: u32, cell: Cell) {
        for r in row..(row + h).min(self.height) {
            for c in col..(col + w).min(self.width) {
                self.set(c, r, cell);
            }
        }
    }

    /// Cell containing a world-space point. Not range checked.
    pub fn world_to_cell(&self, point: Vec2) -> IVec2 {
        (point / self.cell_size).floor().as_ivec2()
    }

    /// Top-left corner of a cell in world space.
    pub fn cell_origin(&self, col: i32, row: i32) -> Vec2 {
        Vec2::new(col as f32, row as f32) * self.cell_size
    }

    /// Cells overlapping the camera view, clipped to the grid.
    pub fn visible_cells(&self, camera: &Camera2D) -> CellRange {
        let (view_min, view_max) = camera.view_rect();
        let min = self.world_to_cell(view_min).max(IVec2::ZERO);
        let max = ((view_max / self.cell_size).floor().as_ivec2() + IVec2::ONE)
            .min(IVec2::new(self.width as i32, self.height as i32));
        CellRange { min, max }
    }

    /// Number of solid cells.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_solid()).count()
    }

    /// Total capacity in cells.
    pub fn capacity(&self) -> usize {
        (self.width * self.height) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = GridMap::new(10, 6, 40.0);
        assert_eq!(grid.solid_count(), 0);
        assert_eq!(grid.capacity(), 60);
        assert_eq!(grid.world_size(), Vec2::new(400.0, 240.0));
    }

    #[test]
    fn out_of_range_is_empty() {
        let mut grid = GridMap::new(3, 3, 10.0);
        grid.fill_rect(0, 0, 3, 3, Cell::Solid);
        assert_eq!(grid.cell_at(-1, 0), Cell::Empty);
        assert_eq!(grid.cell_at(0, -1), Cell::Empty);
        assert_eq!(grid.cell_at(3, 0), Cell::Empty);
        assert_eq!(grid.cell_at(0, 3), Cell::Empty);
        assert_eq!(grid.cell_at(i32::MIN, i32::MAX), Cell::Empty);
        assert_eq!(grid.cell_at(2, 2), Cell::Solid);
    }

    #[test]
    fn ascii_rows_map_to_col_row() {
        let grid = GridMap::from_ascii(&["....", "..#.", "####"], 40.0);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.is_solid(2, 1));
        assert!(!grid.is_solid(1, 1));
        assert_eq!(grid.solid_count(), 5);
    }

    #[test]
    fn fill_rect_clips() {
        let mut grid = GridMap::new(5, 5, 1.0);
        grid.fill_rect(3, 3, 10, 10, Cell::Solid);
        assert_eq!(grid.solid_count(), 4);
    }

    #[test]
    fn world_to_cell_floors_negatives() {
        let grid = GridMap::new(5, 5, 40.0);
        assert_eq!(grid.world_to_cell(Vec2::new(39.99, 40.0)), IVec2::new(0, 1));
        assert_eq!(grid.world_to_cell(Vec2::new(-0.5, -40.5)), IVec2::new(-1, -2));
        assert_eq!(grid.cell_origin(2, 3), Vec2::new(80.0, 120.0));
    }

    #[test]
    fn visible_cells_cover_view() {
        let grid = GridMap::new(100, 20, 40.0);
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.center = Vec2::new(1000.0, 300.0);

        let range = grid.visible_cells(&camera);
        assert_eq!(range.min, IVec2::new(15, 0));
        assert_eq!(range.max, IVec2::new(36, 16));
        assert_eq!(range.iter().count(), 21 * 16);
    }

    #[test]
    fn visible_cells_clip_to_grid() {
        let grid = GridMap::new(4, 4, 40.0);
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.center = Vec2::new(80.0, 80.0);

        let range = grid.visible_cells(&camera);
        assert_eq!(range.min, IVec2::ZERO);
        assert_eq!(range.max, IVec2::new(4, 4));
        assert!(!range.is_empty());
    }
}
