use crate::error::ProgramError;

/// One pixel of a program, packed as 0xRRGGBBAA.
///
/// Red holds the class byte, green parameter A, blue parameter B. Alpha is
/// carried along but never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell(u32);

impl Cell {
    pub fn new(class_byte: u8, param_a: u8, param_b: u8) -> Self {
        Cell::from_rgba([class_byte, param_a, param_b, 0xff])
    }

    pub fn from_packed(word: u32) -> Self {
        Cell(word)
    }

    pub fn from_rgba(pixel: [u8; 4]) -> Self {
        Cell(u32::from_be_bytes(pixel))
    }

    pub fn packed(&self) -> u32 {
        self.0
    }

    /// Split into (class byte, parameter A, parameter B)
    pub fn decode(&self) -> (u8, u8, u8) {
        (
            (self.0 >> 24) as u8,
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
        )
    }
}

/// Immutable rectangular program, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from packed 0xRRGGBBAA words
    pub fn from_packed(width: usize, height: usize, words: Vec<u32>) -> Result<Self, ProgramError> {
        if words.len() != width * height {
            return Err(ProgramError::GridShape(format!(
                "{}x{} grid needs {} cells, got {}",
                width,
                height,
                width * height,
                words.len()
            )));
        }

        Ok(Grid {
            width,
            height,
            cells: words.into_iter().map(Cell::from_packed).collect(),
        })
    }

    /// Build a grid from raw RGBA bytes, four per pixel
    pub fn from_rgba(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ProgramError> {
        if bytes.len() != width * height * 4 {
            return Err(ProgramError::GridShape(format!(
                "{}x{} RGBA image needs {} bytes, got {}",
                width,
                height,
                width * height * 4,
                bytes.len()
            )));
        }

        let cells = bytes
            .chunks_exact(4)
            .map(|px| Cell::from_rgba([px[0], px[1], px[2], px[3]]))
            .collect();

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from rows of cells. All rows must be the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ProgramError> {
        let height = rows.len();
        let width = rows.first().map(|row| row.len()).unwrap_or(0);

        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ProgramError::GridShape(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }

        Ok(Grid {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at (x, y), or None when outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.contains(x, y) {
            Some(self.cells[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// All cells with their coordinates, `y` outer and `x` inner
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % self.width, i / self.width, *cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_decode_ignores_alpha() {
        let cell = Cell::from_packed(0x28_00_2a_00);
        assert_eq!(cell.decode(), (0x28, 0x00, 0x2a));

        let opaque = Cell::from_packed(0x28_00_2a_ff);
        assert_eq!(opaque.decode(), cell.decode());

        assert_eq!(Cell::new(70, 10, 3).decode(), (70, 10, 3));
    }

    #[test]
    fn test_from_rgba() {
        let bytes = [0, 0, 0, 255, 40, 1, 2, 128];
        let grid = Grid::from_rgba(2, 1, &bytes).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.get(1, 0).unwrap().decode(), (40, 1, 2));

        assert!(Grid::from_rgba(2, 2, &bytes).is_err());
    }

    #[test]
    fn test_from_packed_checks_length() {
        assert!(Grid::from_packed(2, 2, vec![0; 4]).is_ok());
        let err = Grid::from_packed(2, 2, vec![0; 3]).unwrap_err();
        assert!(matches!(err, ProgramError::GridShape(_)));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![Cell::new(0, 0, 0); 3], vec![Cell::new(0, 0, 0); 2]];
        assert!(Grid::from_rows(rows).is_err());
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::from_rows(vec![vec![Cell::new(1, 2, 3); 3]; 2]).unwrap();
        assert!(grid.contains(0, 0));
        assert!(grid.contains(2, 1));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(3, 0));
        assert!(!grid.contains(0, 2));
        assert!(!grid.contains(0, -1));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_iter_is_row_major() {
        let rows = vec![
            vec![Cell::new(1, 0, 0), Cell::new(2, 0, 0)],
            vec![Cell::new(3, 0, 0), Cell::new(4, 0, 0)],
        ];
        let grid = Grid::from_rows(rows).unwrap();
        let order: Vec<(usize, usize, u8)> = grid.iter().map(|(x, y, c)| (x, y, c.decode().0)).collect();
        assert_eq!(order, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
    }
}
