use crate::error::{RejigError, RjResult};
use crate::raster::Raster;
use strum_macros::EnumIter;

/// Stable piece identity. Ids are assigned in reading order at extraction
/// time and never change for the lifetime of a run.
pub type PieceId = u16;

/// Relative placement direction between two pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const COUNT: usize = 4;

    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }
}

/// An immutable square block of image pixels.
///
/// The four border sample vectors are derived once at extraction so the
/// compatibility measure never re-slices the pixel block.
#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    size: usize,
    pixels: Vec<[u8; 3]>,
    edges: [Vec<[u8; 3]>; 4],
}

impl Piece {
    fn from_block(id: PieceId, size: usize, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), size * size);
        let column = |x: usize| (0..size).map(|y| pixels[y * size + x]).collect();
        let row = |y: usize| pixels[y * size..(y + 1) * size].to_vec();
        // Indexed by Direction::index(): right, down, left, up.
        let edges = [column(size - 1), row(size - 1), column(0), row(0)];
        Self {
            id,
            size,
            pixels,
            edges,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[y * self.size + x]
    }

    /// Border samples on the given side. Columns run top to bottom, rows
    /// left to right, so facing edges align index-for-index.
    #[inline]
    pub fn edge(&self, dir: Direction) -> &[[u8; 3]] {
        &self.edges[dir.index()]
    }
}

/// All pieces of a puzzle at a fixed grid geometry. Never mutated after
/// construction; `len() == rows * cols` always holds.
#[derive(Debug, Clone)]
pub struct PieceSet {
    rows: usize,
    cols: usize,
    piece_size: usize,
    pieces: Vec<Piece>,
}

impl PieceSet {
    /// Cuts the raster into a grid of square pieces of `piece_size` pixels.
    pub fn extract(raster: &Raster, piece_size: usize) -> RjResult<Self> {
        if piece_size == 0
            || raster.width() % piece_size != 0
            || raster.height() % piece_size != 0
        {
            return Err(RejigError::InvalidImageDimensions(format!(
                "piece size {} does not divide {}x{} evenly",
                piece_size,
                raster.width(),
                raster.height()
            )));
        }

        let cols = raster.width() / piece_size;
        let rows = raster.height() / piece_size;
        let count = rows * cols;

        if count < 4 {
            return Err(RejigError::InsufficientPieces(format!(
                "{}x{} grid yields {} pieces, need at least 4",
                rows, cols, count
            )));
        }
        if count > PieceId::MAX as usize {
            return Err(RejigError::InvalidImageDimensions(format!(
                "{}x{} grid yields {} pieces, more than the supported {}",
                rows,
                cols,
                count,
                PieceId::MAX
            )));
        }

        let mut pieces = Vec::with_capacity(count);
        for r in 0..rows {
            for c in 0..cols {
                let mut pixels = Vec::with_capacity(piece_size * piece_size);
                for y in 0..piece_size {
                    for x in 0..piece_size {
                        pixels.push(raster.pixel(c * piece_size + x, r * piece_size + y));
                    }
                }
                pieces.push(Piece::from_block(
                    (r * cols + c) as PieceId,
                    piece_size,
                    pixels,
                ));
            }
        }

        Ok(Self {
            rows,
            cols,
            piece_size,
            pieces,
        })
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn piece_size(&self) -> usize {
        self.piece_size
    }

    #[inline]
    pub fn get(&self, id: PieceId) -> &Piece {
        &self.pieces[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Composites a placement (grid position -> piece id, reading order)
    /// back into a raster.
    pub fn assemble(&self, placement: &[PieceId]) -> Raster {
        debug_assert_eq!(placement.len(), self.len());
        let width = self.cols * self.piece_size;
        let height = self.rows * self.piece_size;
        let mut data = vec![[0u8; 3]; width * height];

        for (pos, &id) in placement.iter().enumerate() {
            let piece = self.get(id);
            let (r, c) = (pos / self.cols, pos % self.cols);
            for y in 0..self.piece_size {
                for x in 0..self.piece_size {
                    let px = c * self.piece_size + x;
                    let py = r * self.piece_size + y;
                    data[py * width + px] = piece.pixel(x, y);
                }
            }
        }

        Raster::from_pixels(width, height, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Raster {
        let mut bytes = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                bytes.extend_from_slice(&[x as u8, y as u8, ((x + y) / 2) as u8]);
            }
        }
        Raster::from_rgb(width, height, &bytes).expect("gradient buffer")
    }

    #[test]
    fn test_extract_geometry() {
        let raster = gradient(12, 8);
        let set = PieceSet::extract(&raster, 4).expect("extraction failed");
        assert_eq!(set.rows(), 2);
        assert_eq!(set.cols(), 3);
        assert_eq!(set.len(), 6);
        assert_eq!(set.piece_size(), 4);
        // Reading-order ids.
        assert_eq!(set.get(4).id(), 4);
        // Piece (1, 1) starts at pixel (4, 4).
        assert_eq!(set.get(4).pixel(0, 0), [4, 4, 4]);
    }

    #[test]
    fn test_extract_rejects_uneven_size() {
        let raster = gradient(12, 8);
        let err = PieceSet::extract(&raster, 5).unwrap_err();
        assert!(matches!(err, RejigError::InvalidImageDimensions(_)));
    }

    #[test]
    fn test_extract_rejects_degenerate_grid() {
        let raster = gradient(8, 4);
        // 2x1 grid: two pieces is not a solvable puzzle.
        let err = PieceSet::extract(&raster, 4).unwrap_err();
        assert!(matches!(err, RejigError::InsufficientPieces(_)));
    }

    #[test]
    fn test_edges_face_each_other() {
        let raster = gradient(8, 8);
        let set = PieceSet::extract(&raster, 4).expect("extraction failed");
        let left = set.get(0);
        let right = set.get(1);
        // Right edge of piece 0 is column x=3, left edge of piece 1 is x=4.
        assert_eq!(left.edge(Direction::Right)[0], [3, 0, 1]);
        assert_eq!(right.edge(Direction::Left)[0], [4, 0, 2]);
        assert_eq!(left.edge(Direction::Right).len(), 4);
    }

    #[test]
    fn test_assemble_identity_roundtrip() {
        let raster = gradient(12, 12);
        let set = PieceSet::extract(&raster, 4).expect("extraction failed");
        let identity: Vec<PieceId> = (0..set.len() as PieceId).collect();
        assert_eq!(set.assemble(&identity), raster);
    }
}
