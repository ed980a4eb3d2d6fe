use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::types::{Cell, Position, Score, Side};

pub const MIN_BOARD_SIZE: u8 = 4;
/// Upper bound imposed by the 64-bit masks.
pub const MAX_BOARD_SIZE: u8 = 8;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Immutable Reversi board of side `size`, represented by two bitboards.
///
/// Square `(row, col)` maps to bit `row * size + col`, so ascending bit order
/// is row-major order. Every move produces a new `Board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    size: u8,
    dark: u64,
    light: u64,
}

impl Board {
    /// Creates the initial board with the four center discs:
    /// light on the main diagonal, dark on the anti-diagonal.
    pub fn new(size: u8) -> Result<Self, EngineError> {
        validate_size(size)?;

        let mid = size / 2;
        let light = square(size, mid - 1, mid - 1) | square(size, mid, mid);
        let dark = square(size, mid - 1, mid) | square(size, mid, mid - 1);

        Ok(Self { size, dark, light })
    }

    /// Builds a board from row-major cells.
    pub fn from_cells(size: u8, cells: &[Cell]) -> Result<Self, EngineError> {
        validate_size(size)?;

        let expected = num_squares(size);
        if cells.len() != expected {
            return Err(EngineError::InvalidCells {
                expected,
                actual: cells.len(),
            });
        }

        let mut board = Self {
            size,
            dark: 0,
            light: 0,
        };
        for (idx, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Empty => {}
                Cell::Occupied(Side::Dark) => board.dark |= 1u64 << idx,
                Cell::Occupied(Side::Light) => board.light |= 1u64 << idx,
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn cell(&self, pos: Position) -> Result<Cell, EngineError> {
        let square = self.checked_square(pos)?;
        Ok(if (self.dark & square) != 0 {
            Cell::Occupied(Side::Dark)
        } else if (self.light & square) != 0 {
            Cell::Occupied(Side::Light)
        } else {
            Cell::Empty
        })
    }

    /// Out-of-bounds and occupied squares are never legal.
    pub fn is_legal_move(&self, pos: Position, side: Side) -> bool {
        self.contains(pos) && self.collect_flips(pos, side) != 0
    }

    /// Legal moves for `side` in row-major order. Empty means `side` must pass.
    pub fn legal_moves(&self, side: Side) -> Vec<Position> {
        self.positions(self.legal_mask(side))
    }

    pub fn has_legal_move(&self, side: Side) -> bool {
        self.legal_mask(side) != 0
    }

    /// Opponent discs that `side` would capture by playing `pos`, row-major.
    pub fn flips(&self, pos: Position, side: Side) -> Vec<Position> {
        if !self.contains(pos) {
            return Vec::new();
        }
        self.positions(self.collect_flips(pos, side))
    }

    /// Places one disc and flips every bracketed line. The receiver is left
    /// untouched; illegal moves are reported instead of applied.
    pub fn apply_move(&self, pos: Position, side: Side) -> Result<Self, EngineError> {
        let move_bit = self.checked_square(pos)?;
        let flips = self.collect_flips(pos, side);
        if flips == 0 {
            return Err(EngineError::IllegalMove(pos));
        }

        let (me, opp) = self.split(side);
        let next_me = me | move_bit | flips;
        let next_opp = opp & !flips;

        Ok(match side {
            Side::Dark => Self {
                dark: next_me,
                light: next_opp,
                ..*self
            },
            Side::Light => Self {
                light: next_me,
                dark: next_opp,
                ..*self
            },
        })
    }

    pub fn score(&self) -> Score {
        Score {
            light: self.light.count_ones() as u8,
            dark: self.dark.count_ones() as u8,
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        num_squares(self.size) as u8 - self.score().total()
    }

    /// Converts board to row-major codes where 0=empty, 1=dark, 2=light.
    pub fn to_vec(&self) -> Vec<u8> {
        (0..num_squares(self.size))
            .map(|idx| {
                let square = 1u64 << idx;
                if (self.dark & square) != 0 {
                    Side::Dark.code()
                } else if (self.light & square) != 0 {
                    Side::Light.code()
                } else {
                    0
                }
            })
            .collect()
    }

    fn legal_mask(&self, side: Side) -> u64 {
        let empty = !(self.dark | self.light) & full_mask(self.size);
        let mut legal = 0u64;

        let mut bits = empty;
        while bits != 0 {
            let idx = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            if self.collect_flips(self.position(idx), side) != 0 {
                legal |= 1u64 << idx;
            }
        }

        legal
    }

    fn collect_flips(&self, pos: Position, side: Side) -> u64 {
        let move_bit = square(self.size, pos.row, pos.col);
        let (me, opp) = self.split(side);
        if ((me | opp) & move_bit) != 0 {
            return 0;
        }

        let size = self.size as i32;
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = pos.row as i32 + dr;
            let mut c = pos.col as i32 + dc;
            let mut line = 0u64;

            while (0..size).contains(&r) && (0..size).contains(&c) {
                let square = 1u64 << (r * size + c);
                if (opp & square) != 0 {
                    line |= square;
                } else {
                    if (me & square) != 0 {
                        flips |= line;
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }

    fn split(&self, side: Side) -> (u64, u64) {
        match side {
            Side::Dark => (self.dark, self.light),
            Side::Light => (self.light, self.dark),
        }
    }

    fn checked_square(&self, pos: Position) -> Result<u64, EngineError> {
        if !self.contains(pos) {
            return Err(EngineError::OutOfBounds {
                pos,
                size: self.size,
            });
        }
        Ok(square(self.size, pos.row, pos.col))
    }

    fn position(&self, idx: usize) -> Position {
        let size = self.size as usize;
        Position::new((idx / size) as u8, (idx % size) as u8)
    }

    fn positions(&self, mask: u64) -> Vec<Position> {
        let mut bits = mask;
        let mut out = Vec::with_capacity(mask.count_ones() as usize);

        while bits != 0 {
            out.push(self.position(bits.trailing_zeros() as usize));
            bits &= bits - 1;
        }

        out
    }
}

/// Rows of `.`, `D` and `L`, one line per row.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, code) in self.to_vec().into_iter().enumerate() {
            if idx > 0 && idx % self.size as usize == 0 {
                writeln!(f)?;
            }
            let ch = match code {
                1 => 'D',
                2 => 'L',
                _ => '.',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let size = u8::try_from(rows.len())
            .map_err(|_| EngineError::InvalidBoardText(format!("{} rows", rows.len())))?;
        validate_size(size)?;

        let mut cells = Vec::with_capacity(num_squares(size));
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != size as usize {
                return Err(EngineError::InvalidBoardText(format!(
                    "row {row} has {} cells, expected {size}",
                    line.chars().count()
                )));
            }
            for ch in line.chars() {
                cells.push(match ch {
                    '.' => Cell::Empty,
                    'D' => Cell::Occupied(Side::Dark),
                    'L' => Cell::Occupied(Side::Light),
                    other => {
                        return Err(EngineError::InvalidBoardText(format!(
                            "unexpected character {other:?} in row {row}"
                        )));
                    }
                });
            }
        }

        Self::from_cells(size, &cells)
    }
}

/// Accepts even sizes in `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
pub fn validate_size(size: u8) -> Result<(), EngineError> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) || size % 2 != 0 {
        return Err(EngineError::InvalidBoardSize(size));
    }
    Ok(())
}

fn num_squares(size: u8) -> usize {
    size as usize * size as usize
}

fn full_mask(size: u8) -> u64 {
    let squares = num_squares(size);
    if squares >= 64 {
        u64::MAX
    } else {
        (1u64 << squares) - 1
    }
}

fn square(size: u8, row: u8, col: u8) -> u64 {
    1u64 << (row as u32 * size as u32 + col as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn initial_board_has_cross_pattern() {
        let board = Board::new(6).unwrap();

        assert_eq!(board.cell(pos(2, 2)).unwrap(), Cell::Occupied(Side::Light));
        assert_eq!(board.cell(pos(2, 3)).unwrap(), Cell::Occupied(Side::Dark));
        assert_eq!(board.cell(pos(3, 2)).unwrap(), Cell::Occupied(Side::Dark));
        assert_eq!(board.cell(pos(3, 3)).unwrap(), Cell::Occupied(Side::Light));
        assert_eq!(board.score(), Score { light: 2, dark: 2 });
        assert_eq!(board.empty_count(), 32);
    }

    #[test]
    fn rejects_odd_small_and_oversized_boards() {
        for size in [0, 2, 3, 5, 7, 9, 10] {
            assert_eq!(Board::new(size), Err(EngineError::InvalidBoardSize(size)));
        }
        for size in [4, 6, 8] {
            assert!(Board::new(size).is_ok());
        }
    }

    #[test]
    fn initial_dark_legal_moves_on_8x8_are_four_expected_squares() {
        let board = Board::new(8).unwrap();

        assert_eq!(
            board.legal_moves(Side::Dark),
            vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]
        );
    }

    #[test]
    fn apply_move_flips_opponent_discs_and_updates_counts() {
        let board = Board::new(8).unwrap();

        let next = board.apply_move(pos(2, 3), Side::Dark).unwrap();

        assert_eq!(next.score(), Score { light: 1, dark: 4 });
        assert_eq!(next.empty_count(), 59);
        assert_eq!(next.cell(pos(3, 3)).unwrap(), Cell::Occupied(Side::Dark));
        assert_eq!(next.cell(pos(4, 4)).unwrap(), Cell::Occupied(Side::Light));
        assert_eq!(board.score(), Score { light: 2, dark: 2 });
    }

    #[test]
    fn illegal_move_is_an_error_and_keeps_board_unchanged() {
        let board = Board::new(8).unwrap();
        let before = board;

        assert_eq!(
            board.apply_move(pos(0, 0), Side::Dark),
            Err(EngineError::IllegalMove(pos(0, 0)))
        );
        assert_eq!(
            board.apply_move(pos(3, 3), Side::Dark),
            Err(EngineError::IllegalMove(pos(3, 3)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_bounds_is_reported_and_never_legal() {
        let board = Board::new(6).unwrap();

        assert!(!board.is_legal_move(pos(6, 0), Side::Dark));
        assert!(!board.is_legal_move(pos(0, 200), Side::Light));
        assert!(board.flips(pos(6, 6), Side::Dark).is_empty());
        assert_eq!(
            board.apply_move(pos(6, 2), Side::Dark),
            Err(EngineError::OutOfBounds {
                pos: pos(6, 2),
                size: 6
            })
        );
        assert!(board.cell(pos(2, 6)).is_err());
    }

    #[test]
    fn line_running_off_the_edge_does_not_capture() {
        let board: Board = "\
            ....
            LLL.
            ....
            ...."
            .parse()
            .unwrap();

        assert!(!board.is_legal_move(pos(1, 3), Side::Dark));
        assert!(board.legal_moves(Side::Dark).is_empty());
    }

    #[test]
    fn line_ending_on_empty_does_not_capture() {
        let board: Board = "\
            D...
            .L..
            ....
            ...."
            .parse()
            .unwrap();

        assert!(board.is_legal_move(pos(2, 2), Side::Dark));
        assert!(!board.is_legal_move(pos(1, 2), Side::Dark));
        assert_eq!(board.legal_moves(Side::Dark), vec![pos(2, 2)]);
    }

    #[test]
    fn flips_lists_captured_discs_in_row_major_order() {
        let board = Board::new(6).unwrap();

        assert_eq!(board.flips(pos(1, 2), Side::Dark), vec![pos(2, 2)]);
        assert!(board.flips(pos(0, 0), Side::Dark).is_empty());
    }

    #[test]
    fn text_form_round_trips_initial_board() {
        let board = Board::new(4).unwrap();
        let text = board.to_string();

        assert_eq!(text, "....\n.LD.\n.DL.\n....");
        assert_eq!(text.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn text_parse_rejects_bad_input() {
        assert!(matches!(
            "...\n...\n...".parse::<Board>(),
            Err(EngineError::InvalidBoardSize(3))
        ));
        assert!(matches!(
            "....\n....\n..x.\n....".parse::<Board>(),
            Err(EngineError::InvalidBoardText(_))
        ));
        assert!(matches!(
            "....\n...\n....\n....".parse::<Board>(),
            Err(EngineError::InvalidBoardText(_))
        ));
    }

    #[test]
    fn from_cells_checks_length() {
        let cells = vec![Cell::Empty; 35];

        assert_eq!(
            Board::from_cells(6, &cells),
            Err(EngineError::InvalidCells {
                expected: 36,
                actual: 35
            })
        );
    }

    #[test]
    fn to_vec_uses_ui_codes() {
        let cells = Board::new(4).unwrap().to_vec();

        assert_eq!(cells, vec![0, 0, 0, 0, 0, 2, 1, 0, 0, 1, 2, 0, 0, 0, 0, 0]);
    }
}
