//! Board tests - grid storage, bounds and row clearing

use blockfall::core::Board;
use blockfall::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i16, color: Color) {
    for x in 0..board.width() as i16 {
        board.set(x, y, Cell::Occupied(color));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);

    for y in 0..BOARD_HEIGHT as i16 {
        for x in 0..BOARD_WIDTH as i16 {
            assert_eq!(board.get(x, y), Some(Cell::Empty));
        }
    }
    assert_eq!(board.cells().len(), 200);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(10, 20);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 20), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(10, 20);

    assert!(board.set(5, 10, Cell::Occupied(Color::Purple)));
    assert_eq!(board.get(5, 10), Some(Cell::Occupied(Color::Purple)));

    assert!(!board.set(-1, 10, Cell::Occupied(Color::Purple)));
    assert!(!board.set(5, 20, Cell::Occupied(Color::Purple)));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::new(10, 8);
    // Distinct markers on the rows that survive
    board.set(0, 2, Cell::Occupied(Color::Red));
    board.set(1, 4, Cell::Occupied(Color::Green));
    board.set(2, 6, Cell::Occupied(Color::Blue));
    fill_row(&mut board, 3, Color::Cyan);
    fill_row(&mut board, 5, Color::Cyan);

    let before = board.to_rows();
    assert_eq!(board.clear_full_rows(), 2);

    let after = board.to_rows();
    assert_eq!(after.len(), 8);
    assert!(board.is_row_empty(0));
    assert!(board.is_row_empty(1));
    // Rows 0..=2 shift down by two, row 4 by one, rows 6..=7 stay
    assert_eq!(after[2..5], before[0..3]);
    assert_eq!(after[5], before[4]);
    assert_eq!(after[6..], before[6..]);
    assert_eq!(board.get(0, 4), Some(Cell::Occupied(Color::Red)));
    assert_eq!(board.get(1, 5), Some(Cell::Occupied(Color::Green)));
    assert_eq!(board.get(2, 6), Some(Cell::Occupied(Color::Blue)));
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::new(10, 20);
    for y in 16..20 {
        fill_row(&mut board, y, Color::Yellow);
    }
    board.set(3, 15, Cell::Occupied(Color::Red));

    assert_eq!(board.clear_full_rows(), 4);
    assert_eq!(board.filled_count(), 1);
    assert_eq!(board.get(3, 19), Some(Cell::Occupied(Color::Red)));
}

#[test]
fn test_whole_board_full() {
    let mut board = Board::new(4, 4);
    for y in 0..4 {
        fill_row(&mut board, y, Color::Orange);
    }
    assert_eq!(board.clear_full_rows(), 4);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_custom_dimensions() {
    let board = Board::new(12, 24);
    assert_eq!(board.rows().count(), 24);
    assert!(board.rows().all(|row| row.len() == 12));
    assert!(board.is_occupied(12, 0));
    assert!(!board.is_occupied(11, 23));
    assert!(board.is_occupied(11, 24));
}
