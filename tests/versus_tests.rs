//! Versus tests - garbage credit, cancellation and cross-thread linking

use std::thread;

use tetrad::core::{GameBoard, Piece, PlayerSide, Versus};
use tetrad::types::{PieceKind, Tag, BOARD_HEIGHT, BOARD_WIDTH, LOCK_DELAY_MS};

fn linked_pair() -> (GameBoard, GameBoard) {
    let mut a = GameBoard::new(11);
    let mut b = GameBoard::new(22);
    a.link_opponent(&b);
    b.link_opponent(&a);
    a.start();
    b.start();
    (a, b)
}

fn vertical_bar(column: i8) -> Piece {
    let mut bar = Piece::spawn(PieceKind::I);
    bar.rotate_right();
    bar.x = column - 2;
    bar
}

fn fill_row(board: &mut GameBoard, y: i8, gap: Option<i8>, tag: Tag) {
    for x in 0..BOARD_WIDTH as i8 {
        if Some(x) != gap {
            board.grid_mut().set(x, y, Some(tag));
        }
    }
}

/// Clear `rows` rows off the bottom with a vertical bar in column 0
fn clear_with_bar(board: &mut GameBoard, rows: i8) {
    board.grid_mut().clear();
    for y in (BOARD_HEIGHT as i8 - rows)..BOARD_HEIGHT as i8 {
        fill_row(board, y, Some(0), Tag::Piece(PieceKind::T));
    }
    board.set_controlling(vertical_bar(0));
    board.hard_drop();
    board.elapse(LOCK_DELAY_MS);
}

#[test]
fn test_four_row_clear_sends_garbage_applied_at_next_spawn() {
    let (mut a, mut b) = linked_pair();

    clear_with_bar(&mut a, 4);
    assert_eq!(a.take_last_event().map(|e| e.rows_cleared), Some(4));
    assert_eq!(b.pending_garbage(), 4);

    // Nothing lands on B until B spawns
    let marker = Tag::Piece(PieceKind::Z);
    b.grid_mut().set(9, 21, Some(marker));
    assert_eq!(b.grid().occupied_count(), 1);

    b.set_controlling(vertical_bar(0));
    b.hard_drop();
    b.elapse(LOCK_DELAY_MS);

    assert_eq!(b.pending_garbage(), 0);
    // The stack moved up four rows...
    assert_eq!(b.grid().get(9, 17), Some(Some(marker)));
    for y in 14..18 {
        assert_eq!(b.grid().get(0, y), Some(Some(Tag::Piece(PieceKind::I))));
    }
    // ...over four full garbage rows
    for y in 18..22 {
        assert!(b.grid().is_garbage_row(y as usize));
        assert!(b.grid().is_row_full(y as usize));
    }
    assert_eq!(b.grid().occupied_count(), 1 + 4 + 40);
    assert!(b.is_running());
}

#[test]
fn test_attack_sizes() {
    for (rows, sent) in [(2, 1), (3, 2), (4, 4)] {
        let (mut a, b) = linked_pair();
        // Break any chain so only the multi-row rule applies
        a.hard_drop();
        a.elapse(LOCK_DELAY_MS);
        clear_with_bar(&mut a, rows);
        assert_eq!(b.pending_garbage(), sent, "{rows} rows");
    }
}

#[test]
fn test_singles_only_send_inside_a_chain() {
    let (mut a, b) = linked_pair();

    clear_with_bar(&mut a, 1);
    assert_eq!(b.pending_garbage(), 0);

    // The first single started a chain; the next one sends its row
    clear_with_bar(&mut a, 1);
    assert_eq!(b.pending_garbage(), 1);

    clear_with_bar(&mut a, 2);
    assert_eq!(b.pending_garbage(), 2);

    // A lock that clears nothing breaks the chain
    clear_with_bar(&mut a, 0);
    assert_eq!(a.take_last_event().map(|e| e.garbage_sent), Some(0));
    clear_with_bar(&mut a, 1);
    assert_eq!(b.pending_garbage(), 2);
}

#[test]
fn test_pending_garbage_cancels_before_forwarding() {
    let (mut a, b) = linked_pair();
    a.credit_garbage_lines(3);

    // Three rows are worth two lines; both cancel pending garbage
    clear_with_bar(&mut a, 3);
    let event = a.take_last_event().unwrap();
    assert_eq!(event.garbage_cancelled, 2);
    assert_eq!(event.garbage_sent, 0);
    assert_eq!(b.pending_garbage(), 0);
    assert_eq!(a.pending_garbage(), 0);
    // The remaining owed line landed when A spawned
    assert!(a.grid().is_garbage_row(21));
}

#[test]
fn test_garbage_rows_on_grid_cancel_before_forwarding() {
    let (mut a, b) = linked_pair();
    a.grid_mut().clear();
    fill_row(&mut a, 21, None, Tag::Garbage);
    fill_row(&mut a, 20, None, Tag::Garbage);
    for y in 16..20 {
        fill_row(&mut a, y, Some(0), Tag::Piece(PieceKind::T));
    }
    a.set_controlling(vertical_bar(0));
    a.hard_drop();
    a.elapse(LOCK_DELAY_MS);

    let event = a.take_last_event().unwrap();
    assert_eq!(event.rows_cleared, 4);
    assert_eq!(event.garbage_cancelled, 2);
    assert_eq!(event.garbage_sent, 2);
    assert_eq!(b.pending_garbage(), 2);
    assert_eq!(a.grid().occupied_count(), 0);
}

#[test]
fn test_unlinked_board_sends_nothing() {
    let mut a = GameBoard::new(3);
    a.start();
    clear_with_bar(&mut a, 4);
    let event = a.take_last_event().unwrap();
    assert_eq!(event.rows_cleared, 4);
    assert_eq!(event.garbage_sent, 0);
}

#[test]
fn test_garbage_overflow_tops_out() {
    let (mut a, _b) = linked_pair();
    a.credit_garbage_lines(40);
    a.hard_drop();
    a.elapse(LOCK_DELAY_MS);
    assert!(!a.is_running());
}

#[test]
fn test_boards_on_separate_threads() {
    let mut a = GameBoard::new(5);
    let mut b = GameBoard::new(6);
    a.link_opponent_inbox(b.garbage_inbox()).unwrap();
    b.link_opponent_inbox(a.garbage_inbox()).unwrap();
    a.start();
    b.start();

    let worker = thread::spawn(move || {
        for _ in 0..3 {
            clear_with_bar(&mut a, 4);
        }
        a
    });
    let a = worker.join().unwrap();

    assert_eq!(a.lines(), 12);
    assert_eq!(b.pending_garbage(), 12);
}

#[test]
fn test_versus_pair_runs_to_a_winner() {
    let mut versus = Versus::new(1, 2);
    versus.start();

    // The player sits still while the opponent stacks in the middle
    for _ in 0..200_000 {
        if versus.is_over() {
            break;
        }
        versus.board_mut(PlayerSide::Opponent).hard_drop();
        versus.frame();
    }
    assert_eq!(versus.winner(), Some(PlayerSide::Player));
}
