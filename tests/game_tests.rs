//! Engine tests - lifecycle, lock delay, hold, scoring and the clear scenario

use tetrad::core::{FrameDriver, GameBoard, Piece};
use tetrad::types::{GameAction, PieceKind, Tag, BOARD_WIDTH, LOCK_DELAY_MS};

fn started(seed: u32) -> GameBoard {
    let mut board = GameBoard::new(seed);
    board.start();
    board
}

fn vertical_bar(column: i8) -> Piece {
    let mut bar = Piece::spawn(PieceKind::I);
    bar.rotate_right();
    // The vertical bar fills column 2 of its box
    bar.x = column - 2;
    bar
}

fn fill_row_except(board: &mut GameBoard, y: i8, gap: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        if x != gap {
            board.grid_mut().set(x, y, Some(Tag::Piece(PieceKind::J)));
        }
    }
}

fn drop_and_lock(board: &mut GameBoard) {
    board.hard_drop();
    board.elapse(LOCK_DELAY_MS);
}

#[test]
fn test_game_lifecycle() {
    let mut board = GameBoard::new(12345);
    assert!(!board.is_running());

    board.start();
    assert!(board.is_running());
    assert!(!board.is_paused());

    board.set_paused(true);
    assert!(board.is_paused());
    assert!(board.is_running());

    board.reset();
    assert!(!board.is_running());
    assert!(!board.is_paused());
}

#[test]
fn test_single_row_clear_scenario() {
    for gap in 0..BOARD_WIDTH as i8 {
        let mut board = started(31);
        // A lock that clears nothing puts the combo at 1
        drop_and_lock(&mut board);
        assert_eq!(board.combo(), 1);
        board.grid_mut().clear();

        fill_row_except(&mut board, 21, gap);
        board.set_controlling(vertical_bar(gap));
        let score_before = board.score();
        drop_and_lock(&mut board);

        let event = board.take_last_event().unwrap();
        assert_eq!(event.rows_cleared, 1, "gap {gap}");
        assert_eq!(board.combo(), 1);
        assert_eq!(board.level(), 1);
        // ceil((1 + 1) / 4) * 1 row * combo 1; the bar's remainder sits on
        // the bottom row so the bonus factor is 1
        assert_eq!(board.score() - score_before, 1);
        assert_eq!(event.score_delta, 1);
    }
}

#[test]
fn test_clean_floor_scores_bonus() {
    let mut board = started(31);
    drop_and_lock(&mut board);
    board.grid_mut().clear();

    // Four rows with a one-column well; the bar clears them all
    for y in 18..22 {
        fill_row_except(&mut board, y, 9);
    }
    board.set_controlling(vertical_bar(9));
    drop_and_lock(&mut board);

    assert_eq!(board.level(), 4);
    assert_eq!(board.lines(), 4);
    // ceil((4 + 4) / 4) = 2, * 4 rows * combo 1 * bonus 4
    assert_eq!(board.score(), 32);
    assert_eq!(board.combo(), 7);
    assert_eq!(board.grid().occupied_count(), 0);
}

#[test]
fn test_soft_drop_frames_add_to_score_and_reset() {
    let mut board = started(31);
    drop_and_lock(&mut board);
    board.grid_mut().clear();

    for _ in 0..3 {
        board.count_sped_up_frame();
    }
    fill_row_except(&mut board, 21, 0);
    board.set_controlling(vertical_bar(0));
    drop_and_lock(&mut board);

    // (ceil(2 / 4) + 3) * 1 * 1 * 1
    assert_eq!(board.score(), 4);
    assert_eq!(board.soft_drop_frames(), 0);
}

#[test]
fn test_first_clear_of_a_game_scores_zero() {
    let mut board = started(31);
    fill_row_except(&mut board, 21, 0);
    board.set_controlling(vertical_bar(0));
    drop_and_lock(&mut board);

    assert_eq!(board.lines(), 1);
    assert_eq!(board.combo(), 0);
    assert_eq!(board.score(), 0);
}

#[test]
fn test_zero_clear_lock_resets_combo_to_one() {
    let mut board = started(31);
    drop_and_lock(&mut board);
    board.grid_mut().clear();
    for y in 20..22 {
        fill_row_except(&mut board, y, 0);
    }
    board.set_controlling(vertical_bar(0));
    drop_and_lock(&mut board);
    assert_eq!(board.combo(), 3);

    drop_and_lock(&mut board);
    assert_eq!(board.take_last_event().map(|e| e.rows_cleared), Some(0));
    assert_eq!(board.combo(), 1);
}

#[test]
fn test_second_hold_is_noop() {
    let mut board = started(8);
    assert!(board.hold());
    let state = (
        *board.controlling(),
        *board.queued(),
        board.held().copied(),
    );
    assert!(!board.hold());
    assert!(!board.apply_action(GameAction::Hold));
    assert_eq!(
        (*board.controlling(), *board.queued(), board.held().copied()),
        state
    );
}

#[test]
fn test_hold_resets_after_lock() {
    let mut board = started(8);
    let first = board.controlling().kind;
    assert!(board.hold());
    drop_and_lock(&mut board);
    assert!(board.can_hold());
    assert!(board.hold());
    assert_eq!(board.controlling().kind, first);
}

#[test]
fn test_lock_delay_resets_without_limit() {
    let mut board = started(8);
    board.hard_drop();
    for _ in 0..100 {
        board.elapse(LOCK_DELAY_MS - 1);
        // Shuffle back and forth; every accepted move cancels the lock
        if !board.move_left() {
            assert!(board.move_right());
        }
        assert!(board.lock_remaining_ms().is_none());
        board.update();
        assert_eq!(board.lock_remaining_ms(), Some(LOCK_DELAY_MS));
    }
    assert_eq!(board.grid().occupied_count(), 0);
}

#[test]
fn test_ghost_is_landing_spot() {
    let mut board = started(8);
    let ghost = board.ghost();
    board.hard_drop();
    assert_eq!(*board.controlling(), ghost);
}

#[test]
fn test_pieces_stack_until_game_over() {
    let mut board = started(5);
    let mut driver = FrameDriver::new();
    let mut frames = 0;
    while board.is_running() && frames < 100_000 {
        board.hard_drop();
        driver.frame(&mut board);
        frames += 1;
    }
    assert!(!board.is_running(), "stacking in the middle never topped out");
    // Game over leaves the board inert
    let before = board.snapshot();
    board.update();
    board.elapse(LOCK_DELAY_MS);
    assert!(!board.move_left());
    assert_eq!(board.snapshot(), before);
}

#[test]
fn test_restart_action_starts_fresh_game() {
    let mut board = started(5);
    drop_and_lock(&mut board);
    assert!(board.apply_action(GameAction::Restart));
    assert!(board.is_running());
    assert_eq!(board.grid().occupied_count(), 0);
    assert_eq!(board.score(), 0);
}

#[test]
fn test_snapshot_json_shape() {
    let mut board = started(2);
    board.grid_mut().set(4, 21, Some(Tag::Garbage));
    board.credit_garbage_lines(1);

    let json = serde_json::to_value(board.snapshot()).unwrap();
    assert_eq!(json["grid"][21][4], 8);
    assert_eq!(json["pending_garbage"], 1);
    assert_eq!(json["running"], true);
    assert!(json["controlling"]["kind"].is_string());
    assert!(json["held"].is_null());
}
