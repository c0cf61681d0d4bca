use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetrad::core::{FrameDriver, GameBoard, Grid, Randomizer, Versus};
use tetrad::types::{PieceKind, Tag};

fn bench_frame(c: &mut Criterion) {
    let mut board = GameBoard::new(12345);
    let mut driver = FrameDriver::new();
    board.start();

    c.bench_function("board_frame", |b| {
        b.iter(|| {
            if !board.is_running() {
                board.reset();
                board.start();
            }
            driver.frame(black_box(&mut board));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in 18..22 {
                for x in 0..10 {
                    grid.set(x, y, Some(Tag::Piece(PieceKind::I)));
                }
            }
            grid.clear_full_rows()
        })
    });
}

fn bench_garbage(c: &mut Criterion) {
    c.bench_function("push_4_garbage_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for _ in 0..4 {
                grid.push_garbage_row();
            }
            grid
        })
    });
}

fn bench_randomizer(c: &mut Criterion) {
    let mut randomizer = Randomizer::new(12345);

    c.bench_function("randomizer_draw", |b| b.iter(|| randomizer.draw()));
}

fn bench_move(c: &mut Criterion) {
    let mut board = GameBoard::new(12345);
    board.start();

    c.bench_function("move", |b| {
        b.iter(|| {
            if !board.move_left() {
                while board.move_right() {}
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut board = GameBoard::new(12345);
    board.start();

    c.bench_function("rotate", |b| b.iter(|| board.rotate_right()));
}

fn bench_ghost(c: &mut Criterion) {
    let mut board = GameBoard::new(12345);
    board.start();

    c.bench_function("ghost", |b| b.iter(|| black_box(&board).ghost()));
}

fn bench_versus_frame(c: &mut Criterion) {
    let mut versus = Versus::new(1, 2);
    versus.start();

    c.bench_function("versus_frame", |b| {
        b.iter(|| {
            if versus.is_over() {
                versus.reset();
                versus.start();
            }
            versus.frame()
        })
    });
}

criterion_group!(
    benches,
    bench_frame,
    bench_line_clear,
    bench_garbage,
    bench_randomizer,
    bench_move,
    bench_rotate,
    bench_ghost,
    bench_versus_frame
);
criterion_main!(benches);
