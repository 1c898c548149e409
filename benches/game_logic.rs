use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pentris::core::{random_piece, Board, GameState, ShapeMatrix, SimpleRng};
use pentris::term::{FrameBuffer, GameView, HudView, Viewport};
use pentris::types::{Block, GameAction, PieceKind, BOARD_WIDTH};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
            if state.game_over() {
                state.restart();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_5_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 17..22 {
                for x in 0..BOARD_WIDTH as i8 {
                    board.set(x, y, Some(Block::new(PieceKind::I, '#')));
                }
            }
            black_box(board.clear_completed_lines());
        })
    });
}

fn bench_random_piece(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("random_piece", |b| {
        b.iter(|| black_box(random_piece(&mut rng)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let m = ShapeMatrix::from_catalog(PieceKind::F, || '#');

    c.bench_function("rotate_cw", |b| b.iter(|| black_box(m.rotated_cw())));
}

fn bench_hard_drop_and_lock(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop_and_lock", |b| {
        b.iter(|| {
            state.apply_action(GameAction::HardDrop);
            state.gravity_tick();
            if state.game_over() {
                state.restart();
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let snap = state.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(100, 30);
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("render_into", |b| {
        b.iter(|| view.render_into(black_box(&snap), &HudView::default(), vp, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_random_piece,
    bench_rotate,
    bench_hard_drop_and_lock,
    bench_render
);
criterion_main!(benches);
