//! Engine scenario tests with scripted piece sequences.
//!
//! Every scenario injects a deterministic piece source, so the exact board,
//! score, and event stream can be asserted move for move.

use blockdrop::core::{Engine, GameEvent, PieceSource, Tuning};
use blockdrop::types::{Command, PieceKind};

/// Piece source cycling through a fixed script.
struct Scripted {
    kinds: Vec<PieceKind>,
    at: usize,
}

impl Scripted {
    fn cycle(kinds: &[PieceKind]) -> Box<Self> {
        Box::new(Self {
            kinds: kinds.to_vec(),
            at: 0,
        })
    }
}

impl PieceSource for Scripted {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.at % self.kinds.len()];
        self.at += 1;
        kind
    }
}

fn start_engine(kinds: &[PieceKind]) -> Engine {
    let mut engine =
        Engine::with_source(Scripted::cycle(kinds), Tuning::default()).expect("valid tuning");
    engine.start();
    engine
}

/// Shift the active piece by `dx` columns, one step at a time.
fn shift(engine: &mut Engine, dx: i8) {
    for _ in 0..dx.abs() {
        assert!(engine.apply_command(if dx < 0 {
            Command::MoveLeft
        } else {
            Command::MoveRight
        }));
    }
}

#[test]
fn test_o_piece_soft_drops_to_rest() {
    let mut engine = start_engine(&[PieceKind::O]);

    // Twenty soft drops: eighteen move the piece, the nineteenth locks it,
    // the twentieth moves the replacement piece.
    for _ in 0..20 {
        engine.apply_command(Command::SoftDrop);
    }

    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(engine.board().get(x, y), Some(Some(PieceKind::O)));
    }
    let active = engine.active().expect("replacement piece");
    assert_eq!(active.y, 1);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.lines(), 0);
}

#[test]
fn test_single_and_double_clears_pay_the_table() {
    let mut engine = start_engine(&[PieceKind::O]);

    // Five O pieces across the bottom: rows 18 and 19 fill together.
    for target in [0i8, 2, 4, 6, 8] {
        let dx = target - engine.active().unwrap().x;
        shift(&mut engine, dx);
        assert!(engine.apply_command(Command::HardDrop));
    }

    assert_eq!(engine.lines(), 2);
    assert_eq!(engine.score(), 100);
    assert_eq!(
        engine.take_events(),
        vec![GameEvent::LinesCleared { count: 2 }]
    );
}

#[test]
fn test_tetris_clear_with_vertical_i_pieces() {
    let mut engine = start_engine(&[PieceKind::I]);

    // One vertical I per column builds four full rows at once.
    for col in 0..10i8 {
        assert!(engine.apply_command(Command::Rotate));
        let dx = (col - 2) - engine.active().unwrap().x;
        shift(&mut engine, dx);
        assert!(engine.apply_command(Command::HardDrop));
    }

    assert_eq!(engine.lines(), 4);
    assert_eq!(engine.score(), 1200);
    assert_eq!(engine.level(), 1);
    assert_eq!(
        engine.take_events(),
        vec![GameEvent::LinesCleared { count: 4 }]
    );
    // The board is flat again.
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_level_transition_doubles_payout() {
    let mut engine = start_engine(&[PieceKind::O]);

    let drop_layer = |engine: &mut Engine| {
        for target in [0i8, 2, 4, 6, 8] {
            shift(engine, target - engine.active().unwrap().x);
            assert!(engine.apply_command(Command::HardDrop));
        }
    };

    // Five double clears reach ten lines: the tenth still pays at level 1.
    for _ in 0..5 {
        drop_layer(&mut engine);
    }
    assert_eq!(engine.lines(), 10);
    assert_eq!(engine.level(), 2);
    assert_eq!(engine.score(), 500);
    assert_eq!(engine.drop_interval_ms(), 950);

    // The next double clear pays at level 2.
    drop_layer(&mut engine);
    assert_eq!(engine.lines(), 12);
    assert_eq!(engine.score(), 700);

    // Four more layers reach twenty lines and level 3.
    for _ in 0..4 {
        drop_layer(&mut engine);
    }
    assert_eq!(engine.lines(), 20);
    assert_eq!(engine.level(), 3);
    assert_eq!(engine.score(), 1500);
    assert_eq!(engine.drop_interval_ms(), 900);
}

#[test]
fn test_game_over_and_restart_cycle() {
    let mut engine = start_engine(&[PieceKind::O]);

    for _ in 0..10 {
        engine.apply_command(Command::HardDrop);
    }
    assert!(engine.game_over());
    assert!(!engine.running());
    assert_eq!(
        engine.take_events(),
        vec![GameEvent::GameOver { final_score: 0 }]
    );

    // Frozen: only restart gets through.
    assert!(!engine.apply_command(Command::MoveLeft));
    assert!(!engine.apply_command(Command::TogglePause));
    assert!(engine.apply_command(Command::Restart));

    assert!(engine.running());
    assert!(!engine.game_over());
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_pause_freezes_the_game() {
    let mut engine = start_engine(&[PieceKind::T]);
    let x0 = engine.active().unwrap().x;

    assert!(engine.apply_command(Command::TogglePause));
    assert!(engine.paused());
    assert!(!engine.apply_command(Command::MoveLeft));
    assert!(!engine.apply_command(Command::HardDrop));
    assert!(!engine.tick(1_000_000));
    assert_eq!(engine.active().unwrap().x, x0);

    assert!(engine.apply_command(Command::TogglePause));
    assert!(engine.apply_command(Command::MoveLeft));
}

#[test]
fn test_restart_while_running_starts_over() {
    let mut engine = start_engine(&[PieceKind::O]);
    for target in [0i8, 2] {
        let dx = target - engine.active().unwrap().x;
        shift(&mut engine, dx);
        engine.apply_command(Command::HardDrop);
    }
    assert!(engine.board().is_occupied(0, 19));

    engine.apply_command(Command::Restart);

    assert!(engine.board().cells().iter().all(|c| c.is_none()));
    assert_eq!(engine.lines(), 0);
    assert!(engine.running());
}

#[test]
fn test_gravity_matches_level_interval() {
    let mut engine = start_engine(&[PieceKind::T]);
    let y0 = engine.active().unwrap().y;

    // At level 1 the interval is 1000ms, exceeded strictly.
    assert!(!engine.tick(1000));
    assert!(engine.tick(1001));
    assert_eq!(engine.active().unwrap().y, y0 + 1);
}

#[test]
fn test_seeded_games_replay_identically() {
    let mut a = Engine::new(99);
    let mut b = Engine::new(99);
    a.start();
    b.start();

    for i in 0..200u64 {
        let cmd = match i % 4 {
            0 => Command::MoveLeft,
            1 => Command::Rotate,
            2 => Command::MoveRight,
            _ => Command::SoftDrop,
        };
        a.apply_command(cmd);
        b.apply_command(cmd);
        a.tick(i * 40);
        b.tick(i * 40);
    }

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.score(), b.score());
}
