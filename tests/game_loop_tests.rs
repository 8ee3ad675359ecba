//! Integration tests for the game loop

use tetro::core::{
    clear_and_compact, drop_distance, find_full_rows, is_legal, CommandQueue, EngineConfig,
    GameEvent, GameLoop, Grid, Piece, PieceFactory, Randomizer, RotationSystem, SimpleRng,
};
use tetro::types::{Command, Mode, PieceKind};

fn scripted(grid: Grid, order: &[PieceKind], config: &EngineConfig) -> GameLoop {
    let factory = PieceFactory::with_order(order.to_vec()).unwrap();
    GameLoop::with_parts(config, grid, factory).unwrap()
}

fn run(game: &mut GameLoop, commands: &[Command]) {
    let mut queue: CommandQueue = commands.iter().copied().collect();
    game.run_queue(&mut queue);
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameLoop::new(EngineConfig::default().with_seed(12345)).unwrap();
    assert_eq!(game.mode(), Mode::Running);
    assert!(game.active().is_some());
    assert!(is_legal(&game.active().unwrap(), game.grid()));

    assert!(game.handle(Command::Pause));
    assert_eq!(game.mode(), Mode::Paused);
    assert!(game.handle(Command::Resume));
    assert_eq!(game.mode(), Mode::Running);
}

#[test]
fn test_hard_drop_equals_soft_drops_then_lock() {
    for seed in [1, 7, 4242] {
        let config = EngineConfig::default()
            .with_seed(seed)
            .with_randomizer(Randomizer::SevenBag);
        let mut hard = GameLoop::new(config.clone()).unwrap();
        let mut soft = GameLoop::new(config).unwrap();
        let mut rng = SimpleRng::new(seed);

        for _ in 0..40 {
            if hard.mode() == Mode::GameOver {
                break;
            }
            let mut setup = Vec::new();
            for _ in 0..rng.below(4) {
                setup.push(Command::Rotate);
            }
            let shift = rng.below(9) as i32 - 4;
            let step = if shift < 0 { Command::MoveLeft } else { Command::MoveRight };
            for _ in 0..shift.unsigned_abs() {
                setup.push(step);
            }
            run(&mut hard, &setup);
            run(&mut soft, &setup);
            assert_eq!(hard.active(), soft.active());

            hard.handle(Command::HardDrop);
            while soft.handle(Command::SoftDrop) {}
            soft.handle(Command::Tick);

            assert_eq!(hard.grid(), soft.grid());
            assert_eq!(hard.snapshot(), soft.snapshot());
        }
    }
}

#[test]
fn test_blocked_rotation_is_a_no_op() {
    for rotation_system in [RotationSystem::Fixed, RotationSystem::Srs] {
        for kind in PieceKind::ALL {
            let spawn = Piece::spawn(kind, 10);
            let mut grid = Grid::new();
            for row in 0..20 {
                for col in 0..10 {
                    grid.occupy(row, col, PieceKind::Z).unwrap();
                }
            }
            for pos in spawn.cells() {
                grid.vacate(pos.row, pos.col).unwrap();
            }

            let config = EngineConfig::default().with_rotation_system(rotation_system);
            let mut game = scripted(grid, &[kind], &config);
            assert_eq!(game.active(), Some(spawn));

            let before = game.snapshot();
            let expect = kind == PieceKind::O;
            assert_eq!(game.handle(Command::Rotate), expect, "{kind:?} {rotation_system:?}");
            assert_eq!(game.handle(Command::RotateCcw), expect, "{kind:?} {rotation_system:?}");
            if !expect {
                assert_eq!(game.snapshot(), before);
            }
            assert!(!game.handle(Command::MoveLeft));
            assert!(!game.handle(Command::SoftDrop));
        }
    }
}

#[test]
fn test_bottom_row_of_i_pieces_clears() {
    // Grid level: place two flat I pieces next to a two-cell stub.
    let mut grid = Grid::new();
    grid.occupy(19, 8, PieceKind::O).unwrap();
    grid.occupy(19, 9, PieceKind::O).unwrap();
    for shift in [-3, 1] {
        let piece = Piece::spawn(PieceKind::I, 10).translated(0, shift);
        let landed = piece.translated(drop_distance(&piece, &grid) as i8, 0);
        grid.lock_cells(&landed.cells(), PieceKind::I).unwrap();
    }
    let full: Vec<u8> = find_full_rows(&grid).collect();
    assert_eq!(full, vec![19]);
    clear_and_compact(&mut grid, full).unwrap();
    assert_eq!(grid.occupied_count(), 0);

    // Same thing driven through commands.
    let mut stub = Grid::new();
    stub.occupy(19, 8, PieceKind::O).unwrap();
    stub.occupy(19, 9, PieceKind::O).unwrap();
    let mut game = scripted(stub, &[PieceKind::I], &EngineConfig::default());
    run(
        &mut game,
        &[
            Command::MoveLeft,
            Command::MoveLeft,
            Command::MoveLeft,
            Command::HardDrop,
            Command::MoveRight,
            Command::HardDrop,
        ],
    );

    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 100);
    assert_eq!(game.grid().occupied_count(), 0);
    let events: Vec<_> = game.drain_events().collect();
    assert!(events.contains(&GameEvent::LinesCleared { count: 1, points: 100 }));
}

#[test]
fn test_game_over_then_restart() {
    // The I spawns on row 0 and cannot fall; the O after it has no room.
    let grid = Grid::from_rows(&[
        "..........",
        "....Z.....",
        "..........",
        "..........",
    ])
    .unwrap();
    let mut game = scripted(grid, &[PieceKind::I, PieceKind::O], &EngineConfig::default());
    assert_eq!(game.mode(), Mode::Running);

    assert!(game.handle(Command::Tick));
    assert_eq!(game.mode(), Mode::GameOver);
    assert!(game.active().is_none());
    let events: Vec<_> = game.drain_events().collect();
    assert!(matches!(
        events.as_slice(),
        [
            GameEvent::PieceLocked { kind: PieceKind::I, .. },
            GameEvent::GameOver { score: 0 }
        ]
    ));

    let frozen = game.snapshot();
    for command in [
        Command::Tick,
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::SoftDrop,
        Command::HardDrop,
        Command::Pause,
        Command::TogglePause,
    ] {
        assert!(!game.handle(command), "{command:?}");
    }
    assert_eq!(game.snapshot(), frozen);

    assert!(game.handle(Command::Restart));
    assert_eq!(game.mode(), Mode::Running);
    assert_eq!(game.grid().occupied_count(), 0);
    assert_eq!(game.active().map(|p| p.kind), Some(PieceKind::I));
    assert_eq!(game.drain_events().collect::<Vec<_>>(), vec![GameEvent::Restarted]);
}

#[test]
fn test_pause_drops_queued_ticks() {
    let mut game = scripted(Grid::new(), &[PieceKind::T], &EngineConfig::default());
    let start = game.active().unwrap().anchor;

    run(
        &mut game,
        &[
            Command::Tick,
            Command::Pause,
            Command::Tick,
            Command::Tick,
            Command::MoveLeft,
            Command::Resume,
            Command::Tick,
        ],
    );

    let piece = game.active().unwrap();
    assert_eq!(piece.anchor, start.offset(2, 0));
    assert_eq!(game.mode(), Mode::Running);
}

#[test]
fn test_levels_and_gravity_follow_lines() {
    // On a 4-wide board every I piece clears a line.
    let config = EngineConfig::default().with_size(4, 6);
    let mut game = scripted(Grid::with_size(4, 6).unwrap(), &[PieceKind::I], &config);
    assert_eq!(game.drop_interval_ms(), 500);

    for _ in 0..10 {
        assert!(game.handle(Command::HardDrop));
    }
    assert_eq!(game.lines(), 10);
    assert_eq!(game.level(), 2);
    assert_eq!(game.score(), 1000);
    assert_eq!(game.drop_interval_ms(), 450);
    let events: Vec<_> = game.drain_events().collect();
    assert_eq!(
        events.iter().filter(|e| matches!(e, GameEvent::LevelChanged { level: 2 })).count(),
        1
    );

    game.handle(Command::HardDrop);
    assert_eq!(game.score(), 1200);
}

#[test]
fn test_start_level_is_respected() {
    let config = EngineConfig {
        start_level: 5,
        ..EngineConfig::default()
    };
    let mut game = GameLoop::new(config).unwrap();
    assert_eq!(game.level(), 5);
    assert_eq!(game.drop_interval_ms(), 300);

    game.handle(Command::HardDrop);
    game.handle(Command::Restart);
    assert_eq!(game.level(), 5);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_random_play_keeps_invariants() {
    let commands = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::RotateCcw,
        Command::SoftDrop,
        Command::HardDrop,
        Command::Tick,
        Command::Tick,
        Command::Tick,
        Command::TogglePause,
        Command::Restart,
    ];
    let config = EngineConfig::default()
        .with_seed(31337)
        .with_rotation_system(RotationSystem::Srs);
    let mut game = GameLoop::new(config.clone()).unwrap();
    let mut replay = GameLoop::new(config).unwrap();
    let mut rng = SimpleRng::new(5);

    for _ in 0..5_000 {
        // Restarts are rare so games get a chance to fill up.
        let mut command = commands[rng.below(commands.len() as u32) as usize];
        if command == Command::Restart && rng.below(20) != 0 {
            command = Command::HardDrop;
        }
        let mode_before = game.mode();
        let changed = game.handle(command);
        replay.handle(command);

        if mode_before == Mode::GameOver && command != Command::Restart {
            assert!(!changed);
        }
        match game.mode() {
            Mode::GameOver => assert!(game.active().is_none()),
            _ => {
                let piece = game.active().expect("running or paused game has a piece");
                assert!(is_legal(&piece, game.grid()));
            }
        }
        assert_eq!(find_full_rows(game.grid()).count(), 0);
        assert_eq!(game.snapshot(), replay.snapshot());
    }
}
