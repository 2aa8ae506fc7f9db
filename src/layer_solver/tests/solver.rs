use layer_solver::{
    Color, CubeState, Face, IntegrityError, Move, SolveError, SolveOutcome, Solver, SolverConfig,
    Stage, parse_moves, solve,
};

fn scrambled(sequence: &str) -> CubeState {
    let mut cube = CubeState::solved();
    cube.apply_moves(&parse_moves(sequence).unwrap()).unwrap();
    cube
}

fn with_stickers(stickers: &[(Face, usize, Color)]) -> CubeState {
    let mut facelets = *CubeState::solved().facelets();
    for &(face, position, color) in stickers {
        facelets[face.index()][position] = color;
    }
    CubeState::from_facelets(facelets)
}

/// Replays `moves` on `cube` and checks that it ends up solved.
fn assert_solves(mut cube: CubeState, moves: &[Move]) {
    cube.apply_moves(moves).unwrap();
    assert!(cube.is_solved(), "replaying the trace left\n{cube}");
}

#[test_log::test]
fn solves_a_short_scramble() {
    let mut cube = scrambled("F D Y");
    let start = cube.clone();
    assert!(!cube.is_solved());

    let solution = solve(&mut cube).unwrap();
    assert_eq!(solution.outcome, SolveOutcome::Solved);
    assert!(cube.is_solved());
    assert!(!solution.trace.is_empty());
    assert_solves(start, solution.trace.moves());
}

#[test_log::test]
fn solved_cube_needs_no_moves() {
    let mut cube = CubeState::solved();
    let solution = solve(&mut cube).unwrap();
    assert_eq!(solution.outcome, SolveOutcome::Solved);
    assert!(solution.trace.is_empty(), "{}", solution.trace);
}

#[test_log::test]
fn solves_seeded_scrambles() {
    for seed in 0..50 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut cube = CubeState::new();
        let scramble = cube.reset_scrambled(30, &mut rng);
        let start = cube.clone();

        let solution = solve(&mut cube).unwrap_or_else(|err| {
            panic!("seed {seed} ({}) failed: {err}", itertools::join(&scramble, " "))
        });
        assert_eq!(solution.outcome, SolveOutcome::Solved, "seed {seed}");
        assert!(cube.is_solved(), "seed {seed}");
        assert_solves(start, solution.trace.moves());
    }
}

#[test_log::test]
fn traces_are_compacted() {
    let mut rng = fastrand::Rng::with_seed(99);
    let mut cube = CubeState::new();
    cube.reset_scrambled(40, &mut rng);

    let mut solution = solve(&mut cube).unwrap();
    assert!(!solution.trace.compact());
    for (a, b) in solution.trace.iter().zip(solution.trace.iter().skip(1)) {
        assert_eq!(a.compose(*b), None, "{a} {b} should have merged");
    }
}

#[test_log::test]
fn solving_is_deterministic() {
    let mut first = scrambled("F2 D Y' F D2 F' Y2 D' F");
    let mut second = first.clone();

    let a = solve(&mut first).unwrap();
    let b = solve(&mut second).unwrap();
    assert_eq!(a, b);
    assert_eq!(first, second);
}

#[test_log::test]
fn compacting_once_at_the_end_also_solves() {
    let solver = Solver::new(SolverConfig {
        compact_between_stages: false,
        ..SolverConfig::default()
    });
    let mut cube = scrambled("F D' Y F2 D2 Y' F' D F");
    let start = cube.clone();

    let solution = solver.solve(&mut cube).unwrap();
    assert_eq!(solution.outcome, SolveOutcome::Solved);
    assert_solves(start, solution.trace.moves());
}

#[test_log::test]
fn swapped_edges_are_unsolvable() {
    let mut cube = with_stickers(&[(Face::Front, 5, Color::Green), (Face::Left, 5, Color::Orange)]);
    assert!(cube.has_integrity());

    let solution = solve(&mut cube).unwrap();
    assert_eq!(solution.outcome, SolveOutcome::UnsolvableScramble);
    assert!(!cube.is_solved());
}

#[test_log::test]
fn flipped_edge_is_unsolvable() {
    let mut cube = with_stickers(&[(Face::Front, 5, Color::White), (Face::Down, 1, Color::Orange)]);
    assert!(cube.has_integrity());

    let solution = solve(&mut cube).unwrap();
    assert_eq!(solution.outcome, SolveOutcome::UnsolvableScramble);
}

#[test_log::test]
fn twisted_corner_is_unsolvable() {
    let mut cube = with_stickers(&[
        (Face::Front, 4, Color::White),
        (Face::Right, 6, Color::Orange),
        (Face::Down, 2, Color::Blue),
    ]);
    assert!(cube.has_integrity());

    let solution = solve(&mut cube).unwrap();
    assert_eq!(solution.outcome, SolveOutcome::UnsolvableScramble);
}

#[test_log::test]
fn scrambled_unsolvable_states_are_still_detected() {
    // Flip an edge and then scramble, so the defect is not sitting in the
    // down layer to begin with.
    let mut cube = with_stickers(&[(Face::Front, 5, Color::White), (Face::Down, 1, Color::Orange)]);
    cube.apply_moves(&parse_moves("F D Y F' D2 Y' F2 D' F").unwrap()).unwrap();

    let solution = solve(&mut cube).unwrap();
    assert_eq!(solution.outcome, SolveOutcome::UnsolvableScramble);
}

#[test_log::test]
fn scrambled_twisted_corners_are_unsolvable() {
    let twists = [
        [
            (Face::Front, 4, Color::White),
            (Face::Right, 6, Color::Orange),
            (Face::Down, 2, Color::Blue),
        ],
        [
            (Face::Front, 4, Color::Blue),
            (Face::Right, 6, Color::White),
            (Face::Down, 2, Color::Orange),
        ],
    ];

    for stickers in twists {
        for seed in 0..200 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut cube = with_stickers(&stickers);
            assert!(cube.has_integrity());
            let scramble: Vec<Move> = (0..40)
                .map(|_| Move::TURNS[rng.usize(..Move::TURNS.len())])
                .collect();
            cube.apply_moves(&scramble).unwrap();

            let solution = solve(&mut cube).unwrap_or_else(|err| {
                panic!("seed {seed} ({}) failed: {err}", itertools::join(&scramble, " "))
            });
            assert_eq!(solution.outcome, SolveOutcome::UnsolvableScramble, "seed {seed}");
        }
    }
}

#[test_log::test]
fn bad_scans_fail_integrity() {
    let mut cube = with_stickers(&[(Face::Up, 0, Color::White)]);
    let err = solve(&mut cube).unwrap_err();
    assert_eq!(
        err,
        SolveError::Integrity(IntegrityError::ColorCount {
            color: Color::Yellow,
            count: 7
        })
    );
    assert!(!err.is_internal());

    let mut unscanned = CubeState::new();
    assert!(matches!(
        solve(&mut unscanned),
        Err(SolveError::Integrity(IntegrityError::UnknownFacelet { .. }))
    ));
}

#[test_log::test]
fn scanning_face_by_face() {
    let solved = CubeState::solved();
    let mut cube = scrambled("F D");
    cube.reset_unknown();
    assert!(!cube.has_integrity());

    for face in Face::ALL {
        cube.set_face(face, solved.facelets()[face.index()]);
    }
    assert!(cube.has_integrity());
    assert!(solve(&mut cube).unwrap().trace.is_empty());
}

#[test_log::test]
fn parsed_facelets_solve() {
    let mut cube: CubeState = scrambled("F Y D' F2")
        .facelets()
        .iter()
        .flatten()
        .map(|color| color.letter())
        .collect::<String>()
        .parse()
        .unwrap();
    let solution = solve(&mut cube).unwrap();
    assert_eq!(solution.outcome, SolveOutcome::Solved);
    assert!(cube.is_solved());
}

#[test_log::test]
fn full_trace_is_an_internal_error() {
    let solver = Solver::new(SolverConfig {
        trace_capacity: 3,
        ..SolverConfig::default()
    });
    let mut cube = scrambled("F D Y");
    let err = solver.solve(&mut cube).unwrap_err();
    assert_eq!(err, SolveError::TraceCapacityExceeded { capacity: 3 });
    assert!(err.is_internal());
}

#[test_log::test]
fn iteration_cap_is_enforced() {
    let solver = Solver::new(SolverConfig {
        stage_iteration_cap: 1,
        ..SolverConfig::default()
    });
    let mut cube = scrambled("F D Y");
    assert_eq!(
        solver.solve(&mut cube),
        Err(SolveError::IterationCapExceeded {
            stage: Stage::FirstLayerEdges,
            cap: 1
        })
    );
}
