use matefinder::{
    movegen,
    search::{Limits, Outcome, SearchError, Solver, Strategy},
    Color, Puzzle,
};

const PUZZLES: [&str; 5] = [
    "6k1/8/6K1/8/8/8/8/R7\nw\n1",
    "7k/8/5K2/8/8/8/1Q6/8\nw\n2",
    "6k1/8/5K2/8/8/8/8/R7\nw\n1",
    "4k3/8/8/3r4/8/4R3/8/6K1\nb\n1",
    "4k3/8/8/3q4/8/p2R4/8/4K3\nw\n1",
];

fn solve(puzzle_text: &str, strategy: Strategy) -> Outcome {
    let mut puzzle: Puzzle = puzzle_text.parse().expect("valid puzzle");
    let turn = puzzle.turn;
    let budget = puzzle.budget;
    Solver::new(&mut puzzle.board, turn, budget)
        .solve(strategy)
        .expect("search completes")
}

#[test]
fn alpha_beta_agrees_with_plain_minimax() {
    // Pruning is sound for the two-valued score domain: the verdict must
    // match, though the line may differ.
    for puzzle in PUZZLES {
        let plain = solve(puzzle, Strategy::Minimax);
        let pruned = solve(puzzle, Strategy::AlphaBeta);
        assert_eq!(
            std::mem::discriminant(&plain),
            std::mem::discriminant(&pruned),
            "{puzzle:?}"
        );
    }
}

#[test]
fn bfs_and_dfs_agree_on_mate_existence() {
    for puzzle in PUZZLES {
        let dfs = matches!(solve(puzzle, Strategy::Dfs), Outcome::Mate(_));
        let bfs = matches!(solve(puzzle, Strategy::Bfs), Outcome::Mate(_));
        assert_eq!(dfs, bfs, "{puzzle:?}");
    }
}

#[test]
fn every_strategy_restores_the_board() {
    for puzzle_text in PUZZLES {
        for strategy in Strategy::ALL {
            let mut puzzle: Puzzle = puzzle_text.parse().expect("valid puzzle");
            let before = puzzle.board.placement();
            let turn = puzzle.turn;
            let budget = puzzle.budget;

            let mut solver = Solver::new(&mut puzzle.board, turn, budget).with_seed(1);
            solver.solve(strategy).expect("search completes");
            assert_eq!(puzzle.board.placement(), before, "{strategy} on {puzzle_text:?}");
            assert!(puzzle.board.occupancy_consistent());
        }
    }
}

#[test]
fn apply_revert_roundtrips_for_every_legal_move() {
    for puzzle_text in PUZZLES {
        let mut puzzle: Puzzle = puzzle_text.parse().expect("valid puzzle");
        for turn in Color::ALL {
            let moves = movegen::legal_moves(&mut puzzle.board, turn);
            for m in moves {
                let before = puzzle.board.placement();
                let undo = puzzle.board.apply(m.piece, m.to).expect("legal move applies");
                assert!(puzzle.board.occupancy_consistent());
                puzzle.board.revert(undo);
                assert_eq!(puzzle.board.placement(), before, "{m} on {puzzle_text:?}");
            }
        }
    }
}

#[test]
fn node_budget_aborts_and_restores() {
    let mut puzzle: Puzzle = "7k/8/5K2/8/8/8/1Q6/8\nw\n2".parse().expect("valid puzzle");
    let before = puzzle.board.placement();
    let turn = puzzle.turn;
    let budget = puzzle.budget;

    let mut solver = Solver::new(&mut puzzle.board, turn, budget)
        .with_limits(Limits { max_nodes: Some(5) });
    match solver.solve(Strategy::Minimax) {
        Err(SearchError::NodeLimit { visited }) => assert!(visited > 5),
        other => panic!("expected a node-limit abort, got {other:?}"),
    }
    assert_eq!(puzzle.board.placement(), before);
    assert!(puzzle.board.occupancy_consistent());
}

#[test]
fn telemetry_counts_visited_nodes() {
    let mut puzzle: Puzzle = "6k1/8/6K1/8/8/8/8/R7\nw\n1".parse().expect("valid puzzle");
    let turn = puzzle.turn;
    let budget = puzzle.budget;

    let mut solver = Solver::new(&mut puzzle.board, turn, budget);
    solver.solve(Strategy::Minimax).expect("search completes");
    let telemetry = solver.telemetry();
    assert!(telemetry.nodes > 0);
    assert_eq!(telemetry.oracle_calls, 0);
}
