use matefinder::{
    fen, movegen,
    oracle::{LegalityOracle, OracleError},
    search::{Outcome, Solver, Strategy},
    uci::Uci,
    Board, Color, Puzzle,
};

/// An oracle that independently rebuilds the position from the placement
/// string and answers with the generator's own rules. Attaching it
/// exercises the reconciliation path at every node without changing any
/// verdict.
struct MirrorOracle;

impl LegalityOracle for MirrorOracle {
    fn legal_moves(&self, placement: &str, turn: Color) -> Result<Vec<Uci>, OracleError> {
        let pieces = fen::parse_placement(placement)
            .map_err(|err| OracleError::new(err.to_string()))?;
        let mut board =
            Board::from_pieces(pieces).map_err(|err| OracleError::new(err.to_string()))?;
        Ok(movegen::legal_moves(&mut board, turn)
            .into_iter()
            .map(Uci::from)
            .collect())
    }
}

/// An oracle that always fails, for the transport-error path.
struct DownOracle;

impl LegalityOracle for DownOracle {
    fn legal_moves(&self, _placement: &str, _turn: Color) -> Result<Vec<Uci>, OracleError> {
        Err(OracleError::new("connection refused"))
    }
}

#[test]
fn reconciled_search_matches_the_plain_one() {
    for puzzle_text in [
        "6k1/8/6K1/8/8/8/8/R7\nw\n1",
        "7k/8/5K2/8/8/8/1Q6/8\nw\n2",
        "k7/8/1Q6/8/8/8/8/2K5\nb\n1",
    ] {
        let plain = {
            let mut puzzle: Puzzle = puzzle_text.parse().expect("valid puzzle");
            let (turn, budget) = (puzzle.turn, puzzle.budget);
            Solver::new(&mut puzzle.board, turn, budget)
                .solve(Strategy::Dfs)
                .expect("search completes")
        };

        let mut puzzle: Puzzle = puzzle_text.parse().expect("valid puzzle");
        let (turn, budget) = (puzzle.turn, puzzle.budget);
        let oracle = MirrorOracle;
        let mut solver = Solver::new(&mut puzzle.board, turn, budget).with_oracle(&oracle);
        let reconciled = solver.solve(Strategy::Dfs).expect("search completes");

        assert_eq!(plain, reconciled, "{puzzle_text:?}");
        assert!(solver.telemetry().oracle_calls > 0);
    }
}

#[test]
fn oracle_failure_surfaces_and_the_board_survives() {
    let mut puzzle: Puzzle = "6k1/8/6K1/8/8/8/8/R7\nw\n1".parse().expect("valid puzzle");
    let before = puzzle.board.placement();
    let (turn, budget) = (puzzle.turn, puzzle.budget);

    let oracle = DownOracle;
    let mut solver = Solver::new(&mut puzzle.board, turn, budget).with_oracle(&oracle);
    assert!(solver.solve(Strategy::Minimax).is_err());
    assert_eq!(puzzle.board.placement(), before);
}

#[test]
fn mate_in_one_survives_an_overfull_oracle() {
    // The oracle repeats the generator's answer plus a move for a piece
    // that does not exist; reconciliation drops the phantom and the
    // verdict is unchanged.
    struct Overfull;

    impl LegalityOracle for Overfull {
        fn legal_moves(&self, placement: &str, turn: Color) -> Result<Vec<Uci>, OracleError> {
            let mut moves = MirrorOracle.legal_moves(placement, turn)?;
            moves.push("h4h5".parse().expect("valid uci"));
            Ok(moves)
        }
    }

    let mut puzzle: Puzzle = "6k1/8/6K1/8/8/8/8/R7\nw\n1".parse().expect("valid puzzle");
    let (turn, budget) = (puzzle.turn, puzzle.budget);
    let oracle = Overfull;
    let mut solver = Solver::new(&mut puzzle.board, turn, budget).with_oracle(&oracle);
    match solver.solve(Strategy::AlphaBeta).expect("search completes") {
        Outcome::Mate(line) => assert_eq!(line.len(), 1),
        other => panic!("expected a mate, got {other:?}"),
    }
}
