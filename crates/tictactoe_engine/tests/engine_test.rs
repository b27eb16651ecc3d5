//! Tests for the engine's turn handling and move validation.

use tictactoe_engine::{
    AiProfile, Board, Cell, Dice, Engine, GameStatus, InvalidMove, MoveReason, MoveResponse,
    Outcome, RngDice, ScriptedDice, Turn,
};

fn hard_engine() -> Engine<ScriptedDice> {
    Engine::with_dice(AiProfile::HARD, ScriptedDice::constant(0.0))
}

#[test]
fn test_initial_state() {
    let engine = hard_engine();
    assert_eq!(engine.current_board(), &Board::new());
    assert_eq!(engine.turn(), Turn::Human);
    assert_eq!(engine.status(), GameStatus::InProgress);
}

#[test]
fn test_out_of_bounds_rejected_without_change() {
    let mut engine = hard_engine();
    for index in [9, 10, 100, usize::MAX] {
        let result = engine.apply_move(index);
        assert_eq!(result, Err(InvalidMove::OutOfBounds { index }));
        assert_eq!(engine.current_board(), &Board::new());
        assert_eq!(engine.turn(), Turn::Human);
    }
}

#[test]
fn test_occupied_cell_rejected_without_change() {
    let mut engine = hard_engine();
    let report = engine.apply_move(0).expect("Opening move failed");
    assert_eq!(report.ai_move.map(|m| m.index), Some(4));

    let before = engine.current_board().clone();
    for index in [0, 4] {
        let result = engine.apply_move(index);
        assert_eq!(result, Err(InvalidMove::Occupied { index }));
        assert_eq!(engine.current_board(), &before);
        assert_eq!(engine.turn(), Turn::Human);
    }
}

#[test]
fn test_human_wins_top_row() {
    // Every roll is random for the stupid profile; scripted choices steer
    // the AI to cells 3 and 4, leaving the top row to the human.
    let dice = ScriptedDice::new([0.0], [2, 1]);
    let mut engine = Engine::with_dice(AiProfile::STUPID, dice);

    let first = engine.apply_move(0).expect("Move failed");
    assert_eq!(first.ai_move.map(|m| m.index), Some(3));
    assert_eq!(first.ai_move.map(|m| m.reason), Some(MoveReason::Random));

    let second = engine.apply_move(1).expect("Move failed");
    assert_eq!(second.ai_move.map(|m| m.index), Some(4));
    assert_eq!(second.winner, None);

    let last = engine.apply_move(2).expect("Move failed");
    assert_eq!(last.winner, Some(Outcome::Human));
    assert_eq!(last.ai_move, None);
    assert_eq!(engine.status(), GameStatus::Won(Turn::Human));
    assert_eq!(engine.turn(), Turn::Human);
}

#[test]
fn test_ai_wins_and_game_freezes() {
    let mut engine = hard_engine();
    engine.apply_move(0).expect("Move failed"); // AI center
    let block = engine.apply_move(1).expect("Move failed");
    assert_eq!(block.ai_move.map(|m| m.reason), Some(MoveReason::Block));
    assert_eq!(block.ai_move.map(|m| m.index), Some(2));

    let report = engine.apply_move(3).expect("Move failed");
    assert_eq!(report.winner, Some(Outcome::Opponent));
    assert_eq!(report.ai_move.map(|m| m.index), Some(6));
    assert_eq!(engine.status(), GameStatus::Won(Turn::Opponent));
    assert_eq!(engine.turn(), Turn::Opponent);

    let before = engine.current_board().clone();
    assert_eq!(engine.apply_move(8), Err(InvalidMove::GameOver));
    assert_eq!(engine.current_board(), &before);
}

#[test]
fn test_draw_on_last_human_move() {
    let mut engine = hard_engine();
    for index in [4, 8, 1, 3] {
        let report = engine.apply_move(index).expect("Move failed");
        assert_eq!(report.winner, None, "game ended early at {}", index);
    }
    let report = engine.apply_move(6).expect("Move failed");
    assert_eq!(report.winner, Some(Outcome::Draw));
    assert_eq!(report.ai_move, None);
    assert_eq!(engine.status(), GameStatus::Draw);
    assert!(engine.current_board().empty_cells().is_empty());
}

#[test]
fn test_reset_discards_previous_session() {
    let mut engine = hard_engine();
    engine.apply_move(0).expect("Move failed");
    engine.apply_move(1).expect("Move failed");
    engine.apply_move(3).expect("Move failed");
    assert!(engine.status().is_terminal());

    engine.reset();
    assert_eq!(engine.current_board(), &Board::new());
    assert_eq!(engine.turn(), Turn::Human);
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert!(engine.apply_move(0).is_ok());
}

#[test]
fn test_reset_with_profile() {
    let mut engine = hard_engine();
    engine.reset_with_profile(AiProfile::EASY);
    assert_eq!(engine.profile(), &AiProfile::EASY);
    assert_eq!(engine.current_board(), &Board::new());
}

#[test]
fn test_move_response_shapes() {
    let mut engine = hard_engine();
    let accepted = MoveResponse::from(engine.apply_move(0));
    assert!(accepted.accepted);
    assert_eq!(accepted.ai_move_index, Some(4));
    assert_eq!(accepted.winner, None);

    let rejected = MoveResponse::from(engine.apply_move(0));
    assert!(!rejected.accepted);
    assert_eq!(rejected.ai_move_index, None);

    let json = serde_json::to_value(accepted).expect("Serialize failed");
    assert_eq!(json["aiMoveIndex"], 4);
    assert_eq!(json["accepted"], true);
}

#[test]
fn test_random_games_keep_board_invariants() {
    let mut chooser = RngDice::seeded(99);
    for seed in 0..200 {
        let mut engine = Engine::with_dice(AiProfile::EASY, RngDice::seeded(seed));
        while !engine.status().is_terminal() {
            let before = engine.current_board().clone();
            let empties = before.empty_cells();
            let index = empties[chooser.choose(empties.len())];

            let report = engine.apply_move(index).expect("Move on empty cell failed");
            let after = engine.current_board();

            // Cells only ever go from empty to occupied.
            for (old, new) in before.cells().iter().zip(after.cells()) {
                assert!(*old == Cell::Empty || old == new);
            }
            assert_eq!(after.get(index), Some(Cell::Human));

            let placed = before.empty_cells().len() - after.empty_cells().len();
            match report.ai_move {
                Some(reply) => {
                    assert_eq!(placed, 2);
                    assert_eq!(before.get(reply.index), Some(Cell::Empty));
                    assert_eq!(after.get(reply.index), Some(Cell::Opponent));
                }
                None => {
                    assert_eq!(placed, 1);
                    assert!(report.winner.is_some());
                }
            }
            if report.winner.is_none() {
                assert_eq!(engine.turn(), Turn::Human);
            }
        }
    }
}
