//! End-to-end state machine scenarios through the public facade.

use vs_tetris::core::{run_loop, GameSession};
use vs_tetris::types::{
    Cell, GameAction, GameMode, GamePhase, PieceKind, BOARD_COLS, BOARD_ROWS,
};

/// Fill `rows` bottom rows of the player's board, leaving the last
/// column open for a vertical I piece.
fn build_well(session: &mut GameSession, player: usize, rows: i8) {
    for row in (BOARD_ROWS as i8 - rows)..BOARD_ROWS as i8 {
        for col in 0..(BOARD_COLS as i8 - 1) {
            session
                .board_mut(player)
                .set(row, col, Cell::Filled(PieceKind::Z));
        }
    }
}

/// Choose an I piece and walk it into the rightmost column.
fn drop_i_into_well(session: &mut GameSession) {
    assert!(session.step(GameAction::Choose(PieceKind::I)));
    assert_eq!(session.phase(), GamePhase::Place);
    // The vertical I occupies shape column 1; origin column 8 puts its
    // blocks in board column 9.
    while session.active().map(|p| p.col) != Some(BOARD_COLS as i8 - 2) {
        assert!(session.step(GameAction::MoveRight));
    }
    assert!(!session.step(GameAction::Drop));
}

#[test]
fn single_line_scores_one() {
    let mut session = GameSession::new(GameMode::Singleplayer, 1);
    build_well(&mut session, 0, 1);

    drop_i_into_well(&mut session);
    assert_eq!(session.phase(), GamePhase::Cleared);
    assert_eq!(session.lines_cleared(), 1);

    session.step(GameAction::FinishClearing);
    assert_eq!(session.score(0), 1);
    assert_eq!(session.phase(), GamePhase::Choose);
    // The remaining three cells of the I survive the clear.
    assert!(session.board(0).is_occupied(BOARD_ROWS as i8 - 1, 9));
    assert!(!session.board(0).is_occupied(BOARD_ROWS as i8 - 1, 0));
}

#[test]
fn double_scores_three() {
    let mut session = GameSession::new(GameMode::Singleplayer, 1);
    build_well(&mut session, 0, 2);

    drop_i_into_well(&mut session);
    assert_eq!(session.lines_cleared(), 2);
    session.step(GameAction::FinishClearing);
    assert_eq!(session.score(0), 3);
}

#[test]
fn triple_scores_six_and_reaches_the_garbage_threshold() {
    let mut session = GameSession::new(GameMode::VsPlayer, 1);
    build_well(&mut session, 0, 3);

    drop_i_into_well(&mut session);
    assert_eq!(session.lines_cleared(), 3);
    session.step(GameAction::FinishClearing);
    assert_eq!(session.score(0), 6);
    // Three lines already trigger the attack.
    assert!(session
        .board(1)
        .cells()
        .iter()
        .any(|&c| c.is_occupied()));
}

#[test]
fn tetris_scores_twelve_and_sends_garbage() {
    let mut session = GameSession::new(GameMode::VsPlayer, 1);
    build_well(&mut session, 0, 4);

    drop_i_into_well(&mut session);
    assert_eq!(session.lines_cleared(), 4);
    session.step(GameAction::FinishClearing);
    assert_eq!(session.score(0), 12);

    // The opponent's empty bottom four rows were inverted to solid.
    for row in (BOARD_ROWS as i8 - 4)..BOARD_ROWS as i8 {
        for col in 0..BOARD_COLS as i8 {
            assert!(session.board(1).is_occupied(row, col), "({row}, {col})");
        }
    }
    assert!(!session.board(1).is_occupied(BOARD_ROWS as i8 - 5, 0));
    // The turn passed to the victim.
    assert_eq!(session.current_player(), 1);
}

#[test]
fn garbage_stacks_can_clear_more_than_four_rows() {
    // A tetris fills the victim's bottom four rows with garbage. If the
    // victim's next drop completes a fifth row, all five clear at once.
    let mut session = GameSession::new(GameMode::VsPlayer, 1);
    build_well(&mut session, 0, 4);
    for col in 0..(BOARD_COLS as i8 - 1) {
        session
            .board_mut(1)
            .set(BOARD_ROWS as i8 - 5, col, Cell::Filled(PieceKind::S));
    }

    drop_i_into_well(&mut session);
    session.step(GameAction::FinishClearing);
    assert_eq!(session.current_player(), 1);

    // Player 1 now has four solid garbage rows and a near-complete row
    // above them; the vertical I plugs its gap.
    drop_i_into_well(&mut session);
    assert_eq!(session.phase(), GamePhase::Cleared);
    assert_eq!(session.lines_cleared(), 5);

    session.step(GameAction::FinishClearing);
    assert_eq!(session.score(1), 12);
    assert!(!(0..BOARD_ROWS).any(|row| session.board(1).is_row_full(row)));
    assert!(session
        .board(1)
        .cells()
        .iter()
        .all(|&c| c != Cell::Clearing));
    // The counter-attack inverted player 0's empty bottom five rows.
    for row in (BOARD_ROWS as i8 - 5)..BOARD_ROWS as i8 {
        for col in 0..BOARD_COLS as i8 {
            assert!(session.board(0).is_occupied(row, col), "({row}, {col})");
        }
    }
}

#[test]
fn small_clears_send_no_garbage() {
    let mut session = GameSession::new(GameMode::VsPlayer, 1);
    build_well(&mut session, 0, 2);

    drop_i_into_well(&mut session);
    session.step(GameAction::FinishClearing);
    assert!(session.board(1).cells().iter().all(|&c| c.is_empty()));
}

#[test]
fn versus_turns_alternate() {
    let mut session = GameSession::new(GameMode::VsPlayer, 1);

    assert_eq!(session.current_player(), 0);
    session.step(GameAction::Choose(PieceKind::O));
    session.step(GameAction::Drop);
    assert_eq!(session.current_player(), 1);

    session.step(GameAction::Choose(PieceKind::O));
    session.step(GameAction::Drop);
    assert_eq!(session.current_player(), 0);

    // Each drop landed on its own board.
    assert!(session.board(0).is_occupied(BOARD_ROWS as i8 - 1, 4));
    assert!(session.board(1).is_occupied(BOARD_ROWS as i8 - 1, 4));
}

#[test]
fn exhausted_pool_wins_after_the_last_drop() {
    let mut session = GameSession::new(GameMode::Singleplayer, 1);
    let mut pool = [0u8; 7];
    pool[PieceKind::O.index()] = 1;
    session.set_pieces_left(pool);

    session.step(GameAction::Choose(PieceKind::O));
    session.step(GameAction::Drop);
    assert_eq!(session.phase(), GamePhase::Win);
    assert!(session.is_over());
    assert_eq!(session.winner(), None);
}

#[test]
fn versus_win_goes_to_the_higher_score() {
    let mut session = GameSession::new(GameMode::VsPlayer, 1);
    build_well(&mut session, 0, 4);
    let mut pool = [0u8; 7];
    pool[PieceKind::I.index()] = 1;
    session.set_pieces_left(pool);

    drop_i_into_well(&mut session);
    session.step(GameAction::FinishClearing);
    assert_eq!(session.phase(), GamePhase::Win);
    assert_eq!(session.winner(), Some(0));
}

#[test]
fn unspawnable_piece_loses_the_game() {
    let mut session = GameSession::new(GameMode::VsPlayer, 1);
    for row in 0..BOARD_ROWS as i8 {
        for col in 0..BOARD_COLS as i8 {
            session
                .board_mut(0)
                .set(row, col, Cell::Filled(PieceKind::Z));
        }
    }

    assert!(!session.step(GameAction::Choose(PieceKind::I)));
    assert_eq!(session.phase(), GamePhase::Lose);
    assert_eq!(session.winner(), Some(1));
    // The colliding piece stays visible as an overlay, not on the board.
    assert!(session.active().is_some());
    assert!(session
        .display_board(0)
        .cells()
        .iter()
        .any(|&c| c == Cell::Collision));
}

#[test]
fn run_loop_plays_a_scripted_game_to_the_end() {
    let mut session = GameSession::new(GameMode::Singleplayer, 1);
    let mut pool = [0u8; 7];
    pool[PieceKind::O.index()] = 1;
    session.set_pieces_left(pool);

    let mut script = vec![GameAction::Drop, GameAction::Choose(PieceKind::O)];
    let mut frames = 0;
    run_loop(
        &mut session,
        |_| script.pop().unwrap_or(GameAction::QueueEmpty),
        |_| -> Result<bool, std::convert::Infallible> {
            frames += 1;
            Ok(true)
        },
    )
    .unwrap();

    assert_eq!(session.phase(), GamePhase::Win);
    // At least the opening frame and the terminal frame were rendered.
    assert!(frames >= 2);
}
