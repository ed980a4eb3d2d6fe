use tracing::{debug, info, warn};
use web_time::Instant;

use crate::ai::{MoveSelector, RandomMoveSelector};
use crate::board::Board;
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::types::{GameResult, GameState, Phase, Position, Side};

/// Phase after `mover` has played on `board`.
///
/// The opponent moves next if it can; otherwise the turn stays with `mover`
/// (a forced pass). The game ends only when neither side can move.
pub fn next_phase(board: &Board, mover: Side) -> Phase {
    let opponent = mover.opponent();
    if board.has_legal_move(opponent) {
        Phase::Turn(opponent)
    } else if board.has_legal_move(mover) {
        Phase::Turn(mover)
    } else {
        Phase::GameOver
    }
}

/// Opening phase for `board` with `first` to move, and whether `first` had to pass.
fn opening_phase(board: &Board, first: Side) -> (Phase, bool) {
    if board.has_legal_move(first) {
        (Phase::Turn(first), false)
    } else {
        let phase = next_phase(board, first);
        (phase, phase == Phase::Turn(first.opponent()))
    }
}

/// Turn controller for one human against the computer.
pub struct GameInstance {
    config: GameConfig,
    board: Board,
    phase: Phase,
    is_pass: bool,
    flipped: Vec<Position>,
    last_move: Option<Position>,
    hints_visible: bool,
    /// Set while the computer's reply is scheduled but not yet played.
    pending_since: Option<Instant>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Result<Self, EngineError> {
        config.validate()?;
        let board = Board::new(config.board_size)?;

        let mut game = Self {
            config,
            board,
            phase: Phase::GameOver,
            is_pass: false,
            flipped: Vec::new(),
            last_move: None,
            hints_visible: false,
            pending_since: None,
            selector,
        };
        game.reset_to(board, game.config.first_to_move);

        info!(
            size = game.config.board_size,
            human = ?game.config.human_side,
            "new game"
        );
        Ok(game)
    }

    /// Uses a random opponent, seeded from the config when a seed is given.
    pub fn with_random_opponent(config: GameConfig) -> Result<Self, EngineError> {
        let selector = match config.seed {
            Some(seed) => RandomMoveSelector::new(seed),
            None => RandomMoveSelector::from_clock(),
        };
        Self::new(config, Box::new(selector))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn human_side(&self) -> Side {
        self.config.human_side
    }

    pub fn computer_side(&self) -> Side {
        self.config.computer_side()
    }

    pub fn opponent_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    pub fn hints_visible(&self) -> bool {
        self.hints_visible
    }

    /// Human move at `(row, col)`. Any error leaves the game untouched.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), EngineError> {
        if self.is_game_over() {
            return Err(EngineError::GameOver);
        }
        if self.opponent_pending() {
            return Err(EngineError::OpponentPending);
        }
        let human = self.human_side();
        if self.phase != Phase::Turn(human) {
            return Err(EngineError::NotPlayersTurn);
        }

        self.play(Position::new(row, col), human)
    }

    /// Plays the scheduled computer move once its delay has elapsed.
    /// Returns whether a move was played.
    pub fn tick(&mut self) -> Result<bool, EngineError> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Result<bool, EngineError> {
        match self.pending_since {
            Some(since) if now.saturating_duration_since(since) >= self.config.opponent_delay() => {
                self.do_ai_move()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Plays the computer move right away, ignoring the delay.
    pub fn do_ai_move(&mut self) -> Result<(), EngineError> {
        if self.is_game_over() {
            return Err(EngineError::GameOver);
        }
        let computer = self.computer_side();
        if self.phase != Phase::Turn(computer) {
            return Err(EngineError::NotPlayersTurn);
        }

        let selected = self
            .selector
            .select_move(&self.board, computer)
            .ok_or(EngineError::SelectorRejected)?;
        if !self.board.is_legal_move(selected, computer) {
            warn!(row = selected.row, col = selected.col, "selector chose an illegal move");
            return Err(EngineError::SelectorRejected);
        }

        self.play(selected, computer)
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.phase
            .side_to_move()
            .map(|side| self.board.legal_moves(side))
            .unwrap_or_default()
    }

    /// Display-only; never affects the board or the turn.
    pub fn toggle_hints(&mut self) -> bool {
        self.hints_visible = !self.hints_visible;
        self.hints_visible
    }

    /// Starts over with the same config and opponent.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let board = Board::new(self.config.board_size)?;
        self.hints_visible = false;
        self.reset_to(board, self.config.first_to_move);
        info!(size = self.config.board_size, "game restarted");
        Ok(())
    }

    /// Replaces the board with an arbitrary position, `to_move` to play.
    /// Passes are resolved immediately, so the resulting phase may differ.
    pub fn set_position(&mut self, board: Board, to_move: Side) -> Result<(), EngineError> {
        if board.size() != self.config.board_size {
            return Err(EngineError::InvalidBoardSize(board.size()));
        }
        self.reset_to(board, to_move);
        Ok(())
    }

    pub fn to_game_state(&self) -> GameState {
        let score = self.board.score();
        GameState {
            size: self.board.size(),
            board: self.board.to_vec(),
            current_player: self.phase.side_to_move(),
            human_side: self.human_side(),
            dark_count: score.dark,
            light_count: score.light,
            is_game_over: self.is_game_over(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            last_move: self.last_move,
            legal_moves: self.legal_moves(),
            opponent_pending: self.opponent_pending(),
            hints_visible: self.hints_visible,
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let score = self.board.score();
        GameResult {
            winner: score.leader(),
            dark_count: score.dark,
            light_count: score.light,
        }
    }

    fn play(&mut self, pos: Position, side: Side) -> Result<(), EngineError> {
        let flipped = self.board.flips(pos, side);
        let next = self.board.apply_move(pos, side)?;

        self.board = next;
        self.flipped = flipped;
        self.last_move = Some(pos);
        self.phase = next_phase(&next, side);
        self.is_pass = self.phase == Phase::Turn(side);

        debug!(
            row = pos.row,
            col = pos.col,
            side = ?side,
            flipped = self.flipped.len(),
            phase = ?self.phase,
            "move applied"
        );
        if self.is_pass {
            debug!(side = ?side.opponent(), "forced pass");
        }
        if self.is_game_over() {
            let result = self.to_game_result();
            info!(
                dark = result.dark_count,
                light = result.light_count,
                winner = ?result.winner,
                "game over"
            );
        }

        self.schedule_opponent();
        Ok(())
    }

    fn reset_to(&mut self, board: Board, first: Side) {
        let (phase, is_pass) = opening_phase(&board, first);
        self.board = board;
        self.phase = phase;
        self.is_pass = is_pass;
        self.flipped.clear();
        self.last_move = None;
        self.schedule_opponent();
    }

    fn schedule_opponent(&mut self) {
        self.pending_since = if self.phase == Phase::Turn(self.computer_side()) {
            Some(Instant::now())
        } else {
            None
        };
    }
}
