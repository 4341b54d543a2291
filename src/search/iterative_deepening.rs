//! Iterative deepening search with negamax alpha-beta pruning and a capture
//! quiescence stage.
//!
//! Each pass searches one ply deeper than the last and keeps the best move of
//! the last completed pass. Move ordering is fed by the PV table (best move per
//! position) and the per-depth cutoff lists. The clock is checked every
//! [`TIME_CHECK_INTERVAL`] evaluations; once the budget is spent the current
//! pass is abandoned and the previous answer stands.

use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::chess_errors::SearchError;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::move_generation::move_generator::{
    generate_all_capture_moves, generate_all_moves, generate_all_valid_moves, pick_next_move,
};
use crate::search::board_scoring::{BoardScorer, PositionalScorer};
use crate::search::cutoff_table::CutoffTables;
use crate::search::pv_table::PvTable;
use crate::tables::piece_values::CHECKMATE_SCORE;

/// Deepest ply the main search descends to before handing over to quiescence.
pub const MAX_DEPTH: usize = 20;
/// Capture plies searched past the main horizon.
pub const MAX_QUIESCENCE_DEPTH: usize = 5;
/// Evaluations between two clock checks.
pub const TIME_CHECK_INTERVAL: u64 = 100;
const STATS_TRACE_INTERVAL: u64 = 2000;

const INFINITY: i32 = i32::MAX;

/// Lowest magnitude a mate score can take inside the main search.
pub const MATE_THRESHOLD: i32 = CHECKMATE_SCORE - MAX_DEPTH as i32;

/// Value of a mate for the mating side, seen from the root. The root's
/// replies sit at depth 2, so a mate delivered by the root move scores
/// `CHECKMATE_SCORE + 1` and every further ply costs one point.
#[inline]
fn mate_score(current_depth: usize) -> i32 {
    CHECKMATE_SCORE + 1 - (current_depth as i32 - 2)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Number of deepening passes to run when time allows.
    pub min_depth: usize,
    pub max_search_time: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_depth: MAX_DEPTH,
            max_search_time: Duration::from_secs(3),
        }
    }
}

impl SearchOptions {
    /// Negative or non-finite `seconds` give a zero budget.
    pub fn new(min_depth: usize, seconds: f64) -> Self {
        Self {
            min_depth,
            max_search_time: Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO),
        }
    }
}

/// Counters collected over one call to [`SearchEngine::search_next_move`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub evaluations: u64,
    /// Quiescence captures whose destination was safe and scored statically.
    pub quiescence_capture_evaluations: u64,
    /// Quiescence captures onto an attacked square that were searched further.
    pub quiescence_attack_evaluations: u64,
    pub fail_high: u64,
    pub fail_high_first: u64,
    pub max_depth_reached: usize,
}

impl SearchStats {
    /// Share of beta cutoffs produced by the first legal move, in percent.
    pub fn ordering_percent(&self) -> f64 {
        if self.fail_high == 0 {
            return 0.0;
        }
        self.fail_high_first as f64 * 100.0 / self.fail_high as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<Move>,
    pub best_score: i32,
    /// Deepest pass that ran to completion.
    pub reached_depth: usize,
    pub stopped: bool,
    pub elapsed: Duration,
    pub stats: SearchStats,
}

/// Raised through the recursion once the time budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchStopped;

type SearchOutcome = Result<i32, SearchStopped>;

/// Searcher state reused across calls: tables are cleared at the start of
/// every search.
#[derive(Debug)]
pub struct SearchEngine<S: BoardScorer = PositionalScorer> {
    scorer: S,
    pv_table: PvTable,
    cutoffs: CutoffTables,
    stats: SearchStats,
    search_start: Instant,
    time_budget: Duration,
    stopped: bool,
}

impl Default for SearchEngine<PositionalScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine<PositionalScorer> {
    pub fn new() -> Self {
        Self::with_scorer(PositionalScorer::default())
    }
}

impl<S: BoardScorer> SearchEngine<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            scorer,
            pv_table: PvTable::default(),
            cutoffs: CutoffTables::new(MAX_DEPTH),
            stats: SearchStats::default(),
            search_start: Instant::now(),
            time_budget: Duration::ZERO,
            stopped: false,
        }
    }

    #[inline]
    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Counters of the most recent search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Pick a move for the side to move in `game`.
    ///
    /// The game is walked with scoped moves and is left exactly as it was
    /// passed in.
    pub fn search_next_move(
        &mut self,
        game: &mut GameState,
        options: SearchOptions,
    ) -> Result<SearchResult, SearchError> {
        let side = game.board().side_to_move();
        if game.board().king_position(side).is_none() {
            return Err(SearchError::MissingKing(side));
        }

        self.reset(options.max_search_time);
        let root_hash = game.board().zobrist_key();
        let max_depth = options.min_depth.clamp(1, MAX_DEPTH);
        let mut best_move: Option<Move> = None;
        let mut reached_depth = 0;

        for depth in 1..=max_depth {
            let outcome = self.alpha_beta(game, -INFINITY, INFINITY, depth as i32, 1, None);
            let stopped = outcome.is_err() || self.stopped;
            if stopped && best_move.is_some() {
                debug!("search stopped during depth {depth}");
                break;
            }

            best_move = self.pv_table.probe(root_hash);
            if stopped {
                debug!("search stopped during depth {depth}");
                break;
            }
            reached_depth = depth;

            let Some(mv) = best_move else {
                break;
            };
            if mv.score.abs() >= MATE_THRESHOLD {
                debug!("checkmate found at depth {depth}: {mv} ({})", mv.score);
                break;
            }
            info!(
                "depth {:>2} | move {} | score {:>6} | nodes {:>9} | time {:>7.3}s | ordering {:>5.1}%",
                depth,
                mv,
                mv.score,
                self.stats.nodes,
                self.search_start.elapsed().as_secs_f64(),
                self.stats.ordering_percent(),
            );
        }

        if best_move.is_none() && self.stopped {
            best_move = self.fallback_move(game);
        }

        let elapsed = self.search_start.elapsed();
        let result = SearchResult {
            best_move,
            best_score: best_move.map_or_else(|| self.terminal_root_score(game), |mv| mv.score),
            reached_depth,
            stopped: self.stopped,
            elapsed,
            stats: self.stats,
        };
        info!(
            "search finished: move {} score {} depth {} nodes {} evaluations {} in {:.3}s",
            result.best_move.map_or_else(|| "none".to_string(), |mv| mv.to_string()),
            result.best_score,
            result.reached_depth,
            result.stats.nodes,
            result.stats.evaluations,
            elapsed.as_secs_f64(),
        );
        Ok(result)
    }

    fn reset(&mut self, time_budget: Duration) {
        self.pv_table.clear();
        self.cutoffs.reset(MAX_DEPTH);
        self.stats = SearchStats::default();
        self.search_start = Instant::now();
        self.time_budget = time_budget;
        self.stopped = false;
    }

    fn evaluate(&mut self, board: &BoardState, last_move: Option<&Move>) -> i32 {
        self.stats.evaluations += 1;
        self.scorer.score(board, last_move)
    }

    fn check_up(&mut self) {
        let evaluations = self.stats.evaluations;
        if evaluations == 0 || evaluations % TIME_CHECK_INTERVAL != 0 {
            return;
        }
        let elapsed = self.search_start.elapsed();
        if elapsed > self.time_budget {
            self.stopped = true;
        }
        if evaluations % STATS_TRACE_INTERVAL == 0 {
            let seconds = elapsed.as_secs_f64().max(f64::EPSILON);
            trace!(
                "{:.3}s elapsed, {} nodes, {:.0} evaluations/s",
                seconds,
                self.stats.nodes,
                evaluations as f64 / seconds
            );
        }
    }

    fn alpha_beta(
        &mut self,
        game: &mut GameState,
        mut alpha: i32,
        beta: i32,
        mut depth_left: i32,
        current_depth: usize,
        last_move: Option<&Move>,
    ) -> SearchOutcome {
        if depth_left <= 0 || current_depth > MAX_DEPTH {
            return self.quiescence(game, alpha, beta, 1, current_depth, last_move);
        }

        self.check_up();
        let side = game.board().side_to_move();
        let in_check = is_king_in_check(game.board(), side);
        if in_check {
            depth_left += 1;
        }
        self.stats.nodes += 1;

        let hash = game.board().zobrist_key();
        let mut moves = generate_all_moves(game.board(), side);
        self.pv_table.promote_last_best_move(&mut moves, hash);
        self.cutoffs.promote_beta_moves(&mut moves, current_depth);
        self.cutoffs.promote_alpha_moves(&mut moves, current_depth);

        let old_alpha = alpha;
        let mut best_move: Option<Move> = None;
        let mut legal_moves = 0u32;

        for index in 0..moves.len() {
            pick_next_move(&mut moves, index);
            let mut mv = moves[index];
            let score = {
                let Ok(mut child) = game.apply_move_scoped(&mv) else {
                    continue;
                };
                legal_moves += 1;
                -self.alpha_beta(
                    &mut child,
                    -beta,
                    -alpha,
                    depth_left - 1,
                    current_depth + 1,
                    Some(&mv),
                )?
            };
            if self.stopped {
                return Err(SearchStopped);
            }

            if score > alpha {
                if score >= beta {
                    if legal_moves == 1 {
                        self.stats.fail_high_first += 1;
                    }
                    self.stats.fail_high += 1;
                    if mv.is_quiet() {
                        self.cutoffs.store_beta_move(&mv, current_depth);
                    }
                    return Ok(beta);
                }
                if mv.is_quiet() {
                    self.cutoffs.store_alpha_move(&mv, current_depth);
                }
                alpha = score;
                mv.score = score;
                best_move = Some(mv);
            }
        }

        if legal_moves == 0 {
            return Ok(if in_check {
                -mate_score(current_depth)
            } else {
                0
            });
        }

        if alpha != old_alpha {
            if let Some(best) = best_move {
                self.pv_table.store(best);
            }
        }
        Ok(alpha)
    }

    fn quiescence(
        &mut self,
        game: &mut GameState,
        mut alpha: i32,
        beta: i32,
        quiescence_depth: usize,
        current_depth: usize,
        last_move: Option<&Move>,
    ) -> SearchOutcome {
        let stand_pat = self.evaluate(game.board(), last_move);
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(current_depth);
        self.check_up();
        self.stats.nodes += 1;

        if current_depth > MAX_DEPTH || quiescence_depth > MAX_QUIESCENCE_DEPTH {
            return Ok(stand_pat);
        }
        if stand_pat >= beta {
            return Ok(beta);
        }
        alpha = alpha.max(stand_pat);

        let side = game.board().side_to_move();
        let mut captures = generate_all_capture_moves(game.board(), side);
        if captures.is_empty() {
            return Ok(alpha);
        }
        self.pv_table
            .promote_last_best_move(&mut captures, game.board().zobrist_key());

        let old_alpha = alpha;
        let mut best_move: Option<Move> = None;
        let mut legal_moves = 0u32;

        for index in 0..captures.len() {
            pick_next_move(&mut captures, index);
            let mut mv = captures[index];
            let score = {
                let Ok(mut child) = game.apply_move_scoped(&mv) else {
                    continue;
                };
                legal_moves += 1;
                let recapturer = child.board().side_to_move();
                if is_square_attacked(child.board(), mv.to, recapturer) {
                    self.stats.quiescence_attack_evaluations += 1;
                    -self.quiescence(
                        &mut child,
                        -beta,
                        -alpha,
                        quiescence_depth + 1,
                        current_depth + 1,
                        Some(&mv),
                    )?
                } else {
                    self.stats.quiescence_capture_evaluations += 1;
                    self.stats.nodes += 1;
                    -self.evaluate(child.board(), None)
                }
            };
            if self.stopped {
                return Err(SearchStopped);
            }

            if score > alpha {
                if score >= beta {
                    if legal_moves == 1 {
                        self.stats.fail_high_first += 1;
                    }
                    self.stats.fail_high += 1;
                    return Ok(beta);
                }
                alpha = score;
                mv.score = score;
                best_move = Some(mv);
            }
        }

        if alpha != old_alpha {
            if let Some(best) = best_move {
                self.pv_table.store(best);
            }
        }
        Ok(alpha)
    }

    /// First legal move in ordering order, scored statically. Used when the
    /// clock ran out before the first pass completed.
    fn fallback_move(&mut self, game: &mut GameState) -> Option<Move> {
        let mut moves = generate_all_valid_moves(game);
        if moves.is_empty() {
            return None;
        }
        pick_next_move(&mut moves, 0);
        let mut mv = moves[0];
        let score = {
            let child = game.apply_move_scoped(&mv).ok()?;
            -self.evaluate(child.board(), Some(&mv))
        };
        mv.score = score;
        debug!("no completed pass, falling back to {mv} ({score})");
        Some(mv)
    }

    fn terminal_root_score(&self, game: &GameState) -> i32 {
        let side = game.board().side_to_move();
        if is_king_in_check(game.board(), side) {
            -CHECKMATE_SCORE
        } else {
            0
        }
    }
}
