//! Turn driver for an automated player

use crate::board::Coord;
use crate::game::{Game, PlayerId};
use crate::strategy::Strategy;

/// What an automated player does with its turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Place(Coord),
    Swap,
    /// The strategy found nothing playable
    Pass,
}

/// Which rule produced a decision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Winning,
    Blocking,
    Swap,
    Opening,
    Fallback,
}

/// A strategy bound to one seat. The session is handed in per turn, so the
/// same coordinator follows its player across every session of a match.
#[derive(Clone, Copy, Debug)]
pub struct Coordinator {
    player: PlayerId,
    strategy: Strategy,
}

impl Coordinator {
    pub fn new(player: PlayerId, strategy: Strategy) -> Self {
        Self { player, strategy }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Pick this turn's action. The board is left exactly as it was found.
    pub fn decide(&self, game: &mut Game) -> Decision {
        #[cfg(debug_assertions)]
        let before = game.board().tokens().to_vec();

        let (decision, tier) = match self.escalate(game) {
            Some((decision, tier)) => (decision, Some(tier)),
            None => (Decision::Pass, None),
        };

        #[cfg(debug_assertions)]
        assert_eq!(game.board().tokens(), &before[..], "probe left the board modified");

        tracing::debug!(
            game = %game.name(),
            player = ?self.player,
            strategy = ?self.strategy,
            ?tier,
            ?decision,
            "automated decision"
        );
        decision
    }

    /// Win, then block, then swap, then open, then fall back
    fn escalate(&self, game: &mut Game) -> Option<(Decision, Tier)> {
        let me = self.player;
        let strategy = self.strategy;

        if let Some(at) = strategy.winning_move(game, me) {
            return Some((Decision::Place(at), Tier::Winning));
        }
        if let Some(at) = strategy.blocking_move(game, me) {
            return Some((Decision::Place(at), Tier::Blocking));
        }
        if strategy.should_swap(game, me) {
            return Some((Decision::Swap, Tier::Swap));
        }
        if let Some(at) = strategy.opening_move(game, me) {
            return Some((Decision::Place(at), Tier::Opening));
        }
        strategy
            .fallback_move(game, me)
            .map(|at| (Decision::Place(at), Tier::Fallback))
    }
}
