use serde::{Deserialize, Serialize};

use crate::{Board, IllegalMove, MoveCalculation, PitId, Side};

/// Whose turn it is, or that the game is over.
///
/// Only the two `*Turn` states have a mover. Flipping the turn goes through
/// [`Side::other()`], so there is no way to invert `Finished`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnState {
    #[default]
    SouthTurn,
    NorthTurn,
    Finished,
}

impl TurnState {
    pub fn to_move(side: Side) -> Self {
        match side {
            Side::South => TurnState::SouthTurn,
            Side::North => TurnState::NorthTurn,
        }
    }

    /// The player who moves next. `None` once the game has finished.
    pub fn mover(self) -> Option<Side> {
        match self {
            TurnState::SouthTurn => Some(Side::South),
            TurnState::NorthTurn => Some(Side::North),
            TurnState::Finished => None,
        }
    }

    pub fn is_finished(self) -> bool {
        self == TurnState::Finished
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::SouthTurn => write!(f, "south's turn"),
            TurnState::NorthTurn => write!(f, "north's turn"),
            TurnState::Finished => write!(f, "finished"),
        }
    }
}

/// Plays `pit` for the player on turn and returns the new board and turn state.
///
/// The given board is not modified, also when the move is rejected.
pub fn apply_move(
    board: &Board,
    state: TurnState,
    pit: PitId,
) -> Result<(Board, TurnState), IllegalMove> {
    board.calculate(state, pit).map(MoveCalculation::execute)
}

/// The pits the player on turn may choose from, in ascending order.
pub fn legal_moves(board: &Board, state: TurnState) -> Vec<PitId> {
    let Some(mover) = state.mover() else {
        return Vec::new();
    };
    mover
        .pit_indices()
        .filter(|&index| board[index] > 0)
        .filter_map(PitId::from_index)
        .collect()
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::MoveInput;
    use crate::Capture;

    fn pit(id: u8) -> PitId {
        PitId::new(id).unwrap()
    }

    fn play(slots: [u32; 14], state: TurnState, id: u8) -> Result<([u32; 14], TurnState), IllegalMove> {
        apply_move(&Board::from_slots(slots), state, pit(id))
            .map(|(board, state)| (board.slots(), state))
    }

    const START: [u32; 14] = [6, 6, 6, 6, 6, 6, 0, 6, 6, 6, 6, 6, 6, 0];

    quickcheck! {
        fn seeds_are_conserved(input: MoveInput) -> bool {
            match apply_move(&input.board, input.state, input.pit) {
                Ok((board, _)) => board.total() == input.board.total(),
                Err(_) => true,
            }
        }

        fn finished_games_reject_every_move(input: MoveInput) -> bool {
            apply_move(&input.board, TurnState::Finished, input.pit) == Err(IllegalMove::GameFinished)
        }

        fn opponents_pits_are_rejected(input: MoveInput) -> bool {
            match input.state.mover() {
                Some(mover) if input.pit.side() != mover => matches!(
                    apply_move(&input.board, input.state, input.pit),
                    Err(IllegalMove::WrongPlayer { .. })
                ),
                _ => true,
            }
        }

        fn opponents_store_never_receives_seeds(input: MoveInput) -> bool {
            let Some(mover) = input.state.mover() else {
                return true;
            };
            match apply_move(&input.board, input.state, input.pit) {
                Ok((board, _)) => board.store(mover.other()) == input.board.store(mover.other()),
                Err(_) => true,
            }
        }

        fn rejected_moves_leave_the_board_alone(input: MoveInput) -> bool {
            let before = input.board;
            let result = apply_move(&input.board, input.state, input.pit);
            result.is_ok() || input.board == before
        }

        fn legal_moves_are_accepted(input: MoveInput) -> bool {
            let moves = legal_moves(&input.board, input.state);
            let all_accepted = moves
                .iter()
                .all(|&pit| apply_move(&input.board, input.state, pit).is_ok());
            let accepted = apply_move(&input.board, input.state, input.pit).is_ok();
            all_accepted && accepted == moves.contains(&input.pit)
        }
    }

    #[test]
    fn simple_move_lands_in_own_store() {
        assert_eq!(
            play(START, TurnState::SouthTurn, 1),
            Ok(([0, 7, 7, 7, 7, 7, 1, 6, 6, 6, 6, 6, 6, 0], TurnState::SouthTurn))
        );
    }

    #[test]
    fn ordinary_move_passes_turn() {
        assert_eq!(
            play(START, TurnState::SouthTurn, 2),
            Ok(([6, 0, 7, 7, 7, 7, 1, 7, 6, 6, 6, 6, 6, 0], TurnState::NorthTurn))
        );
    }

    #[test]
    fn north_move_wraps_around() {
        assert_eq!(
            play([6, 0, 7, 7, 7, 7, 1, 7, 6, 6, 6, 6, 6, 0], TurnState::NorthTurn, 11),
            Ok(([7, 1, 8, 7, 7, 7, 1, 7, 6, 6, 0, 7, 7, 1], TurnState::SouthTurn))
        );
    }

    #[test]
    fn capture_from_own_empty_pit() {
        let board = Board::from_slots([6, 2, 6, 0, 6, 6, 0, 6, 6, 6, 6, 6, 6, 0]);
        let calculation = board.calculate(TurnState::SouthTurn, pit(2)).unwrap();
        assert_eq!(
            calculation.capture,
            Some(Capture {
                pit: 3,
                opposite: 9,
                seeds: 7
            })
        );
        assert_eq!(
            calculation.execute(),
            (
                Board::from_slots([6, 0, 7, 0, 6, 6, 7, 6, 6, 0, 6, 6, 6, 0]),
                TurnState::NorthTurn
            )
        );
    }

    #[test]
    fn no_capture_in_opponents_empty_pit() {
        assert_eq!(
            play([0, 7, 7, 7, 7, 7, 1, 6, 6, 6, 6, 6, 6, 0], TurnState::NorthTurn, 9),
            Ok(([1, 7, 7, 7, 7, 7, 1, 6, 0, 7, 7, 7, 7, 1], TurnState::SouthTurn))
        );
    }

    #[test]
    fn capture_of_empty_opposite_pit_banks_the_last_seed() {
        let board = Board::from_slots([0, 1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 1, 1, 0]);
        let calculation = board.calculate(TurnState::SouthTurn, pit(2)).unwrap();
        assert_eq!(calculation.capture.map(|c| c.seeds), Some(1));
        assert_eq!(
            calculation.board.slots(),
            [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 1, 1, 0]
        );
        // South has no seeds left in its pits
        assert_eq!(calculation.next_state, TurnState::Finished);
    }

    #[test]
    fn south_sowing_skips_north_store() {
        let calculation = Board::from_slots([1, 0, 0, 0, 0, 8, 0, 1, 1, 1, 1, 1, 1, 0])
            .calculate(TurnState::SouthTurn, pit(6))
            .unwrap();
        assert_eq!(calculation.last_index, 0);
        assert_eq!(calculation.capture, None);
        assert_eq!(
            calculation.execute(),
            (
                Board::from_slots([2, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 0]),
                TurnState::NorthTurn
            )
        );
    }

    #[test]
    fn lap_past_skipped_store_captures_in_emptied_start_pit() {
        // Thirteen seeds go around once and the last one lands back in pit 1
        let calculation = Board::from_slots([13, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 3, 0])
            .calculate(TurnState::SouthTurn, pit(1))
            .unwrap();
        assert_eq!(calculation.last_index, 0);
        assert_eq!(
            calculation.capture,
            Some(Capture {
                pit: 0,
                opposite: 12,
                seeds: 5
            })
        );
        assert_eq!(
            calculation.execute(),
            (
                Board::from_slots([0, 1, 1, 1, 1, 1, 6, 3, 3, 3, 3, 3, 0, 0]),
                TurnState::NorthTurn
            )
        );
    }

    #[test]
    fn north_sowing_skips_south_store_and_leaves_seeds_on_finish() {
        // Seeds left in south's pits stay there when the game ends
        assert_eq!(
            play([1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 8, 0], TurnState::NorthTurn, 13),
            Ok(([2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 4], TurnState::Finished))
        );
    }

    #[test]
    fn extra_turn_for_north() {
        let calculation = Board::new().calculate(TurnState::NorthTurn, pit(8)).unwrap();
        assert_eq!(calculation.last_index, 13);
        assert!(calculation.extra_turn());
        assert_eq!(calculation.next_state, TurnState::NorthTurn);
    }

    #[test]
    fn wrong_player() {
        assert_eq!(
            play(START, TurnState::NorthTurn, 1),
            Err(IllegalMove::WrongPlayer {
                pit: pit(1),
                state: TurnState::NorthTurn
            })
        );
        assert_eq!(
            play(START, TurnState::SouthTurn, 9),
            Err(IllegalMove::WrongPlayer {
                pit: pit(9),
                state: TurnState::SouthTurn
            })
        );
    }

    #[test]
    fn empty_pit() {
        assert_eq!(
            play([0, 7, 7, 7, 7, 7, 1, 6, 6, 6, 6, 6, 6, 0], TurnState::SouthTurn, 1),
            Err(IllegalMove::EmptyPit { pit: pit(1) })
        );
    }

    #[test]
    fn finished_is_checked_first() {
        // Pit 9 is both empty and not south's, but the game being over wins
        let slots = [0, 7, 7, 7, 7, 7, 1, 6, 0, 6, 6, 6, 6, 0];
        assert_eq!(play(slots, TurnState::Finished, 9), Err(IllegalMove::GameFinished));
        assert_eq!(play(START, TurnState::Finished, 1), Err(IllegalMove::GameFinished));
    }

    #[test]
    fn finish_when_store_holds_majority() {
        assert_eq!(
            play([0, 0, 0, 0, 2, 0, 36, 1, 1, 1, 1, 0, 0, 30], TurnState::SouthTurn, 5),
            Ok(([0, 0, 0, 0, 0, 1, 37, 1, 1, 1, 1, 0, 0, 30], TurnState::Finished))
        );
    }

    #[test]
    fn finish_when_own_pits_are_empty() {
        // Landing in the own store does not grant an extra turn once the game is over
        assert_eq!(
            play([0, 0, 0, 0, 0, 1, 34, 1, 1, 1, 1, 1, 1, 31], TurnState::SouthTurn, 6),
            Ok(([0, 0, 0, 0, 0, 0, 35, 1, 1, 1, 1, 1, 1, 31], TurnState::Finished))
        );
    }

    #[test]
    fn legal_moves_skip_empty_pits() {
        let board = Board::from_slots([0, 7, 7, 7, 7, 7, 1, 6, 6, 0, 6, 6, 6, 0]);
        let south: Vec<u8> = legal_moves(&board, TurnState::SouthTurn)
            .into_iter()
            .map(PitId::get)
            .collect();
        assert_eq!(south, vec![2, 3, 4, 5, 6]);
        let north: Vec<u8> = legal_moves(&board, TurnState::NorthTurn)
            .into_iter()
            .map(PitId::get)
            .collect();
        assert_eq!(north, vec![8, 9, 11, 12, 13]);
        assert!(legal_moves(&board, TurnState::Finished).is_empty());
    }

    #[test]
    fn turn_state_serialization() {
        assert_eq!(
            serde_json::to_string(&TurnState::NorthTurn).unwrap(),
            "\"NORTH_TURN\""
        );
        assert_eq!(TurnState::default(), TurnState::SouthTurn);
    }
}
