use crate::{Board, PitId, TurnState, NUM_SLOTS};

#[derive(Clone, Debug)]
pub struct MoveInput {
    pub board: Board,
    pub state: TurnState,
    pub pit: PitId,
}

impl quickcheck::Arbitrary for MoveInput {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        MoveInput {
            board: Board::arbitrary(g),
            state: TurnState::arbitrary(g),
            pit: PitId::arbitrary(g),
        }
    }
}

impl quickcheck::Arbitrary for Board {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut slots = [0; NUM_SLOTS];
        for slot in slots.iter_mut() {
            // Mostly small pits, with the occasional one big enough to lap the board
            *slot = if u8::arbitrary(g) % 8 == 0 {
                u32::from(u8::arbitrary(g) % 40)
            } else {
                u32::from(u8::arbitrary(g) % 8)
            };
        }
        Board::from_slots(slots)
    }
}

impl quickcheck::Arbitrary for TurnState {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[
            TurnState::SouthTurn,
            TurnState::NorthTurn,
            TurnState::Finished,
        ])
        .unwrap()
    }
}

impl quickcheck::Arbitrary for PitId {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let id = *g.choose(&[1, 2, 3, 4, 5, 6, 8, 9, 10, 11, 12, 13]).unwrap();
        PitId::new(id).unwrap()
    }
}
