//! Walker agents and the uniform direction roll they share.

use crate::types::{Direction, Pos};

use super::config::WalkerTuning;
use super::random::RandomSource;

/// One of the four cardinal directions, each with probability 1/4.
pub fn choose_direction(random: &mut dyn RandomSource) -> Direction {
    let index = (random.next_unit() * Direction::ALL.len() as f64) as usize;
    Direction::ALL[index.min(Direction::ALL.len() - 1)]
}

#[derive(Clone, Debug, PartialEq)]
pub struct Walker {
    pub pos: Pos,
    pub direction: Direction,
    pub tuning: WalkerTuning,
}

impl Walker {
    pub fn new(pos: Pos, direction: Direction, tuning: WalkerTuning) -> Self {
        Self { pos, direction, tuning }
    }

    pub fn advance(&mut self) {
        self.pos = self.pos.offset(self.direction);
    }

    pub fn clamp_within_grid(&mut self, width: usize, height: usize) {
        self.pos.x = self.pos.x.clamp(0, width as i32 - 1);
        self.pos.y = self.pos.y.clamp(0, height as i32 - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn each_quarter_of_the_unit_interval_maps_to_one_direction() {
        let mut scripted = ScriptedRandom::new(vec![0.0, 0.26, 0.5, 0.99]);
        let chosen: Vec<Direction> = (0..4).map(|_| choose_direction(&mut scripted)).collect();
        assert_eq!(chosen, Direction::ALL.to_vec());
    }

    #[test]
    fn direction_roll_is_roughly_uniform() {
        let mut random = SeededRandom::new(4_242);
        let mut counts = [0_u32; 4];
        for _ in 0..40_000 {
            let direction = choose_direction(&mut random);
            let slot = Direction::ALL.iter().position(|&d| d == direction).expect("known direction");
            counts[slot] += 1;
        }
        for count in counts {
            assert!((9_000..11_000).contains(&count), "skewed direction counts: {counts:?}");
        }
    }

    #[test]
    fn clamp_keeps_walker_on_the_grid_after_stepping_off() {
        let mut walker = Walker::new(Pos::new(0, 4), Direction::Left, WalkerTuning::default());
        walker.advance();
        walker.clamp_within_grid(5, 5);
        assert_eq!(walker.pos, Pos::new(0, 4));

        walker.direction = Direction::Up;
        walker.advance();
        walker.clamp_within_grid(5, 5);
        assert_eq!(walker.pos, Pos::new(0, 4));

        walker.direction = Direction::Right;
        walker.advance();
        walker.clamp_within_grid(5, 5);
        assert_eq!(walker.pos, Pos::new(1, 4));
    }
}
