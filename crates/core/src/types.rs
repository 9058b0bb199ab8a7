use serde::{Deserialize, Serialize};

/// Grid coordinate. Derived ordering is raster order: `x` major, `y` minor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn neighbors(self) -> [Pos; 4] {
        Direction::ALL.map(|direction| self.offset(direction))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Floor,
    Start,
    Boss,
    Challenge,
    Shop,
    Camp,
}

impl CellState {
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    pub fn is_special(self) -> bool {
        SpecialRoom::try_from(self).is_ok()
    }
}

/// Cell roles a floor cell can be promoted to after carving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecialRoom {
    Boss,
    Shop,
    Challenge,
    Camp,
}

impl From<SpecialRoom> for CellState {
    fn from(room: SpecialRoom) -> Self {
        match room {
            SpecialRoom::Boss => Self::Boss,
            SpecialRoom::Shop => Self::Shop,
            SpecialRoom::Challenge => Self::Challenge,
            SpecialRoom::Camp => Self::Camp,
        }
    }
}

impl TryFrom<CellState> for SpecialRoom {
    type Error = CellState;

    fn try_from(state: CellState) -> Result<Self, Self::Error> {
        match state {
            CellState::Boss => Ok(Self::Boss),
            CellState::Shop => Ok(Self::Shop),
            CellState::Challenge => Ok(Self::Challenge),
            CellState::Camp => Ok(Self::Camp),
            other => Err(other),
        }
    }
}

/// Cardinal unit step a walker travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Up => (0, 1),
            Self::Down => (0, -1),
        }
    }
}
