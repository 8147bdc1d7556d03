use common::Point;

/// The player-controlled mayor.
#[derive(Debug)]
pub struct Mayor {
    pub pos: Point,
}
