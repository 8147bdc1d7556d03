//! Common types shared across Inkport crates.

/// Simple 2D tile coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new [`Point`].
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance to another point, used for interaction radii.
    pub fn dist(self, other: Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Unified error type for game logic.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_new_sets_coordinates() {
        let p = Point::new(2, 3);
        assert_eq!(p.x, 2);
        assert_eq!(p.y, 3);
    }

    #[test]
    fn dist_is_chebyshev() {
        let a = Point::new(0, 0);
        assert_eq!(a.dist(Point::new(3, 1)), 3);
        assert_eq!(a.dist(Point::new(-2, -5)), 5);
        assert_eq!(a.dist(a), 0);
    }

    #[test]
    fn config_error_formats_message() {
        let e = GameError::Config("bad value".into());
        assert_eq!(e.to_string(), "configuration error: bad value");
    }
}
