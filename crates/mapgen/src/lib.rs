//! Town map construction: the harbor town and the city-hall interior.

use common::{GameResult, Point};
use std::collections::HashMap;

/// Map key of the outdoor town.
pub const TOWN: &str = "town";
/// Map key of the city-hall interior.
pub const HALL: &str = "hall";

pub const TOWN_WIDTH: u32 = 20;
pub const TOWN_HEIGHT: u32 = 15;
const HALL_WIDTH: u32 = 11;
const HALL_HEIGHT: u32 = 8;

/// Kind of a tile on a game map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Grass,
    Path,
    Water,
    /// Interior floor inside a building.
    Floor,
    /// Building wall, blocks movement.
    Wall,
}

impl TileKind {
    /// Whether the mayor and NPCs can stand on this tile.
    pub fn walkable(self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Path | TileKind::Floor)
    }
}

/// Warp between maps, triggered by stepping on `at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Door {
    pub at: Point,
    pub to_map: String,
    pub to: Point,
}

/// One tile map with its doors, mailbox spot and spawn point.
#[derive(Clone, Debug)]
pub struct Map {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<TileKind>,
    pub doors: Vec<Door>,
    pub mailbox: Option<Point>,
    pub spawn: Point,
}

impl Map {
    fn filled(name: &str, width: u32, height: u32, tile: TileKind, spawn: Point) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            tiles: vec![tile; (width * height) as usize],
            doors: Vec::new(),
            mailbox: None,
            spawn,
        }
    }

    /// Returns tile index from coordinates.
    pub fn idx(&self, pt: Point) -> usize {
        (pt.y as usize) * self.width as usize + pt.x as usize
    }

    pub fn in_bounds(&self, pt: Point) -> bool {
        pt.x >= 0 && pt.y >= 0 && pt.x < self.width as i32 && pt.y < self.height as i32
    }

    /// True when the tile is outside the map or not walkable.
    pub fn is_blocked(&self, pt: Point) -> bool {
        !self.in_bounds(pt) || !self.tiles[self.idx(pt)].walkable()
    }

    /// Door sitting on the given tile, if any.
    pub fn door_at(&self, pt: Point) -> Option<&Door> {
        self.doors.iter().find(|d| d.at == pt)
    }

    fn set(&mut self, x: i32, y: i32, tile: TileKind) {
        let i = self.idx(Point::new(x, y));
        self.tiles[i] = tile;
    }

    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, tile: TileKind) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(x, y, tile);
            }
        }
    }
}

fn build_town() -> Map {
    let mut map = Map::filled(TOWN, TOWN_WIDTH, TOWN_HEIGHT, TileKind::Grass, Point::new(7, 6));

    // harbor water along the bottom
    map.fill_rect(0, 12, TOWN_WIDTH as i32 - 1, TOWN_HEIGHT as i32 - 1, TileKind::Water);
    // main street and the lane up to city hall
    map.fill_rect(0, 6, TOWN_WIDTH as i32 - 1, 6, TileKind::Path);
    map.fill_rect(5, 5, 5, 5, TileKind::Path);
    // city hall
    map.fill_rect(3, 2, 7, 4, TileKind::Wall);
    // a row house across the street
    map.fill_rect(12, 3, 14, 4, TileKind::Wall);

    map.mailbox = Some(Point::new(8, 6));
    map.doors.push(Door {
        at: Point::new(5, 5),
        to_map: HALL.to_string(),
        to: Point::new(5, 5),
    });
    map
}

fn build_hall() -> Map {
    let mut map = Map::filled(HALL, HALL_WIDTH, HALL_HEIGHT, TileKind::Floor, Point::new(5, 5));
    // walls around the chamber
    map.fill_rect(0, 0, HALL_WIDTH as i32 - 1, 0, TileKind::Wall);
    map.fill_rect(0, HALL_HEIGHT as i32 - 1, HALL_WIDTH as i32 - 1, HALL_HEIGHT as i32 - 1, TileKind::Wall);
    map.fill_rect(0, 0, 0, HALL_HEIGHT as i32 - 1, TileKind::Wall);
    map.fill_rect(HALL_WIDTH as i32 - 1, 0, HALL_WIDTH as i32 - 1, HALL_HEIGHT as i32 - 1, TileKind::Wall);

    map.doors.push(Door {
        at: Point::new(5, 6),
        to_map: TOWN.to_string(),
        to: Point::new(5, 6),
    });
    map
}

/// Builds every map in the game, keyed by name.
pub fn generate() -> GameResult<HashMap<String, Map>> {
    let mut maps = HashMap::new();
    maps.insert(TOWN.to_string(), build_town());
    maps.insert(HALL.to_string(), build_hall());
    Ok(maps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_both_maps() {
        let maps = generate().expect("maps");
        assert!(maps.contains_key(TOWN));
        assert!(maps.contains_key(HALL));
    }

    #[test]
    fn town_spawn_and_mailbox_walkable() {
        let maps = generate().expect("maps");
        let town = &maps[TOWN];
        assert!(!town.is_blocked(town.spawn));
        let mailbox = town.mailbox.expect("mailbox");
        assert!(!town.is_blocked(mailbox));
    }

    #[test]
    fn water_and_walls_block() {
        let maps = generate().expect("maps");
        let town = &maps[TOWN];
        assert!(town.is_blocked(Point::new(0, 13))); // harbor
        assert!(town.is_blocked(Point::new(4, 3))); // city hall wall
        assert!(!town.is_blocked(Point::new(1, 6))); // main street
    }

    #[test]
    fn out_of_bounds_blocks() {
        let maps = generate().expect("maps");
        let town = &maps[TOWN];
        assert!(town.is_blocked(Point::new(-1, 0)));
        assert!(town.is_blocked(Point::new(0, TOWN_HEIGHT as i32)));
    }

    #[test]
    fn doors_connect_town_and_hall() {
        let maps = generate().expect("maps");
        let town = &maps[TOWN];
        let hall = &maps[HALL];

        let entry = town.door_at(Point::new(5, 5)).expect("town door");
        assert_eq!(entry.to_map, HALL);
        assert!(!hall.is_blocked(entry.to));
        // arriving in the hall must not land on the exit door
        assert!(hall.door_at(entry.to).is_none());

        let exit = hall.door_at(Point::new(5, 6)).expect("hall door");
        assert_eq!(exit.to_map, TOWN);
        assert!(!town.is_blocked(exit.to));
        assert!(town.door_at(exit.to).is_none());
    }

    #[test]
    fn door_tiles_are_walkable() {
        let maps = generate().expect("maps");
        for map in maps.values() {
            for door in &map.doors {
                assert!(!map.is_blocked(door.at), "door in {} blocked", map.name);
            }
        }
    }

    #[test]
    fn index_calculation() {
        let map = Map::filled("t", 10, 10, TileKind::Grass, Point::new(0, 0));
        assert_eq!(map.idx(Point::new(3, 2)), 2 * 10 + 3);
    }

    #[test]
    fn hall_has_no_mailbox() {
        let maps = generate().expect("maps");
        assert!(maps[HALL].mailbox.is_none());
    }
}
