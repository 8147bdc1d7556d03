//! NPC schedules and movement.
//!
//! Every citizen follows the shared day schedule: the block covering the
//! current minute decides the desired activity, an activity change retargets
//! the NPC at the matching anchor tile, and each turn the NPC steps one tile
//! toward its target.

use bracket_lib::prelude::RandomNumberGenerator;
use common::Point;
use data::{NpcActivity, NpcSpec, ScheduleBlock, TileRef};
use mapgen::Map;
use std::collections::HashMap;

/// A citizen walking around town.
#[derive(Clone, Debug)]
pub struct Npc {
    pub spec: NpcSpec,
    /// Map the NPC currently lives on.
    pub map: String,
    pub pos: Point,
    pub activity: NpcActivity,
    pub target: Point,
}

impl Npc {
    /// Places the NPC at its home anchor, idle.
    pub fn from_spec(spec: NpcSpec) -> Self {
        let home = Point::new(spec.home.x, spec.home.y);
        let map = spec.home.map.clone();
        Self {
            spec,
            map,
            pos: home,
            activity: NpcActivity::Idle,
            target: home,
        }
    }

    fn anchor(&self, activity: NpcActivity) -> &TileRef {
        match activity {
            NpcActivity::Work => &self.spec.job,
            NpcActivity::Social => &self.spec.social,
            NpcActivity::Sleep => &self.spec.sleep,
            NpcActivity::Idle => &self.spec.home,
        }
    }

    fn retarget(&mut self, activity: NpcActivity) {
        self.activity = activity;
        let anchor = self.anchor(activity).clone();
        self.target = Point::new(anchor.x, anchor.y);
        // Anchors on another map are entered directly; walking only
        // happens within a map.
        if anchor.map != self.map {
            self.map = anchor.map;
            self.pos = self.target;
        }
        log::debug!("NPC {} activity -> {:?}", self.spec.name, activity);
    }
}

/// Picks the activity for the block covering `minutes_of_day`.
/// Minutes outside every block fall back to idle.
pub fn desired_activity(blocks: &[ScheduleBlock], minutes_of_day: u32) -> NpcActivity {
    let now = minutes_of_day % (24 * 60);
    blocks
        .iter()
        .find(|b| (b.start..b.end).contains(&now))
        .map(|b| b.activity)
        .unwrap_or(NpcActivity::Idle)
}

fn step_towards(npc: &mut Npc, map: &Map) {
    let dx = (npc.target.x - npc.pos.x).signum();
    let dy = (npc.target.y - npc.pos.y).signum();
    if dx == 0 && dy == 0 {
        return;
    }
    let candidates = [
        Point::new(npc.pos.x + dx, npc.pos.y + dy),
        Point::new(npc.pos.x + dx, npc.pos.y),
        Point::new(npc.pos.x, npc.pos.y + dy),
    ];
    for next in candidates {
        if next != npc.pos && !map.is_blocked(next) {
            npc.pos = next;
            return;
        }
    }
}

fn wander(npc: &mut Npc, map: &Map, rng: &mut RandomNumberGenerator) {
    // loitering citizens shuffle around their anchor now and then
    if rng.range(0, 4) != 0 {
        return;
    }
    let dx = rng.range(-1, 2);
    let dy = rng.range(-1, 2);
    let next = Point::new(npc.pos.x + dx, npc.pos.y + dy);
    if next.dist(npc.target) <= 1 && !map.is_blocked(next) {
        npc.pos = next;
    }
}

/// Advances every NPC by one turn against the shared schedule.
pub fn update_npcs(
    npcs: &mut [Npc],
    blocks: &[ScheduleBlock],
    minutes_of_day: u32,
    maps: &HashMap<String, Map>,
    rng: &mut RandomNumberGenerator,
) {
    let desired = desired_activity(blocks, minutes_of_day);
    for npc in npcs {
        if npc.activity != desired {
            npc.retarget(desired);
        }
        let Some(map) = maps.get(&npc.map) else {
            continue;
        };
        if npc.pos == npc.target {
            if matches!(npc.activity, NpcActivity::Idle | NpcActivity::Social) {
                wander(npc, map, rng);
            }
        } else {
            step_towards(npc, map);
        }
    }
}
