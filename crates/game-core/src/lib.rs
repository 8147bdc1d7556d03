//! Game engine entry point.

mod app;
mod input;
mod types;

use std::collections::HashMap;

use bracket_lib::prelude::*;

use clock::{Clock, TimeMode, DAY_START_MINUTES};
use common::{GameResult, Point};
use data::ScheduleBlock;
use mailbox::{DaySummary, TaskError, TaskKind, TaskLedger};
use mapgen::{Map, TileKind};
use npc::{update_npcs, Npc};
use townlog::TownLog;
use ui::{UIContext, UILayout};

const GREET_RADIUS: i32 = 2;
const MAILBOX_RADIUS: i32 = 1;
const MAP_Y: i32 = 1;
const TOWNLOG_PATH: &str = "townlog.json";
const CONFIG_PATH: &str = "inkport.toml";
const GREET_PHRASES: [&str; 4] = [
    "Good to see you, Mayor!",
    "Lovely weather over the harbor.",
    "Busy day at the office?",
    "Welcome to the neighborhood!",
];

pub use app::InkportApp;
pub use types::Mayor;
use input::InputConfig;

/// Current game mode.
#[derive(Clone, Debug, PartialEq)]
enum GameMode {
    Walking,
    Mailbox { note: Option<String> },
    Summary(DaySummary),
}

/// Basic game state implementing [`GameState`].
pub struct InkportGame {
    mayor: Mayor,
    maps: HashMap<String, Map>,
    current_map: String,
    npcs: Vec<Npc>,
    schedule: Vec<ScheduleBlock>,
    clock: Clock,
    ledger: TaskLedger,
    townlog: TownLog,
    townlog_path: String,
    ui: UIContext,
    input: InputConfig,
    audio: audio::AudioManager,
    rng: RandomNumberGenerator,
    mode: GameMode,
    mailbox_index: usize,
    palette: ui::ColorPalette,
}

impl InkportGame {
    /// Creates a new game session from the bundled assets.
    pub fn new(seed: u64) -> GameResult<Self> {
        Self::with_paths(seed, TOWNLOG_PATH, CONFIG_PATH)
    }

    /// Creates a session reading the town log and key bindings from the
    /// given paths.
    fn with_paths(seed: u64, townlog_path: &str, config_path: &str) -> GameResult<Self> {
        let manifest = {
            #[cfg(target_arch = "wasm32")]
            {
                data::load_manifest_embedded()?
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/manifest.json");
                data::load_manifest(path)?
            }
        };
        let tasks = {
            #[cfg(target_arch = "wasm32")]
            {
                data::load_tasks_embedded()?
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/tasks.json");
                data::load_tasks(path)?
            }
        };
        let npc_specs = {
            #[cfg(target_arch = "wasm32")]
            {
                data::load_npcs_embedded()?
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/npcs.json");
                data::load_npcs(path)?
            }
        };
        let schedule = {
            #[cfg(target_arch = "wasm32")]
            {
                data::load_schedule_embedded()?
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/schedule.json");
                data::load_schedule(path)?
            }
        };
        let maps = mapgen::generate()?;
        let input = InputConfig::load(config_path)?;
        let palette = if input.colorblind {
            ui::ColorPalette::colorblind()
        } else {
            ui::ColorPalette::default()
        };
        let clock = Clock::new(
            manifest.time_scale.real_ms_per_ingame_minute,
            DAY_START_MINUTES,
        )?;
        let townlog = TownLog::load(townlog_path)?;
        let spawn = maps[mapgen::TOWN].spawn;
        Ok(Self {
            mayor: Mayor { pos: spawn },
            maps,
            current_map: mapgen::TOWN.to_string(),
            npcs: npc_specs.into_iter().map(Npc::from_spec).collect(),
            schedule,
            clock,
            ledger: TaskLedger::new(tasks),
            townlog,
            townlog_path: townlog_path.to_string(),
            ui: UIContext::default(),
            input,
            audio: audio::AudioManager::default(),
            rng: RandomNumberGenerator::seeded(seed),
            mode: GameMode::Walking,
            mailbox_index: 0,
            palette,
        })
    }

    /// Starts the clock for the first day.
    pub(crate) fn start(&mut self) {
        self.clock.set_mode(TimeMode::Normal);
        log::info!("day {} begins", self.clock.day());
        self.ui.add_log("A new day in Inkport.").ok();
        self.ui
            .add_log("The mailbox by the plaza has letters for you.")
            .ok();
    }

    fn map(&self) -> &Map {
        &self.maps[self.current_map.as_str()]
    }

    /// Moves the mayor by the given delta, blocked by walls and water.
    fn try_move(&mut self, delta: Point) {
        let next = Point::new(self.mayor.pos.x + delta.x, self.mayor.pos.y + delta.y);
        if self.map().is_blocked(next) {
            return;
        }
        self.mayor.pos = next;
        if let Some(door) = self.map().door_at(next).cloned() {
            if self.maps.contains_key(door.to_map.as_str()) {
                self.current_map = door.to_map;
                self.mayor.pos = door.to;
                self.ui.add_log("You step through the door.").ok();
            }
        }
    }

    fn nearest_npc(&self) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (i, npc) in self.npcs.iter().enumerate() {
            if npc.map != self.current_map {
                continue;
            }
            let d = npc.pos.dist(self.mayor.pos);
            if d <= GREET_RADIUS && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Greets the closest citizen, counting toward an active greet task
    /// only during work hours.
    fn greet_attempt(&mut self) {
        let Some(idx) = self.nearest_npc() else {
            self.ui.add_log("There is no one nearby to greet.").ok();
            return;
        };
        let name = self.npcs[idx].spec.name.clone();
        let phrase = GREET_PHRASES[self.rng.range(0, GREET_PHRASES.len() as i32) as usize];
        self.ui.add_log(&format!("{}: \"{}\"", name, phrase)).ok();
        self.audio.play(audio::Sound::Greet).ok();
        if self
            .ledger
            .record_progress(&TaskKind::Greet, 1, self.clock.is_work_hour())
        {
            self.audio.play(audio::Sound::Click).ok();
        }
    }

    fn is_near_mailbox(&self) -> bool {
        self.map()
            .mailbox
            .map_or(false, |m| m.dist(self.mayor.pos) <= MAILBOX_RADIUS)
    }

    fn open_mailbox(&mut self) {
        if !self.is_near_mailbox() {
            self.ui
                .add_log("Move closer to the mailbox to read letters.")
                .ok();
            return;
        }
        self.audio.play(audio::Sound::MailOpen).ok();
        self.clamp_mailbox_index();
        self.mode = GameMode::Mailbox { note: None };
        self.ui.set_layout(UILayout::Mailbox);
    }

    fn close_mailbox(&mut self) {
        self.mode = GameMode::Walking;
        self.ui.set_layout(UILayout::Standard);
    }

    fn clamp_mailbox_index(&mut self) {
        let len = self.ledger.tasks_for_display().len();
        self.mailbox_index = if len == 0 {
            0
        } else {
            self.mailbox_index.min(len - 1)
        };
    }

    fn cycle_mailbox(&mut self, delta: i32) {
        let len = self.ledger.tasks_for_display().len() as i32;
        if len == 0 {
            return;
        }
        self.mailbox_index = ((self.mailbox_index as i32 + delta).rem_euclid(len)) as usize;
        if let GameMode::Mailbox { note } = &mut self.mode {
            *note = None;
        }
        self.audio.play(audio::Sound::Click).ok();
    }

    fn set_mailbox_note(&mut self, text: String) {
        if let GameMode::Mailbox { note } = &mut self.mode {
            *note = Some(text);
        }
    }

    /// Accepts the task currently shown in the mailbox overlay.
    fn accept_shown(&mut self) {
        self.audio.play(audio::Sound::Click).ok();
        let id = self
            .ledger
            .tasks_for_display()
            .get(self.mailbox_index)
            .map(|t| t.spec.id.clone());
        let Some(id) = id else {
            self.set_mailbox_note("No available task to accept.".to_string());
            return;
        };
        match self.ledger.accept(&id) {
            Ok(()) => {
                let title = self
                    .ledger
                    .current_task()
                    .map(|t| t.spec.title.clone())
                    .unwrap_or_default();
                self.clamp_mailbox_index();
                self.close_mailbox();
                self.ui.add_log(&format!("Accepted: {}", title)).ok();
            }
            Err(TaskError::AlreadyActive) => {
                self.set_mailbox_note(
                    "You already have an active task. Complete it before accepting another."
                        .to_string(),
                );
            }
            Err(_) => {
                self.set_mailbox_note("No available task to accept.".to_string());
            }
        }
    }

    /// Completes the active task if its goal is met.
    fn complete_shown(&mut self) {
        self.audio.play(audio::Sound::Click).ok();
        if self.ledger.current_task().is_none() {
            self.set_mailbox_note("No active task.".to_string());
            return;
        }
        match self.ledger.complete() {
            Ok(reward) => {
                self.audio.play(audio::Sound::TaskComplete).ok();
                if let Some(task) = self.ledger.current_task() {
                    let id = task.spec.id.clone();
                    let path = self.townlog_path.clone();
                    if let Err(e) = self.townlog.record_completion(&path, &id) {
                        log::warn!("failed to update town log: {}", e);
                    }
                }
                self.ui
                    .add_log(&format!("Task completed! Reward: {}", reward))
                    .ok();
                self.set_mailbox_note(
                    "Task completed! Check your mailbox for new letters.".to_string(),
                );
            }
            Err(TaskError::GoalNotMet { progress, goal }) => {
                self.set_mailbox_note(format!(
                    "You haven't finished this task yet. Progress {}/{}.",
                    progress, goal
                ));
            }
            Err(_) => {
                self.set_mailbox_note("No active task is ready to complete.".to_string());
            }
        }
    }

    /// Freezes the clock and shows the end-of-day tally.
    fn end_day(&mut self) {
        let summary = self.ledger.day_summary(self.clock.day());
        log::info!(
            "day {}: {} completed, {} missed, budget {}",
            summary.day,
            summary.completed.len(),
            summary.missed.len(),
            summary.budget
        );
        self.clock.set_mode(TimeMode::Paused);
        self.ui.set_layout(UILayout::Standard);
        self.mode = GameMode::Summary(summary);
    }

    /// Resets the town for the next morning.
    fn begin_next_day(&mut self) {
        self.clock.start_new_day();
        self.ledger.reset_for_new_day();
        self.current_map = mapgen::TOWN.to_string();
        self.mayor.pos = self.maps[mapgen::TOWN].spawn;
        self.mailbox_index = 0;
        self.mode = GameMode::Walking;
        self.ui.set_layout(UILayout::Standard);
        self.clock.set_mode(TimeMode::Normal);
        log::info!("day {} begins", self.clock.day());
        self.ui
            .add_log(&format!("Day {} begins.", self.clock.day()))
            .ok();
    }

    /// Handles an input key without relying on BTerm.
    fn handle_input_key(&mut self, key: Option<VirtualKeyCode>, ctx: &mut BTerm) {
        let Some(key) = key else {
            return;
        };
        use VirtualKeyCode::*;
        if key == self.input.quit {
            ctx.quit();
            return;
        }
        if key == self.input.scroll_up {
            self.ui.scroll_up();
            return;
        }
        if key == self.input.scroll_down {
            self.ui.scroll_down();
            return;
        }
        if matches!(self.mode, GameMode::Summary(_)) {
            if key == self.input.end_day {
                self.begin_next_day();
            }
            return;
        }
        if matches!(self.mode, GameMode::Mailbox { .. }) {
            if key == self.input.mailbox || key == Escape {
                self.close_mailbox();
            } else if key == self.input.prev_task {
                self.cycle_mailbox(-1);
            } else if key == self.input.next_task {
                self.cycle_mailbox(1);
            } else if key == self.input.accept {
                self.accept_shown();
            } else if key == self.input.complete {
                self.complete_shown();
            }
            return;
        }
        if key == self.input.help {
            let next = if self.ui.layout() == UILayout::Help {
                UILayout::Standard
            } else {
                UILayout::Help
            };
            self.ui.set_layout(next);
            return;
        }
        if key == self.input.greet {
            self.greet_attempt();
            return;
        }
        if key == self.input.mailbox {
            self.open_mailbox();
            return;
        }
        if key == self.input.pause {
            let next = if self.clock.is_paused() {
                TimeMode::Normal
            } else {
                TimeMode::Paused
            };
            self.clock.set_mode(next);
            self.ui
                .add_log(&format!("Time: {}", self.clock.mode().label()))
                .ok();
            return;
        }
        if key == self.input.fast {
            let next = if self.clock.mode() == TimeMode::Fast {
                TimeMode::Normal
            } else {
                TimeMode::Fast
            };
            self.clock.set_mode(next);
            self.ui
                .add_log(&format!("Time: {}", self.clock.mode().label()))
                .ok();
            return;
        }
        if key == self.input.end_day {
            self.end_day();
            return;
        }
        let delta = match key {
            k if k == Left || k == self.input.left => Point::new(-1, 0),
            k if k == Right || k == self.input.right => Point::new(1, 0),
            k if k == Up || k == self.input.up => Point::new(0, -1),
            k if k == Down || k == self.input.down => Point::new(0, 1),
            k if k == self.input.up_left => Point::new(-1, -1),
            k if k == self.input.up_right => Point::new(1, -1),
            k if k == self.input.down_left => Point::new(-1, 1),
            k if k == self.input.down_right => Point::new(1, 1),
            _ => Point::new(0, 0),
        };
        if delta.x != 0 || delta.y != 0 {
            self.try_move(delta);
        }
    }

    fn tile_style(&self, tile: TileKind) -> (char, RGB) {
        match tile {
            TileKind::Grass => ('.', self.palette.grass),
            TileKind::Path => ('=', self.palette.path),
            TileKind::Water => ('~', self.palette.water),
            TileKind::Floor => ('.', self.palette.floor),
            TileKind::Wall => ('#', self.palette.wall),
        }
    }

    /// Draws the current map to the screen.
    fn draw_map(&self, ctx: &mut BTerm) {
        let map = self.map();
        for y in 0..map.height as i32 {
            for x in 0..map.width as i32 {
                let pt = Point::new(x, y);
                let tile = map.tiles[map.idx(pt)];
                let (glyph, color) = self.tile_style(tile);
                ctx.set(x, y + MAP_Y, color, RGB::named(BLACK), to_cp437(glyph));
            }
        }
        for door in &map.doors {
            ctx.set(
                door.at.x,
                door.at.y + MAP_Y,
                self.palette.door,
                RGB::named(BLACK),
                to_cp437('+'),
            );
        }
        if let Some(mb) = map.mailbox {
            ctx.set(
                mb.x,
                mb.y + MAP_Y,
                self.palette.mailbox,
                RGB::named(BLACK),
                to_cp437('M'),
            );
        }
    }

    /// Draws every citizen on the current map.
    fn draw_npcs(&self, ctx: &mut BTerm) {
        for npc in &self.npcs {
            if npc.map != self.current_map {
                continue;
            }
            let glyph = npc.spec.species.chars().next().unwrap_or('c');
            ctx.set(
                npc.pos.x,
                npc.pos.y + MAP_Y,
                self.palette.npc,
                RGB::named(BLACK),
                to_cp437(glyph),
            );
        }
    }
}

impl GameState for InkportGame {
    fn tick(&mut self, ctx: &mut BTerm) {
        // World time runs before input so gated actions see this frame's clock.
        if !matches!(self.mode, GameMode::Summary(_)) {
            let day_before = self.clock.day();
            self.clock.tick(ctx.frame_time_ms as f64);
            if self.clock.day() != day_before {
                self.ui
                    .add_log(&format!("Midnight. Day {} begins.", self.clock.day()))
                    .ok();
            }
            update_npcs(
                &mut self.npcs,
                &self.schedule,
                self.clock.minutes_of_day(),
                &self.maps,
                &mut self.rng,
            );
        }
        let key = ctx.key;
        self.handle_input_key(key, ctx);

        ctx.cls();
        if self.ui.layout() == UILayout::Help {
            self.ui.draw_help(ctx).ok();
            return;
        }
        if let GameMode::Summary(summary) = &self.mode {
            for (i, line) in ui::summary_lines(summary).iter().enumerate() {
                ctx.print_centered(8 + i as i32, line);
            }
            ctx.print_centered(14, "Press Enter to start the next day");
            return;
        }
        self.draw_map(ctx);
        self.draw_npcs(ctx);
        ctx.set(
            self.mayor.pos.x,
            self.mayor.pos.y + MAP_Y,
            self.palette.mayor,
            RGB::named(BLACK),
            to_cp437('@'),
        );
        let hud = ui::hud_line(
            self.clock.day(),
            self.clock.minutes_of_day(),
            self.clock.mode(),
            self.ledger.current_task(),
            self.ledger.pending_tasks().len(),
        );
        let task_hud = ui::task_hud_line(self.ledger.current_task(), self.clock.minutes_of_day());
        self.ui
            .draw_status(ctx, &hud, &task_hud, self.ledger.budget())
            .ok();
        self.ui.draw_logs(ctx).ok();
        if let GameMode::Mailbox { note } = &self.mode {
            let tasks = self.ledger.tasks_for_display();
            if let Some(task) = tasks.get(self.mailbox_index) {
                let is_current = self
                    .ledger
                    .current_task()
                    .map_or(false, |c| c.spec.id == task.spec.id);
                let lines = ui::overlay_lines(
                    task,
                    self.mailbox_index,
                    tasks.len(),
                    is_current,
                    note.as_deref(),
                );
                self.ui.draw_overlay(ctx, &task.spec.title, &lines).ok();
            } else {
                let lines = vec![note
                    .clone()
                    .unwrap_or_else(|| "No letters at the moment.".to_string())];
                self.ui.draw_overlay(ctx, "Mailbox", &lines).ok();
            }
        }
    }
}

/// Runs the game loop using [`bracket-lib`].
pub fn run() -> BError {
    let context = BTermBuilder::simple(80, 25)?
        .with_title("Inkport")
        .build()?;
    let gs = app::InkportApp::new();
    main_loop(context, gs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clock::{parse_clock_to_minutes, MINUTES_PER_DAY};
    use mailbox::TaskState;

    // Isolated per-test paths so a townlog or config file left behind by an
    // actual play session cannot leak into test state.
    fn game() -> InkportGame {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static NEXT_LOG: AtomicUsize = AtomicUsize::new(0);
        let townlog_path = format!(
            "{}/test_townlog_{}.json",
            std::env::temp_dir().display(),
            NEXT_LOG.fetch_add(1, Ordering::Relaxed)
        );
        let config_path = format!(
            "{}/no_such_inkport.toml",
            std::env::temp_dir().display()
        );
        InkportGame::with_paths(0, &townlog_path, &config_path).expect("game")
    }

    fn set_time(game: &mut InkportGame, hhmm: &str) {
        let target = parse_clock_to_minutes(hhmm).expect("time");
        let now = game.clock.minutes_of_day();
        let forward = (target + MINUTES_PER_DAY - now) % MINUTES_PER_DAY;
        // One real second per game minute at the default scale.
        game.clock.advance(forward as f64 * 1000.0, 1.0);
        assert_eq!(game.clock.minutes_of_day(), target);
    }

    fn stand_at_mailbox(game: &mut InkportGame) {
        let mb = game.map().mailbox.expect("mailbox");
        game.mayor.pos = mb;
    }

    #[test]
    fn new_game_defaults() {
        let game = game();
        assert_eq!(game.clock.day(), 1);
        assert_eq!(game.clock.format_time_of_day(), "08:00");
        assert!(game.clock.is_paused());
        assert_eq!(game.mayor.pos, game.maps[mapgen::TOWN].spawn);
        assert_eq!(game.ledger.pending_tasks().len(), 3);
        assert_eq!(game.ledger.budget(), 0);
        assert!(game.ledger.current_task().is_none());
    }

    #[test]
    fn movement_blocked_by_water() {
        let mut game = game();
        // Row 11 is the last grass row above the shoreline.
        game.mayor.pos = Point::new(2, 11);
        game.try_move(Point::new(0, 1));
        assert_eq!(game.mayor.pos, Point::new(2, 11));
        game.try_move(Point::new(1, 0));
        assert_eq!(game.mayor.pos, Point::new(3, 11));
    }

    #[test]
    fn door_warps_between_maps() {
        let mut game = game();
        game.mayor.pos = Point::new(5, 6);
        game.try_move(Point::new(0, -1));
        assert_eq!(game.current_map, mapgen::HALL);
        assert_eq!(game.mayor.pos, game.maps[mapgen::HALL].spawn);
        // Walk back out through the hall door.
        game.try_move(Point::new(0, 1));
        assert_eq!(game.current_map, mapgen::TOWN);
        assert_eq!(game.mayor.pos, Point::new(5, 6));
    }

    #[test]
    fn mailbox_requires_proximity() {
        let mut game = game();
        game.mayor.pos = Point::new(0, 0);
        game.open_mailbox();
        assert_eq!(game.mode, GameMode::Walking);

        stand_at_mailbox(&mut game);
        game.open_mailbox();
        assert!(matches!(game.mode, GameMode::Mailbox { .. }));
        assert_eq!(game.ui.layout(), UILayout::Mailbox);
    }

    #[test]
    fn accept_closes_mailbox_and_sets_current() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        game.accept_shown();
        assert_eq!(game.mode, GameMode::Walking);
        let current = game.ledger.current_task().expect("current");
        assert_eq!(current.spec.id, "greet_plaza");
        assert_eq!(current.state, TaskState::Accepted);
    }

    #[test]
    fn second_accept_is_rejected_with_note() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        game.accept_shown();
        game.open_mailbox();
        game.cycle_mailbox(1);
        game.accept_shown();
        match &game.mode {
            GameMode::Mailbox { note: Some(note) } => {
                assert!(note.starts_with("You already have an active task."));
            }
            other => panic!("unexpected mode {:?}", other),
        }
        assert_eq!(game.ledger.current_task().expect("current").spec.id, "greet_plaza");
    }

    #[test]
    fn greet_ignored_outside_work_hours() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        game.accept_shown();
        // 08:00, one minute before anything counts.
        game.npcs[0].map = mapgen::TOWN.to_string();
        game.npcs[0].pos = game.mayor.pos;
        game.greet_attempt();
        assert_eq!(game.ledger.current_task().expect("current").progress, 0);
    }

    #[test]
    fn greet_counts_during_work_hours() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        game.accept_shown();
        set_time(&mut game, "09:00");
        game.npcs[0].map = mapgen::TOWN.to_string();
        game.npcs[0].pos = game.mayor.pos;
        game.greet_attempt();
        assert_eq!(game.ledger.current_task().expect("current").progress, 1);
    }

    #[test]
    fn greet_without_neighbors_does_nothing() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        game.accept_shown();
        set_time(&mut game, "10:00");
        for npc in &mut game.npcs {
            npc.map = mapgen::HALL.to_string();
        }
        game.greet_attempt();
        assert_eq!(game.ledger.current_task().expect("current").progress, 0);
    }

    #[test]
    fn complete_before_goal_reports_progress() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        game.accept_shown();
        game.open_mailbox();
        game.complete_shown();
        match &game.mode {
            GameMode::Mailbox { note: Some(note) } => {
                assert_eq!(note, "You haven't finished this task yet. Progress 0/3.");
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn full_task_flow_pays_reward() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        game.accept_shown();
        set_time(&mut game, "09:30");
        game.npcs[0].map = mapgen::TOWN.to_string();
        game.npcs[0].pos = game.mayor.pos;
        for _ in 0..3 {
            game.greet_attempt();
        }
        game.open_mailbox();
        game.complete_shown();
        assert_eq!(game.ledger.budget(), 50);
        assert_eq!(
            game.ledger.current_task().expect("current").state,
            TaskState::Completed
        );
        assert_eq!(game.townlog.count("greet_plaza"), 1);
        std::fs::remove_file(&game.townlog_path).ok();
    }

    #[test]
    fn session_reads_townlog_from_given_path() {
        let path = format!(
            "{}/test_townlog_seeded.json",
            std::env::temp_dir().display()
        );
        std::fs::write(&path, r#"{"greet_plaza":2}"#).expect("write");
        let config = format!("{}/no_such_inkport.toml", std::env::temp_dir().display());
        let game = InkportGame::with_paths(0, &path, &config).expect("game");
        std::fs::remove_file(&path).ok();
        assert_eq!(game.townlog.count("greet_plaza"), 2);
        assert_eq!(game.townlog_path, path);
    }

    #[test]
    fn end_day_pauses_and_summarizes() {
        let mut game = game();
        game.end_day();
        assert!(game.clock.is_paused());
        match &game.mode {
            GameMode::Summary(summary) => {
                assert_eq!(summary.day, 1);
                assert_eq!(summary.missed.len(), 3);
                assert!(summary.completed.is_empty());
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn next_day_resets_town() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        game.accept_shown();
        game.end_day();
        game.begin_next_day();
        assert_eq!(game.clock.day(), 2);
        assert_eq!(game.clock.format_time_of_day(), "08:00");
        assert_eq!(game.clock.mode(), TimeMode::Normal);
        assert_eq!(game.current_map, mapgen::TOWN);
        assert_eq!(game.mayor.pos, game.maps[mapgen::TOWN].spawn);
        assert!(game.ledger.current_task().is_none());
        assert_eq!(game.ledger.pending_tasks().len(), 3);
        assert_eq!(game.mode, GameMode::Walking);
    }

    #[test]
    fn budget_survives_day_reset() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        game.accept_shown();
        set_time(&mut game, "11:00");
        game.npcs[0].map = mapgen::TOWN.to_string();
        game.npcs[0].pos = game.mayor.pos;
        for _ in 0..3 {
            game.greet_attempt();
        }
        game.open_mailbox();
        game.complete_shown();
        game.end_day();
        game.begin_next_day();
        assert_eq!(game.ledger.budget(), 50);
        std::fs::remove_file(&game.townlog_path).ok();
    }

    #[test]
    fn cycle_mailbox_wraps_both_ways() {
        let mut game = game();
        stand_at_mailbox(&mut game);
        game.open_mailbox();
        assert_eq!(game.mailbox_index, 0);
        game.cycle_mailbox(-1);
        assert_eq!(game.mailbox_index, 2);
        game.cycle_mailbox(1);
        assert_eq!(game.mailbox_index, 0);
    }
}
