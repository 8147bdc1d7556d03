//! Data loading for Inkport: manifest, task catalog, NPC roster and
//! schedule. Everything is parsed and validated up front; the rest of the
//! game only ever sees fully-typed values.

use common::{GameError, GameResult};
use mailbox::{TaskKind, TaskSpec};
use serde::Deserialize;

/// Session configuration, the `patch_manifest.json` equivalent.
#[derive(Clone, Debug, Deserialize)]
pub struct Manifest {
    pub time_scale: TimeScale,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct TimeScale {
    pub real_ms_per_ingame_minute: f64,
}

/// Loads the manifest from the given JSON file path.
pub fn load_manifest(path: &str) -> GameResult<Manifest> {
    let data = std::fs::read_to_string(path)?;
    parse_manifest(&data)
}

/// Loads the manifest embedded at compile time (used on WASM).
pub fn load_manifest_embedded() -> GameResult<Manifest> {
    parse_manifest(include_str!("../../../assets/manifest.json"))
}

fn parse_manifest(data: &str) -> GameResult<Manifest> {
    let manifest: Manifest = serde_json::from_str(data)?;
    let scale = manifest.time_scale.real_ms_per_ingame_minute;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(GameError::Config(format!(
            "real_ms_per_ingame_minute must be positive, got {}",
            scale
        )));
    }
    Ok(manifest)
}

/// Raw task record as written in the catalog file.
#[derive(Clone, Debug, Deserialize)]
struct TaskRecord {
    task_id: String,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    from: String,
    #[serde(default)]
    reward: u32,
    #[serde(rename = "type")]
    kind: String,
    goal: u32,
    #[serde(default)]
    building: String,
    #[serde(default)]
    deadline: Option<String>,
}

fn validate_task(record: TaskRecord) -> GameResult<TaskSpec> {
    if record.task_id.is_empty() {
        return Err(GameError::Config("task with empty task_id".to_string()));
    }
    if record.goal == 0 {
        return Err(GameError::Config(format!(
            "task {}: goal must be positive",
            record.task_id
        )));
    }
    let kind = match record.kind.as_str() {
        "greet" => TaskKind::Greet,
        other => TaskKind::Other(other.to_string()),
    };
    let deadline_minutes = record
        .deadline
        .as_deref()
        .map(clock::parse_clock_to_minutes)
        .transpose()?;
    Ok(TaskSpec {
        id: record.task_id,
        title: record.title,
        body: record.body,
        from: record.from,
        kind,
        goal: record.goal,
        reward: record.reward,
        building: record.building,
        deadline_minutes,
    })
}

/// Loads the task catalog from the given JSON file path.
pub fn load_tasks(path: &str) -> GameResult<Vec<TaskSpec>> {
    let data = std::fs::read_to_string(path)?;
    parse_tasks(&data)
}

/// Loads the task catalog embedded at compile time (used on WASM).
pub fn load_tasks_embedded() -> GameResult<Vec<TaskSpec>> {
    parse_tasks(include_str!("../../../assets/tasks.json"))
}

fn parse_tasks(data: &str) -> GameResult<Vec<TaskSpec>> {
    let records: Vec<TaskRecord> = serde_json::from_str(data)?;
    if records.is_empty() {
        return Err(GameError::Config("task catalog is empty".to_string()));
    }
    records.into_iter().map(validate_task).collect()
}

/// What an NPC is doing according to its schedule.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NpcActivity {
    Idle,
    Work,
    Social,
    Sleep,
}

/// Tile location on a named map.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TileRef {
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_map")]
    pub map: String,
}

fn default_map() -> String {
    "town".to_string()
}

/// NPC roster entry with its schedule anchors.
#[derive(Clone, Debug, Deserialize)]
pub struct NpcSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub species: String,
    pub home: TileRef,
    pub job: TileRef,
    pub social: TileRef,
    pub sleep: TileRef,
}

/// Loads the NPC roster from the given JSON file path.
pub fn load_npcs(path: &str) -> GameResult<Vec<NpcSpec>> {
    let data = std::fs::read_to_string(path)?;
    parse_npcs(&data)
}

/// Loads the NPC roster embedded at compile time (used on WASM).
pub fn load_npcs_embedded() -> GameResult<Vec<NpcSpec>> {
    parse_npcs(include_str!("../../../assets/npcs.json"))
}

fn parse_npcs(data: &str) -> GameResult<Vec<NpcSpec>> {
    let specs: Vec<NpcSpec> = serde_json::from_str(data)?;
    for spec in &specs {
        if spec.id.is_empty() {
            return Err(GameError::Config("npc with empty id".to_string()));
        }
    }
    Ok(specs)
}

#[derive(Clone, Debug, Deserialize)]
struct ScheduleRecord {
    start: String,
    end: String,
    state: NpcActivity,
}

/// One time-of-day block of the shared NPC schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleBlock {
    /// Inclusive start minute of day.
    pub start: u32,
    /// Exclusive end minute of day.
    pub end: u32,
    pub activity: NpcActivity,
}

/// Loads the shared day schedule from the given JSON file path.
pub fn load_schedule(path: &str) -> GameResult<Vec<ScheduleBlock>> {
    let data = std::fs::read_to_string(path)?;
    parse_schedule(&data)
}

/// Loads the day schedule embedded at compile time (used on WASM).
pub fn load_schedule_embedded() -> GameResult<Vec<ScheduleBlock>> {
    parse_schedule(include_str!("../../../assets/schedule.json"))
}

fn parse_schedule(data: &str) -> GameResult<Vec<ScheduleBlock>> {
    let records: Vec<ScheduleRecord> = serde_json::from_str(data)?;
    let mut blocks = Vec::with_capacity(records.len());
    for record in records {
        let start = clock::parse_clock_to_minutes(&record.start)?;
        let end = clock::parse_clock_to_minutes(&record.end)?;
        if end <= start {
            return Err(GameError::Config(format!(
                "schedule block {} .. {} is empty",
                record.start, record.end
            )));
        }
        blocks.push(ScheduleBlock {
            start,
            end,
            activity: record.state,
        });
    }
    Ok(blocks)
}
