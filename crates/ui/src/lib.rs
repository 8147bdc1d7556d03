//! HUD and overlay rendering for the town view.

use bracket_lib::prelude::{BTerm, BLACK, BROWN1, CYAN, GRAY, GREEN, NAVY, RED, RGB, WHITE, YELLOW};
use clock::{format_minutes, TimeMode};
use common::GameResult;
use mailbox::{DaySummary, Task, TaskState};

/// UI layout type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UILayout {
    /// Walking around town.
    Standard,
    /// Mailbox overlay with the task letter.
    Mailbox,
    /// Help and controls.
    Help,
}

/// Color palette for map and entity rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPalette {
    pub grass: RGB,
    pub path: RGB,
    pub water: RGB,
    pub floor: RGB,
    pub wall: RGB,
    pub mayor: RGB,
    pub npc: RGB,
    pub mailbox: RGB,
    pub door: RGB,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            grass: RGB::named(GREEN),
            path: RGB::named(BROWN1),
            water: RGB::named(NAVY),
            floor: RGB::named(GRAY),
            wall: RGB::named(WHITE),
            mayor: RGB::named(YELLOW),
            npc: RGB::named(CYAN),
            mailbox: RGB::named(RED),
            door: RGB::named(YELLOW),
        }
    }
}

impl ColorPalette {
    /// Returns a high contrast palette suitable for colorblind players.
    pub fn colorblind() -> Self {
        Self {
            grass: RGB::named(GRAY),
            path: RGB::named(WHITE),
            water: RGB::named(NAVY),
            floor: RGB::named(GRAY),
            wall: RGB::named(WHITE),
            mayor: RGB::named(YELLOW),
            npc: RGB::named(WHITE),
            mailbox: RGB::named(YELLOW),
            door: RGB::named(WHITE),
        }
    }
}

const LOG_Y: i32 = 17;
const LOG_WINDOW: i32 = 6;
const STATUS_X: i32 = 40;

/// Basic UI context for logging and overlay state.
pub struct UIContext {
    logs: Vec<String>,
    scroll: usize,
    layout: UILayout,
}

impl Default for UIContext {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            scroll: 0,
            layout: UILayout::Standard,
        }
    }
}

impl UIContext {
    /// Sets the current layout.
    pub fn set_layout(&mut self, layout: UILayout) {
        self.layout = layout;
    }

    /// Returns the current layout.
    pub fn layout(&self) -> UILayout {
        self.layout
    }

    /// Adds a message to the log queue.
    pub fn add_log(&mut self, msg: &str) -> GameResult<()> {
        self.logs.push(msg.to_string());
        Ok(())
    }

    /// Scrolls log view one line up.
    pub fn scroll_up(&mut self) {
        if self.scroll + (LOG_WINDOW as usize) < self.logs.len() {
            self.scroll += 1;
        }
    }

    /// Scrolls log view one line down.
    pub fn scroll_down(&mut self) {
        if self.scroll > 0 {
            self.scroll -= 1;
        }
    }

    /// Draws the log window beneath the map.
    pub fn draw_logs(&self, ctx: &mut BTerm) -> GameResult<()> {
        if self.layout == UILayout::Help {
            return Ok(());
        }
        let start = self
            .logs
            .len()
            .saturating_sub(LOG_WINDOW as usize + self.scroll);
        let end = std::cmp::min(start + LOG_WINDOW as usize, self.logs.len());
        for (i, line) in self.logs[start..end].iter().enumerate() {
            ctx.print(0, LOG_Y + i as i32, line);
        }
        Ok(())
    }

    /// Draws the status panel on the right side.
    pub fn draw_status(
        &self,
        ctx: &mut BTerm,
        hud: &str,
        task_hud: &str,
        budget: u32,
    ) -> GameResult<()> {
        if self.layout == UILayout::Help {
            return Ok(());
        }
        ctx.print(STATUS_X, 1, hud);
        ctx.print(STATUS_X, 2, task_hud);
        ctx.print(STATUS_X, 3, format!("Budget: {}", budget));
        Ok(())
    }

    /// Draws the mailbox overlay with a title and letter lines.
    pub fn draw_overlay(&self, ctx: &mut BTerm, title: &str, lines: &[String]) -> GameResult<()> {
        if self.layout != UILayout::Mailbox {
            return Ok(());
        }
        ctx.print_color_centered(3, RGB::named(YELLOW), RGB::named(BLACK), title);
        for (i, line) in lines.iter().enumerate() {
            ctx.print_centered(5 + i as i32, line);
        }
        Ok(())
    }

    /// Draws help text when in `Help` layout.
    pub fn draw_help(&self, ctx: &mut BTerm) -> GameResult<()> {
        if self.layout != UILayout::Help {
            return Ok(());
        }
        for (i, line) in help_strings().iter().enumerate() {
            ctx.print_centered(5 + i as i32, line);
        }
        Ok(())
    }
}

/// Builds the one-line HUD summary, e.g.
/// `Day 1 — 09:05 (Normal) — Task: Meet the Neighbors 1/3 (Accepted)`.
pub fn hud_line(
    day: u32,
    minutes_of_day: u32,
    mode: TimeMode,
    current: Option<&Task>,
    pending_count: usize,
) -> String {
    let task_text = match current {
        Some(t) if t.state == TaskState::Accepted => format!(
            "Task: {} {}/{} (Accepted)",
            t.spec.title, t.progress, t.spec.goal
        ),
        Some(t) if t.state == TaskState::Completed => format!(
            "Task: {} {}/{} (Completed)",
            t.spec.title, t.spec.goal, t.spec.goal
        ),
        Some(t) => format!("Task: {} (Available)", t.spec.title),
        None if pending_count > 0 => "Task: Available (check mailbox)".to_string(),
        None => "Task: (none yet)".to_string(),
    };
    format!(
        "Day {} — {} ({}) — {}",
        day,
        format_minutes(minutes_of_day),
        mode.label(),
        task_text
    )
}

/// Builds the active-task HUD line with its deadline, if any. An accepted
/// task past its deadline is flagged as overdue.
pub fn task_hud_line(current: Option<&Task>, minutes_of_day: u32) -> String {
    match current {
        Some(t) => {
            let mut text = format!("{} — {}", t.spec.title, t.state.label());
            if let Some(deadline) = t.spec.deadline_minutes {
                if t.state == TaskState::Accepted && t.is_past_deadline(minutes_of_day) {
                    text.push_str(&format!(" (Overdue, was due {})", format_minutes(deadline)));
                } else {
                    text.push_str(&format!(" (Due {})", format_minutes(deadline)));
                }
            }
            text
        }
        None => "No active tasks yet. Accept something from the mailbox.".to_string(),
    }
}

/// Builds the mailbox overlay lines for one task letter.
pub fn overlay_lines(
    task: &Task,
    index: usize,
    total: usize,
    is_current: bool,
    note: Option<&str>,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut state_line = format!("Task {} of {} — State: {}", index + 1, total, task.state.label());
    if is_current && task.state == TaskState::Accepted {
        state_line.push_str(" — Currently active task.");
    } else if task.state == TaskState::Completed {
        state_line.push_str(" — Completed. You may accept a new task.");
    }
    lines.push(state_line);
    lines.push(task.spec.body.clone());
    lines.push(format!("From: {}", task.spec.from));
    lines.push(format!("Reward: {}", task.spec.reward));
    if !task.spec.building.is_empty() {
        lines.push(format!("Building: {}", task.spec.building));
    }
    if let Some(deadline) = task.spec.deadline_minutes {
        lines.push(format!("Deadline: {}", format_minutes(deadline)));
    }
    lines.push(format!("Goal: {}", task.spec.goal));
    lines.push(format!("Type: {}", task.spec.kind.label()));
    lines.push(format!("Progress: {}/{}", task.progress, task.spec.goal));
    if let Some(note) = note {
        lines.push(String::new());
        lines.push(note.to_string());
    }
    lines
}

/// Builds the end-of-day summary lines.
pub fn summary_lines(summary: &DaySummary) -> Vec<String> {
    vec![
        format!("End of Day {}", summary.day),
        format!("Completed: {}", summary.completed.len()),
        format!("Missed: {}", summary.missed.len()),
        format!("Budget: {}", summary.budget),
    ]
}

fn help_strings() -> Vec<String> {
    vec![
        "Controls:".to_string(),
        "Arrow keys / hjkl: Move".to_string(),
        "Space: Greet a nearby citizen".to_string(),
        "m: Open mailbox (stand next to it)".to_string(),
        "a / c: Accept / Complete the shown task".to_string(),
        ", / .: Previous / Next letter".to_string(),
        "p: Pause   f: Fast-forward".to_string(),
        "Enter: End the day".to_string(),
        "F1: Toggle this help".to_string(),
        "q: Quit".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailbox::{TaskKind, TaskLedger, TaskSpec};

    fn spec(id: &str) -> TaskSpec {
        TaskSpec {
            id: id.to_string(),
            title: "Meet the Neighbors".to_string(),
            body: "Say hello to three citizens.".to_string(),
            from: "City Council".to_string(),
            kind: TaskKind::Greet,
            goal: 3,
            reward: 50,
            building: "plaza".to_string(),
            deadline_minutes: Some(16 * 60 + 30),
        }
    }

    #[test]
    fn log_addition() {
        let mut ui = UIContext::default();
        ui.add_log("test").unwrap();
        assert_eq!(ui.logs.len(), 1);
    }

    #[test]
    fn layout_switching() {
        let mut ui = UIContext::default();
        assert_eq!(ui.layout(), UILayout::Standard);
        ui.set_layout(UILayout::Mailbox);
        assert_eq!(ui.layout(), UILayout::Mailbox);
        ui.set_layout(UILayout::Help);
        assert_eq!(ui.layout(), UILayout::Help);
    }

    #[test]
    fn scrolling_bounds() {
        let mut ui = UIContext::default();
        for i in 0..10 {
            ui.add_log(&format!("{}", i)).unwrap();
        }
        ui.scroll_up();
        assert_eq!(ui.scroll, 1);
        for _ in 0..20 {
            ui.scroll_down();
        }
        assert_eq!(ui.scroll, 0);
    }

    #[test]
    fn hud_line_without_tasks() {
        let line = hud_line(1, 8 * 60, TimeMode::Paused, None, 0);
        assert_eq!(line, "Day 1 — 08:00 (Paused) — Task: (none yet)");
    }

    #[test]
    fn hud_line_points_at_mailbox() {
        let line = hud_line(2, 9 * 60 + 5, TimeMode::Normal, None, 3);
        assert!(line.contains("Day 2"));
        assert!(line.contains("09:05"));
        assert!(line.contains("check mailbox"));
    }

    #[test]
    fn hud_line_shows_progress() {
        let mut ledger = TaskLedger::new(vec![spec("t1")]);
        ledger.accept("t1").expect("accept");
        ledger.record_progress(&TaskKind::Greet, 1, true);
        let line = hud_line(1, 10 * 60, TimeMode::Fast, ledger.current_task(), 0);
        assert!(line.contains("(Fast)"));
        assert!(line.contains("1/3 (Accepted)"));
    }

    #[test]
    fn task_hud_line_shows_deadline() {
        let mut ledger = TaskLedger::new(vec![spec("t1")]);
        ledger.accept("t1").expect("accept");
        let line = task_hud_line(ledger.current_task(), 10 * 60);
        assert!(line.contains("accepted"));
        assert!(line.contains("(Due 16:30)"));
        assert!(task_hud_line(None, 10 * 60).contains("No active tasks yet"));
    }

    #[test]
    fn task_hud_line_flags_overdue_task() {
        let mut ledger = TaskLedger::new(vec![spec("t1")]);
        ledger.accept("t1").expect("accept");
        // 16:30 itself is still on time, 16:31 is late
        let on_time = task_hud_line(ledger.current_task(), 16 * 60 + 30);
        assert!(on_time.contains("(Due 16:30)"));
        let late = task_hud_line(ledger.current_task(), 16 * 60 + 31);
        assert!(late.contains("(Overdue, was due 16:30)"));
    }

    #[test]
    fn overlay_lines_include_letter_fields() {
        let ledger = TaskLedger::new(vec![spec("t1")]);
        let task = &ledger.pending_tasks()[0];
        let lines = overlay_lines(task, 0, 1, false, None);
        assert_eq!(lines[0], "Task 1 of 1 — State: available");
        assert!(lines.contains(&"From: City Council".to_string()));
        assert!(lines.contains(&"Building: plaza".to_string()));
        assert!(lines.contains(&"Deadline: 16:30".to_string()));
        assert!(lines.contains(&"Progress: 0/3".to_string()));
    }

    #[test]
    fn overlay_lines_mark_active_task() {
        let mut ledger = TaskLedger::new(vec![spec("t1")]);
        ledger.accept("t1").expect("accept");
        let task = ledger.current_task().expect("current");
        let lines = overlay_lines(task, 0, 1, true, None);
        assert!(lines[0].ends_with("Currently active task."));
    }

    #[test]
    fn overlay_lines_append_note() {
        let ledger = TaskLedger::new(vec![spec("t1")]);
        let task = &ledger.pending_tasks()[0];
        let lines = overlay_lines(task, 0, 1, false, Some("No active task."));
        assert_eq!(lines.last().expect("note"), "No active task.");
    }

    #[test]
    fn summary_lines_format() {
        let ledger = TaskLedger::new(vec![spec("t1"), spec("t2")]);
        let lines = summary_lines(&ledger.day_summary(3));
        assert_eq!(
            lines,
            vec![
                "End of Day 3".to_string(),
                "Completed: 0".to_string(),
                "Missed: 2".to_string(),
                "Budget: 0".to_string(),
            ]
        );
    }

    #[test]
    fn colorblind_palette_differs() {
        let normal = ColorPalette::default();
        let cb = ColorPalette::colorblind();
        assert_ne!(normal.npc, cb.npc);
    }

    #[test]
    fn help_strings_contains_controls() {
        let lines = help_strings();
        assert_eq!(lines.first().unwrap(), "Controls:");
        assert!(lines.iter().any(|l| l.contains("F1")));
    }
}
