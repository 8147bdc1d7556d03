//! Mailbox task ledger: pending pool, single active slot, rewards.
//!
//! The ledger enforces the at-most-one-active-task rule: a task must reach
//! [`TaskState::Completed`] (or be reverted by the day reset) before another
//! can be accepted. Rejected operations are ordinary values, not panics; the
//! mailbox UI turns each [`TaskError`] into a specific message.

/// Lifecycle state of a task. Transitions run strictly
/// `Available -> Accepted -> Completed`; the day reset is the only way back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Available,
    Accepted,
    Completed,
}

impl TaskState {
    /// Lowercase label used in the overlay text.
    pub fn label(self) -> &'static str {
        match self {
            TaskState::Available => "available",
            TaskState::Accepted => "accepted",
            TaskState::Completed => "completed",
        }
    }
}

/// Kind of work a task asks for.
///
/// Greeting is the only kind the game knows how to progress. Unknown catalog
/// kinds are carried through opaquely so they still display, but nothing
/// ever matches them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Greet,
    Other(String),
}

impl TaskKind {
    pub fn label(&self) -> &str {
        match self {
            TaskKind::Greet => "greet",
            TaskKind::Other(name) => name,
        }
    }
}

/// Immutable task definition from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSpec {
    pub id: String,
    pub title: String,
    pub body: String,
    pub from: String,
    pub kind: TaskKind,
    pub goal: u32,
    pub reward: u32,
    pub building: String,
    /// Minute of day after which the task counts as late, if any.
    pub deadline_minutes: Option<u32>,
}

/// Runtime task wrapping a catalog spec.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub spec: TaskSpec,
    pub state: TaskState,
    pub progress: u32,
    /// Position in the catalog, used to restore pool order on day reset.
    pub catalog_index: usize,
}

impl Task {
    fn new(spec: TaskSpec, catalog_index: usize) -> Self {
        Self {
            spec,
            state: TaskState::Available,
            progress: 0,
            catalog_index,
        }
    }

    /// True once the clock has passed this task's deadline.
    pub fn is_past_deadline(&self, minutes_of_day: u32) -> bool {
        self.spec
            .deadline_minutes
            .is_some_and(|d| minutes_of_day > d)
    }
}

/// Reasons a ledger operation can be rejected. All of these are expected,
/// recoverable outcomes; none leaves the ledger partially mutated.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum TaskError {
    #[error("no task with id \"{0}\"")]
    NotFound(String),
    #[error("task is not in a state that allows this")]
    WrongState,
    #[error("another task is already active")]
    AlreadyActive,
    #[error("progress {progress}/{goal} does not meet the goal")]
    GoalNotMet { progress: u32, goal: u32 },
}

/// End-of-day bookkeeping handed to the summary screen.
#[derive(Clone, Debug, PartialEq)]
pub struct DaySummary {
    pub day: u32,
    pub completed: Vec<Task>,
    pub missed: Vec<Task>,
    pub budget: u32,
}

/// The mailbox aggregate: pending pool, current-task slot, completed log
/// and the mayor's budget.
#[derive(Clone, Debug, Default)]
pub struct TaskLedger {
    pending: Vec<Task>,
    current: Option<Task>,
    completed: Vec<Task>,
    budget: u32,
}

impl TaskLedger {
    /// Builds a ledger from validated catalog specs, all starting available.
    pub fn new(specs: Vec<TaskSpec>) -> Self {
        let pending = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Task::new(spec, i))
            .collect();
        Self {
            pending,
            current: None,
            completed: Vec::new(),
            budget: 0,
        }
    }

    /// Accepts a pending task, installing it as the current task.
    ///
    /// A completed current task never blocks a new accept; only an accepted
    /// one does.
    pub fn accept(&mut self, id: &str) -> Result<(), TaskError> {
        if self
            .current
            .as_ref()
            .is_some_and(|t| t.state == TaskState::Accepted)
        {
            return Err(TaskError::AlreadyActive);
        }
        let idx = self
            .pending
            .iter()
            .position(|t| t.spec.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        if self.pending[idx].state != TaskState::Available {
            return Err(TaskError::WrongState);
        }
        let mut task = self.pending.remove(idx);
        task.state = TaskState::Accepted;
        task.progress = 0;
        // A completed task in the slot is dropped here; its snapshot is
        // already in the completed log.
        self.current = Some(task);
        Ok(())
    }

    /// Applies a gated player action to the current task.
    ///
    /// Returns whether any progress was recorded. Actions outside work
    /// hours, against a non-matching kind, or without an accepted task are
    /// silently ignored rather than queued.
    pub fn record_progress(&mut self, kind: &TaskKind, amount: u32, work_hour: bool) -> bool {
        if !work_hour {
            return false;
        }
        let Some(task) = self.current.as_mut() else {
            return false;
        };
        if task.state != TaskState::Accepted || task.spec.kind != *kind {
            return false;
        }
        if task.progress >= task.spec.goal {
            return false;
        }
        task.progress = (task.progress + amount).min(task.spec.goal);
        true
    }

    /// Completes the current task, paying out its reward.
    ///
    /// Idempotent after the first success: a second call finds the task no
    /// longer accepted and is rejected, so the reward is never paid twice.
    pub fn complete(&mut self) -> Result<u32, TaskError> {
        let task = self.current.as_mut().ok_or(TaskError::WrongState)?;
        if task.state != TaskState::Accepted {
            return Err(TaskError::WrongState);
        }
        if task.progress < task.spec.goal {
            return Err(TaskError::GoalNotMet {
                progress: task.progress,
                goal: task.spec.goal,
            });
        }
        task.state = TaskState::Completed;
        task.progress = task.spec.goal;
        let reward = task.spec.reward;
        self.budget += reward;
        let snapshot = task.clone();
        if !self.completed.iter().any(|t| t.spec.id == snapshot.spec.id) {
            self.completed.push(snapshot);
        }
        Ok(reward)
    }

    /// Ordered display view: current task first, then pending in catalog
    /// order. Pure query.
    pub fn tasks_for_display(&self) -> Vec<&Task> {
        let mut tasks = Vec::with_capacity(self.pending.len() + 1);
        if let Some(current) = &self.current {
            tasks.push(current);
        }
        tasks.extend(self.pending.iter());
        tasks
    }

    pub fn current_task(&self) -> Option<&Task> {
        self.current.as_ref()
    }

    pub fn pending_tasks(&self) -> &[Task] {
        &self.pending
    }

    pub fn completed_tasks(&self) -> &[Task] {
        &self.completed
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Builds the end-of-day view. Missed tasks are the ones still sitting
    /// in the pool; an accepted-but-unfinished current task is neither
    /// missed nor completed. Budget carries over between days.
    pub fn day_summary(&self, day: u32) -> DaySummary {
        DaySummary {
            day,
            completed: self.completed.clone(),
            missed: self
                .pending
                .iter()
                .filter(|t| t.state == TaskState::Available)
                .cloned()
                .collect(),
            budget: self.budget,
        }
    }

    /// Day-boundary reset: every task, including the one in the slot, goes
    /// back to the pool as available with zero progress, and the completed
    /// log is cleared for the new day. The budget is kept.
    pub fn reset_for_new_day(&mut self) {
        if let Some(task) = self.current.take() {
            self.pending.push(task);
        }
        for task in &mut self.pending {
            task.state = TaskState::Available;
            task.progress = 0;
        }
        self.pending.sort_by_key(|t| t.catalog_index);
        self.completed.clear();
    }
}
