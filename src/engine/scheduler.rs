// Deferred, cancellable tasks keyed by owner
//
// Tasks are plain data instead of closures: the scheduler hands due tasks
// back to the caller, which routes them to their owner. Removing an owner
// cancels everything it scheduled, so nothing fires against a dead owner.

/// Identifies the object a task belongs to (a character id in practice)
pub type OwnerId = u32;

/// Handle to a scheduled task, usable for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// A task whose due time has been reached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueTask<T> {
    pub owner: OwnerId,
    pub task: T,
    pub due: f32,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    handle: TaskHandle,
    owner: OwnerId,
    task: T,
    due: f32,
}

/// Time-ordered queue of deferred tasks
#[derive(Debug)]
pub struct Scheduler<T> {
    pending: Vec<Pending<T>>,
    next_handle: u64,
    /// Simulation time of the last `advance`
    now: f32,
}

impl<T: Copy + PartialEq + std::fmt::Debug> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_handle: 0,
            now: 0.0,
        }
    }

    /// Current scheduler time in seconds
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Schedule `task` for `owner` to fire `delay` seconds after `now`
    ///
    /// An identical task already pending for the same owner is replaced, so
    /// re-arming a timer pushes its expiry back instead of stacking two.
    pub fn schedule_after(&mut self, owner: OwnerId, now: f32, delay: f32, task: T) -> TaskHandle {
        self.pending
            .retain(|pending| !(pending.owner == owner && pending.task == task));

        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;

        let due = now + delay.max(0.0);
        log::debug!("Scheduled {:?} for owner {} at t={:.3}", task, owner, due);
        self.pending.push(Pending {
            handle,
            owner,
            task,
            due,
        });
        handle
    }

    /// Cancel a single task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|pending| pending.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every task belonging to `owner`, returning how many were dropped
    pub fn cancel_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|pending| pending.owner != owner);
        let cancelled = before - self.pending.len();
        if cancelled > 0 {
            log::debug!("Cancelled {} task(s) for owner {}", cancelled, owner);
        }
        cancelled
    }

    /// Check if a task of this kind is pending for `owner`
    pub fn is_pending(&self, owner: OwnerId, task: T) -> bool {
        self.pending
            .iter()
            .any(|pending| pending.owner == owner && pending.task == task)
    }

    /// Number of tasks waiting to fire
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move time forward and collect every task due at or before `now`,
    /// earliest first
    pub fn advance(&mut self, now: f32) -> Vec<DueTask<T>> {
        self.now = now;

        let mut due = Vec::new();
        self.pending.retain(|pending| {
            if pending.due <= now {
                due.push(DueTask {
                    owner: pending.owner,
                    task: pending.task,
                    due: pending.due,
                });
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T: Copy + PartialEq + std::fmt::Debug> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Task {
        Ping,
        Pong,
    }

    #[test]
    fn test_scheduler_creation() {
        let scheduler: Scheduler<Task> = Scheduler::new();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.now(), 0.0);
    }

    #[test]
    fn test_task_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(1, 0.0, 0.2, Task::Ping);

        assert!(scheduler.advance(0.1).is_empty());
        assert!(scheduler.is_pending(1, Task::Ping));

        let due = scheduler.advance(0.2);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, 1);
        assert_eq!(due[0].task, Task::Ping);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_due_tasks_are_ordered() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(1, 0.0, 0.5, Task::Pong);
        scheduler.schedule_after(2, 0.0, 0.1, Task::Ping);

        let due = scheduler.advance(1.0);
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].owner, 2);
        assert_eq!(due[1].owner, 1);
    }

    #[test]
    fn test_reschedule_replaces_pending() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(1, 0.0, 0.2, Task::Ping);
        scheduler.schedule_after(1, 0.1, 0.2, Task::Ping);

        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.advance(0.25).is_empty());
        assert_eq!(scheduler.advance(0.3).len(), 1);
    }

    #[test]
    fn test_cancel_by_handle() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_after(1, 0.0, 0.2, Task::Ping);

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.advance(1.0).is_empty());
    }

    #[test]
    fn test_cancel_owner_keeps_others() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(1, 0.0, 0.2, Task::Ping);
        scheduler.schedule_after(1, 0.0, 0.3, Task::Pong);
        scheduler.schedule_after(2, 0.0, 0.2, Task::Ping);

        assert_eq!(scheduler.cancel_owner(1), 2);

        let due = scheduler.advance(1.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, 2);
    }

    #[test]
    fn test_negative_delay_fires_immediately() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(3, 2.0, -1.0, Task::Ping);
        assert_eq!(scheduler.advance(2.0).len(), 1);
    }
}
