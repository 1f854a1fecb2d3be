use serde::{Deserialize, Serialize};

/// What the history reports as it drives the board. Drained by the session
/// shell; the engine itself never blocks on a listener.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    MoveExecuted { score: u32 },
    MoveUndone { score: u32 },
    MoveRedone { score: u32 },
    RedoBranchDiscarded { discarded: usize },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
