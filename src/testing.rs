//! No-hardware doubles for host tests.
//!
//! [`ScriptedInput`] replays an ordered event script: each poll only
//! consumes the head event when it matches the poll type, so tests can
//! express "two detents, then confirm" and have the confirm fire on a
//! later tick than the rotation. [`MockPlatform`] advances a fake clock
//! on every frame delay and records reboot requests instead of
//! resetting the host.

use heapless::Deque;

use crate::input::{Command, Direction, InputSource, LegacyScroll};
use crate::platform::Platform;

const MAX_EVENTS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Cancel,
    Confirm,
    Turn(Direction),
    Serial(Command),
    Legacy(LegacyScroll),
}

/// Ordered input script implementing [`InputSource`].
#[derive(Default)]
pub struct ScriptedInput {
    events: Deque<Event, MAX_EVENTS>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_cancel(&mut self) {
        let _ = self.events.push_back(Event::Cancel);
    }

    pub fn press_confirm(&mut self) {
        let _ = self.events.push_back(Event::Confirm);
    }

    pub fn turn(&mut self, direction: Direction, detents: usize) {
        for _ in 0..detents {
            let _ = self.events.push_back(Event::Turn(direction));
        }
    }

    pub fn send_command(&mut self, command: Command) {
        let _ = self.events.push_back(Event::Serial(command));
    }

    pub fn push_legacy(&mut self, scroll: LegacyScroll) {
        let _ = self.events.push_back(Event::Legacy(scroll));
    }

    pub fn is_drained(&self) -> bool {
        self.events.is_empty()
    }

    fn pop_if(&mut self, wanted: fn(&Event) -> bool) -> Option<Event> {
        if self.events.front().is_some_and(wanted) {
            return self.events.pop_front();
        }
        None
    }
}

impl InputSource for ScriptedInput {
    fn cancel_fired(&mut self) -> bool {
        self.pop_if(|e| matches!(e, Event::Cancel)).is_some()
    }

    fn confirm_fired(&mut self) -> bool {
        self.pop_if(|e| matches!(e, Event::Confirm)).is_some()
    }

    fn poll_direction(&mut self) -> Direction {
        match self.pop_if(|e| matches!(e, Event::Turn(_))) {
            Some(Event::Turn(direction)) => direction,
            _ => Direction::NoRotation,
        }
    }

    fn poll_command(&mut self) -> Option<Command> {
        match self.pop_if(|e| matches!(e, Event::Serial(_))) {
            Some(Event::Serial(command)) => Some(command),
            _ => None,
        }
    }

    fn legacy_scroll(&mut self) -> Option<LegacyScroll> {
        match self.pop_if(|e| matches!(e, Event::Legacy(_))) {
            Some(Event::Legacy(scroll)) => Some(scroll),
            _ => None,
        }
    }
}

/// Fake clock + reboot recorder implementing [`Platform`].
#[derive(Debug, Default)]
pub struct MockPlatform {
    now_ms: u64,
    reboots: usize,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(now_ms: u64) -> Self {
        Self { now_ms, reboots: 0 }
    }

    pub fn reboot_count(&self) -> usize {
        self.reboots
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl Platform for MockPlatform {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn delay_ms(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    fn reboot(&mut self) {
        self.reboots += 1;
    }
}
