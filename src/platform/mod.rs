//! Platform abstraction layer
//!
//! The seams between the simulation and whatever hosts it:
//! - `InputSource`: discrete events plus a held-key snapshot
//! - `RenderSink`: receives one `FrameView` per tick
//! - `FrameClock`: paces the loop at the tick rate
//!
//! `Runner` ties them together as a single-threaded fixed-tick loop:
//! drain events, snapshot held keys, tick once, present, wait.

use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::ui::{FrameView, frame_view};

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
    Escape,
    Other,
}

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed / process asked to stop
    Quit,
    KeyDown(Key),
    /// Pointer press in screen space
    PointerDown(Vec2),
}

/// Keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

pub trait InputSource {
    /// Append events received since the last call
    fn poll_events(&mut self, out: &mut Vec<InputEvent>);

    /// Snapshot of held keys, sampled once per tick
    fn held(&self) -> HeldKeys;
}

pub trait RenderSink {
    fn present(&mut self, frame: &FrameView);
}

/// Input source that never produces anything (headless / autoplay)
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll_events(&mut self, _out: &mut Vec<InputEvent>) {}

    fn held(&self) -> HeldKeys {
        HeldKeys::default()
    }
}

/// Render sink that only logs: score changes at debug, full frames at trace
#[derive(Debug, Default)]
pub struct LogSink {
    last_score: u32,
    frames: u64,
}

impl LogSink {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &FrameView) {
        self.frames += 1;
        if frame.score != self.last_score {
            log::debug!("Score: {}", frame.score);
            self.last_score = frame.score;
        }
        if log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(frame) {
                Ok(json) => log::trace!("frame {}: {}", self.frames, json),
                Err(e) => log::warn!("Failed to encode frame: {}", e),
            }
        }
    }
}

/// Fixed-rate frame limiter
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(tick_rate.max(1)));
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleep until the next tick deadline
    ///
    /// If the loop has fallen more than a tick behind, the schedule restarts
    /// from now instead of bursting to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.period;
        } else if now - self.next > self.period {
            self.next = now + self.period;
        } else {
            self.next += self.period;
        }
    }
}

/// Owns a session and runs it against an input source and a render sink
pub struct Runner {
    pub state: GameState,
    clock: Option<FrameClock>,
    events: Vec<InputEvent>,
    running: bool,
    idle_mode: bool,
    frames: u64,
}

impl Runner {
    /// Unpaced runner: ticks as fast as the caller steps it
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            clock: None,
            events: Vec::new(),
            running: true,
            idle_mode: false,
            frames: 0,
        }
    }

    /// Pace `run` at the session's tick rate
    pub fn realtime(mut self) -> Self {
        self.clock = Some(FrameClock::new(self.state.tuning.tick_rate));
        self
    }

    /// Let the autopilot play
    pub fn idle(mut self, idle_mode: bool) -> Self {
        self.idle_mode = idle_mode;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Turn this tick's events and held keys into a tick input
    ///
    /// Returns `None` when a quit was requested.
    fn collect_input(&mut self, input: &mut impl InputSource) -> Option<TickInput> {
        self.events.clear();
        input.poll_events(&mut self.events);

        let held = input.held();
        let mut tick_input = TickInput {
            left: held.left,
            right: held.right,
            idle_mode: self.idle_mode,
            ..Default::default()
        };

        for event in &self.events {
            match *event {
                InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => return None,
                InputEvent::KeyDown(key) => {
                    tick_input.any_key = true;
                    if key == Key::Space {
                        tick_input.start = true;
                    }
                }
                InputEvent::PointerDown(pos) => {
                    // Pointer only matters on button screens
                    if self.state.phase != GamePhase::Playing {
                        tick_input.click = Some(pos);
                    }
                }
            }
        }
        Some(tick_input)
    }

    /// One loop iteration without pacing: input, tick, present
    pub fn step(
        &mut self,
        input: &mut impl InputSource,
        sink: &mut impl RenderSink,
    ) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }
        let Some(tick_input) = self.collect_input(input) else {
            log::info!("Quit requested after {} frames", self.frames);
            self.running = false;
            return Vec::new();
        };

        let events = tick(&mut self.state, &tick_input);
        sink.present(&frame_view(&self.state));
        self.frames += 1;
        events
    }

    /// Loop until quit, or until `max_frames` iterations have run
    pub fn run(
        &mut self,
        input: &mut impl InputSource,
        sink: &mut impl RenderSink,
        max_frames: Option<u64>,
    ) {
        while self.running {
            if max_frames.is_some_and(|max| self.frames >= max) {
                break;
            }
            for event in self.step(input, sink) {
                match event {
                    GameEvent::Started => log::debug!("Run {} started", self.state.seed),
                    GameEvent::GameOver { score } => log::debug!("Run over at score {}", score),
                    GameEvent::Bounced { .. } => {}
                }
            }
            if let Some(clock) = self.clock.as_mut() {
                clock.wait();
            }
        }
    }
}
