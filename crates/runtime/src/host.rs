use std::collections::VecDeque;

use tileworld_input::{HostEvent, WindowEvent};

use crate::clock::{Clock, ManualClock};

/// The platform side of the loop: an event source plus a presentable canvas.
pub trait HostWindow {
    /// What handlers draw into.
    type Canvas;

    /// Next pending event, or `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<HostEvent>;

    /// Current drawable size in pixels.
    fn display_size(&self) -> (u32, u32);

    fn canvas(&mut self) -> &mut Self::Canvas;

    /// Show the frame drawn into the canvas.
    fn present(&mut self);
}

/// A scripted host for tests and headless runs.
///
/// Events are released once the shared [`ManualClock`] reaches their
/// timestamp. A resize event updates the reported display size when it is
/// polled, as a real window would.
#[derive(Debug)]
pub struct HeadlessHost<C> {
    clock: ManualClock,
    size: (u32, u32),
    canvas: C,
    script: VecDeque<(u64, HostEvent)>,
    presents: u64,
}

impl<C> HeadlessHost<C> {
    pub fn new(clock: ManualClock, width: u32, height: u32, canvas: C) -> Self {
        Self {
            clock,
            size: (width, height),
            canvas,
            script: VecDeque::new(),
            presents: 0,
        }
    }

    /// Queue `event` for release at clock time `at`. Events with equal
    /// timestamps keep their insertion order.
    pub fn schedule(&mut self, at: u64, event: HostEvent) {
        let index = self.script.partition_point(|(t, _)| *t <= at);
        self.script.insert(index, (at, event));
    }

    /// Queue `event` for the next poll.
    pub fn push(&mut self, event: HostEvent) {
        let now = self.clock.now();
        self.schedule(now, event);
    }

    pub fn pending(&self) -> usize {
        self.script.len()
    }

    /// Number of frames presented so far.
    pub fn presents(&self) -> u64 {
        self.presents
    }

    pub fn canvas_ref(&self) -> &C {
        &self.canvas
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }
}

impl<C> HostWindow for HeadlessHost<C> {
    type Canvas = C;

    fn poll_event(&mut self) -> Option<HostEvent> {
        let (at, _) = self.script.front()?;
        if *at > self.clock.now() {
            return None;
        }
        let (_, event) = self.script.pop_front()?;
        if let HostEvent::Window(WindowEvent::Resized { width, height }) = event {
            self.size = (width, height);
        }
        Some(event)
    }

    fn display_size(&self) -> (u32, u32) {
        self.size
    }

    fn canvas(&mut self) -> &mut C {
        &mut self.canvas
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}
