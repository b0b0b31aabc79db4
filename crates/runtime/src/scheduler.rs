use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::handler::{Dispatched, Handler, dispatch};
use crate::host::HostWindow;
use crate::stats::LoopStats;

/// Idle sleep when an iteration has nothing to do.
pub const DEFAULT_IDLE_SLEEP: Duration = Duration::from_millis(1);

/// Errors that prevent the loop from starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("ticks per second must be positive")]
    ZeroTickRate,
    #[error("{ticks_per_second} ticks per second is faster than the {frequency} Hz clock")]
    TickRateTooHigh { ticks_per_second: u32, frequency: u64 },
}

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iteration {
    /// Fixed updates run.
    pub ticks: u32,
    pub prepared: bool,
    pub rendered: bool,
    pub slept: bool,
}

/// Fixed-timestep loop.
///
/// Simulation ticks run at exactly `ticks_per_second` clock rate regardless
/// of how often the loop iterates: every iteration runs as many ticks as
/// fit in the time elapsed since the last one, then renders once if any ran.
/// Iterations with nothing to do sleep briefly instead of spinning.
pub struct Scheduler<C: Clock> {
    clock: C,
    ticks_per_second: u32,
    frame_length: u64,
    idle_sleep: Duration,
    last_update: u64,
    last_second: u64,
    running: bool,
    stats: LoopStats,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C, ticks_per_second: u32) -> Result<Self, SchedulerError> {
        if ticks_per_second == 0 {
            return Err(SchedulerError::ZeroTickRate);
        }
        let frequency = clock.frequency();
        let frame_length = frequency / u64::from(ticks_per_second);
        if frame_length == 0 {
            return Err(SchedulerError::TickRateTooHigh {
                ticks_per_second,
                frequency,
            });
        }
        Ok(Self {
            clock,
            ticks_per_second,
            frame_length,
            idle_sleep: DEFAULT_IDLE_SLEEP,
            last_update: 0,
            last_second: 0,
            running: false,
            stats: LoopStats::default(),
        })
    }

    pub fn with_idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.idle_sleep = idle_sleep;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    /// Clock ticks per simulation tick.
    pub fn frame_length(&self) -> u64 {
        self.frame_length
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop after the current iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Run the loop until the handler or host asks to stop.
    pub fn run<W, H>(&mut self, host: &mut W, handler: &mut H)
    where
        W: HostWindow,
        H: Handler<W::Canvas> + ?Sized,
    {
        self.start(host, handler);
        while self.running {
            self.step(host, handler);
        }
        self.finish::<H, W::Canvas>(handler);
    }

    /// Open the handler, report the initial size and start the clocks.
    pub fn start<W, H>(&mut self, host: &mut W, handler: &mut H)
    where
        W: HostWindow,
        H: Handler<W::Canvas> + ?Sized,
    {
        self.running = true;
        handler.on_open(host.canvas());
        let (width, height) = host.display_size();
        handler.on_resize(width, height);

        let now = self.clock.now();
        self.last_update = now;
        self.last_second = now;
        self.stats = LoopStats::default();
        info!(
            ticks_per_second = self.ticks_per_second,
            frame_length = self.frame_length,
            "scheduler started"
        );
    }

    /// One loop iteration: drain events, heartbeat, catch up on ticks, then
    /// render or sleep.
    pub fn step<W, H>(&mut self, host: &mut W, handler: &mut H) -> Iteration
    where
        W: HostWindow,
        H: Handler<W::Canvas> + ?Sized,
    {
        let mut forced = Dispatched::default();
        while let Some(event) = host.poll_event() {
            forced.merge(dispatch::<W::Canvas, H>(handler, event));
        }
        if forced.quit || handler.exit_requested() {
            self.running = false;
        }

        let now = self.clock.now();
        if now < self.last_update || now < self.last_second {
            warn!(
                now,
                last_update = self.last_update,
                "clock went backwards; rebasing loop timestamps"
            );
            self.last_update = now;
            self.last_second = now;
        }

        if now - self.last_second >= self.clock.frequency() {
            self.stats.seconds += 1;
            handler.on_second(&self.stats);
            debug!(
                ticks = self.stats.ticks_this_second,
                frames = self.stats.frames_this_second,
                sleeps = self.stats.sleeps_this_second,
                "loop second"
            );
            self.stats.reset_second();
            self.last_second = now;
        }

        let mut ticks = 0u32;
        while now - self.last_update >= self.frame_length {
            handler.on_update();
            self.last_update += self.frame_length;
            ticks += 1;
        }
        if ticks > self.stats.peak_ticks {
            debug!(
                "new peak tick count: {} -> {}",
                self.stats.peak_ticks, ticks
            );
            self.stats.peak_ticks = ticks;
        }
        self.stats.record_ticks(ticks);

        let prepared = ticks > 0 || forced.force_prepare;
        let rendered = ticks > 0 || forced.force_render;
        if prepared {
            handler.on_prepare_render();
        }
        if rendered {
            handler.on_render(host.canvas());
            host.present();
            self.stats.record_frame();
        }

        let slept = !prepared && !rendered;
        if slept {
            self.stats.record_sleep();
            self.clock.sleep(self.idle_sleep);
        }

        Iteration {
            ticks,
            prepared,
            rendered,
            slept,
        }
    }

    /// Close the handler. Called once after the last iteration.
    pub fn finish<H, K>(&mut self, handler: &mut H)
    where
        H: Handler<K> + ?Sized,
    {
        self.running = false;
        handler.on_close();
        info!(
            total_ticks = self.stats.total_ticks,
            total_frames = self.stats.total_frames,
            "scheduler stopped"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::host::HeadlessHost;
    use tileworld_input::{HostEvent, WindowEvent};

    const FREQ: u64 = 1_000_000_000;

    #[derive(Default)]
    struct Counter {
        opened: u32,
        closed: u32,
        updates: u64,
        prepares: u64,
        renders: u64,
        seconds: Vec<LoopStats>,
        quits: u32,
        resizes: Vec<(u32, u32)>,
        exit_after: Option<u64>,
    }

    impl Handler<String> for Counter {
        fn on_open(&mut self, canvas: &mut String) {
            self.opened += 1;
            canvas.push_str("open");
        }
        fn on_close(&mut self) {
            self.closed += 1;
        }
        fn on_update(&mut self) {
            self.updates += 1;
        }
        fn on_prepare_render(&mut self) {
            self.prepares += 1;
        }
        fn on_render(&mut self, canvas: &mut String) {
            self.renders += 1;
            *canvas = format!("frame {}", self.renders);
        }
        fn on_second(&mut self, stats: &LoopStats) {
            self.seconds.push(stats.clone());
        }
        fn on_quit(&mut self) {
            self.quits += 1;
        }
        fn on_resize(&mut self, width: u32, height: u32) {
            self.resizes.push((width, height));
        }
        fn exit_requested(&self) -> bool {
            self.exit_after.is_some_and(|n| self.updates >= n)
        }
    }

    fn setup(tps: u32) -> (ManualClock, HeadlessHost<String>, Scheduler<ManualClock>, Counter) {
        let clock = ManualClock::new(FREQ);
        let host = HeadlessHost::new(clock.clone(), 1024, 768, String::new());
        let scheduler = Scheduler::new(clock.clone(), tps).unwrap();
        (clock, host, scheduler, Counter::default())
    }

    #[test]
    fn frame_length_is_frequency_over_rate() {
        let (_, _, scheduler, _) = setup(60);
        assert_eq!(scheduler.frame_length(), FREQ / 60);
    }

    #[test]
    fn zero_rate_is_rejected() {
        assert_eq!(
            Scheduler::new(ManualClock::new(FREQ), 0).err(),
            Some(SchedulerError::ZeroTickRate)
        );
    }

    #[test]
    fn rate_faster_than_clock_is_rejected() {
        assert_eq!(
            Scheduler::new(ManualClock::new(30), 60).err(),
            Some(SchedulerError::TickRateTooHigh {
                ticks_per_second: 60,
                frequency: 30
            })
        );
    }

    #[test]
    fn start_opens_and_reports_size() {
        let (_, mut host, mut scheduler, mut handler) = setup(60);
        scheduler.start(&mut host, &mut handler);
        assert!(scheduler.is_running());
        assert_eq!(handler.opened, 1);
        assert_eq!(handler.resizes, [(1024, 768)]);
        assert_eq!(host.canvas_ref(), "open");
    }

    #[test]
    fn three_frames_catch_up_with_one_render() {
        let (clock, mut host, mut scheduler, mut handler) = setup(60);
        scheduler.start(&mut host, &mut handler);

        clock.advance(3 * scheduler.frame_length());
        let it = scheduler.step(&mut host, &mut handler);

        assert_eq!(
            it,
            Iteration {
                ticks: 3,
                prepared: true,
                rendered: true,
                slept: false
            }
        );
        assert_eq!(handler.updates, 3);
        assert_eq!(handler.prepares, 1);
        assert_eq!(handler.renders, 1);
        assert_eq!(host.presents(), 1);
        assert_eq!(host.canvas_ref(), "frame 1");
    }

    #[test]
    fn idle_iteration_sleeps_without_rendering() {
        let (clock, mut host, mut scheduler, mut handler) = setup(60);
        scheduler.start(&mut host, &mut handler);

        clock.advance(scheduler.frame_length() - 1);
        let before = clock.now();
        let it = scheduler.step(&mut host, &mut handler);

        assert!(it.slept);
        assert_eq!(it.ticks, 0);
        assert_eq!(handler.renders, 0);
        assert_eq!(host.presents(), 0);
        assert_eq!(clock.now() - before, 1_000_000);
    }

    #[test]
    fn tick_count_depends_only_on_elapsed_time() {
        for chunk in [1_000_003u64, 7_777_777, 16_666_666, 50_000_000] {
            let (clock, mut host, mut scheduler, mut handler) = setup(60);
            scheduler.start(&mut host, &mut handler);
            let total = 2 * FREQ;
            let mut elapsed = 0;
            while elapsed < total {
                let step = chunk.min(total - elapsed);
                clock.advance(step);
                elapsed += step;
                scheduler.step(&mut host, &mut handler);
                // Undo idle sleeps so only the scripted advance counts.
                clock.set(elapsed);
            }
            assert_eq!(handler.updates, total / scheduler.frame_length(), "chunk {chunk}");
        }
    }

    #[test]
    fn quit_event_stops_after_iteration_completes() {
        let (clock, mut host, mut scheduler, mut handler) = setup(60);
        scheduler.start(&mut host, &mut handler);
        host.push(HostEvent::Quit);
        clock.advance(scheduler.frame_length());

        let it = scheduler.step(&mut host, &mut handler);
        assert!(!scheduler.is_running());
        assert_eq!(handler.quits, 1);
        // The tick that was due still ran.
        assert_eq!(it.ticks, 1);
        assert!(it.rendered);
    }

    #[test]
    fn run_exits_on_request_and_closes_once() {
        let (_, mut host, mut scheduler, mut handler) = setup(60);
        handler.exit_after = Some(120);
        scheduler.run(&mut host, &mut handler);

        assert!(!scheduler.is_running());
        assert_eq!(handler.updates, 120);
        assert_eq!(handler.closed, 1);
        assert_eq!(scheduler.stats().total_ticks, 120);
        assert!(!handler.seconds.is_empty());
    }

    #[test]
    fn expose_forces_render_without_tick() {
        let (_, mut host, mut scheduler, mut handler) = setup(60);
        scheduler.start(&mut host, &mut handler);
        host.push(HostEvent::Window(WindowEvent::Exposed));

        let it = scheduler.step(&mut host, &mut handler);
        assert_eq!(it.ticks, 0);
        assert!(!it.prepared);
        assert!(it.rendered);
        assert!(!it.slept);
        assert_eq!(host.presents(), 1);
    }

    #[test]
    fn resize_forces_prepare_and_render() {
        let (_, mut host, mut scheduler, mut handler) = setup(60);
        scheduler.start(&mut host, &mut handler);
        host.push(HostEvent::resized(800, 600));

        let it = scheduler.step(&mut host, &mut handler);
        assert!(it.prepared && it.rendered);
        assert_eq!(handler.resizes.last(), Some(&(800, 600)));
        assert_eq!(handler.prepares, 1);
    }

    #[test]
    fn heartbeat_reports_previous_second() {
        let (clock, mut host, mut scheduler, mut handler) = setup(60);
        scheduler.start(&mut host, &mut handler);

        clock.advance(FREQ / 2);
        scheduler.step(&mut host, &mut handler);
        clock.advance(FREQ / 2);
        scheduler.step(&mut host, &mut handler);

        assert_eq!(handler.seconds.len(), 1);
        // The heartbeat runs before this iteration's ticks are counted.
        assert_eq!(handler.seconds[0].ticks_this_second, 30);
        assert_eq!(handler.seconds[0].frames_this_second, 1);
        assert_eq!(scheduler.stats().ticks_this_second, 30);
    }

    #[test]
    fn clock_regression_is_tolerated() {
        let (clock, mut host, mut scheduler, mut handler) = setup(60);
        clock.set(10 * FREQ);
        scheduler.start(&mut host, &mut handler);

        clock.set(FREQ);
        let it = scheduler.step(&mut host, &mut handler);
        assert_eq!(it.ticks, 0);
        assert!(scheduler.is_running());

        // Timing resumes from the rebased timestamp.
        clock.set(FREQ + 2 * scheduler.frame_length());
        let it = scheduler.step(&mut host, &mut handler);
        assert_eq!(it.ticks, 2);
    }

    #[test]
    fn peak_tick_count_is_tracked() {
        let (clock, mut host, mut scheduler, mut handler) = setup(60);
        scheduler.start(&mut host, &mut handler);
        clock.advance(5 * scheduler.frame_length());
        scheduler.step(&mut host, &mut handler);
        clock.advance(2 * scheduler.frame_length());
        scheduler.step(&mut host, &mut handler);
        assert_eq!(scheduler.stats().peak_ticks, 5);
    }
}
