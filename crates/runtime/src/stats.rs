use std::fmt;

/// Loop counters: per-second values reset on every heartbeat, totals never.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks_this_second: u64,
    pub frames_this_second: u64,
    pub sleeps_this_second: u64,
    pub total_ticks: u64,
    pub total_frames: u64,
    /// Most ticks run by a single loop iteration.
    pub peak_ticks: u32,
    /// Heartbeats seen so far.
    pub seconds: u64,
}

impl LoopStats {
    pub(crate) fn record_ticks(&mut self, ticks: u32) {
        self.ticks_this_second += u64::from(ticks);
        self.total_ticks += u64::from(ticks);
    }

    pub(crate) fn record_frame(&mut self) {
        self.frames_this_second += 1;
        self.total_frames += 1;
    }

    pub(crate) fn record_sleep(&mut self) {
        self.sleeps_this_second += 1;
    }

    pub(crate) fn reset_second(&mut self) {
        self.ticks_this_second = 0;
        self.frames_this_second = 0;
        self.sleeps_this_second = 0;
    }
}

impl fmt::Display for LoopStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks={} frames={} sleeps={} peak={} total_ticks={}",
            self.ticks_this_second,
            self.frames_this_second,
            self.sleeps_this_second,
            self.peak_ticks,
            self.total_ticks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_totals() {
        let mut stats = LoopStats::default();
        stats.record_ticks(3);
        stats.record_frame();
        stats.record_sleep();
        stats.reset_second();
        assert_eq!(stats.ticks_this_second, 0);
        assert_eq!(stats.frames_this_second, 0);
        assert_eq!(stats.sleeps_this_second, 0);
        assert_eq!(stats.total_ticks, 3);
        assert_eq!(stats.total_frames, 1);
    }

    #[test]
    fn display_lists_counters() {
        let mut stats = LoopStats::default();
        stats.record_ticks(60);
        assert!(stats.to_string().starts_with("ticks=60 frames=0"));
    }
}
