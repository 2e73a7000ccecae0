use std::collections::BTreeMap;

/// Per-frame render statistics tracked by the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stat {
    /// Points that survived projection.
    Projected,
    /// Points dropped because they were behind the camera.
    Culled,
    /// Connection segments emitted.
    Lines,
    /// Frames in which a synapse pulse was drawn.
    Pulses,
}

impl Stat {
    pub fn as_str(self) -> &'static str {
        match self {
            Stat::Projected => "projected",
            Stat::Culled => "culled",
            Stat::Lines => "lines",
            Stat::Pulses => "pulses",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Histogram {
    pub count: u64,
    pub sum: u64,
    pub last: u64,
}

impl Histogram {
    pub fn record(&mut self, value: u64) {
        self.count += 1;
        self.sum += value;
        self.last = value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// Rolling render metrics.
///
/// Sorted by `Stat` so snapshots have stable ordering for debug output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Metrics {
    frames: u64,
    stats: BTreeMap<Stat, Histogram>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Marks the end of one rendered frame.
    pub fn end_frame(&mut self) {
        self.frames += 1;
    }

    pub fn record(&mut self, stat: Stat, value: u64) {
        self.stats.entry(stat).or_default().record(value);
    }

    /// One-line summary suitable for a console log.
    pub fn summary(&self) -> String {
        let mut out = format!("frames={}", self.frames);
        for (stat, h) in &self.stats {
            out.push_str(&format!(" {}={}(avg {:.1})", stat.as_str(), h.last, h.mean()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Histogram, Metrics, Stat};

    #[test]
    fn histogram_tracks_sum_count_last() {
        let mut h = Histogram::default();
        h.record(5);
        h.record(2);
        h.record(8);
        assert_eq!(h.count, 3);
        assert_eq!(h.sum, 15);
        assert_eq!(h.last, 8);
        assert_eq!(h.mean(), 5.0);
    }

    #[test]
    fn summary_is_stably_sorted() {
        let mut m = Metrics::new();
        m.record(Stat::Lines, 40);
        m.record(Stat::Projected, 300);
        m.end_frame();
        assert_eq!(m.frames(), 1);
        assert_eq!(
            m.summary(),
            "frames=1 projected=300(avg 300.0) lines=40(avg 40.0)"
        );
    }
}
