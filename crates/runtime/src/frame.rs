/// Index of one animation tick.
///
/// Engine physics is per-frame rather than per-second, so the index alone
/// orders event records and metrics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
}

impl Frame {
    pub fn first() -> Self {
        Self { index: 0 }
    }

    pub fn next(self) -> Self {
        Self {
            index: self.index + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn frames_count_up_from_zero() {
        let f = Frame::first().next().next();
        assert_eq!(f.index, 2);
        assert!(Frame::first() < f);
        assert_eq!(Frame::default(), Frame::first());
    }
}
