//! Baseline guide lines.

use gridline_core::BaselineGridConfig;

/// Every n-th line (counting from the first emitted line) is an accent line.
pub const ACCENT_INTERVAL: usize = 4;

/// One horizontal guide line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineLine {
    /// Position in the sequence, starting at 0
    pub index: usize,
    pub y: f64,
    /// Drawn with stronger emphasis
    pub accent: bool,
}

/// Lazy sequence of baseline positions below an exclusive extent.
///
/// The iterator is a pure function of its inputs; clone it (or call
/// [`baseline_lines`] again) to restart.
#[derive(Debug, Clone)]
pub struct BaselineLines {
    spacing: f64,
    offset: f64,
    extent: f64,
    index: usize,
}

impl BaselineLines {
    fn line_at(&self, index: usize) -> f64 {
        self.offset + index as f64 * self.spacing
    }

    fn is_valid(&self) -> bool {
        self.spacing.is_finite()
            && self.spacing > 0.0
            && self.offset.is_finite()
            && !self.extent.is_nan()
    }

    /// Lines left, counted with the same `y < extent` test as `next`.
    fn remaining(&self) -> Option<usize> {
        let estimate = ((self.extent - self.line_at(self.index)) / self.spacing).ceil();
        if estimate <= 0.0 {
            return Some(0);
        }
        if !estimate.is_finite() || estimate >= (usize::MAX / 2) as f64 {
            return None;
        }
        let mut n = estimate as usize;
        while n > 0 && self.line_at(self.index + n - 1) >= self.extent {
            n -= 1;
        }
        while self.line_at(self.index + n) < self.extent {
            n += 1;
        }
        Some(n)
    }
}

impl Iterator for BaselineLines {
    type Item = BaselineLine;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.is_valid() {
            return None;
        }
        let y = self.line_at(self.index);
        if y >= self.extent {
            return None;
        }
        let line = BaselineLine {
            index: self.index,
            y,
            accent: self.index % ACCENT_INTERVAL == 0,
        };
        self.index += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if !self.is_valid() {
            return (0, Some(0));
        }
        match self.remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

/// Lines for `config` on a frame `extent` pixels tall.
///
/// Lines start at `offset` and advance by `height` while `y < extent`. A
/// non-positive height yields no lines.
pub fn baseline_lines(config: &BaselineGridConfig, extent: f64) -> BaselineLines {
    BaselineLines {
        spacing: config.height,
        offset: config.offset,
        extent,
        index: 0,
    }
}
