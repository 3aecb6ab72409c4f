use std::ops::Range;

const LABELS: [&str; 3] = ["Q1", "Q2", "Q3"];

// Fixed display palette: blue, orange, green.
const PALETTE: [(u8, u8, u8); 3] = [(0, 51, 160), (255, 111, 0), (0, 126, 51)];

/// A contiguous half-open index range over the monthly series, with its
/// display label and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub label: &'static str,
    pub color: (u8, u8, u8),
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn slice<'a>(&self, values: &'a [f64]) -> &'a [f64] {
        &values[self.start..self.end]
    }
}

/// Split a series of length `n` into three contiguous segments. The first two
/// spans are `n / 3` long; the third absorbs any remainder.
pub fn split_into_quarters(n: usize) -> [Segment; 3] {
    let q_len = n / 3;
    let mut segments = [Segment {
        start: 0,
        end: 0,
        label: LABELS[0],
        color: PALETTE[0],
    }; 3];

    for (i, segment) in segments.iter_mut().enumerate() {
        segment.start = i * q_len;
        segment.end = if i < 2 { (i + 1) * q_len } else { n };
        segment.label = LABELS[i];
        segment.color = PALETTE[i];
    }

    segments
}
