use chrono::NaiveDateTime;

/// Linear mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}

/// Linear mapping from a date domain onto a pixel range, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((millis(domain.0), millis(domain.1)), range),
        }
    }

    pub fn map(&self, date: NaiveDateTime) -> f64 {
        self.inner.map(millis(date))
    }
}

fn millis(date: NaiveDateTime) -> f64 {
    date.and_utc().timestamp_millis() as f64
}

/// Ordinal scale splitting a range into evenly spaced, rounded bands.
///
/// `padding` is the fraction of each step left empty between bands; the
/// same amount is kept at both outer edges.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    starts: Vec<f64>,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let (start, stop) = if range.1 < range.0 {
            (range.1, range.0)
        } else {
            range
        };
        let n = domain.len() as f64;
        let denom = n - padding + 2.0 * padding;
        let step = if domain.is_empty() || denom <= 0.0 {
            0.0
        } else {
            ((stop - start) / denom).floor()
        };
        let first = start + ((stop - start - (n - padding) * step) / 2.0).round();
        let starts = (0..domain.len()).map(|i| first + step * i as f64).collect();
        Self {
            domain,
            starts,
            bandwidth: (step * (1.0 - padding)).round(),
        }
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|entry| entry == key)
            .map(|idx| self.starts[idx])
    }

    /// Vertical center of the band for `key`.
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|start| start + self.bandwidth / 2.0)
    }
}
