use rust_decimal::Decimal;

/// Maps `[0, domain_max]` onto `[range.0, range.1]` through a square root, so
/// that a circle's area rather than its radius grows linearly with the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain_max: f64,
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain_max: f64, range: (f64, f64)) -> Self {
        Self { domain_max, range }
    }

    /// A degenerate domain (zero, negative or not finite) maps everything to
    /// the start of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let (lo, hi) = self.range;
        if !(self.domain_max.is_finite() && self.domain_max > 0.0) {
            return lo;
        }
        lo + (hi - lo) * (value.max(0.0) / self.domain_max).sqrt()
    }
}

/// Step function over `N` ascending boundaries. Anything below the first
/// boundary maps to `below`; from boundary `i` up to the next one, the output
/// is `outputs[i]`. A value equal to a boundary falls in the bucket above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdScale<T, const N: usize> {
    thresholds: [Decimal; N],
    below: T,
    outputs: [T; N],
}

impl<T: Copy, const N: usize> ThresholdScale<T, N> {
    pub fn new(thresholds: [Decimal; N], below: T, outputs: [T; N]) -> Self {
        Self {
            thresholds,
            below,
            outputs,
        }
    }

    /// Number of boundaries at or below `value`.
    pub fn bucket(&self, value: Decimal) -> usize {
        self.thresholds.partition_point(|&t| t <= value)
    }

    pub fn scale(&self, value: Decimal) -> T {
        match self.bucket(value) {
            0 => self.below,
            n => self.outputs[n - 1],
        }
    }
}
