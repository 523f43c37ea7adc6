use serde::Serialize;

/// One histogram bar: `[start, end)` except the last bin, which also holds
/// `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        0.5 * (self.start + self.end)
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Price distribution of the selected venues.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Histogram {
    /// The prices the bins were built from, in venue order.
    pub values: Vec<f64>,
    pub bins: Vec<HistogramBin>,
}

/// Sturges' rule: `ceil(log2 n) + 1` bins for `n` samples.
pub fn sturges_bin_count(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (n as f64).log2().ceil() as usize + 1
}

impl Histogram {
    /// Bin `values` into equal-width bins spanning `[min, max]`.
    ///
    /// All-equal input gets a single unit-width bin centred on the value.
    pub fn from_values(values: Vec<f64>) -> Self {
        let n_bins = sturges_bin_count(values.len());
        if n_bins == 0 {
            return Histogram::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        if range <= 0.0 {
            let bins = vec![HistogramBin {
                start: min - 0.5,
                end: min + 0.5,
                count: values.len(),
            }];
            return Histogram { values, bins };
        }

        let width = range / n_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..n_bins)
            .map(|i| HistogramBin {
                start: min + i as f64 * width,
                end: if i + 1 == n_bins {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count: 0,
            })
            .collect();

        for &v in &values {
            let idx = (((v - min) / width) as usize).min(n_bins - 1);
            bins[idx].count += 1;
        }

        Histogram { values, bins }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sturges_counts() {
        assert_eq!(sturges_bin_count(0), 0);
        assert_eq!(sturges_bin_count(1), 1);
        assert_eq!(sturges_bin_count(2), 2);
        assert_eq!(sturges_bin_count(3), 3);
        assert_eq!(sturges_bin_count(8), 4);
        assert_eq!(sturges_bin_count(100), 8);
    }

    #[test]
    fn every_value_lands_in_exactly_one_bin() {
        let h = Histogram::from_values(vec![1000.0, 2000.0, 3000.0]);
        assert_eq!(h.bins.len(), 3);
        assert_eq!(h.bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(h.bins[0].start, 1000.0);
        assert_eq!(h.bins[2].end, 3000.0);
        // The maximum is counted in the last, right-closed bin.
        assert_eq!(h.bins[2].count, 1);
    }

    #[test]
    fn equal_values_share_one_bin() {
        let h = Histogram::from_values(vec![500.0, 500.0]);
        assert_eq!(h.bins.len(), 1);
        assert_eq!(h.bins[0].count, 2);
        assert_eq!(h.bins[0].center(), 500.0);
        assert_eq!(h.bins[0].width(), 1.0);
    }

    #[test]
    fn no_values_no_bins() {
        let h = Histogram::from_values(Vec::new());
        assert!(h.is_empty());
        assert!(h.bins.is_empty());
    }
}
