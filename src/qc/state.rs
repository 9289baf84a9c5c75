use crate::sequence_processor::Read;
use std::collections::BTreeMap;

/// Phred score at or above which a base counts toward Q20.
pub const Q20: u8 = 20;
/// Phred score at or above which a base counts toward Q30.
pub const Q30: u8 = 30;

/// Running sum and count of quality scores seen at one read position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualitySum {
    pub sum: u64,
    pub count: u64,
}

impl QualitySum {
    fn add(&mut self, quality: u8) {
        self.sum += quality as u64;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        ratio(self.sum as f64, self.count)
    }
}

/// A/C/G/T counts at one read position. Other symbols are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCounts {
    pub a: u64,
    pub c: u64,
    pub g: u64,
    pub t: u64,
}

impl BaseCounts {
    fn add(&mut self, base: u8) {
        match base.to_ascii_uppercase() {
            b'A' => self.a += 1,
            b'C' => self.c += 1,
            b'G' => self.g += 1,
            b'T' => self.t += 1,
            _ => {}
        }
    }

    pub fn observed(&self) -> u64 {
        self.a + self.c + self.g + self.t
    }
}

/// Sum and count of per-read mean qualities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanOfMeans {
    pub sum: f64,
    pub count: u64,
}

impl MeanOfMeans {
    fn add(&mut self, mean: f64) {
        self.sum += mean;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        ratio(self.sum, self.count)
    }
}

/// Everything the aggregator keeps between records.
///
/// Memory grows with the number of distinct read lengths and with the longest
/// read, never with the number of records. Positions are contiguous from 0
/// (every read reaching position `p` also covers all lower positions), so the
/// per-position tables are vectors indexed by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccumulatorState {
    pub total_sequences: u64,
    pub total_length: u64,
    pub gc_count: u64,
    pub total_bases: u64,
    pub length_counts: BTreeMap<usize, u64>,
    pub position_quality: Vec<QualitySum>,
    pub position_composition: Vec<BaseCounts>,
    pub per_read_quality_means: MeanOfMeans,
    pub min_quality: Option<u8>,
    pub max_quality: Option<u8>,
    pub q20_bases: u64,
    pub q30_bases: u64,
    pub skipped_records: u64,
}

impl AccumulatorState {
    /// Folds one well-formed read into the running totals.
    pub(crate) fn observe(&mut self, read: &Read) {
        let len = read.sequence.len();
        debug_assert_eq!(len, read.quality.len());

        self.total_sequences += 1;
        self.total_length += len as u64;
        self.total_bases += len as u64;
        *self.length_counts.entry(len).or_insert(0) += 1;

        if self.position_quality.len() < len {
            self.position_quality.resize(len, QualitySum::default());
            self.position_composition.resize(len, BaseCounts::default());
        }

        let mut read_quality_sum = 0u64;
        for (i, (&base, &quality)) in read.sequence.iter().zip(&read.quality).enumerate() {
            if matches!(base.to_ascii_uppercase(), b'G' | b'C') {
                self.gc_count += 1;
            }
            self.position_composition[i].add(base);
            self.position_quality[i].add(quality);

            read_quality_sum += quality as u64;
            self.min_quality = Some(self.min_quality.map_or(quality, |q| q.min(quality)));
            self.max_quality = Some(self.max_quality.map_or(quality, |q| q.max(quality)));
            if quality >= Q20 {
                self.q20_bases += 1;
            }
            if quality >= Q30 {
                self.q30_bases += 1;
            }
        }

        // An empty read has no mean quality of its own.
        if len > 0 {
            self.per_read_quality_means.add(read_quality_sum as f64 / len as f64);
        }
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub(crate) fn ratio(numerator: f64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

/// `part` as a percentage of `whole`, or 0 when `whole` is 0.
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    ratio(part as f64 * 100.0, whole)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_counts_ignore_other_symbols() {
        let mut counts = BaseCounts::default();
        for &b in b"ACGTNacgt-" {
            counts.add(b);
        }
        assert_eq!(counts, BaseCounts { a: 2, c: 2, g: 2, t: 2 });
        assert_eq!(counts.observed(), 8);
    }

    #[test]
    fn test_observe_tracks_quality_extremes() {
        let mut state = AccumulatorState::default();
        state.observe(&Read::new("ACG", vec![12, 35, 20]));
        state.observe(&Read::new("T", vec![2]));

        assert_eq!(state.min_quality, Some(2));
        assert_eq!(state.max_quality, Some(35));
        assert_eq!(state.q20_bases, 2);
        assert_eq!(state.q30_bases, 1);
        assert_eq!(state.position_quality[0], QualitySum { sum: 14, count: 2 });
        assert_eq!(state.position_quality[2], QualitySum { sum: 20, count: 1 });
    }

    #[test]
    fn test_zero_denominators() {
        assert_eq!(ratio(5.0, 0), 0.0);
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(QualitySum::default().mean(), 0.0);
        assert_eq!(MeanOfMeans::default().mean(), 0.0);
    }
}
