//! Run-length histogram.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Counts of maximal runs of 2 to 10 bytes, plus one bucket for longer runs.
///
/// Serializes as a map with keys `"2"` to `"10"` and `"11+"`, in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunDistribution {
    short: [u64; 9],
    long: u64,
}

impl RunDistribution {
    /// Key of the bucket for runs longer than 10 bytes.
    pub const LONG_KEY: &'static str = "11+";

    /// Count one run. Single bytes are not runs and are ignored.
    pub fn record(&mut self, length: usize) {
        match length {
            0 | 1 => {}
            2..=10 => self.short[length - 2] += 1,
            _ => self.long += 1,
        }
    }

    /// Runs of exactly `length` bytes, for lengths 2 to 10.
    pub fn count(&self, length: usize) -> u64 {
        match length {
            2..=10 => self.short[length - 2],
            _ => 0,
        }
    }

    /// Runs longer than 10 bytes.
    pub fn long_runs(&self) -> u64 {
        self.long
    }

    /// All recorded runs.
    pub fn total(&self) -> u64 {
        self.short.iter().sum::<u64>() + self.long
    }

    /// Runs of at least `threshold` bytes. The long bucket always counts.
    pub fn at_least(&self, threshold: usize) -> u64 {
        (2..=10)
            .filter(|&len| len >= threshold)
            .map(|len| self.count(len))
            .sum::<u64>()
            + self.long
    }
}

impl Serialize for RunDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.short.len() + 1))?;
        for (i, count) in self.short.iter().enumerate() {
            map.serialize_entry(&(i + 2).to_string(), count)?;
        }
        map.serialize_entry(Self::LONG_KEY, &self.long)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        let mut dist = RunDistribution::default();
        for len in [1, 2, 2, 5, 10, 11, 400] {
            dist.record(len);
        }
        assert_eq!(dist.count(2), 2);
        assert_eq!(dist.count(5), 1);
        assert_eq!(dist.count(10), 1);
        assert_eq!(dist.long_runs(), 2);
        assert_eq!(dist.total(), 6);
        assert_eq!(dist.at_least(3), 4);
        assert_eq!(dist.at_least(20), 2);
    }

    #[test]
    fn test_serialized_keys_in_order() {
        let mut dist = RunDistribution::default();
        dist.record(3);
        dist.record(12);
        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(
            json,
            r#"{"2":0,"3":1,"4":0,"5":0,"6":0,"7":0,"8":0,"9":0,"10":0,"11+":1}"#
        );
    }
}
