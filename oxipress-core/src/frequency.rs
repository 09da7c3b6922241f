//! Byte frequency tables.

/// Occurrence count for each of the 256 byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    total: u64,
}

impl FrequencyTable {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            total: 0,
        }
    }

    /// Count every byte of `data` in a single pass.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(data);
        table
    }

    /// Count `data` in parallel chunks and merge.
    ///
    /// Addition is order-independent, so the result equals
    /// [`FrequencyTable::from_bytes`].
    #[cfg(feature = "parallel")]
    pub fn from_bytes_parallel(data: &[u8]) -> Self {
        use rayon::prelude::*;

        const CHUNK: usize = 64 * 1024;
        if data.len() <= CHUNK {
            return Self::from_bytes(data);
        }
        data.par_chunks(CHUNK)
            .map(Self::from_bytes)
            .reduce(Self::new, |mut acc, part| {
                acc.merge(&part);
                acc
            })
    }

    /// Add the bytes of `data` to the counts.
    pub fn update(&mut self, data: &[u8]) {
        for &b in data {
            self.counts[b as usize] += 1;
        }
        self.total += data.len() as u64;
    }

    /// Add another table's counts to this one.
    pub fn merge(&mut self, other: &Self) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
        self.total += other.total;
    }

    /// Set the count of one byte value.
    pub fn set(&mut self, byte: u8, count: u64) {
        let slot = &mut self.counts[byte as usize];
        self.total = self.total - *slot + count;
        *slot = count;
    }

    /// Occurrences of `byte`.
    #[inline]
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Whether nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of byte values with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Non-zero entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(b, &c)| (b as u8, c))
    }

    /// The most frequent byte; the smallest value wins ties.
    pub fn most_common(&self) -> Option<(u8, u64)> {
        self.top(1).into_iter().next()
    }

    /// Up to `n` most frequent bytes, by descending count then ascending value.
    pub fn top(&self, n: usize) -> Vec<(u8, u64)> {
        let mut entries: Vec<(u8, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// Shannon entropy in bits per byte (0.0 to 8.0).
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.iter()
            .map(|(_, c)| {
                let p = c as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
