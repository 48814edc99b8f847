//! Lexicographic k-combination enumeration over indices `0..n`.

/// Number of ways to choose `k` items from `n`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Iterator over all `K`-element index subsets of `0..n`, in lexicographic order.
///
/// ```
/// use holdem_equity::cards::Combinations;
///
/// let combos: Vec<[usize; 2]> = Combinations::new(3).collect();
/// assert_eq!(combos, vec![[0, 1], [0, 2], [1, 2]]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations<const K: usize> {
    n: usize,
    indices: [usize; K],
    done: bool,
}

impl<const K: usize> Combinations<K> {
    /// Create a generator of `K`-subsets of `0..n`.
    pub fn new(n: usize) -> Self {
        let mut indices = [0; K];
        for (i, idx) in indices.iter_mut().enumerate() {
            *idx = i;
        }
        Self {
            n,
            indices,
            done: K > n,
        }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices;

        // Advance the rightmost index that still has room to move.
        match (0..K).rev().find(|&i| self.indices[i] < self.n - K + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(current)
    }
}
