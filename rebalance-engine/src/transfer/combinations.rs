//! Fixed-size combinations of station indices.

/// Iterator over every `k`-element combination of `items`, in
/// lexicographic order of positions.
pub(crate) struct Combinations<'a> {
    items: &'a [usize],
    positions: Vec<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    pub(crate) fn new(items: &'a [usize], k: usize) -> Self {
        Self {
            items,
            positions: (0..k).collect(),
            done: k == 0 || k > items.len(),
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.positions.iter().map(|&p| self.items[p]).collect();

        let n = self.items.len();
        let k = self.positions.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.positions[i] < n - k + i {
                self.positions[i] += 1;
                for j in (i + 1)..k {
                    self.positions[j] = self.positions[j - 1] + 1;
                }
                break;
            }
        }

        Some(current)
    }
}
