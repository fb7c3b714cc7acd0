use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    pub const ALL: [Spin; 2] = [Spin::Up, Spin::Down];

    pub const fn index(self) -> usize {
        match self {
            Spin::Up => 0,
            Spin::Down => 1,
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// All `2^n` spin assignments for `n` lines, in lexicographic order.
pub fn spin_combinations(n: usize) -> Vec<Vec<Spin>> {
    let mut combinations = vec![Vec::with_capacity(n)];
    for _ in 0..n {
        combinations = combinations
            .into_iter()
            .flat_map(|prefix| {
                Spin::ALL.into_iter().map(move |spin| {
                    let mut next = prefix.clone();
                    next.push(spin);
                    next
                })
            })
            .collect();
    }
    combinations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_lines_give_four_ordered_combinations() {
        use Spin::{Down, Up};
        assert_eq!(
            spin_combinations(2),
            vec![vec![Up, Up], vec![Up, Down], vec![Down, Up], vec![Down, Down]]
        );
    }

    #[test]
    fn zero_lines_give_single_empty_combination() {
        assert_eq!(spin_combinations(0), vec![Vec::<Spin>::new()]);
        assert_eq!(spin_combinations(5).len(), 32);
    }
}
