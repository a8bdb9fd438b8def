/// Tuning knobs deciding when compression is attempted and how hard the
/// match search works.
///
/// A strategy is pure data; the compressor clamps the match parameters to
/// their supported ranges (`match_size_good` to `17..=273`,
/// `match_size_drop` to `0..=100`, `min_comp_rate` to `0..=99`) before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    /// Inputs shorter than this are not worth compressing.
    pub min_input_size: usize,
    /// Inputs longer than this are not attempted.
    pub max_input_size: usize,
    /// Required compression rate in percent; the output must be at least
    /// this much smaller than the input.
    pub min_comp_rate: usize,
    /// Give up if no match has been found after emitting this many bytes.
    pub first_success_by: usize,
    /// Stop the history lookup once a match of this length is found.
    pub match_size_good: usize,
    /// Lower the good-match threshold by this percentage at every chain
    /// step, so long chains settle for shorter matches.
    pub match_size_drop: usize,
}

impl Strategy {
    /// Balanced preset: skip tiny inputs, require a 25% reduction, and give
    /// up after 1 KiB of output without a single match.
    pub const DEFAULT: Strategy = Strategy {
        min_input_size: 32,
        max_input_size: usize::MAX,
        min_comp_rate: 25,
        first_success_by: 1024,
        match_size_good: 128,
        match_size_drop: 10,
    };

    /// Compress anything that saves at least one byte, and never give up
    /// early. Looks harder for good matches than [`Strategy::DEFAULT`].
    pub const ALWAYS: Strategy = Strategy {
        min_input_size: 0,
        max_input_size: usize::MAX,
        min_comp_rate: 0,
        first_success_by: usize::MAX,
        match_size_good: 128,
        match_size_drop: 6,
    };
}

impl Default for Strategy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::Strategy;

    #[test]
    fn presets_differ_where_expected() {
        assert_eq!(Strategy::DEFAULT.min_input_size, 32);
        assert_eq!(Strategy::DEFAULT.min_comp_rate, 25);
        assert_eq!(Strategy::ALWAYS.min_input_size, 0);
        assert_eq!(Strategy::ALWAYS.min_comp_rate, 0);
        assert_eq!(Strategy::ALWAYS.first_success_by, usize::MAX);
        // Both presets share the good-match target; ALWAYS decays it slower.
        assert_eq!(
            Strategy::DEFAULT.match_size_good,
            Strategy::ALWAYS.match_size_good
        );
        assert!(Strategy::ALWAYS.match_size_drop < Strategy::DEFAULT.match_size_drop);
    }
}
