//! Start -> end state mappings accepted by [`Registry::declare`](super::Registry::declare).

use crate::core::{State, ANY_STATE};

/// Ordered list of `(start states, end state)` pairs.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::Mapping;
/// use statecraft::core::{State, ANY_STATE};
///
/// let mapping = Mapping::new()
///     .pair(["draft", "pending"], "paid")
///     .from_any("cancelled");
///
/// let pairs = mapping.pairs();
/// assert_eq!(pairs[0].0, vec![State::new("draft"), State::new("pending")]);
/// assert_eq!(pairs[1], (vec![ANY_STATE], State::new("cancelled")));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    pairs: Vec<(Vec<State>, State)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Mapping with a single start -> end pair.
    pub fn single(start: impl Into<State>, end: impl Into<State>) -> Self {
        Self::new().pair([start.into()], end)
    }

    /// Add a pair whose start is any of `starts`.
    pub fn pair<I, S>(mut self, starts: I, end: impl Into<State>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.pairs
            .push((starts.into_iter().map(Into::into).collect(), end.into()));
        self
    }

    /// Add a pair starting from the wildcard state.
    pub fn from_any(self, end: impl Into<State>) -> Self {
        self.pair([ANY_STATE], end)
    }

    pub fn pairs(&self) -> &[(Vec<State>, State)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<S: Into<State>, E: Into<State>> From<(S, E)> for Mapping {
    fn from((start, end): (S, E)) -> Self {
        Mapping::single(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_keep_declaration_order() {
        let mapping = Mapping::new().pair(["a"], "b").pair(["c"], "d");
        assert_eq!(
            mapping.pairs(),
            [
                (vec![State::new("a")], State::new("b")),
                (vec![State::new("c")], State::new("d")),
            ]
        );
    }

    #[test]
    fn tuple_converts_to_single_pair() {
        let mapping: Mapping = ("a", "b").into();
        assert_eq!(mapping, Mapping::single("a", "b"));
    }

    #[test]
    fn mapping_macro_expands_start_lists_and_wildcard() {
        let mapping = crate::mapping! { [a, c] => b, d => e, * => z };

        assert_eq!(
            mapping.pairs(),
            [
                (vec![State::new("a"), State::new("c")], State::new("b")),
                (vec![State::new("d")], State::new("e")),
                (vec![ANY_STATE], State::new("z")),
            ]
        );
    }
}
