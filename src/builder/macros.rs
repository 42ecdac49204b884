//! Macros for ergonomic transition declaration.

/// Build a [`Mapping`](crate::builder::Mapping) from `start => end` pairs.
///
/// A start may be a single state, a bracketed list of states, or `*` for
/// the wildcard.
///
/// # Example
///
/// ```
/// use statecraft::mapping;
/// use statecraft::core::State;
///
/// let mapping = mapping! {
///     [draft, pending] => paid,
///     paid => shipped,
///     * => cancelled,
/// };
///
/// assert_eq!(mapping.pairs().len(), 3);
/// assert_eq!(mapping.pairs()[1].1, State::new("shipped"));
/// ```
#[macro_export]
macro_rules! mapping {
    ( $( $start:tt => $end:ident ),* $(,)? ) => {
        $crate::builder::Mapping::new()
            $( .pair($crate::__mapping_starts!($start), $crate::core::State::new(stringify!($end))) )*
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __mapping_starts {
    (*) => {
        [$crate::core::ANY_STATE]
    };
    ([ $( $start:ident ),* $(,)? ]) => {
        [ $( $crate::core::State::new(stringify!($start)) ),* ]
    };
    ($start:ident) => {
        [$crate::core::State::new(stringify!($start))]
    };
}
