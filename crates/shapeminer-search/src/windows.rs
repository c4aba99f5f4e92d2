/// Shapelet lengths tried by the search: `sl_max * i / n_max` for
/// `i in 1..=n_max`, using integer division.
///
/// Strictly increasing and within `1..=sl_max` whenever `1 <= n_max <= sl_max`;
/// [`crate::ShapeletConfig`] enforces that range before calling this.
#[must_use]
pub fn window_lengths(sl_max: usize, n_max: usize) -> Vec<usize> {
    (1..=n_max).map(|i| sl_max * i / n_max).collect()
}
