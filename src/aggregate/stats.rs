use serde::Serialize;

/// Anything that carries an optional download weight. Absent weights count
/// as members but contribute nothing to sums.
pub trait Weighted {
    fn weight(&self) -> Option<f64>;
}

/// Canonical weight reading: absent is 0, negative is clamped to 0.
pub fn weight_or_zero(weight: Option<f64>) -> f64 {
    weight.unwrap_or(0.0).max(0.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_plugins: usize,
    pub total_downloads: f64,
    /// `None` when the item set is empty; never NaN.
    pub avg_downloads: Option<f64>,
}

impl Stats {
    pub fn compute<T: Weighted>(items: &[T]) -> Self {
        let total_plugins = items.len();
        // Stable left-to-right fold so repeated runs sum in the same order.
        let total_downloads = items
            .iter()
            .fold(0.0, |acc, item| acc + weight_or_zero(item.weight()));
        let avg_downloads = if total_plugins > 0 {
            Some(total_downloads / total_plugins as f64)
        } else {
            None
        };

        Self {
            total_plugins,
            total_downloads,
            avg_downloads,
        }
    }
}
