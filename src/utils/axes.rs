//! Sweep axis construction

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// `n == 0` gives an empty axis and `n == 1` gives `[start]`. Endpoints are
/// exact; interior points are `start + i * step`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + i as f64 * step })
                .collect()
        }
    }
}
