use crate::drivers::error::PipelineError;
/// Largest accepted median window; anything wider is a configuration mistake.
pub const MAX_FILTER_WINDOW: usize = 10_001;
/// Sliding-window median with half-sample symmetric edge reflection
/// (`d c b a | a b c d | d c b a`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MedianFilter {
    size: usize,
}
impl MedianFilter {
    pub fn new(size: usize) -> Result<Self, PipelineError> {
        if size == 0 || size > MAX_FILTER_WINDOW {
            return Err(PipelineError::InvalidFilterWindow(size));
        }
        Ok(Self { size })
    }
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        let n = input.len();
        if n == 0 {
            return Vec::new();
        }
        // Window covers i - size/2 ..= i + (size - 1 - size/2).
        let before = (self.size / 2) as isize;
        let mut window = Vec::with_capacity(self.size);
        (0..n as isize)
            .map(|i| {
                window.clear();
                window.extend(
                    (0..self.size as isize).map(|k| input[reflect(i - before + k, n)]),
                );
                window.sort_unstable_by(f64::total_cmp);
                window[self.size / 2]
            })
            .collect()
    }
}
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let folded = index.rem_euclid(period) as usize;
    if folded < len {
        folded
    } else {
        2 * len - 1 - folded
    }
}
/// Turn a column with gaps into a dense series: each gap takes the previous
/// present value, and a leading gap takes the first present value.
/// An all-missing column gives an empty series.
pub fn fill_gaps(column: &[Option<f64>]) -> Vec<f64> {
    let Some(first) = column.iter().flatten().next().copied() else {
        return Vec::new();
    };
    let mut last = first;
    column
        .iter()
        .map(|value| {
            if let Some(v) = value {
                last = *v;
            }
            last
        })
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(MedianFilter::new(0), Err(PipelineError::InvalidFilterWindow(0))));
    }
    #[test]
    fn oversized_window_is_rejected() {
        assert!(MedianFilter::new(MAX_FILTER_WINDOW).is_ok());
        assert!(matches!(
            MedianFilter::new(MAX_FILTER_WINDOW + 1),
            Err(PipelineError::InvalidFilterWindow(_))
        ));
        assert!(matches!(
            MedianFilter::new(usize::MAX),
            Err(PipelineError::InvalidFilterWindow(usize::MAX))
        ));
    }
    #[test]
    fn reflect_mirrors_including_edge_sample() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
        assert_eq!(reflect(-5, 4), 3);
        assert_eq!(reflect(9, 4), 1);
        assert_eq!(reflect(-3, 1), 0);
    }
    #[test]
    fn median_of_five_with_reflected_edges() {
        let filter = MedianFilter::new(5).unwrap();
        // Index 0 sees [2, 1, 1, 2, 3]; index 4 sees [3, 4, 5, 5, 4].
        assert_eq!(filter.apply(&[1.0, 2.0, 3.0, 4.0, 5.0]), vec![2.0, 2.0, 3.0, 4.0, 4.0]);
        let spiky = [1.0, 100.0, 1.0, 1.0, -50.0, 1.0, 1.0];
        assert_eq!(filter.apply(&spiky), vec![1.0; 7]);
    }
    #[test]
    fn removes_isolated_spike_from_ramp() {
        let filter = MedianFilter::new(3).unwrap();
        let out = filter.apply(&[0.0, 1.0, 2.0, 90.0, 4.0, 5.0]);
        assert_eq!(out, vec![0.0, 1.0, 2.0, 4.0, 5.0, 5.0]);
    }
    #[test]
    fn even_window_takes_upper_median() {
        let filter = MedianFilter::new(2).unwrap();
        // Window for index i is [i-1, i].
        assert_eq!(filter.apply(&[1.0, 3.0, 2.0]), vec![1.0, 3.0, 3.0]);
    }
    #[test]
    fn window_longer_than_series() {
        let filter = MedianFilter::new(5).unwrap();
        assert_eq!(filter.apply(&[7.0]), vec![7.0]);
        assert_eq!(filter.apply(&[1.0, 9.0]), vec![9.0, 1.0]);
        assert!(filter.apply(&[]).is_empty());
        assert_eq!(MedianFilter::new(1).unwrap().apply(&[3.0, 1.0]), vec![3.0, 1.0]);
    }
    #[test]
    fn gaps_are_forward_filled() {
        let column = [None, None, Some(2.0), None, Some(5.0), None];
        assert_eq!(fill_gaps(&column), vec![2.0, 2.0, 2.0, 2.0, 5.0, 5.0]);
        assert!(fill_gaps(&[None, None]).is_empty());
        assert!(fill_gaps(&[]).is_empty());
    }
}
