//! Trend windowing for the analytics charts.
//!
//! Input history arrives most-recent-first from the store; charts render
//! oldest-first. A day with no record is simply absent from the series,
//! never synthesized as zero.

use vitalog_client::DailyRecord;

/// Window size used by the analytics screen.
pub const TREND_WINDOW_DAYS: usize = 7;

/// The `n` most recent records, reordered oldest-first. Fewer than `n`
/// records returns all of them; no padding.
pub fn recent_window(history: &[DailyRecord], n: usize) -> Vec<DailyRecord> {
    let mut window: Vec<DailyRecord> = history.iter().take(n).cloned().collect();
    window.reverse();
    window
}

/// (date, milliliters) pairs in window order.
pub fn water_series(window: &[DailyRecord]) -> Vec<(String, u32)> {
    window.iter().map(|r| (r.date.clone(), r.water)).collect()
}

/// (date, step count) pairs in window order.
pub fn steps_series(window: &[DailyRecord]) -> Vec<(String, u32)> {
    window.iter().map(|r| (r.date.clone(), r.steps)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::record::empty_record;

    fn descending_history(days: u32) -> Vec<DailyRecord> {
        (0..days)
            .map(|i| {
                let mut record = empty_record(&format!("2025-11-{:02}", 30 - i));
                record.water = 1000 + i;
                record
            })
            .collect()
    }

    #[test]
    fn window_takes_most_recent_and_reorders_ascending() {
        let window = recent_window(&descending_history(10), 7);
        assert_eq!(window.len(), 7);
        assert_eq!(window.first().map(|r| r.date.as_str()), Some("2025-11-24"));
        assert_eq!(window.last().map(|r| r.date.as_str()), Some("2025-11-30"));
        assert!(window.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn short_history_returns_everything_without_padding() {
        let window = recent_window(&descending_history(3), 7);
        assert_eq!(window.len(), 3);
        assert_eq!(window.first().map(|r| r.date.as_str()), Some("2025-11-28"));
    }

    #[test]
    fn empty_history_is_an_empty_window() {
        assert!(recent_window(&[], 7).is_empty());
    }

    #[test]
    fn series_parallel_the_window() {
        let window = recent_window(&descending_history(2), 7);
        let water = water_series(&window);
        let steps = steps_series(&window);
        assert_eq!(water.len(), 2);
        assert_eq!(water[0].0, steps[0].0);
        assert_eq!(water[1].1, 1000);
    }
}
