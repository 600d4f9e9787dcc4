//! ASCII trend graphs for stored history.

use todoinfo_persistence::TimeSeriesPoint;

/// Rows in a graph.
pub const DEFAULT_GRAPH_HEIGHT: usize = 10;

/// Columns in a graph; one column per day.
pub const DEFAULT_GRAPH_WIDTH: usize = 60;

/// Message shown instead of a graph when there are no points.
pub const NO_DATA_MESSAGE: &str = "No historical data available for graph";

const POINT: char = '█';

/// Which value of a [`TimeSeriesPoint`] is plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    MaxAge,
    TaskCount,
}

impl Series {
    fn value(self, point: &TimeSeriesPoint) -> u64 {
        match self {
            Series::MaxAge => point.max_age,
            Series::TaskCount => point.task_count as u64,
        }
    }

    fn legend(self) -> &'static str {
        match self {
            Series::MaxAge => "Max task age over time (days)",
            Series::TaskCount => "Number of tasks over time",
        }
    }
}

/// Renders time series as fixed-size block graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiGraph {
    height: usize,
    width: usize,
}

impl Default for AsciiGraph {
    fn default() -> Self {
        Self {
            height: DEFAULT_GRAPH_HEIGHT,
            width: DEFAULT_GRAPH_WIDTH,
        }
    }
}

impl AsciiGraph {
    /// Creates a graph of the default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph of the given size. Height is at least 2, width at least 1.
    pub fn with_size(height: usize, width: usize) -> Self {
        Self {
            height: height.max(2),
            width: width.max(1),
        }
    }

    /// Renders `points` as a graph with axes, date labels and a legend.
    ///
    /// Points beyond the graph width are dropped.
    pub fn render(&self, points: &[TimeSeriesPoint], series: Series) -> String {
        if points.is_empty() {
            return NO_DATA_MESSAGE.to_string();
        }

        let values: Vec<u64> = points.iter().map(|p| series.value(p)).collect();
        let min = values.iter().copied().min().unwrap_or(0);
        let mut max = values.iter().copied().max().unwrap_or(0);
        if max == min {
            max = min + 1;
        }
        let span = (max - min) as f64;
        let top = (self.height - 1) as f64;

        let mut grid = vec![vec![' '; self.width]; self.height];
        for (column, value) in values.iter().take(self.width).enumerate() {
            let normalized = (value - min) as f64 / span;
            let y = (normalized * top) as usize;
            grid[self.height - 1 - y][column] = POINT;
        }

        let label_width = max.to_string().len() + 1;
        let mut lines = Vec::with_capacity(self.height + 5);

        for (i, row) in grid.iter().enumerate() {
            let position = (self.height - 1 - i) as f64 / top;
            let label = (min as f64 + position * span).round() as u64;
            let row: String = row.iter().collect();
            lines.push(format!("{:>width$}│{}", label, row, width = label_width));
        }

        lines.push(format!(
            "{}└{}",
            " ".repeat(label_width),
            "─".repeat(self.width)
        ));
        lines.push(self.date_labels(points, label_width));
        lines.push(String::new());
        lines.push(format!("  Legend: {}", series.legend()));
        lines.push("   Each column represents a day".to_string());

        lines.join("\n")
    }

    fn date_labels(&self, points: &[TimeSeriesPoint], label_width: usize) -> String {
        let first = points[0].date.format("%b %d").to_string();
        let last = points[points.len() - 1].date.format("%b %d").to_string();
        let spacing = self.width.saturating_sub(first.len() + last.len());

        format!(
            "{}{}{}{}",
            " ".repeat(label_width + 1),
            first,
            " ".repeat(spacing),
            last
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, max_age: u64, task_count: usize) -> TimeSeriesPoint {
        TimeSeriesPoint {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            max_age,
            task_count,
        }
    }

    #[test]
    fn test_render_empty() {
        let graph = AsciiGraph::new();
        assert_eq!(graph.render(&[], Series::MaxAge), NO_DATA_MESSAGE);
    }

    #[test]
    fn test_render_two_points() {
        let graph = AsciiGraph::new();
        let output = graph.render(&[point(1, 5, 3), point(2, 10, 4)], Series::MaxAge);
        let lines: Vec<&str> = output.lines().collect();

        // 10 rows, axis, dates, blank, two legend lines.
        assert_eq!(lines.len(), 15);
        assert!(lines[0].starts_with(" 10│ █"));
        assert!(lines[1].starts_with("  9│ "));
        assert!(lines[9].starts_with("  5│█ "));
        assert_eq!(lines[0].chars().count(), 3 + 1 + DEFAULT_GRAPH_WIDTH);
        assert!(lines[10].starts_with("   └───"));
        assert!(lines[11].trim_start().starts_with("Jun 01"));
        assert!(lines[11].ends_with("Jun 02"));
        assert!(lines[13].contains("Max task age"));
    }

    #[test]
    fn test_render_flat_series() {
        let graph = AsciiGraph::with_size(4, 5);
        let output = graph.render(&[point(1, 7, 2), point(2, 7, 2)], Series::MaxAge);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], " 8│     ");
        assert_eq!(lines[3], " 7│██   ");
    }

    #[test]
    fn test_render_task_count() {
        let graph = AsciiGraph::with_size(3, 4);
        let output = graph.render(
            &[point(1, 50, 2), point(2, 40, 4), point(3, 30, 3)],
            Series::TaskCount,
        );
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], " 4│ █  ");
        assert_eq!(lines[1], " 3│  █ ");
        assert_eq!(lines[2], " 2│█   ");
        assert!(output.contains("Number of tasks"));
    }

    #[test]
    fn test_render_truncates_to_width() {
        let graph = AsciiGraph::with_size(2, 3);
        let points: Vec<_> = (1..=10).map(|d| point(d, u64::from(d), 1)).collect();
        let output = graph.render(&points, Series::MaxAge);

        for line in output.lines().take(2) {
            assert_eq!(line.chars().count(), 3 + 1 + 3);
        }
    }
}
