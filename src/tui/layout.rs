use crate::model::Series;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

const MS_PER_DAY: f64 = 86_400_000.0;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Chart coordinates: x in days since the epoch, y the metric value.
pub fn chart_points(series: &Series) -> Vec<(f64, f64)> {
    series
        .data
        .iter()
        .map(|p| (p.timestamp as f64 / MS_PER_DAY, p.value as f64))
        .collect()
}

/// `[min, max]` x bounds and `[0, max]` y bounds over all points, widened so a
/// single point still gets a visible axis.
pub fn axis_bounds(points: &[Vec<(f64, f64)>]) -> ([f64; 2], [f64; 2]) {
    let all = points.iter().flatten();
    let (mut x_min, mut x_max, mut y_max) = (f64::MAX, f64::MIN, 0.0_f64);
    for (x, y) in all {
        x_min = x_min.min(*x);
        x_max = x_max.max(*x);
        y_max = y_max.max(*y);
    }

    if x_min > x_max {
        return ([0.0, 1.0], [0.0, 1.0]);
    }
    if x_min == x_max {
        x_min -= 1.0;
        x_max += 1.0;
    }
    let y_max = if y_max <= 0.0 { 1.0 } else { y_max * 1.1 };

    ([x_min, x_max], [0.0, y_max])
}
