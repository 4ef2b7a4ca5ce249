use crate::app::report::Style;
use crate::domain::model::MonthlyLuck;

pub const SCORE_MAX: u32 = 100;
/// Neutral reference score drawn on every chart.
pub const REFERENCE_SCORE: u32 = 50;
const BAR_WIDTH: usize = 40;

/// Points in time order. Stable, so duplicate months keep their relative order.
pub fn chart_points(series: &[MonthlyLuck]) -> Vec<&MonthlyLuck> {
    let mut points: Vec<&MonthlyLuck> = series.iter().collect();
    points.sort_by_key(|p| p.month);
    points
}

fn column_for(score: u32) -> usize {
    let score = score.min(SCORE_MAX) as usize;
    (score * BAR_WIDTH + SCORE_MAX as usize / 2) / SCORE_MAX as usize
}

fn bar(score: u32) -> String {
    let filled = column_for(score);
    let reference = column_for(REFERENCE_SCORE);
    (0..BAR_WIDTH)
        .map(|i| {
            if i == reference {
                if i < filled {
                    '▓'
                } else {
                    '┊'
                }
            } else if i < filled {
                '█'
            } else {
                ' '
            }
        })
        .collect()
}

/// Horizontal score-vs-month chart over 0..=100 with the reference line at 50.
pub fn render_chart(series: &[MonthlyLuck], style: &Style) -> String {
    let reference = column_for(REFERENCE_SCORE);
    let mut out = String::new();

    out.push_str(&style.strong("월별 운세 흐름 (Luck Flow)"));
    out.push('\n');

    let mut axis = vec![' '; BAR_WIDTH];
    axis[0] = '0';
    axis[reference] = '5';
    axis[reference + 1] = '0';
    out.push_str(&format!("      {}100\n", axis.iter().collect::<String>()));

    for point in chart_points(series) {
        out.push_str(&format!(
            "{:>3}월 │{}│ {:>3}  {}\n",
            point.month,
            style.accent(&bar(point.score)),
            point.score,
            point.keyword
        ));
    }
    out
}
