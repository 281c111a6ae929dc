//! Terminal visualization for habit statistics.
//!
//! ASCII/Unicode renderers used by the stats command and the TUI.

/// Characters for sparkline rendering, lowest to highest.
const SPARK_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Render a sparkline (compact inline chart).
#[must_use]
pub fn render_sparkline(values: &[u32]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let max = values.iter().copied().max().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                SPARK_CHARS[0]
            } else {
                let level = (f64::from(v) / f64::from(max) * 7.0) as usize;
                SPARK_CHARS[level.min(7)]
            }
        })
        .collect()
}

/// Render a horizontal bar chart, one `(label, value)` pair per line.
#[must_use]
pub fn render_bar_chart(data: &[(String, u32)], bar_width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let label_width = data.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

    let mut lines = Vec::new();
    for (label, value) in data {
        let filled = (f64::from(*value) / f64::from(max) * bar_width as f64) as usize;
        let bar = FULL_BLOCK.to_string().repeat(filled);
        let padding = " ".repeat(bar_width - filled);
        lines.push(format!(
            "{label:<label_width$} |{bar}{padding} {value}"
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_empty() {
        assert_eq!(render_sparkline(&[]), "");
    }

    #[test]
    fn test_sparkline_zero_uses_blank() {
        let line = render_sparkline(&[0, 7]);
        assert!(line.starts_with(' '));
        assert!(line.ends_with('▇'));
    }

    #[test]
    fn test_sparkline_length_matches_input() {
        let line = render_sparkline(&[1, 2, 3, 4]);
        assert_eq!(line.chars().count(), 4);
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let data = vec![("W1".to_string(), 2), ("W2".to_string(), 4)];
        let chart = render_bar_chart(&data, 10);

        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("█████ "));
        assert!(lines[1].contains("██████████"));
        assert!(lines[1].ends_with('4'));
    }

    #[test]
    fn test_bar_chart_empty() {
        assert_eq!(render_bar_chart(&[], 10), "");
    }
}
