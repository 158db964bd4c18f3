use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::Monkey;

use super::theme::{tag_color, Palette};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// First grid row to draw so that `selected_row` stays on screen when only
/// `capacity` rows fit.
pub(crate) fn first_visible_row(selected_row: usize, total_rows: usize, capacity: usize) -> usize {
    let capacity = capacity.max(1);
    if total_rows <= capacity {
        return 0;
    }
    let start = (selected_row + 1).saturating_sub(capacity);
    start.min(total_rows - capacity)
}

/// Text body of a record card. Optional attributes only appear when set.
pub(crate) fn build_card_lines(
    monkey: &Monkey,
    palette: &Palette,
    selected: bool,
) -> Vec<Line<'static>> {
    let name_style = if selected {
        Style::default()
            .fg(palette.selection)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD)
    };
    let pointer = if selected { "▶ " } else { "" };

    let mut title = vec![Span::styled(format!("{pointer}{}", monkey.name), name_style)];
    if monkey.is_endangered {
        title.push(Span::styled(" ♥", Style::default().fg(palette.danger)));
    }

    // Badge stays on the tag line; only trailing detail lines can be clipped.
    let mut tag = vec![Span::styled(
        monkey.species.label(),
        Style::default()
            .fg(tag_color(monkey.species.color()))
            .add_modifier(Modifier::BOLD),
    )];
    if monkey.is_endangered {
        tag.push(Span::styled(
            "  ⚠ Endangered",
            Style::default().fg(palette.danger),
        ));
    }

    let mut lines = vec![Line::from(title), Line::from(tag)];

    let label_style = Style::default()
        .fg(palette.muted)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(palette.muted);
    let mut detail = |label: &str, value: String| {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), label_style),
            Span::styled(value, value_style),
        ]));
    };

    if let Some(age) = monkey.age {
        detail("Age", format!("{age} years"));
    }
    if let Some(habitat) = &monkey.habitat {
        detail("Habitat", habitat.clone());
    }
    if let Some(food) = &monkey.favorite_food {
        detail("Favorite Food", food.clone());
    }
    if let Some(diet) = &monkey.diet {
        detail("Diet", diet.clone());
    }

    if let Some(fact) = &monkey.fun_fact {
        lines.push(Line::from(Span::styled(
            format!("💡 {fact}"),
            Style::default()
                .fg(palette.fun_fact)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonkeyFields, MonkeyId, Species};
    use crate::ui::ThemeKind;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(first_visible_row(0, 2, 3), 0);
        assert_eq!(first_visible_row(4, 10, 3), 2);
        assert_eq!(first_visible_row(9, 10, 3), 7);
        assert_eq!(first_visible_row(1, 10, 0), 1);
    }

    #[test]
    fn card_lists_only_present_attributes() {
        let palette = ThemeKind::Light.palette();
        let bare = Monkey::from_fields(
            MonkeyId(1),
            MonkeyFields::new("Charlie", Species::Chimpanzee),
        );
        let lines: Vec<_> = build_card_lines(&bare, &palette, false)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(lines, ["Charlie", "Chimpanzee"]);

        let mut fields = MonkeyFields::new("Koko", Species::Gorilla);
        fields.age = Some(46);
        fields.favorite_food = Some("Kittens".to_string());
        fields.is_endangered = true;
        let full = Monkey::from_fields(MonkeyId(2), fields);
        let lines: Vec<_> = build_card_lines(&full, &palette, true)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(
            lines,
            [
                "▶ Koko ♥",
                "Gorilla  ⚠ Endangered",
                "Age: 46 years",
                "Favorite Food: Kittens",
            ]
        );
    }

    #[test]
    fn zero_age_is_still_shown() {
        let palette = ThemeKind::Dark.palette();
        let mut fields = MonkeyFields::new("Pip", Species::Marmoset);
        fields.age = Some(0);
        let newborn = Monkey::from_fields(MonkeyId(3), fields);
        let lines: Vec<_> = build_card_lines(&newborn, &palette, false)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(lines, ["Pip", "Marmoset", "Age: 0 years"]);
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = anyhow::anyhow!("disk full").context("failed to insert monkey");
        assert_eq!(surface_error(&err), "disk full");
    }
}
