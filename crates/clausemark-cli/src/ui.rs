use clausemark_engine::{TermMarker, ViewState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::App;

pub fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    // Filter panel
    let control_items: Vec<ListItem> = app
        .view
        .controls()
        .iter()
        .map(|control| {
            let mark = if control.checked { "[x]" } else { "[ ]" };
            ListItem::new(Line::from(format!(
                "{mark} {}: {}",
                control.dimension, control.value
            )))
        })
        .collect();

    let controls = List::new(control_items)
        .block(Block::default().borders(Borders::ALL).title("Filters"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(controls, chunks[0], &mut app.control_state);

    // Clause panel
    let (lines, focused_line) = clause_lines(&app.view, &app.markers, app.focused_marker);
    let height = chunks[1].height.saturating_sub(2);
    if let Some(line) = focused_line {
        let line = u16::try_from(line).unwrap_or(u16::MAX);
        if line < app.scroll {
            app.scroll = line;
        } else if height > 0 && line >= app.scroll.saturating_add(height) {
            app.scroll = line.saturating_add(1) - height;
        }
    }

    let content_text = if let Some(status) = &app.status {
        vec![Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Red),
        ))]
    } else if app.view.is_empty() {
        vec![Line::from("No clauses to show")]
    } else if lines.is_empty() {
        vec![Line::from("No clauses match the selected filters")]
    } else {
        lines
    };

    let title = format!(
        "{} ({} of {} clauses)",
        app.document_path().display(),
        app.view.visibility().visible_count(),
        app.view.clauses().len()
    );
    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    f.render_widget(content, chunks[1]);

    // Tooltip and instructions
    let tooltip = match app.view.tooltip() {
        Some(tooltip) => Line::from(vec![
            Span::styled(
                format!("{}: ", tooltip.term),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(tooltip.definition.clone()),
        ]),
        None => Line::from(""),
    };
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Select | "),
        Span::raw("Enter/Space: Toggle | "),
        Span::raw("Tab/Shift-Tab: Terms | Esc: Hide definition | "),
        Span::raw("PgUp/PgDn: Scroll | r: Reload"),
    ]);

    let help = Paragraph::new(vec![tooltip, help_text])
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });

    f.render_widget(help, rows[1]);
}

/// Lines for every visible clause, with term markers styled. Also returns the
/// line holding the focused marker.
fn clause_lines<'v>(
    view: &'v ViewState,
    markers: &[TermMarker],
    focused: Option<usize>,
) -> (Vec<Line<'v>>, Option<usize>) {
    let term_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED);
    let focused_style = Style::default().bg(Color::Yellow).fg(Color::Black);

    let mut lines = Vec::new();
    let mut focused_line = None;

    for (index, clause) in view.visible_clauses() {
        lines.push(Line::from(Span::styled(
            format!("── {} · {}", clause.rule_type(), clause.applies_to()),
            Style::default().fg(Color::DarkGray),
        )));

        let clause_markers: Vec<(usize, &TermMarker)> = markers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.clause == index)
            .collect();

        let content = clause.content.as_str();
        let mut line_start = 0;
        for text in content.split('\n') {
            let visible = text.strip_suffix('\r').unwrap_or(text);
            let line_end = line_start + visible.len();
            let mut spans = Vec::new();
            let mut cursor = line_start;

            for (marker_index, marker) in &clause_markers {
                let span = marker.term.span;
                if span.end <= line_start || span.start >= line_end {
                    continue;
                }
                let start = span.start.max(line_start);
                let end = span.end.min(line_end);
                if start > cursor {
                    spans.push(Span::raw(&content[cursor..start]));
                }
                let style = if focused == Some(*marker_index) {
                    if focused_line.is_none() {
                        focused_line = Some(lines.len());
                    }
                    focused_style
                } else {
                    term_style
                };
                spans.push(Span::styled(&content[start..end], style));
                cursor = end;
            }
            if cursor < line_end {
                spans.push(Span::raw(&content[cursor..line_end]));
            }

            lines.push(Line::from(spans));
            line_start += text.len() + 1;
        }
        lines.push(Line::from(""));
    }

    (lines, focused_line)
}
