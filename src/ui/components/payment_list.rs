use crate::app::{AppState, CopySnapshot};
use crate::page::{PaymentDetail, Section};
use crate::utils::unicode::hard_wrap;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use unicode_width::UnicodeWidthStr;

const COPY_LABEL: &str = "[⧉ Copy]";
const COPIED_LABEL: &str = "[✓ Copied!]";
const COMING_SOON_TEXT: &str =
    "We're working on integrating popular mobile wallet solutions for faster and more convenient payments.";

pub fn render(f: &mut Frame, state: &AppState, snapshot: &CopySnapshot, area: Rect) {
    let available_width = area.width.saturating_sub(2) as usize;
    let (items, selected) = build_items(state, snapshot, available_width);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(state.theme.background)),
    );
    let mut list_state = ListState::default().with_selected(selected);

    f.render_stateful_widget(list, area, &mut list_state);
}

/// Build one list item per visual block and return the index of the item
/// holding the selected field.
pub fn build_items(
    state: &AppState,
    snapshot: &CopySnapshot,
    width: usize,
) -> (Vec<ListItem<'static>>, Option<usize>) {
    let theme = &state.theme;
    let selected = state.selected_field();
    let mut items: Vec<ListItem<'static>> = Vec::new();
    let mut selected_index = None;

    items.push(ListItem::new(vec![
        Line::from(Span::styled(
            state.page.title.clone(),
            Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.page.subtitle.clone(),
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
    ]));

    for (g, group) in state.page.groups.iter().enumerate() {
        items.push(ListItem::new(vec![
            Line::from(Span::styled(
                format!("{} {}", group.icon, group.title),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Line::from(""),
        ]));

        for (s, section) in group.sections.iter().enumerate() {
            items.push(ListItem::new(section_header(state, section)));

            if section.coming_soon {
                items.push(ListItem::new(wrapped(
                    COMING_SOON_TEXT,
                    "    ",
                    width,
                    Style::default().fg(theme.muted),
                )));
                items.push(ListItem::new(Line::from("")));
                continue;
            }

            for (d, detail) in section.details.iter().enumerate() {
                let is_selected = selected
                    .map(|f| f.group == g && f.section == s && f.detail == d)
                    .unwrap_or(false);
                if is_selected {
                    selected_index = Some(items.len());
                }
                items.push(ListItem::new(detail_lines(
                    state,
                    snapshot,
                    detail,
                    is_selected,
                    width,
                )));
            }

            if let Some(note) = &section.note {
                let text = format!("{} {}: {}", note.variant.icon(), note.variant.heading(), note.text);
                items.push(ListItem::new(wrapped(
                    &text,
                    "    ",
                    width,
                    Style::default().fg(theme.note(note.variant)),
                )));
            }

            items.push(ListItem::new(Line::from("")));
        }
    }

    (items, selected_index)
}

fn section_header(state: &AppState, section: &Section) -> Line<'static> {
    let theme = &state.theme;
    let mut spans = vec![Span::styled(
        format!("  {} {}", section.icon, section.title),
        Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
    )];

    if section.coming_soon {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "[COMING SOON]",
            Style::default().fg(theme.coming_soon).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(badge) = &section.badge {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{}]", badge.text),
            Style::default().fg(theme.badge(badge.variant)),
        ));
    }

    Line::from(spans)
}

fn detail_lines(
    state: &AppState,
    snapshot: &CopySnapshot,
    detail: &PaymentDetail,
    is_selected: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let theme = &state.theme;
    let marker = if is_selected { "  ▶ " } else { "    " };
    let is_copied = detail.copyable && snapshot.is_copied(&detail.value);

    let value_style = if is_selected {
        Style::default().fg(theme.cursor).add_modifier(Modifier::REVERSED)
    } else if detail.copyable {
        Style::default().fg(theme.foreground)
    } else {
        Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD)
    };

    let button = if !detail.copyable {
        None
    } else if is_copied {
        Some(Span::styled(
            COPIED_LABEL,
            Style::default().fg(theme.copied).add_modifier(Modifier::BOLD),
        ))
    } else {
        Some(Span::styled(COPY_LABEL, Style::default().fg(theme.muted)))
    };

    let button_width = button.as_ref().map(|b| b.content.width() + 2).unwrap_or(0);
    let value_width = width
        .saturating_sub(marker.width() + button_width)
        .max(8);

    let mut lines = vec![Line::from(Span::styled(
        format!("    {}", detail.label),
        Style::default().fg(theme.muted),
    ))];

    for (i, chunk) in hard_wrap(&detail.value, value_width).into_iter().enumerate() {
        let prefix = if i == 0 { marker } else { "    " };
        let mut spans = vec![Span::raw(prefix.to_string()), Span::styled(chunk, value_style)];
        if i == 0 {
            if let Some(button) = button.clone() {
                spans.push(Span::raw("  "));
                spans.push(button);
            }
        }
        lines.push(Line::from(spans));
    }

    if let Some(note) = &detail.note {
        lines.push(Line::from(Span::styled(
            format!("    {}", note),
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

fn wrapped(text: &str, indent: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    let max_width = width.saturating_sub(indent.width()).max(8);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_width = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if candidate_width > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .flat_map(|line| hard_wrap(&line, max_width))
        .map(|line| Line::from(Span::styled(format!("{indent}{line}"), style)))
        .collect()
}
