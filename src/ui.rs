use std::sync::LazyLock;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use regex::Regex;

use crate::app::{App, EditorState, View};
use crate::models::{FieldId, FieldKind, TreeItem};
use crate::render::VRF_WARNING;

const ICON_FOLDER: &str = "";
const ICON_FORM: &str = "󰈙";
const SELECTED_MARKER: &str = " ";
const UNSELECTED_MARKER: &str = "  ";
const TREE_BRANCH: &str = "├─ ";
const TREE_LAST: &str = "└─ ";
const TREE_PIPE: &str = "│  ";
const TREE_EMPTY: &str = "   ";
const FIELD_HEIGHT: u16 = 3;
const MULTILINE_HEIGHT: u16 = 10;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ANSI pattern"));

pub(crate) fn render_app(frame: &mut Frame, app: &mut App) {
    match app.view {
        View::List => render_list(frame, app),
        View::Editor => render_editor(frame, app),
    }
}

fn render_list(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let list_area = layout[0];
    let help_area = layout[1];

    let block = Block::bordered().title("Network Config Generator");
    let inner = inner_rect(list_area);
    app.tree_area = inner;

    let view_height = inner.height as usize;
    app.list_scroll = ensure_visible(
        app.list_scroll,
        app.list_state.selected().unwrap_or(0),
        app.tree_items.len(),
        view_height,
    );

    let start = app.list_scroll;
    let end = (start + view_height).min(app.tree_items.len());
    let tree_lines = build_tree_lines(&app.tree_items);
    let visible = &tree_lines[start..end];
    let selected = app.list_state.selected().unwrap_or(0);

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let marker = if start + idx == selected {
                SELECTED_MARKER
            } else {
                UNSELECTED_MARKER
            };
            ListItem::new(format!("{marker}{line}"))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("");

    let mut state = ListState::default();
    if let Some(selected) = app.list_state.selected() {
        if selected >= start && selected < end {
            state.select(Some(selected - start));
        }
    }
    frame.render_stateful_widget(list, list_area, &mut state);

    let mut help = "↑↓/j k choisir  Enter/double-clic ouvrir  q quitter".to_string();
    if let Some(message) = app
        .list_status
        .as_ref()
        .filter(|msg| msg.since.elapsed() <= app.settings.status_duration)
    {
        help.push_str("  |  ");
        help.push_str(&message.text);
    }
    let help = Paragraph::new(help).style(Style::new().fg(Color::DarkGray));
    frame.render_widget(help, help_area);
}

fn render_editor(frame: &mut Frame, app: &mut App) {
    let status_duration = app.settings.status_duration;
    let copy_ack = app.settings.copy_ack;
    let Some(editor) = app.editor.as_mut() else {
        return;
    };

    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let content_area = layout[0];
    let status_area = layout[1];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(content_area);

    render_fields(frame, editor, horizontal[0]);
    render_output(frame, editor, editor.is_copied(copy_ack), horizontal[1]);

    let mut spans = vec![
        Span::raw("Esc retour  Tab/↑↓ champ  ←→ choix  "),
        Span::styled(
            "F2 générer",
            if editor.valid {
                Style::new().fg(Color::Green)
            } else {
                Style::new().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            },
        ),
        Span::raw("  Ctrl+C copier"),
    ];
    if editor.fields().contains(&FieldId::Password) {
        spans.push(Span::raw("  F5 mot de passe"));
    }
    if let Some(message) = editor
        .status
        .as_ref()
        .filter(|msg| msg.since.elapsed() <= status_duration)
    {
        spans.push(Span::raw(format!("  |  {}", message.text)));
    }
    let status = Paragraph::new(Line::from(spans)).style(Style::new().fg(Color::DarkGray));
    frame.render_widget(status, status_area);
}

fn render_fields(frame: &mut Frame, editor: &mut EditorState, area: Rect) {
    let block = Block::bordered().title(editor.path.title());
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let fields = editor.fields();
    let heights: Vec<u16> = fields.iter().map(|id| field_height(*id)).collect();
    editor.field_scroll = scroll_for_heights(
        editor.field_scroll,
        editor.active_field,
        &heights,
        inner.height,
    );

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for (idx, id) in fields.iter().enumerate().skip(editor.field_scroll) {
        let height = heights[idx];
        if y + height > bottom {
            break;
        }
        let is_active = idx == editor.active_field;
        let error = editor.field_error(*id);
        let border_style = match (&error, is_active) {
            (Some(_), _) => Style::new().fg(Color::Red),
            (None, true) => Style::new().fg(Color::Blue),
            (None, false) => Style::new().fg(Color::DarkGray),
        };

        let mut field_block = Block::bordered()
            .title(id.label())
            .border_style(border_style);
        if let Some(error) = error {
            field_block = field_block
                .title_bottom(Line::styled(error.to_string(), Style::new().fg(Color::Red)));
        }

        let value = field_value_text(*id, editor.record.get(*id), is_active);
        let paragraph = Paragraph::new(value)
            .block(field_block)
            .wrap(Wrap { trim: false });
        let field_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height,
        };
        frame.render_widget(paragraph, field_area);
        y += height;
    }
}

fn render_output(frame: &mut Frame, editor: &EditorState, copied: bool, area: Rect) {
    let title = if copied {
        "Configuration Générée  ✓ Copié !"
    } else {
        "Configuration Générée"
    };
    let block = Block::bordered().title(title);
    let text = match editor.output.as_deref() {
        Some(output) => display_text(output),
        None => Text::styled(
            "Aucune configuration générée",
            Style::new().fg(Color::DarkGray),
        ),
    };
    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn field_height(id: FieldId) -> u16 {
    match id.kind() {
        FieldKind::MultiLine => MULTILINE_HEIGHT,
        _ => FIELD_HEIGHT,
    }
}

fn field_value_text(id: FieldId, raw: &str, is_active: bool) -> String {
    if id.kind() == FieldKind::Toggle {
        let (yes, no) = id.toggle_captions();
        let mark = |on: bool| if on { "(•)" } else { "( )" };
        return format!("{} {yes}   {} {no}", mark(raw == "true"), mark(raw == "false"));
    }
    let mut value = raw.to_string();
    if is_active {
        value.push('|');
    }
    value
}

/// Generated text for the preview pane. Escape sequences only make sense on a raw terminal.
fn display_text(output: &str) -> Text<'static> {
    let lines: Vec<Line> = output
        .split('\n')
        .map(|line| {
            let plain = strip_ansi(line);
            if line == VRF_WARNING {
                Line::styled(
                    plain,
                    Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(plain)
            }
        })
        .collect();
    Text::from(lines)
}

fn strip_ansi(line: &str) -> String {
    ANSI_RE.replace_all(line, "").into_owned()
}

fn inner_rect(area: Rect) -> Rect {
    let mut inner = area;
    if inner.width >= 2 {
        inner.x += 1;
        inner.width -= 2;
    }
    if inner.height >= 2 {
        inner.y += 1;
        inner.height -= 2;
    }
    inner
}

fn ensure_visible(current_scroll: usize, selected: usize, total: usize, view_height: usize) -> usize {
    if total == 0 || view_height == 0 {
        return 0;
    }
    let mut scroll = current_scroll.min(total.saturating_sub(1));
    if selected < scroll {
        scroll = selected;
    } else if selected >= scroll + view_height {
        scroll = selected + 1 - view_height;
    }
    scroll
}

/// Like `ensure_visible`, for rows of uneven height.
fn scroll_for_heights(current_scroll: usize, active: usize, heights: &[u16], available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let active = active.min(heights.len() - 1);
    let mut scroll = current_scroll.min(active);
    while scroll < active && heights[scroll..=active].iter().sum::<u16>() > available {
        scroll += 1;
    }
    scroll
}

fn build_tree_lines(items: &[TreeItem]) -> Vec<String> {
    let mut lines = Vec::with_capacity(items.len());
    let mut branches: Vec<bool> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        branches.truncate(item.depth);
        let is_last = is_last_sibling(items, index);
        let icon = if item.path.is_some() {
            ICON_FORM
        } else {
            ICON_FOLDER
        };

        let mut line = String::new();
        for has_next in &branches {
            line.push_str(if *has_next { TREE_PIPE } else { TREE_EMPTY });
        }
        line.push_str(if is_last { TREE_LAST } else { TREE_BRANCH });
        line.push_str(icon);
        line.push(' ');
        line.push_str(&item.label);
        lines.push(line);

        branches.push(!is_last);
    }
    lines
}

fn is_last_sibling(items: &[TreeItem], index: usize) -> bool {
    let depth = items[index].depth;
    for item in &items[index + 1..] {
        if item.depth <= depth {
            return item.depth < depth;
        }
    }
    true
}
