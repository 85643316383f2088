// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use granja_app::{AppMode, AppState, ScreenKind};
use granja_table::{
    Body, ChipView, Content, EmptyView, HeaderView, PageToken, PaginationView, RowView,
    SearchView, TableView,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs};

use crate::screen::Screens;

const LOADING_TEXT: &str = "loading…";
const CHECKBOX_WIDTH: u16 = 3;

pub(crate) fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, screens: &Screens) {
    let screen = screens.get(state.active_screen);
    let view = screen.view();
    let cursor = screen.cursor();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(if view.slim { 1 } else { 2 }),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = ScreenKind::ALL
        .iter()
        .position(|screen| *screen == state.active_screen)
        .unwrap_or(0);
    let tabs = Tabs::new(ScreenKind::ALL.iter().map(|screen| screen.label()))
        .block(Block::default().title("granja").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    if let Some(header) = &view.header {
        frame.render_widget(Paragraph::new(header_text(header, view.slim)), layout[1]);
    }
    if let Some(search) = &view.search {
        let searching = state.mode == AppMode::Search;
        frame.render_widget(Paragraph::new(search_line(search, searching)), layout[2]);
    }
    if let Some(chips) = &view.filters {
        frame.render_widget(Paragraph::new(chip_line(chips)), layout[3]);
    }

    render_body(frame, layout[4], &view, cursor);

    if let Some(pagination) = &view.pagination {
        frame.render_widget(Paragraph::new(pagination_line(pagination)), layout[5]);
    }

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[6]);
}

fn render_body(frame: &mut ratatui::Frame<'_>, area: Rect, view: &TableView, cursor: (usize, usize)) {
    let block = if view.slim {
        Block::default()
    } else {
        Block::default().borders(Borders::ALL)
    };

    match &view.body {
        Body::Loading => {
            let loading = Paragraph::new(LOADING_TEXT)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(loading, area);
        }
        Body::Empty(empty) => {
            let panel = Paragraph::new(empty_text(empty))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(panel, area);
        }
        Body::Rows(rows) => {
            let table = rows_table(view, rows, cursor).block(block);
            frame.render_widget(table, area);
        }
    }
}

fn rows_table<'a>(view: &'a TableView, rows: &'a [RowView], cursor: (usize, usize)) -> Table<'a> {
    let (cursor_row, cursor_col) = cursor;
    let selectable = view.select_all.is_some();

    let mut widths = Vec::with_capacity(view.columns.len() + 1);
    let mut header_cells = Vec::with_capacity(view.columns.len() + 1);
    if let Some(state) = view.select_all {
        widths.push(Constraint::Length(CHECKBOX_WIDTH));
        header_cells.push(Cell::from(state.glyph()));
    }
    for column in &view.columns {
        widths.push(Constraint::Min(8));
        let mut label = column.label.clone();
        if let Some(indicator) = column.indicator {
            label.push(' ');
            label.push_str(indicator);
        }
        let mut style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        if !column.sortable {
            style = style.remove_modifier(Modifier::BOLD);
        }
        header_cells.push(Cell::from(label).style(style));
    }

    let body_rows = rows.iter().map(|row| {
        let on_cursor = row.index == cursor_row;
        let row_style = class_style(row.class.as_deref());
        let mut cells = Vec::with_capacity(row.cells.len() + 1);
        if selectable {
            let glyph = if row.selected == Some(true) {
                "[x]"
            } else {
                "[ ]"
            };
            cells.push(Cell::from(glyph));
        }
        for (column_index, content) in row.cells.iter().enumerate() {
            let mut style = row_style.patch(class_style(content.class.as_deref()));
            if on_cursor {
                style = style.bg(Color::DarkGray);
            }
            if on_cursor && column_index == cursor_col {
                style = Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD);
            }
            cells.push(cell_for(content).style(style));
        }
        Row::new(cells)
    });

    Table::new(body_rows, widths)
        .header(Row::new(header_cells))
        .column_spacing(if view.slim { 0 } else { 1 })
}

fn cell_for(content: &Content) -> Cell<'static> {
    let text = Text::from(content.text.clone());
    if content.class.as_deref() == Some("numeric") || content.class.as_deref() == Some("owed") {
        Cell::from(text.alignment(Alignment::Right))
    } else {
        Cell::from(text)
    }
}

fn class_style(class: Option<&str>) -> Style {
    match class {
        Some("muted") | Some("status-archived") => Style::default().fg(Color::DarkGray),
        Some("owed") => Style::default().fg(Color::Red),
        Some("status-active") => Style::default().fg(Color::Green),
        Some("status-pending") => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    }
}

fn header_text(header: &HeaderView, slim: bool) -> Text<'static> {
    let mut title = vec![Span::styled(
        header.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(badge) = &header.badge {
        title.push(Span::styled(
            format!(" ({badge})"),
            Style::default().fg(Color::Cyan),
        ));
    }
    for (index, action) in header.actions.iter().enumerate() {
        let key = action_key(index);
        title.push(Span::styled(
            format!("  [{key}] {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(title)];
    if !slim {
        if let Some(description) = &header.description {
            lines.push(Line::styled(
                description.clone(),
                Style::default().fg(Color::Gray),
            ));
        }
    }
    Text::from(lines)
}

pub(crate) fn action_key(index: usize) -> char {
    match index {
        0 => 'x',
        1 => 'r',
        _ => ' ',
    }
}

fn search_line(search: &SearchView, searching: bool) -> Line<'static> {
    let prompt = Span::styled("/ ", Style::default().fg(Color::Cyan));
    let body = if search.value.is_empty() && !searching {
        Span::styled(
            search.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(search.value.clone())
    };
    let mut spans = vec![prompt, body];
    if searching {
        spans.push(Span::styled(
            "▏",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

fn chip_line(chips: &[ChipView]) -> Line<'static> {
    let mut spans = Vec::with_capacity(chips.len() * 2);
    for chip in chips {
        let style = if chip.active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", chip.caption), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn empty_text(empty: &EmptyView) -> Text<'static> {
    let mut lines = vec![
        Line::raw(""),
        Line::styled(empty.icon.clone(), Style::default().fg(Color::DarkGray)),
        Line::styled(
            empty.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(empty.description.clone()),
    ];
    let mut actions = Vec::new();
    if empty.clear_search {
        actions.push("[c] clear search".to_owned());
    }
    if let Some(label) = &empty.add_new {
        actions.push(format!("[n] {label}"));
    }
    if !actions.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            actions.join("   "),
            Style::default().fg(Color::Cyan),
        ));
    }
    Text::from(lines)
}

pub(crate) fn pagination_line(pagination: &PaginationView) -> Line<'static> {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "‹ prev ",
        if pagination.previous_enabled {
            enabled
        } else {
            disabled
        },
    )];
    for (position, token) in pagination.tokens.iter().enumerate() {
        let span = match token {
            PageToken::Page(page) if *page == pagination.current_page => Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            PageToken::Page(page) => Span::styled(page.to_string(), enabled),
            PageToken::Ellipsis => Span::styled("…", disabled),
        };
        if position > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(span);
    }
    spans.push(Span::styled(
        " next ›",
        if pagination.next_enabled {
            enabled
        } else {
            disabled
        },
    ));
    if let Some(info) = &pagination.info {
        spans.push(Span::styled(format!("   {info}"), disabled));
    }
    Line::from(spans)
}

pub(crate) fn status_text(state: &AppState) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    match state.mode {
        AppMode::Search => "typing searches; esc or enter to leave, ctrl-u to clear".to_owned(),
        AppMode::Nav => {
            "j/k h/l move  s sort  space select  a all  [ ] page  / search  f filter  tab screen  q quit"
                .to_owned()
        }
    }
}
