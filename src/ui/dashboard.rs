use anyhow::Result;
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::format::{dashboard_days_label, dashboard_urgency, format_date, sanitize};
use crate::models::{Anken, DashboardData};
use crate::ui::{read_key, Page};

// Represents the state of the dashboard screen
pub struct DashboardState {
    data: DashboardData,
}

impl DashboardState {
    pub fn new(data: DashboardData) -> Self {
        Self { data }
    }

    /// Zeroed stats and empty lists, used only when the very first
    /// dashboard fetch fails. A later failure keeps the previous state.
    pub fn empty() -> Self {
        Self {
            data: DashboardData::default(),
        }
    }
}

pub enum DashboardAction {
    Goto(Page),
    Reload,
    Exit,
}

/// One list entry per project, or exactly one placeholder for an empty
/// list. Pure so the dashboard lists can be tested without a terminal.
pub fn deadline_items(list: &[Anken]) -> Vec<ListItem<'static>> {
    if list.is_empty() {
        return vec![ListItem::new(Span::styled(
            "No matching projects",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    list.iter()
        .map(|anken| {
            let urgency = dashboard_urgency(anken.days_remaining);
            ListItem::new(Spans::from(vec![
                Span::styled(
                    sanitize(&anken.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{} / {}", sanitize(&anken.client_name), sanitize(&anken.tantosha)),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw("  "),
                Span::raw(format_date(&anken.deadline)),
                Span::raw("  "),
                Span::styled(
                    dashboard_days_label(anken.days_remaining),
                    Style::default()
                        .fg(urgency.color())
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect()
}

pub fn render_dashboard<B: Backend>(frame: &mut Frame<B>, state: &DashboardState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(5),
                Constraint::Min(8),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    render_stats(frame, state, chunks[0]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[1]);

    render_deadline_list(frame, lists[0], "Overdue", &state.data.overdue_list);
    render_deadline_list(frame, lists[1], "Due This Week", &state.data.this_week_list);

    let buttons = Paragraph::new("<1> Dashboard | <2> Projects | <3> Assignees | <R> Reload | <Q> Quit")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[2]);
}

fn render_stats<B: Backend>(frame: &mut Frame<B>, state: &DashboardState, area: Rect) {
    let stats = &state.data.stats;
    let cells = [
        ("Total", stats.total, Color::White),
        ("Overdue", stats.overdue, Color::Red),
        ("This Week", stats.due_this_week, Color::Yellow),
        ("Waiting", stats.waiting, Color::Cyan),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ]
            .as_ref(),
        )
        .split(area);

    for ((title, value, color), column) in cells.iter().zip(columns.iter()) {
        let cell = Paragraph::new(vec![
            Spans::from(Span::styled(
                value.to_string(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
            Spans::from(Span::styled(*title, Style::default().fg(Color::Gray))),
        ])
        .block(Block::default().title(*title).borders(Borders::ALL));
        frame.render_widget(cell, *column);
    }
}

fn render_deadline_list<B: Backend>(frame: &mut Frame<B>, area: Rect, title: &str, list: &[Anken]) {
    let widget = List::new(deadline_items(list))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

pub fn handle_input(_state: &mut DashboardState) -> Result<Option<DashboardAction>> {
    let Some(key) = read_key()? else {
        return Ok(None);
    };

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Ok(Some(DashboardAction::Exit)),
        KeyCode::Char('r') => Ok(Some(DashboardAction::Reload)),
        KeyCode::Char('1') => Ok(Some(DashboardAction::Goto(Page::Dashboard))),
        KeyCode::Char('2') => Ok(Some(DashboardAction::Goto(Page::AnkenList))),
        KeyCode::Char('3') => Ok(Some(DashboardAction::Goto(Page::TantoshaList))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_yields_exactly_one_placeholder() {
        assert_eq!(deadline_items(&[]).len(), 1);
    }

    #[test]
    fn one_item_per_project() {
        let anken = Anken {
            id: "A1".into(),
            name: "LP".into(),
            client_name: "Foo".into(),
            tantosha: "田中".into(),
            order_date: "2024-01-05".into(),
            deadline: "2024-02-01".into(),
            days_remaining: -2,
            status: "進行中".into(),
            priority: "高".into(),
            memo: None,
        };
        assert_eq!(deadline_items(&[anken.clone(), anken]).len(), 2);
    }
}
