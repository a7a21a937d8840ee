use anyhow::Result;
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::format::{format_date, list_days_label, list_urgency, sanitize};
use crate::models::Anken;
use crate::ui::components::select_input::SelectInputState;
use crate::ui::{read_key, Page};

// Represents the state of the project table screen
pub struct AnkenListState {
    rows: Vec<Anken>,
    table_state: TableState,
    status_filter: SelectInputState,
    tantosha_filter: SelectInputState,
}

impl AnkenListState {
    pub fn new(
        rows: Vec<Anken>,
        status_filter: SelectInputState,
        tantosha_filter: SelectInputState,
    ) -> Self {
        let mut table_state = TableState::default();
        if !rows.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            rows,
            table_state,
            status_filter,
            tantosha_filter,
        }
    }

    pub fn next(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= self.rows.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.rows.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_anken(&self) -> Option<&Anken> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    pub fn selected_anken_id(&self) -> Option<String> {
        self.selected_anken().map(|a| a.id.clone())
    }

    pub fn cycle_status_filter(&mut self) {
        self.status_filter.next();
    }

    pub fn cycle_tantosha_filter(&mut self) {
        self.tantosha_filter.next();
    }

    /// Active status filter, `None` when the control sits at "all".
    pub fn status_param(&self) -> Option<String> {
        (!self.status_filter.is_unset()).then(|| self.status_filter.value().to_string())
    }

    pub fn tantosha_param(&self) -> Option<String> {
        (!self.tantosha_filter.is_unset()).then(|| self.tantosha_filter.value().to_string())
    }

    /// Hand the filter controls to the next incarnation of this screen so
    /// selections survive a reload.
    pub fn into_filters(self) -> (SelectInputState, SelectInputState) {
        (self.status_filter, self.tantosha_filter)
    }
}

pub enum AnkenListAction {
    Goto(Page),
    NewAnken,
    EditAnken(String), // Contains the anken id
    Reload,
    Exit,
}

fn status_color(status: &str) -> Color {
    match status {
        "未着手" => Color::Gray,
        "進行中" => Color::Cyan,
        "納品待ち" => Color::Yellow,
        "完了" => Color::Green,
        _ => Color::White,
    }
}

fn priority_color(priority: &str) -> Color {
    match priority {
        "高" => Color::Red,
        "中" => Color::Yellow,
        "低" => Color::Green,
        _ => Color::White,
    }
}

pub fn render_anken_list<B: Backend>(frame: &mut Frame<B>, state: &mut AnkenListState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    render_filters(frame, state, chunks[0]);

    let header_cells = [
        "ID", "Name", "Client", "Assignee", "Deadline", "Days", "Status", "Priority", "Actions",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells)
        .style(Style::default())
        .height(1)
        .bottom_margin(1);

    let rows: Vec<Row> = if state.rows.is_empty() {
        vec![Row::new(vec![Cell::from("No projects found")
            .style(Style::default().fg(Color::DarkGray))])]
    } else {
        state
            .rows
            .iter()
            .map(|anken| {
                let urgency = list_urgency(anken.days_remaining);
                Row::new(vec![
                    Cell::from(sanitize(&anken.id)),
                    Cell::from(sanitize(&anken.name)),
                    Cell::from(sanitize(&anken.client_name)),
                    Cell::from(sanitize(&anken.tantosha)),
                    Cell::from(format_date(&anken.deadline)),
                    Cell::from(list_days_label(anken.days_remaining))
                        .style(Style::default().fg(urgency.color())),
                    Cell::from(sanitize(&anken.status))
                        .style(Style::default().fg(status_color(&anken.status))),
                    Cell::from(sanitize(&anken.priority))
                        .style(Style::default().fg(priority_color(&anken.priority))),
                    Cell::from("Edit"),
                ])
                .height(1)
            })
            .collect()
    };

    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title("Projects").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .widths(&[
            Constraint::Percentage(8),
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Percentage(10),
            Constraint::Percentage(11),
            Constraint::Percentage(13),
            Constraint::Percentage(10),
            Constraint::Percentage(8),
            Constraint::Percentage(8),
        ]);

    frame.render_stateful_widget(table, chunks[1], &mut state.table_state);

    let buttons_text = if state.selected_anken().is_some() {
        "<N> New | <E> Edit | <F> Status Filter | <T> Assignee Filter | <1/2/3> Page | <Q> Quit"
    } else {
        "<N> New | <F> Status Filter | <T> Assignee Filter | <1/2/3> Page | <Q> Quit"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[2]);
}

fn render_filters<B: Backend>(frame: &mut Frame<B>, state: &AnkenListState, area: Rect) {
    let line = Spans::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::Gray)),
        Span::styled(
            state.status_filter.label().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Assignee: ", Style::default().fg(Color::Gray)),
        Span::styled(
            state.tantosha_filter.label().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let filters = Paragraph::new(line)
        .block(Block::default().title("Filters").borders(Borders::ALL));
    frame.render_widget(filters, area);
}

pub fn handle_input(state: &mut AnkenListState) -> Result<Option<AnkenListAction>> {
    let Some(key) = read_key()? else {
        return Ok(None);
    };

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Some(AnkenListAction::Exit)),
        KeyCode::Char('n') => return Ok(Some(AnkenListAction::NewAnken)),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = state.selected_anken_id() {
                return Ok(Some(AnkenListAction::EditAnken(id)));
            }
        }
        KeyCode::Char('f') => {
            state.cycle_status_filter();
            return Ok(Some(AnkenListAction::Reload));
        }
        KeyCode::Char('t') => {
            state.cycle_tantosha_filter();
            return Ok(Some(AnkenListAction::Reload));
        }
        KeyCode::Char('r') => return Ok(Some(AnkenListAction::Reload)),
        KeyCode::Char('1') => return Ok(Some(AnkenListAction::Goto(Page::Dashboard))),
        KeyCode::Char('2') => return Ok(Some(AnkenListAction::Goto(Page::AnkenList))),
        KeyCode::Char('3') => return Ok(Some(AnkenListAction::Goto(Page::TantoshaList))),
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        _ => {}
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::select_input::Leading;

    fn filters() -> (SelectInputState, SelectInputState) {
        (
            SelectInputState::new(Leading::All, ["未着手".to_string()]),
            SelectInputState::new(Leading::All, ["田中".to_string()]),
        )
    }

    #[test]
    fn all_filters_produce_no_params() {
        let (status, tantosha) = filters();
        let state = AnkenListState::new(Vec::new(), status, tantosha);
        assert!(state.status_param().is_none());
        assert!(state.tantosha_param().is_none());
    }

    #[test]
    fn cycled_filter_produces_its_value() {
        let (status, tantosha) = filters();
        let mut state = AnkenListState::new(Vec::new(), status, tantosha);
        state.cycle_status_filter();
        assert_eq!(state.status_param().as_deref(), Some("未着手"));
        assert!(state.tantosha_param().is_none());
    }
}
