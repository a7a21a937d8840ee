use anyhow::Result;
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::format::sanitize;
use crate::models::Tantosha;
use crate::ui::{read_key, Page};

// Represents the state of the assignee table screen
pub struct TantoshaListState {
    rows: Vec<Tantosha>,
    table_state: TableState,
}

impl TantoshaListState {
    pub fn new(rows: Vec<Tantosha>) -> Self {
        let mut table_state = TableState::default();
        if !rows.is_empty() {
            table_state.select(Some(0));
        }

        Self { rows, table_state }
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

    pub fn selected_tantosha(&self) -> Option<&Tantosha> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    pub fn selected_tantosha_id(&self) -> Option<String> {
        self.selected_tantosha().map(|t| t.id.clone())
    }
}

pub enum TantoshaListAction {
    Goto(Page),
    NewTantosha,
    EditTantosha(String), // Contains the tantosha id
    Reload,
    Exit,
}

pub fn render_tantosha_list<B: Backend>(frame: &mut Frame<B>, state: &mut TantoshaListState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(size);

    let header_cells = ["ID", "Name", "Email", "Slack ID", "Actions"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells)
        .style(Style::default())
        .height(1)
        .bottom_margin(1);

    let rows: Vec<Row> = if state.rows.is_empty() {
        vec![Row::new(vec![Cell::from("No assignees found")
            .style(Style::default().fg(Color::DarkGray))])]
    } else {
        state
            .rows
            .iter()
            .map(|tantosha| {
                Row::new(vec![
                    Cell::from(sanitize(&tantosha.id)),
                    Cell::from(sanitize(&tantosha.name)),
                    Cell::from(sanitize(tantosha.email.as_deref().unwrap_or("-"))),
                    Cell::from(sanitize(tantosha.slack_id.as_deref().unwrap_or("-"))),
                    Cell::from("Edit"),
                ])
                .height(1)
            })
            .collect()
    };

    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title("Assignees").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .widths(&[
            Constraint::Percentage(10),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
        ]);

    frame.render_stateful_widget(table, chunks[0], &mut state.table_state);

    let buttons_text = if state.selected_tantosha().is_some() {
        "<N> New | <E> Edit | <R> Reload | <1/2/3> Page | <Q> Quit"
    } else {
        "<N> New | <R> Reload | <1/2/3> Page | <Q> Quit"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[1]);
}

pub fn handle_input(state: &mut TantoshaListState) -> Result<Option<TantoshaListAction>> {
    let Some(key) = read_key()? else {
        return Ok(None);
    };

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Some(TantoshaListAction::Exit)),
        KeyCode::Char('n') => return Ok(Some(TantoshaListAction::NewTantosha)),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = state.selected_tantosha_id() {
                return Ok(Some(TantoshaListAction::EditTantosha(id)));
            }
        }
        KeyCode::Char('r') => return Ok(Some(TantoshaListAction::Reload)),
        KeyCode::Char('1') => return Ok(Some(TantoshaListAction::Goto(Page::Dashboard))),
        KeyCode::Char('2') => return Ok(Some(TantoshaListAction::Goto(Page::AnkenList))),
        KeyCode::Char('3') => return Ok(Some(TantoshaListAction::Goto(Page::TantoshaList))),
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        _ => {}
    }

    Ok(None)
}
