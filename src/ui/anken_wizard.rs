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

use crate::directory::TantoshaDirectory;
use crate::format::{format_date_for_input, parse_date_or_today};
use crate::models::{Anken, AnkenPayload, PRIORITY_OPTIONS, STATUS_OPTIONS};
use crate::ui::components::date_input::DateInputState;
use crate::ui::components::select_input::{Leading, SelectInputState};
use crate::ui::read_key;

pub enum AnkenWizardAction {
    Cancel,
    Save(AnkenPayload),
}

#[derive(Clone, Copy, PartialEq)]
pub enum AnkenField {
    Name,
    Client,
    Tantosha,
    JutyuDate,
    Deadline,
    Status,
    Priority,
    Memo,
}

pub struct AnkenWizardState {
    id: Option<String>,
    pub name: String,
    pub client_name: String,
    pub memo: String,
    pub tantosha: SelectInputState,
    pub status: SelectInputState,
    pub priority: SelectInputState,
    pub jutyu_date: DateInputState,
    pub deadline: DateInputState,
    current_field: AnkenField,
    editing: bool,
}

impl AnkenWizardState {
    /// Blank form for a new project. The order date defaults to today's
    /// local calendar date.
    pub fn new(directory: &TantoshaDirectory) -> Self {
        let today = chrono::Local::now().date_naive();

        let mut status = SelectInputState::new(
            Leading::Placeholder,
            STATUS_OPTIONS.iter().map(|s| s.to_string()),
        );
        status.set_value(STATUS_OPTIONS[0]);

        let mut priority = SelectInputState::new(
            Leading::Placeholder,
            PRIORITY_OPTIONS.iter().map(|s| s.to_string()),
        );
        priority.set_value("中");

        Self {
            id: None,
            name: String::new(),
            client_name: String::new(),
            memo: String::new(),
            tantosha: SelectInputState::new(Leading::Placeholder, directory.names()),
            status,
            priority,
            jutyu_date: DateInputState::new(today),
            deadline: DateInputState::new(today),
            current_field: AnkenField::Name,
            editing: false,
        }
    }

    /// Form pre-populated from a fetched record.
    pub fn from_existing(anken: Anken, directory: &TantoshaDirectory) -> Self {
        let mut state = Self::new(directory);

        state.id = Some(anken.id);
        state.name = anken.name;
        state.client_name = anken.client_name;
        state.memo = anken.memo.unwrap_or_default();
        state.tantosha.set_value(&anken.tantosha);
        state.status.set_value(&anken.status);
        state.priority.set_value(&anken.priority);
        state.jutyu_date =
            DateInputState::new(parse_date_or_today(&format_date_for_input(&anken.order_date)));
        state.deadline =
            DateInputState::new(parse_date_or_today(&format_date_for_input(&anken.deadline)));

        state
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.editing {
            match self.current_field {
                AnkenField::JutyuDate => self.jutyu_date.toggle_editing(),
                AnkenField::Deadline => self.deadline.toggle_editing(),
                _ => {}
            }
        } else {
            self.jutyu_date.editing = false;
            self.deadline.editing = false;
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            AnkenField::Name => AnkenField::Client,
            AnkenField::Client => AnkenField::Tantosha,
            AnkenField::Tantosha => AnkenField::JutyuDate,
            AnkenField::JutyuDate => AnkenField::Deadline,
            AnkenField::Deadline => AnkenField::Status,
            AnkenField::Status => AnkenField::Priority,
            AnkenField::Priority => AnkenField::Memo,
            AnkenField::Memo => AnkenField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            AnkenField::Name => AnkenField::Memo,
            AnkenField::Client => AnkenField::Name,
            AnkenField::Tantosha => AnkenField::Client,
            AnkenField::JutyuDate => AnkenField::Tantosha,
            AnkenField::Deadline => AnkenField::JutyuDate,
            AnkenField::Status => AnkenField::Deadline,
            AnkenField::Priority => AnkenField::Status,
            AnkenField::Memo => AnkenField::Priority,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            AnkenField::Name => edit_text(&mut self.name, key),
            AnkenField::Client => edit_text(&mut self.client_name, key),
            AnkenField::Memo => edit_text(&mut self.memo, key),
            AnkenField::Tantosha => edit_select(&mut self.tantosha, key),
            AnkenField::Status => edit_select(&mut self.status, key),
            AnkenField::Priority => edit_select(&mut self.priority, key),
            AnkenField::JutyuDate => self.jutyu_date.handle_input(key),
            AnkenField::Deadline => self.deadline.handle_input(key),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.tantosha.is_unset()
    }

    pub fn payload(&self) -> AnkenPayload {
        AnkenPayload {
            id: self.id.clone(),
            anken_name: self.name.trim().to_string(),
            client_name: self.client_name.trim().to_string(),
            tantosha: self.tantosha.value().to_string(),
            jutyu_date: self.jutyu_date.date.format("%Y-%m-%d").to_string(),
            deadline: self.deadline.date.format("%Y-%m-%d").to_string(),
            status: self.status.value().to_string(),
            priority: self.priority.value().to_string(),
            memo: self.memo.trim().to_string(),
        }
    }
}

fn edit_text(value: &mut String, key: KeyCode) {
    match key {
        KeyCode::Char(c) => {
            value.push(c);
        }
        KeyCode::Backspace => {
            value.pop();
        }
        _ => {}
    }
}

fn edit_select(select: &mut SelectInputState, key: KeyCode) {
    match key {
        KeyCode::Right | KeyCode::Down => select.next(),
        KeyCode::Left | KeyCode::Up => select.previous(),
        _ => {}
    }
}

pub fn render_anken_wizard<B: Backend>(f: &mut Frame<B>, state: &mut AnkenWizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title_text = if state.is_edit() {
        "Edit Project"
    } else {
        "Register Project"
    };

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_form(f, state, chunks[1]);

    let submit_label = if state.is_edit() { "Update" } else { "Register" };
    let help_text = if state.editing {
        match state.current_field {
            AnkenField::JutyuDate | AnkenField::Deadline => {
                "Enter - Save field | Left/Right - Switch date part | Esc - Cancel editing".to_string()
            }
            AnkenField::Tantosha | AnkenField::Status | AnkenField::Priority => {
                "Enter - Save field | Left/Right - Change option | Esc - Cancel editing".to_string()
            }
            _ => "Enter - Save field | Esc - Cancel editing".to_string(),
        }
    } else {
        format!("Enter - Edit field | Up/Down - Navigate fields | S - {submit_label} | Esc - Cancel")
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn render_form<B: Backend>(f: &mut Frame<B>, state: &mut AnkenWizardState, area: Rect) {
    let field_names = [
        "Name",
        "Client",
        "Assignee",
        "Order Date",
        "Deadline",
        "Status",
        "Priority",
        "Memo",
    ];

    let field_values = [
        state.name.clone(),
        state.client_name.clone(),
        state.tantosha.label().to_string(),
        state.jutyu_date.display_string(),
        state.deadline.display_string(),
        state.status.label().to_string(),
        state.priority.label().to_string(),
        state.memo.clone(),
    ];

    let items: Vec<ListItem> = field_names
        .iter()
        .zip(field_values.iter())
        .enumerate()
        .map(|(i, (name, value))| {
            let is_current = i == state.current_field as usize;
            let content = if is_current && state.editing {
                let displayed = match state.current_field {
                    AnkenField::Name | AnkenField::Client | AnkenField::Memo => {
                        format!("{value}|")
                    }
                    _ => value.clone(),
                };

                Spans::from(vec![
                    Span::styled(format!("{name}: "), Style::default().fg(Color::Yellow)),
                    Span::styled(displayed, Style::default().add_modifier(Modifier::BOLD)),
                ])
            } else {
                let style = if is_current {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };

                Spans::from(vec![
                    Span::styled(format!("{name}: "), style),
                    Span::raw(value.clone()),
                ])
            };

            ListItem::new(content)
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Project Details"))
        .highlight_style(Style::default().fg(Color::Yellow));

    f.render_widget(form_list, area);
}

pub fn handle_input(state: &mut AnkenWizardState) -> Result<Option<AnkenWizardAction>> {
    let Some(key) = read_key()? else {
        return Ok(None);
    };

    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Ok(Some(AnkenWizardAction::Cancel));
            }
        }
        KeyCode::Enter => {
            state.toggle_editing();
        }
        KeyCode::Up if !state.editing => {
            state.previous_field();
        }
        KeyCode::Down if !state.editing => {
            state.next_field();
        }
        KeyCode::Char('s') if !state.editing => {
            if state.is_valid() {
                return Ok(Some(AnkenWizardAction::Save(state.payload())));
            }
        }
        _ if state.editing => {
            state.edit_current_field(key);
        }
        _ => {}
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tantosha;

    fn directory() -> TantoshaDirectory {
        let mut dir = TantoshaDirectory::new();
        dir.replace(vec![Tantosha {
            id: "T1".into(),
            name: "田中".into(),
            email: None,
            slack_id: None,
        }]);
        dir
    }

    fn sample_anken() -> Anken {
        Anken {
            id: "A1".into(),
            name: "LP".into(),
            client_name: "Foo".into(),
            tantosha: "田中".into(),
            order_date: "2024-01-05T00:00:00.000Z".into(),
            deadline: "2024-02-01".into(),
            days_remaining: 3,
            status: "進行中".into(),
            priority: "高".into(),
            memo: Some("急ぎ".into()),
        }
    }

    #[test]
    fn new_form_defaults_the_order_date_to_today() {
        let state = AnkenWizardState::new(&directory());
        assert_eq!(state.jutyu_date.date, chrono::Local::now().date_naive());
        assert!(!state.is_edit());
        assert!(state.payload().id.is_none());
    }

    #[test]
    fn new_form_requires_a_name_and_an_assignee() {
        let mut state = AnkenWizardState::new(&directory());
        assert!(!state.is_valid());

        state.name.push_str("LP");
        assert!(!state.is_valid());

        state.tantosha.set_value("田中");
        assert!(state.is_valid());
    }

    #[test]
    fn edit_form_populates_every_field() {
        let state = AnkenWizardState::from_existing(sample_anken(), &directory());

        assert!(state.is_edit());
        let payload = state.payload();
        assert_eq!(payload.id.as_deref(), Some("A1"));
        assert_eq!(payload.anken_name, "LP");
        assert_eq!(payload.tantosha, "田中");
        assert_eq!(payload.jutyu_date, "2024-01-05");
        assert_eq!(payload.deadline, "2024-02-01");
        assert_eq!(payload.status, "進行中");
        assert_eq!(payload.priority, "高");
        assert_eq!(payload.memo, "急ぎ");
    }
}
