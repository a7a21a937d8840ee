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

use crate::models::{Tantosha, TantoshaPayload};
use crate::ui::read_key;

pub enum TantoshaWizardAction {
    Cancel,
    Save(TantoshaPayload),
}

#[derive(Clone, Copy, PartialEq)]
pub enum TantoshaField {
    Name,
    Email,
    SlackId,
}

pub struct TantoshaWizardState {
    id: Option<String>,
    pub name: String,
    pub email: String,
    pub slack_id: String,
    current_field: TantoshaField,
    editing: bool,
}

impl TantoshaWizardState {
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            slack_id: String::new(),
            current_field: TantoshaField::Name,
            editing: false,
        }
    }

    /// Form pre-populated from the cached snapshot. There is no
    /// single-record fetch for assignees; the snapshot is the source.
    pub fn from_existing(tantosha: &Tantosha) -> Self {
        Self {
            id: Some(tantosha.id.clone()),
            name: tantosha.name.clone(),
            email: tantosha.email.clone().unwrap_or_default(),
            slack_id: tantosha.slack_id.clone().unwrap_or_default(),
            current_field: TantoshaField::Name,
            editing: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            TantoshaField::Name => TantoshaField::Email,
            TantoshaField::Email => TantoshaField::SlackId,
            TantoshaField::SlackId => TantoshaField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            TantoshaField::Name => TantoshaField::SlackId,
            TantoshaField::Email => TantoshaField::Name,
            TantoshaField::SlackId => TantoshaField::Email,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let value = match self.current_field {
            TantoshaField::Name => &mut self.name,
            TantoshaField::Email => &mut self.email,
            TantoshaField::SlackId => &mut self.slack_id,
        };

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

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn payload(&self) -> TantoshaPayload {
        TantoshaPayload {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            slack_id: self.slack_id.trim().to_string(),
        }
    }
}

impl Default for TantoshaWizardState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_tantosha_wizard<B: Backend>(f: &mut Frame<B>, state: &mut TantoshaWizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title_text = if state.is_edit() {
        "Edit Assignee"
    } else {
        "Register Assignee"
    };

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_form(f, state, chunks[1]);

    let submit_label = if state.is_edit() { "Update" } else { "Register" };
    let help_text = if state.editing {
        "Enter - Save field | Esc - Cancel editing".to_string()
    } else {
        format!("Enter - Edit field | Up/Down - Navigate fields | S - {submit_label} | Esc - Cancel")
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn render_form<B: Backend>(f: &mut Frame<B>, state: &mut TantoshaWizardState, area: Rect) {
    let field_names = ["Name", "Email", "Slack ID"];
    let field_values = [
        state.name.clone(),
        state.email.clone(),
        state.slack_id.clone(),
    ];

    let items: Vec<ListItem> = field_names
        .iter()
        .zip(field_values.iter())
        .enumerate()
        .map(|(i, (name, value))| {
            let is_current = i == state.current_field as usize;
            let content = if is_current && state.editing {
                Spans::from(vec![
                    Span::styled(format!("{name}: "), Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{value}|"),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
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
        .block(Block::default().borders(Borders::ALL).title("Assignee Details"))
        .highlight_style(Style::default().fg(Color::Yellow));

    f.render_widget(form_list, area);
}

pub fn handle_input(state: &mut TantoshaWizardState) -> Result<Option<TantoshaWizardAction>> {
    let Some(key) = read_key()? else {
        return Ok(None);
    };

    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Ok(Some(TantoshaWizardAction::Cancel));
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
                return Ok(Some(TantoshaWizardAction::Save(state.payload())));
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

    #[test]
    fn create_payload_has_no_id() {
        let mut state = TantoshaWizardState::new();
        state.name.push_str("田中");

        let payload = state.payload();
        assert!(payload.id.is_none());
        assert!(!payload.is_edit());
        assert_eq!(payload.name, "田中");
    }

    #[test]
    fn edit_payload_carries_the_id_and_optionals() {
        let state = TantoshaWizardState::from_existing(&Tantosha {
            id: "T1".into(),
            name: "田中".into(),
            email: Some("tanaka@example.com".into()),
            slack_id: None,
        });

        let payload = state.payload();
        assert_eq!(payload.id.as_deref(), Some("T1"));
        assert_eq!(payload.email, "tanaka@example.com");
        assert_eq!(payload.slack_id, "");
    }
}
