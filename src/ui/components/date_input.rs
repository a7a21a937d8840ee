//! Part-wise date editor used by the wizard date fields.
//!
//! The cursor sits on one of year/month/day; typed digits accumulate and
//! commit once the part is complete. Out-of-range input for a part is
//! discarded.

use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

impl DatePart {
    fn width(self) -> usize {
        match self {
            DatePart::Year => 4,
            DatePart::Month | DatePart::Day => 2,
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            DatePart::Year => "[YYYY]",
            DatePart::Month => "[MM]",
            DatePart::Day => "[DD]",
        }
    }
}

pub struct DateInputState {
    pub date: NaiveDate,
    pub editing: bool,
    part: DatePart,
    pending: String,
}

impl DateInputState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            editing: false,
            part: DatePart::Year,
            pending: String::new(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.editing {
            self.part = DatePart::Year;
            self.pending.clear();
        }
    }

    pub fn next_part(&mut self) {
        self.part = match self.part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
        self.pending.clear();
    }

    pub fn previous_part(&mut self) {
        self.part = match self.part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
        self.pending.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.pending.push(c);
                if self.pending.len() >= self.part.width() {
                    self.commit_pending();
                }
            }
            KeyCode::Backspace => {
                self.pending.pop();
            }
            KeyCode::Right => self.next_part(),
            KeyCode::Left => self.previous_part(),
            _ => {}
        }
    }

    /// Apply the accumulated digits to the current part, keeping the date
    /// unchanged when the result is not a real calendar date.
    fn commit_pending(&mut self) {
        let (mut year, mut month, mut day) =
            (self.date.year(), self.date.month(), self.date.day());

        match self.part {
            DatePart::Year => {
                if let Ok(value) = self.pending.parse::<i32>() {
                    if (1900..=2100).contains(&value) {
                        year = value;
                    }
                }
            }
            DatePart::Month => {
                if let Ok(value) = self.pending.parse::<u32>() {
                    if (1..=12).contains(&value) {
                        month = value;
                    }
                }
            }
            DatePart::Day => {
                if let Ok(value) = self.pending.parse::<u32>() {
                    if (1..=31).contains(&value) {
                        day = value;
                    }
                }
            }
        }

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            self.date = date;
        }
        self.pending.clear();
    }

    /// The field text shown while this input has the cursor. The part
    /// being edited is marked with the pending digits or a placeholder.
    pub fn display_string(&self) -> String {
        if !self.editing {
            return self.date.format("%Y-%m-%d").to_string();
        }

        let marker = if self.pending.is_empty() {
            self.part.placeholder().to_string()
        } else {
            format!("[{}]", self.pending)
        };

        let year = self.date.format("%Y").to_string();
        let month = self.date.format("%m").to_string();
        let day = self.date.format("%d").to_string();

        match self.part {
            DatePart::Year => format!("{year}{marker}-{month}-{day}"),
            DatePart::Month => format!("{year}-{month}{marker}-{day}"),
            DatePart::Day => format!("{year}-{month}-{day}{marker}"),
        }
    }
}
