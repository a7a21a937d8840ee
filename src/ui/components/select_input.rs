//! Fixed-option selector used for filters and form choice fields.
//!
//! Assignee selectors are rebuilt from the shared snapshot whenever it
//! refreshes; a rebuild keeps the previously selected value when it still
//! exists among the new options and otherwise falls back to the leading
//! option.

/// The synthetic first option of a selector.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Leading {
    /// Filter controls: "all", meaning no filter.
    All,
    /// Form controls: an empty "please choose" value.
    Placeholder,
}

impl Leading {
    fn value(self) -> &'static str {
        match self {
            Leading::All => "all",
            Leading::Placeholder => "",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Leading::All => "All",
            Leading::Placeholder => "(choose)",
        }
    }
}

pub struct SelectInputState {
    leading: Leading,
    options: Vec<String>,
    selected: usize,
}

impl SelectInputState {
    pub fn new(leading: Leading, values: impl IntoIterator<Item = String>) -> Self {
        let mut options = vec![leading.value().to_string()];
        options.extend(values);

        Self {
            leading,
            options,
            selected: 0,
        }
    }

    /// The currently selected value. `"all"` for an untouched filter,
    /// empty for an untouched form selector.
    pub fn value(&self) -> &str {
        &self.options[self.selected]
    }

    /// Whether the leading (no-op) option is selected.
    pub fn is_unset(&self) -> bool {
        self.selected == 0
    }

    /// Label to render for the current selection.
    pub fn label(&self) -> &str {
        if self.is_unset() {
            self.leading.label()
        } else {
            self.value()
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.options.len();
    }

    pub fn previous(&mut self) {
        self.selected = if self.selected == 0 {
            self.options.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Select the option with the given value, if present. Used when
    /// populating an edit form from a fetched record.
    pub fn set_value(&mut self, value: &str) {
        if let Some(index) = self.options.iter().position(|o| o == value) {
            self.selected = index;
        }
    }

    /// Replace the option list, restoring the previous selection when its
    /// value survived the rebuild and silently resetting to the leading
    /// option when it did not.
    pub fn rebuild(&mut self, values: impl IntoIterator<Item = String>) {
        let previous = self.value().to_string();

        self.options = vec![self.leading.value().to_string()];
        self.options.extend(values);

        self.selected = self
            .options
            .iter()
            .position(|o| *o == previous)
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filter_selector_starts_at_all() {
        let select = SelectInputState::new(Leading::All, names(&["田中", "鈴木"]));
        assert_eq!(select.value(), "all");
        assert!(select.is_unset());
    }

    #[test]
    fn cycling_wraps_around() {
        let mut select = SelectInputState::new(Leading::Placeholder, names(&["田中"]));
        select.next();
        assert_eq!(select.value(), "田中");
        select.next();
        assert!(select.is_unset());
        select.previous();
        assert_eq!(select.value(), "田中");
    }

    #[test]
    fn rebuild_with_unchanged_options_keeps_the_selection() {
        let mut select = SelectInputState::new(Leading::All, names(&["田中", "鈴木"]));
        select.set_value("鈴木");

        select.rebuild(names(&["田中", "鈴木"]));
        assert_eq!(select.value(), "鈴木");
    }

    #[test]
    fn rebuild_resets_when_the_selection_disappeared() {
        let mut select = SelectInputState::new(Leading::All, names(&["田中", "鈴木"]));
        select.set_value("鈴木");

        select.rebuild(names(&["田中", "佐藤"]));
        assert_eq!(select.value(), "all");
    }

    #[test]
    fn set_value_ignores_unknown_values() {
        let mut select = SelectInputState::new(Leading::Placeholder, names(&["田中"]));
        select.set_value("山田");
        assert!(select.is_unset());
    }
}
