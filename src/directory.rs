//! Shared assignee snapshot.
//!
//! The whole app works off one cached copy of the assignee list: the
//! project filter, the project form selector, and the assignee edit form
//! all read from it. It is refreshed only by an explicit list fetch and a
//! refresh replaces the previous snapshot wholesale.

use crate::models::Tantosha;

#[derive(Debug, Default)]
pub struct TantoshaDirectory {
    list: Vec<Tantosha>,
}

impl TantoshaDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a freshly fetched list. Last full
    /// snapshot wins; there is no merging.
    pub fn replace(&mut self, list: Vec<Tantosha>) {
        self.list = list;
    }

    /// Look up an assignee by id. This is the only single-record read the
    /// client has for assignees; the remote API exposes no `getTantosha`.
    pub fn find(&self, id: &str) -> Option<&Tantosha> {
        self.list.iter().find(|t| t.id == id)
    }

    /// Display names, in sheet order, for selector rebuilds. Selectors are
    /// keyed by display name rather than id, mirroring the denormalized
    /// `tantosha` column on project records.
    pub fn names(&self) -> Vec<String> {
        self.list.iter().map(|t| t.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tantosha(id: &str, name: &str) -> Tantosha {
        Tantosha {
            id: id.to_string(),
            name: name.to_string(),
            email: None,
            slack_id: None,
        }
    }

    #[test]
    fn replace_overwrites_the_previous_snapshot() {
        let mut dir = TantoshaDirectory::new();
        dir.replace(vec![tantosha("T1", "田中"), tantosha("T2", "鈴木")]);
        dir.replace(vec![tantosha("T3", "佐藤")]);

        assert_eq!(dir.names(), vec!["佐藤"]);
        assert!(dir.find("T1").is_none());
        assert_eq!(dir.find("T3").unwrap().name, "佐藤");
    }
}
