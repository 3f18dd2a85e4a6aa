/// Tab group with exactly one active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabs {
    ids: Vec<String>,
    active: usize,
}

impl Tabs {
    /// Returns `None` for an empty tab group. The first tab starts active.
    pub fn new(ids: impl IntoIterator<Item = impl Into<String>>) -> Option<Self> {
        let ids = ids.into_iter().map(Into::into).collect::<Vec<_>>();
        (!ids.is_empty()).then_some(Self { ids, active: 0 })
    }

    pub fn active(&self) -> &str {
        &self.ids[self.active]
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active() == id
    }

    /// Returns `false` and keeps the current tab if `id` is unknown.
    pub fn select(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|x| x == id) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }
}
