use crate::model::ColoringAction;

/// LIFO record of committed moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveHistory {
    actions: Vec<ColoringAction>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: ColoringAction) {
        self.actions.push(action);
    }

    pub fn pop(&mut self) -> Option<ColoringAction> {
        self.actions.pop()
    }

    pub fn peek_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}
