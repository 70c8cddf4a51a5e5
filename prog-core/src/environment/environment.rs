use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::prelude::Value;

/// One scope frame. Frames chain to the enclosing scope, lookups walk
/// the chain outward.
#[derive(Default, Debug)]
pub struct Environment {
    pub store: HashMap<String, Value>,
    pub parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            parent: None
        }
    }

    pub fn with_parent(parent: Rc<RefCell<Environment>>) -> Self {
        Self {
            store: HashMap::new(),
            parent: Some(parent)
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.parent {
                Some(parent) => parent.borrow().get(name),
                None => None
            }
        }
    }

    /// Binds in this scope unconditionally. Used for parameters and
    /// function definitions.
    pub fn define(&mut self, name: String, value: Value) {
        self.store.insert(name, value);
    }

    /// The `let` rule: rebind in the nearest enclosing scope that already
    /// holds the name, otherwise create the binding in the current scope.
    pub fn assign(this: &Rc<RefCell<Environment>>, name: &str, value: Value) {
        let mut scope = Rc::clone(this);

        loop {
            if scope.borrow().store.contains_key(name) {
                scope.borrow_mut().store.insert(name.to_string(), value);
                return;
            }

            let parent = scope.borrow().parent.clone();

            match parent {
                Some(parent) => scope = parent,
                None => break
            }
        }

        this.borrow_mut().define(name.to_string(), value);
    }
}
