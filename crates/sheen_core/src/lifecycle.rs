//! Scoped teardown
//!
//! Every registration a mounted section makes (reveal groups, viewport
//! targets, scroll listeners, timers, pointer handlers) hands back a
//! disposer that is parked in the section's [`Scope`]. Unmounting the
//! section disposes the scope, which runs the disposers synchronously in
//! reverse registration order. Once a scope is disposed nothing it tracked
//! can fire again.

use std::fmt;

/// A deferred teardown action
pub type Disposer = Box<dyn FnOnce()>;

/// Owner of the disposers registered while a section is mounted
pub struct Scope {
    name: String,
    disposers: Vec<Disposer>,
    disposed: bool,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disposers: Vec::new(),
            disposed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Track a teardown action.
    ///
    /// Registering on an already-disposed scope runs the action immediately,
    /// so late registrations can't outlive the section.
    pub fn defer<F: FnOnce() + 'static>(&mut self, disposer: F) {
        if self.disposed {
            tracing::debug!(scope = %self.name, "disposer registered after teardown, running now");
            disposer();
            return;
        }
        self.disposers.push(Box::new(disposer));
    }

    /// Number of pending disposers
    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Run every disposer, newest first. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let count = self.disposers.len();
        while let Some(disposer) = self.disposers.pop() {
            disposer();
        }
        tracing::debug!(scope = %self.name, count, "scope disposed");
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("pending", &self.disposers.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_disposers_run_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scope = Scope::new("services");

        for i in 0..3 {
            let log = log.clone();
            scope.defer(move || log.borrow_mut().push(i));
        }

        scope.dispose();
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let count = Rc::new(RefCell::new(0));
        let mut scope = Scope::new("hero");

        let c = count.clone();
        scope.defer(move || *c.borrow_mut() += 1);

        scope.dispose();
        scope.dispose();
        drop(scope);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_drop_disposes() {
        let count = Rc::new(RefCell::new(0));
        {
            let mut scope = Scope::new("about");
            let c = count.clone();
            scope.defer(move || *c.borrow_mut() += 1);
        }
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_late_registration_runs_immediately() {
        let count = Rc::new(RefCell::new(0));
        let mut scope = Scope::new("contact");
        scope.dispose();

        let c = count.clone();
        scope.defer(move || *c.borrow_mut() += 1);
        assert_eq!(*count.borrow(), 1);
        assert!(scope.is_empty());
    }
}
