//! Animatable elements
//!
//! An [`ElementHandle`] is owned by the section that rendered the element.
//! Animators only ever hold an [`ElementRef`], so dropping the handle on
//! unmount is enough to make any in-flight animation skip the element.

use sheen_animation::PropertySet;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

struct ElementState {
    label: String,
    properties: PropertySet,
}

/// Owning handle to an element's visual properties
#[derive(Clone)]
pub struct ElementHandle {
    inner: Rc<RefCell<ElementState>>,
}

impl ElementHandle {
    /// A new element resting at [`PropertySet::REST`]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementState {
                label: label.into(),
                properties: PropertySet::REST,
            })),
        }
    }

    pub fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    pub fn properties(&self) -> PropertySet {
        self.inner.borrow().properties
    }

    /// Overlay the set properties of `properties`
    pub fn apply(&self, properties: &PropertySet) {
        self.inner.borrow_mut().properties.merge(properties);
    }

    pub fn downgrade(&self) -> ElementRef {
        ElementRef {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ElementHandle")
            .field("label", &state.label)
            .field("properties", &state.properties)
            .finish()
    }
}

/// Non-owning reference held by animators
#[derive(Clone, Default)]
pub struct ElementRef {
    inner: Weak<RefCell<ElementState>>,
}

impl ElementRef {
    pub fn upgrade(&self) -> Option<ElementHandle> {
        self.inner.upgrade().map(|inner| ElementHandle { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Apply properties if the element still exists. Returns false when it
    /// has been dropped.
    pub fn apply(&self, properties: &PropertySet) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                inner.borrow_mut().properties.merge(properties);
                true
            }
            None => false,
        }
    }
}

impl From<&ElementHandle> for ElementRef {
    fn from(handle: &ElementHandle) -> Self {
        handle.downgrade()
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("alive", &self.is_alive())
            .finish()
    }
}
