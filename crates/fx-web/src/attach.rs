use std::cell::RefCell;

/// A resource installed on demand and released on [`detach`](Self::detach),
/// e.g. window listeners that must not outlive an unmount.
pub struct Attachment<T> {
    slot: RefCell<Option<T>>,
}

impl<T> Default for Attachment<T> {
    fn default() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }
}

impl<T> Attachment<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: RefCell::new(Some(value)),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Install via `install` unless already attached. Returns whether a new
    /// value was installed.
    pub fn ensure<E>(&self, install: impl FnOnce() -> Result<T, E>) -> Result<bool, E> {
        if self.is_attached() {
            return Ok(false);
        }
        let value = install()?;
        *self.slot.borrow_mut() = Some(value);
        Ok(true)
    }

    /// Release the attached value; dropping it undoes the installation.
    pub fn detach(&self) -> Option<T> {
        self.slot.borrow_mut().take()
    }
}
