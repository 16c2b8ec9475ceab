/// Last known value along with a "changed since last read" flag.
///
/// Every [`Dirty::set`] counts as a change, even when the value is identical:
/// hosts re-announce unchanged values and these still need to be rendered.
#[derive(Debug)]
pub struct Dirty<T> {
    value: Option<T>,
    is_dirty: bool,
}

impl<T> Default for Dirty<T> {
    fn default() -> Self {
        Self {
            value: None,
            is_dirty: false,
        }
    }
}

impl<T: Clone> Dirty<T> {
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
        self.is_dirty = true;
    }

    /// Returns the value if it changed since the last call and clears the flag.
    pub fn take(&mut self) -> Option<T> {
        if !self.is_dirty {
            return None;
        }

        self.is_dirty = false;
        self.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::Dirty;

    #[test]
    fn clean_cell_has_no_value() {
        let mut cell = Dirty::<f64>::default();
        assert_eq!(cell.take(), None);
    }

    #[test]
    fn take_once_per_set() {
        let mut cell = Dirty::default();
        cell.set(12.0);
        cell.set(42.0);

        assert_eq!(cell.take(), Some(42.0));
        assert_eq!(cell.take(), None);
    }

    #[test]
    fn same_value_is_still_a_change() {
        let mut cell = Dirty::default();
        cell.set(0.0);
        assert_eq!(cell.take(), Some(0.0));

        cell.set(0.0);
        assert_eq!(cell.take(), Some(0.0));
    }
}
