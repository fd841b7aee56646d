use std::cell::Cell;
use std::rc::Rc;

use crate::device::port::SenseSwitches;

/// Settable sense switch bank. Clones share the switch positions.
#[derive(Clone, Debug, Default)]
pub struct SwitchBank {
    value: Rc<Cell<u8>>,
}

impl SwitchBank {
    pub fn new(value: u8) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
        }
    }

    pub fn set(&self, value: u8) {
        self.value.set(value);
    }

    pub fn get(&self) -> u8 {
        self.value.get()
    }
}

impl SenseSwitches for SwitchBank {
    fn switches_in(&mut self) -> u8 {
        self.value.get()
    }
}
