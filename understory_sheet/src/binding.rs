// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-owned cell holding a sheet's requested state.
//!
//! The host reads the cell to request a state programmatically; the sheet
//! writes it when a gesture settles. Hosts are expected to apply a write on
//! their next render so that geometry stays consistent.

use core::cell::Cell;

use crate::state::SheetState;

/// Read/write access to an externally owned [`SheetState`].
pub trait StateBinding {
    /// Current value of the cell.
    fn get(&self) -> SheetState;

    /// Writes a new value into the cell.
    fn set(&mut self, state: SheetState);
}

/// A plain value is its own binding.
impl StateBinding for SheetState {
    fn get(&self) -> SheetState {
        *self
    }

    fn set(&mut self, state: SheetState) {
        *self = state;
    }
}

impl StateBinding for Cell<SheetState> {
    fn get(&self) -> SheetState {
        Cell::get(self)
    }

    fn set(&mut self, state: SheetState) {
        Cell::set(self, state);
    }
}

/// Shared cells: every clone observes the write.
impl StateBinding for &Cell<SheetState> {
    fn get(&self) -> SheetState {
        Cell::get(self)
    }

    fn set(&mut self, state: SheetState) {
        Cell::set(self, state);
    }
}

impl StateBinding for alloc::rc::Rc<Cell<SheetState>> {
    fn get(&self) -> SheetState {
        Cell::get(self)
    }

    fn set(&mut self, state: SheetState) {
        Cell::set(self, state);
    }
}

impl<B: StateBinding + ?Sized> StateBinding for &mut B {
    fn get(&self) -> SheetState {
        (**self).get()
    }

    fn set(&mut self, state: SheetState) {
        (**self).set(state);
    }
}
