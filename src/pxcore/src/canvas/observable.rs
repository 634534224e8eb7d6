// This file is part of Pixelpile.
// Copyright (C) 2026 The Pixelpile developers
//
// Pixelpile is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// As additional permission under section 7, you are allowed to distribute
// the software through an app store, even if that store has restrictive
// terms and conditions that are incompatible with the GPL, provided that
// the source is also available under the GPL with or without this permission
// through a channel without those restrictive terms and conditions.
//
// Pixelpile is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Pixelpile.  If not, see <https://www.gnu.org/licenses/>.

use crate::paint::LayerID;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// What changed in a document
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentChange {
    /// The stacking order of the layers changed
    LayerOrder,

    /// A property (visibility, opacity, blend mode or name) of the
    /// given layer was written
    LayerProperties(LayerID),
}

pub trait DocumentObserver {
    fn changed(&mut self, change: &DocumentChange);
}

/// The observers listening to a document.
///
/// Only weak references are held: an observer that has been dropped
/// is removed at the next notification.
#[derive(Default)]
pub(crate) struct ObserverList {
    observers: Vec<Weak<RefCell<dyn DocumentObserver>>>,
}

impl ObserverList {
    pub fn add(&mut self, o: Rc<RefCell<dyn DocumentObserver>>) {
        self.observers.push(Rc::downgrade(&o));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Deliver the change to every live observer before returning
    pub fn notify(&mut self, change: DocumentChange) {
        let mut cleanup = false;

        for o in self.observers.iter() {
            if let Some(o_rc) = o.upgrade() {
                let mut observer = o_rc.borrow_mut();
                observer.changed(&change);
            } else {
                cleanup = true;
            }
        }

        if cleanup {
            self.observers.retain(|o| o.upgrade().is_some());
        }
    }
}
