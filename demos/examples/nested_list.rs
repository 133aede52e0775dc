// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A list nested in a `Large` sheet: the list scrolls until it is pulled past
//! its top, then the sheet takes over and closes to `Medium`.
//!
//! The sheet lives in a registry, as it would in a window's overlay.
//!
//! Run:
//! - `cargo run -p understory_sheet_demos --example nested_list`

use kurbo::Size;
use understory_sheet::{
    DEFAULT_SHEET_ID, DragEvent, GestureResponse, OverlayHost, Sheet, SheetConfig, SheetRegistry,
    SheetState,
};
use understory_sheet_demos::{FrameClock, ScriptedList, describe, init_tracing};

#[derive(Debug, Default)]
struct Overlay;

impl OverlayHost for Overlay {
    fn refresh(&mut self, ids: &[&str]) {
        println!("overlay shows {ids:?}");
    }

    fn set_focusable(&mut self, focusable: bool) {
        println!("overlay focusable: {focusable}");
    }
}

fn main() {
    init_tracing();

    let mut registry = SheetRegistry::new(Overlay);
    let mut sheet = Sheet::new(SheetConfig::default(), SheetState::Medium);
    sheet.set_full_size(Size::new(390.0, 844.0));
    sheet.measure_content(Size::new(390.0, 340.0));
    registry.register(DEFAULT_SHEET_ID, sheet, SheetState::Large);

    let mut clock = FrameClock::default();
    let mut list = ScriptedList::default();

    let entry = registry
        .get_mut(DEFAULT_SHEET_ID)
        .expect("sheet was just registered");
    entry.sync_state();
    let (sheet, _) = entry.parts_mut();

    sheet.handle_nested(DragEvent::began(clock.now()), &mut list);
    // The list sits at its top, rubber-bands past it, then keeps being pulled.
    for (translation, list_offset) in [
        (20.0, 0.0),
        (45.0, 0.0),
        (70.0, -12.0),
        (180.0, 0.0),
        (320.0, 0.0),
    ] {
        let t = clock.tick();
        list.offset = list_offset;
        let response = sheet.handle_nested(DragEvent::changed(translation, t), &mut list);
        let owner = match response {
            GestureResponse::Ignored => "list",
            _ => "sheet",
        };
        println!("{owner:>5} owns:  {}", describe(&sheet.layout()));
    }
    let t = clock.tick();
    sheet.handle_nested(DragEvent::ended(320.0, t), &mut list);
    assert!(list.enabled);

    while let Some(deadline) = registry.next_deadline() {
        for (id, state) in registry.poll(clock.advance_to(deadline)) {
            println!("{id} settled at {state:?}");
        }
    }

    registry.unregister(DEFAULT_SHEET_ID);
}
