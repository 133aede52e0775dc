// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a sheet from `Medium` to `Large` with raw pointer positions.
//!
//! Pointer positions go through a `PanTracker`; the commit is driven by a
//! hand-advanced clock.
//!
//! Run:
//! - `cargo run -p understory_sheet_demos --example sheet_drag`

use kurbo::{Point, Size};
use understory_sheet::{PanTracker, Region, Sheet, SheetConfig, SheetState};
use understory_sheet_demos::{FrameClock, describe, init_tracing};

fn main() {
    init_tracing();

    let config = SheetConfig::builder()
        .threshold(0.4)
        .build()
        .expect("demo configuration is valid");
    let mut sheet = Sheet::new(config, SheetState::Medium);
    let mut state = SheetState::Medium;
    let mut clock = FrameClock::default();

    sheet.set_full_size(Size::new(390.0, 844.0));
    sheet.measure_content(Size::new(390.0, 340.0));
    println!("at rest:   {}", describe(&sheet.layout()));

    let mut pan = PanTracker::default();
    sheet.handle_pan(pan.begin(Point::new(195.0, 520.0), clock.now()));
    for y in [500.0, 460.0, 400.0, 330.0, 280.0] {
        let t = clock.tick();
        if let Some(event) = pan.moved(Point::new(195.0, y), t) {
            sheet.handle_pan(event);
        }
        let backdrop = match sheet.regions().background {
            Region::Scrim { opacity } => opacity,
            _ => 0.0,
        };
        println!(
            "dragging:  {}  progress {:>5.2}  backdrop {:.2}",
            describe(&sheet.layout()),
            sheet.drag().progress,
            backdrop
        );
    }
    let t = clock.tick();
    if let Some(event) = pan.end(Point::new(195.0, 275.0), t) {
        sheet.handle_pan(event);
    }

    while let Some(deadline) = sheet.next_deadline() {
        let now = clock.advance_to(deadline);
        if let Some(next) = sheet.poll(now, &mut state) {
            println!("settled at {next:?} after {now} ms");
        }
    }
    println!("at rest:   {}", describe(&sheet.layout()));
    assert_eq!(state, SheetState::Large);
}
