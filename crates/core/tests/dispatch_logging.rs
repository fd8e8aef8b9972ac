// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured log output from listener bookkeeping

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use relay_core::EventChannel;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tracing::Level;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn with_capture(f: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    capture.text()
}

#[derive(Debug, PartialEq)]
struct Door(u8);

impl Door {
    fn open(&mut self) {
        self.0 += 1;
    }
}

fn ping() {}

#[test]
fn prune_is_logged_with_channel_label() {
    let output = with_capture(|| {
        let channel = EventChannel::<fn()>::new().with_label("doors");
        let door = Rc::new(RefCell::new(Door(0)));
        channel.add_method(&door, Door::open);
        drop(door);
        channel.emit(());
    });

    assert!(output.contains("pruned listener with dropped receiver"));
    assert!(output.contains("channel=\"doors\""));
    assert!(output.contains("kind=method"));
}

#[test]
fn registration_is_traced() {
    let output = with_capture(|| {
        let channel = EventChannel::<fn()>::new();
        channel.add(ping);
        channel.remove(ping);
        channel.remove_all();
    });

    assert!(output.contains("listener added"));
    assert!(output.contains("listener removed"));
    assert!(output.contains("listeners cleared"));
    assert!(output.contains("channel=\"unlabeled\""));
}
