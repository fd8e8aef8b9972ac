// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Demo sections
//!
//! Each section builds its own channels and prints what every invocation
//! returns, so the output reads as a transcript of channel behavior.

use clap::ValueEnum;
use relay_core::EventChannel;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Section {
    /// Replace every listener with a single one
    Replace,
    /// Register free functions with `+=`
    Add,
    /// Unregister free functions with `-=`
    Remove,
    /// Remove every listener
    Clear,
    /// Bind methods on mutable and read-only receivers
    Bind,
    /// Drop a receiver and watch its listener disappear
    Prune,
    /// Clone a channel
    Duplicate,
}

impl Section {
    pub fn run<W: Write>(self, out: &mut W, receiver_id: u32) -> io::Result<()> {
        writeln!(out, "== {}", self.name())?;
        match self {
            Section::Replace => replace(out),
            Section::Add => add(out),
            Section::Remove => remove(out),
            Section::Clear => clear(out),
            Section::Bind => bind(out, receiver_id),
            Section::Prune => prune(out, receiver_id),
            Section::Duplicate => duplicate(out, receiver_id),
        }
    }

    fn name(self) -> String {
        self.to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default()
    }
}

/// Sample receiver; two foos are the same foo when their ids match
#[derive(Debug, Clone)]
pub struct Foo {
    id: u32,
    presses: u32,
}

impl PartialEq for Foo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Foo {
    pub fn new(id: u32) -> Self {
        Self { id, presses: 0 }
    }

    fn press(&mut self) -> String {
        self.presses += 1;
        format!("foo {} press #{}", self.id, self.presses)
    }

    fn describe(&self) -> String {
        format!("foo {} (const)", self.id)
    }
}

fn greet() -> String {
    "greet()".to_string()
}

fn farewell() -> String {
    "farewell()".to_string()
}

fn echo(x: i32) -> i32 {
    x
}

fn square(x: i32) -> i32 {
    x * x
}

fn sum_parts(whole: i32, fraction: f32, label: String, enabled: bool) -> f32 {
    if enabled && !label.is_empty() {
        whole as f32 + fraction
    } else {
        0.0
    }
}

type Greeting = EventChannel<fn() -> String>;
type Unary = EventChannel<fn(i32) -> i32>;

fn replace<W: Write>(out: &mut W) -> io::Result<()> {
    let channel = Greeting::new();

    writeln!(out, "channel.replace(greet)")?;
    channel.replace(greet);
    writeln!(out, "  -> {:?}", channel.invoke(()))?;

    writeln!(out, "channel.replace(farewell)")?;
    channel.replace(farewell);
    writeln!(out, "  -> {:?}", channel.invoke(()))?;
    Ok(())
}

fn add<W: Write>(out: &mut W) -> io::Result<()> {
    let mut unary = Unary::new().with_label("unary");
    unary += echo;
    unary += square;
    writeln!(out, "unary += echo, square")?;
    writeln!(out, "  unary(7) -> {:?}", unary.invoke((7,)))?;

    let mut mixed = EventChannel::<fn(i32, f32, String, bool) -> f32>::new();
    mixed += sum_parts;
    writeln!(out, "mixed += sum_parts")?;
    writeln!(
        out,
        "  mixed(2, 0.5, \"hi\", true) -> {:?}",
        mixed.invoke((2, 0.5, "hi".to_string(), true))
    )?;
    Ok(())
}

fn remove<W: Write>(out: &mut W) -> io::Result<()> {
    let unary = Unary::new().with_label("unary");
    unary.add(echo);
    unary.add(square);
    unary.add(echo);
    writeln!(out, "unary: echo, square, echo")?;

    for _ in 0..3 {
        let removed = unary.remove(echo);
        writeln!(
            out,
            "  unary -= echo (removed={}) -> {:?}",
            removed,
            unary.invoke((7,))
        )?;
    }
    Ok(())
}

fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    let unary = Unary::new().with_label("unary");
    unary.add(echo);
    unary.add(square);
    writeln!(out, "unary has {} listeners", unary.len())?;

    unary.remove_all();
    writeln!(out, "unary.remove_all()")?;
    writeln!(out, "  unary(3) -> {:?}", unary.invoke((3,)))?;
    Ok(())
}

fn bind<W: Write>(out: &mut W, receiver_id: u32) -> io::Result<()> {
    let receiver = Rc::new(RefCell::new(Foo::new(receiver_id)));
    let shared = Rc::new(Foo::new(receiver_id));
    let channel = Greeting::new().with_label("bind");

    channel.add(greet);
    channel.add_method(&receiver, Foo::press);
    channel.add_const_method(&receiver, Foo::describe);
    channel.add_shared_method(&shared, Foo::describe);
    writeln!(out, "add greet, foo.press, foo.describe, shared.describe")?;
    writeln!(out, "  -> {:?}", channel.invoke(()))?;

    let removed = channel.remove_const_method(&receiver, Foo::describe);
    report_removal(out, &channel, "foo.describe", removed)?;
    let removed = channel.remove_method(&receiver, Foo::press);
    report_removal(out, &channel, "foo.press", removed)?;
    let removed = channel.remove(greet);
    report_removal(out, &channel, "greet", removed)?;
    // receiver and shared compare equal, so this takes shared's binding
    let removed = channel.remove_const_method(&receiver, Foo::describe);
    report_removal(out, &channel, "foo.describe", removed)?;
    let removed = channel.remove_shared_method(&shared, Foo::describe);
    report_removal(out, &channel, "shared.describe", removed)
}

fn report_removal<W: Write>(
    out: &mut W,
    channel: &Greeting,
    name: &str,
    removed: bool,
) -> io::Result<()> {
    writeln!(out, "remove {} (removed={})", name, removed)?;
    writeln!(out, "  -> {:?}", channel.invoke(()))
}

fn prune<W: Write>(out: &mut W, receiver_id: u32) -> io::Result<()> {
    let channel = Greeting::new().with_label("prune");
    let receiver = Rc::new(RefCell::new(Foo::new(receiver_id)));
    channel.add_method(&receiver, Foo::press);
    channel.add(greet);

    writeln!(out, "add foo.press, greet")?;
    writeln!(out, "  -> {:?}", channel.invoke(()))?;
    writeln!(out, "listeners: {}", channel.len())?;

    drop(receiver);
    writeln!(out, "drop foo")?;
    writeln!(out, "listeners: {}", channel.len())?;
    writeln!(out, "  -> {:?}", channel.invoke(()))?;
    writeln!(out, "listeners: {}", channel.len())?;
    Ok(())
}

fn duplicate<W: Write>(out: &mut W, receiver_id: u32) -> io::Result<()> {
    let receiver = Rc::new(RefCell::new(Foo::new(receiver_id)));
    let original = Greeting::new().with_label("original");
    original.add(greet);
    original.add_const_method(&receiver, Foo::describe);

    let mut copy = original.clone();
    copy += farewell;
    writeln!(out, "copy = original.clone(); copy += farewell")?;
    writeln!(out, "  original -> {:?}", original.invoke(()))?;
    writeln!(out, "  copy -> {:?}", copy.invoke(()))?;

    drop(receiver);
    writeln!(out, "drop foo")?;
    writeln!(out, "  original -> {:?}", original.invoke(()))?;
    writeln!(out, "  copy -> {:?}", copy.invoke(()))?;
    Ok(())
}

#[cfg(test)]
#[path = "sections_tests.rs"]
mod tests;
