//! Horizon Sourcing Reorder Example
//!
//! Drives a console "view" from an array provider: programmatic edits are
//! printed as animated batches, a user drag is committed silently, and a
//! content swap reloads everything.
//!
//! Run with: RUST_LOG=horizon_sourcing=debug cargo run -p horizon-sourcing --example reorder

use std::sync::Arc;

use horizon_sourcing::prelude::*;
use parking_lot::Mutex;

/// Prints every batch primitive and keeps the displayed counts.
#[derive(Default)]
struct ConsoleView {
    sections: Vec<usize>,
    depth: usize,
}

impl ConsoleView {
    fn say(&self, line: impl AsRef<str>) {
        println!("{}{}", "  ".repeat(self.depth), line.as_ref());
    }
}

impl BatchView for ConsoleView {
    fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.sections.get(section).copied().unwrap_or(0)
    }

    fn reload_data(&mut self) {
        self.say("reload data");
    }

    fn begin_updates(&mut self) {
        self.say("begin updates");
        self.depth += 1;
    }

    fn end_updates(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.say("end updates");
    }

    fn insert_item(&mut self, at: Coordinate) {
        self.say(format!("insert {at}"));
    }

    fn delete_item(&mut self, at: Coordinate) {
        self.say(format!("delete {at}"));
    }

    fn move_item(&mut self, from: Coordinate, to: Coordinate) {
        self.say(format!("move {from} -> {to}"));
    }

    fn reload_item(&mut self, at: Coordinate) {
        self.say(format!("reload {at}"));
    }

    fn insert_section(&mut self, index: usize) {
        self.say(format!("insert section {index}"));
    }

    fn delete_section(&mut self, index: usize) {
        self.say(format!("delete section {index}"));
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.say(format!("move section {from} -> {to}"));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = SourcingConfig::from_toml_str(
        r#"
        [modifier]
        can_move_items = true
        can_delete_items = true
        "#,
    )?;

    let provider = Arc::new(ArrayDataProvider::from_sections(vec![
        vec!["milk", "eggs", "bread"],
        vec!["soap"],
    ]));
    let view = Arc::new(Mutex::new(ConsoleView {
        sections: vec![3, 1],
        depth: 0,
    }));
    let _animator = ChangeAnimator::builder(&view, &provider)
        .config(config.animator)
        .build()?;
    let modifier = DataModifier::new(provider.clone(), config.modifier);

    println!("-- programmatic move");
    provider.move_item(Coordinate::new(0, 0), Coordinate::new(1, 1), false)?;
    view.lock().sections = vec![2, 2];

    println!("-- user drag (no view calls expected)");
    let (from, to) = (Coordinate::new(0, 1), Coordinate::new(0, 0));
    if modifier.can_move_item(from) {
        modifier.move_item(from, to, false)?;
    }

    println!("-- delete");
    modifier.delete_item(Coordinate::new(1, 0))?;
    view.lock().sections = vec![2, 1];

    println!("-- swap content");
    provider.set_content(vec![vec!["tea"]]);
    view.lock().sections = vec![1];

    println!("final content: {:?}", provider.content().sections());
    Ok(())
}
