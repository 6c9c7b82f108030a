//! A mock view with toolkit batch-update semantics.
//!
//! Counts only change when a batch closes. At that point the pending
//! primitives are folded into the displayed counts the way list toolkits do
//! it (deletions against the pre-batch state, insertions against the
//! post-batch state) and the result is compared with the data source. A
//! mismatch is recorded rather than raised so tests can assert on it.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use horizon_sourcing::model::{Coordinate, Edit, SectionedSource};
use horizon_sourcing::view::BatchView;
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ReloadData,
    BeginUpdates,
    EndUpdates,
    InsertItem(Coordinate),
    DeleteItem(Coordinate),
    MoveItem(Coordinate, Coordinate),
    ReloadItem(Coordinate),
    InsertSection(usize),
    DeleteSection(usize),
    MoveSection(usize, usize),
    ReloadSection(usize),
}

impl Call {
    /// Whether this call changes or redraws displayed items.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Call::ReloadData | Call::BeginUpdates | Call::EndUpdates)
    }
}

type CountSource = Box<dyn Fn() -> Vec<usize> + Send>;

pub struct MockView {
    sections: Vec<usize>,
    pending: Vec<Edit>,
    pending_section_reloads: Vec<usize>,
    in_batch: bool,
    source: CountSource,
    section_reload: bool,
    /// Every call received, in order.
    pub calls: Vec<Call>,
    /// Number of batches closed.
    pub batches: usize,
    /// Displayed counts observed at each primitive call inside a batch.
    pub samples: Vec<Vec<usize>>,
    /// Counts that disagreed with the data source when a batch closed.
    pub inconsistencies: Vec<String>,
}

pub fn model_counts(provider: &dyn SectionedSource) -> Vec<usize> {
    (0..provider.section_count())
        .map(|section| provider.item_count(section).unwrap_or(0))
        .collect()
}

impl MockView {
    /// A view whose data source is `provider`. It starts out empty, as a
    /// real view does before its first reload.
    pub fn new<P: SectionedSource + 'static>(provider: &Arc<P>) -> Self {
        let weak = Arc::downgrade(provider);
        Self {
            sections: Vec::new(),
            pending: Vec::new(),
            pending_section_reloads: Vec::new(),
            in_batch: false,
            source: Box::new(move || {
                weak.upgrade()
                    .map(|provider| model_counts(provider.as_ref()))
                    .unwrap_or_default()
            }),
            section_reload: true,
            calls: Vec::new(),
            batches: 0,
            samples: Vec::new(),
            inconsistencies: Vec::new(),
        }
    }

    pub fn shared<P: SectionedSource + 'static>(provider: &Arc<P>) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::new(provider)))
    }

    pub fn without_section_reload(mut self) -> Self {
        self.section_reload = false;
        self
    }

    pub fn counts(&self) -> Vec<usize> {
        self.sections.clone()
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn primitive_calls(&self) -> usize {
        self.calls.iter().filter(|call| call.is_primitive()).count()
    }

    /// Mirrors a drag the user performed on screen.
    pub fn user_moved(&mut self, from: Coordinate, to: Coordinate) {
        self.sections[from.section] -= 1;
        self.sections[to.section] += 1;
    }

    /// Forgets the displayed items of `section`, as if edits had been missed.
    pub fn forget_items(&mut self, section: usize) {
        self.sections[section] = 0;
    }

    fn record(&mut self, call: Call, edit: Option<Edit>) {
        assert!(self.in_batch, "{call:?} issued outside a batch");
        self.samples.push(self.sections.clone());
        self.calls.push(call);
        if let Some(edit) = edit {
            self.pending.push(edit);
        }
    }

    fn commit(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        let reloads = std::mem::take(&mut self.pending_section_reloads);
        let model = (self.source)();

        let mut pre = self.sections.clone();
        let mut removed = BTreeSet::new();
        for edit in &pending {
            match *edit {
                Edit::DeleteItem(at) | Edit::MoveItem { from: at, .. } => {
                    match pre.get_mut(at.section) {
                        Some(count) if *count > 0 => *count -= 1,
                        _ => self.inconsistencies.push(format!("delete of missing item {at}")),
                    }
                }
                Edit::DeleteSection(index) | Edit::MoveSection { from: index, .. } => {
                    removed.insert(index);
                }
                _ => {}
            }
        }

        let mut inserted: Vec<(usize, usize)> = pending
            .iter()
            .filter_map(|edit| match *edit {
                Edit::InsertSection(index) => {
                    Some((index, model.get(index).copied().unwrap_or(0)))
                }
                Edit::MoveSection { from, to } => Some((to, pre.get(from).copied().unwrap_or(0))),
                _ => None,
            })
            .collect();
        inserted.sort_by_key(|(index, _)| *index);

        let mut post: Vec<usize> = pre
            .iter()
            .enumerate()
            .filter(|(index, _)| !removed.contains(index))
            .map(|(_, count)| *count)
            .collect();
        for (index, count) in inserted {
            if index > post.len() {
                self.inconsistencies
                    .push(format!("section {index} inserted past the end"));
                continue;
            }
            post.insert(index, count);
        }

        for edit in &pending {
            if let Edit::InsertItem(at) | Edit::MoveItem { to: at, .. } = *edit {
                match post.get_mut(at.section) {
                    Some(count) => *count += 1,
                    None => self.inconsistencies.push(format!("insert into missing section {at}")),
                }
            }
        }
        for index in reloads {
            if let (Some(count), Some(fresh)) = (post.get_mut(index), model.get(index)) {
                *count = *fresh;
            }
        }

        if post != model {
            self.inconsistencies
                .push(format!("displayed {post:?} but data source has {model:?}"));
        }
        self.sections = post;
    }
}

impl BatchView for MockView {
    fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.sections.get(section).copied().unwrap_or(0)
    }

    fn reload_data(&mut self) {
        self.calls.push(Call::ReloadData);
        self.sections = (self.source)();
    }

    fn begin_updates(&mut self) {
        assert!(!self.in_batch, "nested batch");
        self.in_batch = true;
        self.calls.push(Call::BeginUpdates);
    }

    fn end_updates(&mut self) {
        assert!(self.in_batch, "end_updates without begin_updates");
        self.in_batch = false;
        self.calls.push(Call::EndUpdates);
        self.batches += 1;
        self.commit();
    }

    fn insert_item(&mut self, at: Coordinate) {
        self.record(Call::InsertItem(at), Some(Edit::InsertItem(at)));
    }

    fn delete_item(&mut self, at: Coordinate) {
        self.record(Call::DeleteItem(at), Some(Edit::DeleteItem(at)));
    }

    fn move_item(&mut self, from: Coordinate, to: Coordinate) {
        self.record(Call::MoveItem(from, to), Some(Edit::MoveItem { from, to }));
    }

    fn reload_item(&mut self, at: Coordinate) {
        self.record(Call::ReloadItem(at), None);
    }

    fn insert_section(&mut self, index: usize) {
        self.record(Call::InsertSection(index), Some(Edit::InsertSection(index)));
    }

    fn delete_section(&mut self, index: usize) {
        self.record(Call::DeleteSection(index), Some(Edit::DeleteSection(index)));
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.record(Call::MoveSection(from, to), Some(Edit::MoveSection { from, to }));
    }

    fn supports_section_reload(&self) -> bool {
        self.section_reload
    }

    fn reload_section(&mut self, index: usize) {
        self.record(Call::ReloadSection(index), None);
        self.pending_section_reloads.push(index);
    }
}
