//! Authoring session.
//!
//! The author starts from the raw placeholders found in a document and
//! shapes them into the form users will fill: merging numbered boxes into
//! one input, grouping exclusive choices into a radio group, relabelling
//! and reordering fields.
//!
//! Workflow:
//! 1. Build the editor from the placeholder list ([`FormEditor::from_placeholders`])
//!    or from a stored field map ([`FormEditor::from_json`]).
//! 2. Apply edits. Every successful edit records a full snapshot of the
//!    field map; undo/redo walk that linear history and a new edit discards
//!    the redo tail.
//! 3. Persist with [`FormEditor::to_json`] and call [`FormEditor::mark_saved`].
//!    [`FormEditor::is_dirty`] compares an md5 digest of the current map
//!    with the one taken at the last save.

use common::model::field::{FieldKind, HiddenKind};
use common::model::merge::MergeableGroup;
use common::model::radio::RadioOption;
use common::model::{FieldDefinition, FieldMap};
use log::{debug, info, warn};

use super::compute_md5;
use crate::codecs::{merged, radio};
use crate::detection::detect_mergeable_groups;
use crate::error::{EngineError, Result};
use crate::pattern::RuleClassifier;

#[derive(Debug, Clone)]
pub struct FormEditor {
    fields: FieldMap,
    /// Linear history for undo/redo. Each entry is a full snapshot of `fields`.
    history: Vec<FieldMap>,
    /// Index into `history` of the active snapshot.
    history_index: usize,
    /// Digest of the field map at the last save; `None` if never saved.
    saved_md5: Option<String>,
}

impl FormEditor {
    /// Opens an editor over a stored field map, considered saved.
    pub fn new(fields: FieldMap) -> Self {
        let saved_md5 = Some(digest(&fields));
        Self {
            history: vec![fields.clone()],
            history_index: 0,
            fields,
            saved_md5,
        }
    }

    /// Starts a new form with one plain field per placeholder, in document
    /// order. With a classifier, each field is pre-classified by the rules.
    pub fn from_placeholders<S: AsRef<str>>(
        placeholders: &[S],
        classifier: Option<&RuleClassifier>,
    ) -> Self {
        let mut fields = FieldMap::new();
        for name in placeholders {
            let name = name.as_ref();
            if fields.contains_key(name) {
                continue;
            }
            let mut field = FieldDefinition::new(name, name);
            field.order = fields.len() as u32;
            if let Some(classifier) = classifier {
                field = classifier.apply(&field);
            }
            fields.insert(name.to_string(), field);
        }
        info!("new form with {} fields", fields.len());
        Self {
            history: vec![fields.clone()],
            history_index: 0,
            fields,
            saved_md5: None,
        }
    }

    /// Opens an editor over a field map stored as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.get(key)
    }

    /// Fields shown in the form, in display order (`order`, then key).
    pub fn visible_fields(&self) -> Vec<&FieldDefinition> {
        let mut visible: Vec<&FieldDefinition> =
            self.fields.values().filter(|f| !f.is_hidden()).collect();
        visible.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.placeholder.cmp(&b.placeholder))
        });
        visible
    }

    /// Merge candidates among the placeholders not yet part of any group.
    pub fn mergeable_groups(&self) -> Vec<MergeableGroup> {
        let free: Vec<&str> = self
            .fields
            .values()
            .filter(|f| self.owning_group(f).is_none())
            .map(|f| f.placeholder.as_str())
            .collect();
        detect_mergeable_groups(&free)
    }

    /// Turns `group` into one merged field labelled `label`.
    ///
    /// The merged field keeps the first placeholder as its key and takes the
    /// earliest display position of its members; the other members become
    /// hidden constituents.
    pub fn apply_merge(&mut self, group: &MergeableGroup, label: &str, separator: &str) -> Result<()> {
        if group.len() < 2 {
            return Err(EngineError::GroupTooSmall(group.len()));
        }
        let order = self.check_free(&group.fields)?;

        let mut next = self.fields.clone();
        let mut primary = merged::create_merged_field_definition(group, label, separator);
        primary.order = order;
        next.insert(primary.placeholder.clone(), primary);
        for hidden in merged::hidden_constituents(group) {
            next.insert(hidden.placeholder.clone(), hidden);
        }
        debug!("merged {} as {label:?}", group.pattern);
        self.commit(next);
        Ok(())
    }

    /// Splits a merged field back into one plain field per constituent.
    pub fn unmerge(&mut self, key: &str) -> Result<()> {
        let field = self.existing(key)?;
        if field.kind() != FieldKind::Merged {
            return Err(EngineError::NotAGroup(key.to_string()));
        }
        let order = field.order;
        let members = field.merged_fields.clone();

        let mut next = self.fields.clone();
        for (offset, member) in members.iter().enumerate() {
            let mut plain = FieldDefinition::new(member.clone(), member.clone());
            plain.order = order + offset as u32;
            next.insert(member.clone(), plain);
        }
        self.commit(next);
        Ok(())
    }

    /// Groups the option placeholders into one radio group and returns the
    /// generated group id.
    ///
    /// Every option placeholder must be a free field. Child fields named by
    /// the options must exist; they are tagged with the group's child marker
    /// so they only show while their option is selected.
    pub fn create_radio_group(&mut self, options: Vec<RadioOption>, label: &str) -> Result<String> {
        if options.len() < 2 {
            return Err(EngineError::GroupTooSmall(options.len()));
        }
        let option_keys: Vec<String> = options.iter().map(|o| o.placeholder.clone()).collect();
        let order = self.check_free(&option_keys)?;
        let children: Vec<String> = options
            .iter()
            .flat_map(|o| o.child_fields.iter().cloned())
            .collect();
        self.check_free(&children)?;

        let (mut primary, hidden) = radio::create_radio_group_definition(options, label);
        let id = primary.radio_group_id.clone().unwrap_or_default();
        primary.order = order;

        let mut next = self.fields.clone();
        for child in &children {
            if let Some(field) = next.get_mut(child) {
                field.group = Some(radio::child_marker(&id));
            }
        }
        next.insert(primary.placeholder.clone(), primary);
        for field in hidden {
            next.insert(field.placeholder.clone(), field);
        }
        debug!("radio group {id} over {option_keys:?}");
        self.commit(next);
        Ok(id)
    }

    /// Dissolves a radio group: options and their children become plain,
    /// visible fields again.
    pub fn dissolve_radio_group(&mut self, key: &str) -> Result<()> {
        let field = self.existing(key)?;
        if field.kind() != FieldKind::Radio {
            return Err(EngineError::NotAGroup(key.to_string()));
        }
        let order = field.order;
        let options = field.radio_options.clone();

        let mut next = self.fields.clone();
        for (offset, option) in options.iter().enumerate() {
            let mut plain = FieldDefinition::new(option.placeholder.clone(), option.label.clone());
            plain.order = order + offset as u32;
            next.insert(option.placeholder.clone(), plain);
            for child in &option.child_fields {
                if let Some(field) = next.get_mut(child) {
                    field.group = None;
                }
            }
        }
        self.commit(next);
        Ok(())
    }

    /// Moves a visible field to `new_index` in display order and renumbers
    /// the visible fields `0..n`. An index past the end moves it last.
    pub fn move_field(&mut self, key: &str, new_index: usize) -> Result<()> {
        let field = self.existing(key)?;
        if field.is_hidden() {
            return Err(EngineError::UnknownField(key.to_string()));
        }
        let mut keys: Vec<String> = self
            .visible_fields()
            .into_iter()
            .map(|f| f.placeholder.clone())
            .filter(|k| k != key)
            .collect();
        keys.insert(new_index.min(keys.len()), key.to_string());

        let mut next = self.fields.clone();
        for (order, k) in keys.iter().enumerate() {
            if let Some(field) = next.get_mut(k) {
                field.order = order as u32;
            }
        }
        self.commit(next);
        Ok(())
    }

    /// Replaces the definition stored under `definition.placeholder`.
    pub fn update_field(&mut self, definition: FieldDefinition) -> Result<()> {
        self.existing(&definition.placeholder)?;
        let mut next = self.fields.clone();
        next.insert(definition.placeholder.clone(), definition);
        self.commit(next);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    /// Steps back one edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.history_index -= 1;
        self.fields = self.history[self.history_index].clone();
        true
    }

    /// Re-applies the last undone edit. Returns false when there is none.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.history_index += 1;
        self.fields = self.history[self.history_index].clone();
        true
    }

    pub fn mark_saved(&mut self) {
        self.saved_md5 = Some(digest(&self.fields));
    }

    /// True when the field map differs from the last saved state. A form
    /// that was never saved is dirty as soon as it has fields.
    pub fn is_dirty(&self) -> bool {
        self.saved_md5
            .as_ref()
            .map_or(!self.fields.is_empty(), |saved| saved != &digest(&self.fields))
    }

    fn commit(&mut self, next: FieldMap) {
        if next == self.fields {
            return;
        }
        self.history.truncate(self.history_index + 1);
        self.history.push(next.clone());
        self.history_index = self.history.len() - 1;
        self.fields = next;
    }

    fn existing(&self, key: &str) -> Result<&FieldDefinition> {
        self.fields
            .get(key)
            .ok_or_else(|| EngineError::UnknownField(key.to_string()))
    }

    /// Group a field already belongs to: the marker of a hidden member, or
    /// its own key when it is a merged or radio primary.
    fn owning_group(&self, field: &FieldDefinition) -> Option<String> {
        match field.hidden_kind() {
            Some(HiddenKind::Merged(_) | HiddenKind::RadioOption(_) | HiddenKind::RadioChild(_)) => {
                field.group.clone()
            }
            None => matches!(field.kind(), FieldKind::Merged | FieldKind::Radio)
                .then(|| field.placeholder.clone()),
        }
    }

    /// Checks that every key is an existing field outside any group and
    /// returns the earliest display position among them.
    fn check_free(&self, keys: &[String]) -> Result<u32> {
        let mut order = u32::MAX;
        for key in keys {
            let field = self.existing(key)?;
            if let Some(group) = self.owning_group(field) {
                warn!("{key} is already part of {group}");
                return Err(EngineError::AlreadyGrouped {
                    placeholder: key.clone(),
                    group,
                });
            }
            order = order.min(field.order);
        }
        Ok(if order == u32::MAX { 0 } else { order })
    }
}

fn digest(fields: &FieldMap) -> String {
    match serde_json::to_string(fields) {
        Ok(json) => compute_md5(&json),
        Err(e) => {
            warn!("cannot serialize field map for digest: {e}");
            String::new()
        }
    }
}
