//! Decorative visual effects. Each submodule owns one effect: `spark` is a
//! frame-driven particle emitter, `ripple` a one-shot click pulse, `float` a
//! continuous hover oscillation. The page layer pulls their CSS through a
//! [`StyleRegistry`] so each rule lands in the document once.

pub mod float;
pub mod ripple;
pub mod spark;

use std::collections::HashSet;

/// Collects effect stylesheets for one document. Mirrors the id-guarded
/// `<style>` injection the effects rely on: inserting a rule under an id that
/// is already present is a no-op.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    ids: HashSet<&'static str>,
    css: String,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the rule was newly added.
    pub fn insert(&mut self, id: &'static str, rules: &str) -> bool {
        if !self.ids.insert(id) {
            return false;
        }
        if !self.css.is_empty() {
            self.css.push('\n');
        }
        self.css.push_str(rules);
        true
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}
