use std::collections::{HashMap, VecDeque};

use gaitbase_core::models::field::FieldDecl;
use gaitbase_core::models::value::FieldValue;
use gaitbase_core::store::FieldStore;

use crate::error::RomError;

/// Pure computation of a derived value from its inputs, in declared order.
pub type ComputeFn = Box<dyn Fn(&[&FieldValue]) -> FieldValue + Send + Sync>;

struct Binding {
    target: String,
    inputs: Vec<String>,
    compute: ComputeFn,
}

/// Dependency graph of derived fields.
///
/// Every binding is validated when it is registered, so a misconfigured
/// form fails at startup instead of on the first edit.
pub struct DerivedEngine {
    /// Declared field name -> whether it is derived.
    declared: HashMap<String, bool>,
    bindings: Vec<Binding>,
}

impl DerivedEngine {
    pub fn new<'a>(decls: impl IntoIterator<Item = &'a FieldDecl>) -> Self {
        Self {
            declared: decls
                .into_iter()
                .map(|d| (d.name.clone(), d.derived))
                .collect(),
            bindings: Vec::new(),
        }
    }

    /// Declare that `target` is computed by `compute` from `inputs`.
    pub fn register<F>(&mut self, target: &str, inputs: &[&str], compute: F) -> Result<(), RomError>
    where
        F: Fn(&[&FieldValue]) -> FieldValue + Send + Sync + 'static,
    {
        match self.declared.get(target) {
            None => {
                return Err(RomError::UndeclaredField {
                    target: target.to_string(),
                    field: target.to_string(),
                });
            }
            Some(false) => return Err(RomError::NotDerived(target.to_string())),
            Some(true) => {}
        }
        if inputs.len() < 2 {
            return Err(RomError::TooFewInputs {
                target: target.to_string(),
                count: inputs.len(),
            });
        }
        if self.bindings.iter().any(|b| b.target == target) {
            return Err(RomError::DuplicateBinding(target.to_string()));
        }
        for input in inputs {
            if !self.declared.contains_key(*input) {
                return Err(RomError::UndeclaredField {
                    target: target.to_string(),
                    field: input.to_string(),
                });
            }
            // the new edge input -> target closes a cycle iff target already reaches input
            if *input == target || self.reaches(target, input) {
                return Err(RomError::Cycle {
                    target: target.to_string(),
                    via: input.to_string(),
                });
            }
        }

        tracing::debug!(derived = %target, ?inputs, "registered derived field");
        self.bindings.push(Binding {
            target: target.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            compute: Box::new(compute),
        });
        Ok(())
    }

    /// Whether a change to `from` propagates to `to` through existing bindings.
    fn reaches(&self, from: &str, to: &str) -> bool {
        let mut stack = vec![from];
        let mut seen: Vec<&str> = Vec::new();
        while let Some(name) = stack.pop() {
            for binding in self.bindings.iter().filter(|b| b.inputs.iter().any(|i| i == name)) {
                if binding.target == to {
                    return true;
                }
                if !seen.contains(&binding.target.as_str()) {
                    seen.push(&binding.target);
                    stack.push(&binding.target);
                }
            }
        }
        false
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Inputs of a derived field, if it has a binding.
    pub fn inputs_of(&self, target: &str) -> Option<&[String]> {
        self.bindings
            .iter()
            .find(|b| b.target == target)
            .map(|b| b.inputs.as_slice())
    }

    /// Derived fields that directly use `changed`, in registration order.
    pub fn dependents(&self, changed: &str) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|b| b.inputs.iter().any(|i| i == changed))
            .map(|b| b.target.as_str())
            .collect()
    }

    fn recompute(&self, binding: &Binding, store: &mut FieldStore) -> Result<bool, RomError> {
        let value = {
            let mut values = Vec::with_capacity(binding.inputs.len());
            for input in &binding.inputs {
                let value = store.get(input).ok_or_else(|| RomError::UndeclaredField {
                    target: binding.target.clone(),
                    field: input.clone(),
                })?;
                values.push(value);
            }
            (binding.compute)(&values)
        };
        let previous = store.overwrite_derived(&binding.target, value)?;
        Ok(store.get(&binding.target) != Some(&previous))
    }

    /// Recompute everything that depends on `changed`, directly or through
    /// other derived fields. Returns the recomputed fields in the order they
    /// were updated.
    pub fn on_change(&self, store: &mut FieldStore, changed: &str) -> Result<Vec<String>, RomError> {
        let mut updated: Vec<String> = Vec::new();
        let mut queue = VecDeque::from([changed.to_string()]);
        while let Some(name) = queue.pop_front() {
            for binding in self.bindings.iter().filter(|b| b.inputs.contains(&name)) {
                self.recompute(binding, store)?;
                if !updated.contains(&binding.target) {
                    updated.push(binding.target.clone());
                }
                queue.push_back(binding.target.clone());
            }
        }
        Ok(updated)
    }

    /// Recompute every binding until the store is consistent. Returns the
    /// fields whose value changed.
    pub fn recompute_all(&self, store: &mut FieldStore) -> Result<Vec<String>, RomError> {
        let mut changed: Vec<String> = Vec::new();
        // each pass settles at least one more level of derived-from-derived fields
        for _ in 0..=self.bindings.len() {
            let mut pass_changed = false;
            for binding in &self.bindings {
                if self.recompute(binding, store)? {
                    pass_changed = true;
                    if !changed.contains(&binding.target) {
                        changed.push(binding.target.clone());
                    }
                }
            }
            if !pass_changed {
                break;
            }
        }
        Ok(changed)
    }
}
