use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::data::{FieldData, MethodData};
use crate::errors::SrgError;
use crate::types::JavaType;
use super::{Mappings, MappingsIter, FrozenMappings};

/// The renamed names already claimed by an earlier layer of the chain
#[derive(Default)]
struct ClaimedTargets {
    classes: IndexSet<JavaType>,
    fields: IndexSet<FieldData>,
    methods: IndexSet<MethodData>,
}

/// Compose an ordered list of layers into a single immutable mapping,
/// equivalent to applying each layer in turn.
///
/// The originals of the result are the originals of the first layer.
pub struct MappingsChain<'a> {
    layers: Vec<&'a dyn Mappings>,
    only_first_original: bool,
}
impl<'a> MappingsChain<'a> {
    #[inline]
    pub fn new() -> MappingsChain<'a> {
        MappingsChain { layers: Vec::new(), only_first_original: false }
    }
    #[inline]
    pub fn with(mut self, layer: &'a dyn Mappings) -> Self {
        self.layers.push(layer);
        self
    }
    /// Reject layers after the first that map names which aren't already renamed by the chain.
    ///
    /// Later layers may then only rename existing entries, never introduce new ones.
    #[inline]
    pub fn only_first_original(mut self, only_first_original: bool) -> Self {
        self.only_first_original = only_first_original;
        self
    }
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
    pub fn build(&self) -> Result<FrozenMappings, SrgError> {
        let mut claimed = ClaimedTargets::default();
        let mut chained = FrozenMappings::empty();
        for (index, &layer) in self.layers.iter().enumerate() {
            if self.only_first_original && index > 0 {
                check_known(&chained, layer, index)?;
            }
            chained = chain_layer(&chained, layer, index, &mut claimed);
        }
        Ok(chained)
    }
}
impl<'a> Default for MappingsChain<'a> {
    #[inline]
    fn default() -> Self {
        MappingsChain::new()
    }
}

/// Chain the specified layers together, allowing later layers to introduce new entries.
pub fn chain<'a, I>(layers: I) -> FrozenMappings where I: IntoIterator<Item=&'a dyn Mappings> {
    let mut claimed = ClaimedTargets::default();
    let mut chained = FrozenMappings::empty();
    for (index, layer) in layers.into_iter().enumerate() {
        chained = chain_layer(&chained, layer, index, &mut claimed);
    }
    chained
}

fn check_known(chained: &FrozenMappings, layer: &dyn Mappings, index: usize) -> Result<(), SrgError> {
    let inverted = chained.inverted();
    let ambiguous = |name: String| SrgError::AmbiguousChain { layer: index, name };
    for (original, _) in layer.classes() {
        if inverted.get_remapped_class(original).is_none() {
            return Err(ambiguous(original.name()))
        }
    }
    for (original, _) in layer.fields() {
        if !inverted.contains_field(original) && !inverted.contains_class(original.declaring_type()) {
            return Err(ambiguous(original.internal_name()))
        }
    }
    for (original, _) in layer.methods() {
        if !inverted.contains_method(original) && !inverted.contains_class(original.declaring_type()) {
            return Err(ambiguous(original.to_string()))
        }
    }
    Ok(())
}

fn chain_layer(
    chained: &FrozenMappings,
    layer: &dyn Mappings,
    index: usize,
    claimed: &mut ClaimedTargets
) -> FrozenMappings {
    let inverted = chained.inverted();
    let mut classes = IndexMap::new();
    let mut fields = IndexMap::new();
    let mut methods = IndexMap::new();
    claim_entries(layer.classes(), |t| inverted.get_class(t), &mut claimed.classes, &mut classes);
    claim_entries(layer.fields(), |f| inverted.get_field(f), &mut claimed.fields, &mut fields);
    claim_entries(layer.methods(), |m| inverted.get_method(m), &mut claimed.methods, &mut methods);
    let claimed_counts = (classes.len(), fields.len(), methods.len());
    carry_entries(chained.classes(), |t| layer.get_class(t), &mut classes);
    carry_entries(chained.fields(), |f| layer.get_field(f), &mut fields);
    carry_entries(chained.methods(), |m| layer.get_method(m), &mut methods);
    debug!(
        "Chained layer {}: {} classes, {} fields and {} methods of its own, {} classes, {} fields and {} methods total",
        index, claimed_counts.0, claimed_counts.1, claimed_counts.2,
        classes.len(), fields.len(), methods.len()
    );
    FrozenMappings::new(classes, fields, methods)
}

/// Record the layer's own entries under their true originals,
/// unless an earlier layer already claimed the renamed name.
fn claim_entries<'a, T, F>(
    entries: MappingsIter<'a, T>,
    true_original: F,
    claimed: &mut IndexSet<T>,
    result: &mut IndexMap<T, T>
) where T: Clone + Eq + Hash + 'a, F: Fn(&T) -> T {
    for (original, renamed) in entries {
        if claimed.insert(renamed.clone()) {
            result.insert(true_original(original), renamed.clone());
        }
    }
}

/// Rename the existing entries of the chain through the layer
fn carry_entries<'a, T, F>(
    entries: MappingsIter<'a, T>,
    rename: F,
    result: &mut IndexMap<T, T>
) where T: Clone + Eq + Hash + 'a, F: Fn(&T) -> T {
    for (original, renamed) in entries {
        result.insert(original.clone(), rename(renamed));
    }
}
