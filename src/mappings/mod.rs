//! A mapping from one set of source names to another.
//!
//! Lookups are two-tiered. The `get_remapped_*` methods only consult the entries
//! a mapping actually has (or computes), while the `get_*` methods fall back to
//! the identity. Member lookups always respect class renames,
//! so a field whose declaring type was renamed is renamed along with it,
//! even without an entry of its own.
use indexmap::IndexMap;

use crate::data::{FieldData, MethodData};
use crate::errors::SrgError;
use crate::types::JavaType;

mod simple;
mod frozen;
mod chain;
mod renaming;

pub use self::simple::SimpleMappings;
pub use self::frozen::FrozenMappings;
pub use self::chain::{MappingsChain, chain};
pub use self::renaming::{RenamingMappings, PackageMappings};

pub type MappingsIter<'a, T> = Box<dyn Iterator<Item=(&'a T, &'a T)> + 'a>;

pub trait Mappings {
    /// Get the renamed class if these mappings rename it, or `None` if it passes through unchanged.
    ///
    /// Only reference types are ever renamed directly.
    fn get_remapped_class(&self, original: &JavaType) -> Option<JavaType>;
    /// Get the renamed field if there is an entry for it, ignoring class renames.
    fn get_remapped_field(&self, original: &FieldData) -> Option<FieldData>;
    /// Get the renamed method if there is an entry for it, ignoring class renames.
    fn get_remapped_method(&self, original: &MethodData) -> Option<MethodData>;

    /// Get the renamed type, or the original if there's no mapping.
    ///
    /// Arrays are remapped through their innermost element type, and primitives are never remapped.
    fn get_class(&self, original: &JavaType) -> JavaType {
        original.map_class(|class| {
            self.get_remapped_class(class).unwrap_or_else(|| class.clone())
        })
    }
    /// Get the renamed field, falling back to the original name with its declaring type remapped.
    fn get_field(&self, original: &FieldData) -> FieldData {
        self.get_remapped_field(original)
            .unwrap_or_else(|| original.map_types(|t| self.get_class(t)))
    }
    /// Get the renamed method, falling back to the original name with its declaring type and signature remapped.
    fn get_method(&self, original: &MethodData) -> MethodData {
        self.get_remapped_method(original)
            .unwrap_or_else(|| original.map_types(|t| self.get_class(t)))
    }

    fn classes(&self) -> MappingsIter<'_, JavaType>;
    fn fields(&self) -> MappingsIter<'_, FieldData>;
    fn methods(&self) -> MappingsIter<'_, MethodData>;

    #[inline]
    fn contains_class(&self, original: &JavaType) -> bool {
        self.get_remapped_class(original.innermost_type()).is_some()
    }
    #[inline]
    fn contains_field(&self, original: &FieldData) -> bool {
        self.get_remapped_field(original).is_some()
    }
    #[inline]
    fn contains_method(&self, original: &MethodData) -> bool {
        self.get_remapped_method(original).is_some()
    }

    fn set_class(&mut self, _original: JavaType, _renamed: JavaType) -> Result<(), SrgError> {
        Err(SrgError::UnsupportedOperation("set_class"))
    }
    fn set_field(&mut self, _original: FieldData, _renamed: FieldData) -> Result<(), SrgError> {
        Err(SrgError::UnsupportedOperation("set_field"))
    }
    fn set_method(&mut self, _original: MethodData, _renamed: MethodData) -> Result<(), SrgError> {
        Err(SrgError::UnsupportedOperation("set_method"))
    }

    /// An immutable copy of the current entries, independent of any later changes to these mappings
    fn snapshot(&self) -> FrozenMappings {
        FrozenMappings::new(
            self.classes().map(|(original, renamed)| (original.clone(), renamed.clone())).collect(),
            self.fields().map(|(original, renamed)| (original.clone(), renamed.clone())).collect(),
            self.methods().map(|(original, renamed)| (original.clone(), renamed.clone())).collect()
        )
    }
    /// Switch the originals and the renamed names.
    ///
    /// If several originals share a renamed name, the last one in iteration order wins.
    fn inverted(&self) -> FrozenMappings {
        self.snapshot().inverted()
    }
    /// Remap the originals of the specified mappings with these mappings.
    ///
    /// The result has exactly the same originals as `original`.
    fn transform(&self, original: &dyn Mappings) -> FrozenMappings {
        let classes: IndexMap<JavaType, JavaType> = original.classes()
            .map(|(original, _)| (original.clone(), self.get_class(original)))
            .collect();
        let fields: IndexMap<FieldData, FieldData> = original.fields()
            .map(|(original, _)| (original.clone(), self.get_field(original)))
            .collect();
        let methods: IndexMap<MethodData, MethodData> = original.methods()
            .map(|(original, _)| (original.clone(), self.get_method(original)))
            .collect();
        FrozenMappings::new(classes, fields, methods)
    }
}
impl<'a, M: Mappings + ?Sized> Mappings for &'a M {
    #[inline]
    fn get_remapped_class(&self, original: &JavaType) -> Option<JavaType> {
        (**self).get_remapped_class(original)
    }
    #[inline]
    fn get_remapped_field(&self, original: &FieldData) -> Option<FieldData> {
        (**self).get_remapped_field(original)
    }
    #[inline]
    fn get_remapped_method(&self, original: &MethodData) -> Option<MethodData> {
        (**self).get_remapped_method(original)
    }
    #[inline]
    fn get_class(&self, original: &JavaType) -> JavaType {
        (**self).get_class(original)
    }
    #[inline]
    fn get_field(&self, original: &FieldData) -> FieldData {
        (**self).get_field(original)
    }
    #[inline]
    fn get_method(&self, original: &MethodData) -> MethodData {
        (**self).get_method(original)
    }
    #[inline]
    fn classes(&self) -> MappingsIter<'_, JavaType> {
        (**self).classes()
    }
    #[inline]
    fn fields(&self) -> MappingsIter<'_, FieldData> {
        (**self).fields()
    }
    #[inline]
    fn methods(&self) -> MappingsIter<'_, MethodData> {
        (**self).methods()
    }
    #[inline]
    fn snapshot(&self) -> FrozenMappings {
        (**self).snapshot()
    }
    #[inline]
    fn inverted(&self) -> FrozenMappings {
        (**self).inverted()
    }
}
