use indexmap::IndexMap;

use crate::data::{FieldData, MethodData};
use crate::errors::{SrgError, NameKind};
use crate::types::JavaType;
use super::{Mappings, MappingsIter, FrozenMappings};

/// Mappings that can be modified in place
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleMappings {
    classes: IndexMap<JavaType, JavaType>,
    fields: IndexMap<FieldData, FieldData>,
    methods: IndexMap<MethodData, MethodData>,
}
impl SimpleMappings {
    #[inline]
    pub fn new() -> SimpleMappings {
        SimpleMappings::default()
    }
    #[inline]
    pub(crate) fn from_maps(
        classes: IndexMap<JavaType, JavaType>,
        fields: IndexMap<FieldData, FieldData>,
        methods: IndexMap<MethodData, MethodData>
    ) -> SimpleMappings {
        SimpleMappings { classes, fields, methods }
    }
    /// Rename a field, deriving the renamed declaring type from the current class mappings
    pub fn set_field_name(&mut self, original: FieldData, name: impl Into<String>) -> Result<(), SrgError> {
        let renamed = self.get_class(original.declaring_type());
        let renamed = FieldData::new(renamed, name)?;
        self.fields.insert(original, renamed);
        Ok(())
    }
    /// Rename a method, deriving the renamed declaring type and signature from the current class mappings
    pub fn set_method_name(&mut self, original: MethodData, name: impl Into<String>) -> Result<(), SrgError> {
        let renamed = original.map_types(|t| self.get_class(t)).with_name(name)?;
        self.methods.insert(original, renamed);
        Ok(())
    }
    #[inline]
    pub fn retain_classes<F: FnMut(&JavaType, &JavaType) -> bool>(&mut self, mut func: F) {
        self.classes.retain(|original, renamed| func(original, renamed))
    }
    #[inline]
    pub fn retain_fields<F: FnMut(&FieldData, &FieldData) -> bool>(&mut self, mut func: F) {
        self.fields.retain(|original, renamed| func(original, renamed))
    }
    #[inline]
    pub fn retain_methods<F: FnMut(&MethodData, &MethodData) -> bool>(&mut self, mut func: F) {
        self.methods.retain(|original, renamed| func(original, renamed))
    }
    #[inline]
    pub fn clear_classes(&mut self) {
        self.classes.clear()
    }
    #[inline]
    pub fn clear_fields(&mut self) {
        self.fields.clear()
    }
    #[inline]
    pub fn clear_methods(&mut self) {
        self.methods.clear()
    }
    /// Set a class's new name, keeping the entry even if it's renamed to itself
    pub(crate) fn insert_class(&mut self, original: JavaType, renamed: JavaType) -> Result<(), SrgError> {
        check_class(&original)?;
        check_class(&renamed)?;
        self.classes.insert(original, renamed);
        Ok(())
    }
    #[inline]
    pub(crate) fn insert_field(&mut self, original: FieldData, renamed: FieldData) {
        self.fields.insert(original, renamed);
    }
    #[inline]
    pub(crate) fn insert_method(&mut self, original: MethodData, renamed: MethodData) {
        self.methods.insert(original, renamed);
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.fields.is_empty() && self.methods.is_empty()
    }
    #[inline]
    pub fn frozen(self) -> FrozenMappings {
        FrozenMappings::new(self.classes, self.fields, self.methods)
    }
}
impl Mappings for SimpleMappings {
    #[inline]
    fn get_remapped_class(&self, original: &JavaType) -> Option<JavaType> {
        self.classes.get(original).cloned()
    }
    #[inline]
    fn get_remapped_field(&self, original: &FieldData) -> Option<FieldData> {
        self.fields.get(original).cloned()
    }
    #[inline]
    fn get_remapped_method(&self, original: &MethodData) -> Option<MethodData> {
        self.methods.get(original).cloned()
    }
    #[inline]
    fn classes(&self) -> MappingsIter<'_, JavaType> {
        Box::new(self.classes.iter())
    }
    #[inline]
    fn fields(&self) -> MappingsIter<'_, FieldData> {
        Box::new(self.fields.iter())
    }
    #[inline]
    fn methods(&self) -> MappingsIter<'_, MethodData> {
        Box::new(self.methods.iter())
    }
    /// Set a class's new name, removing the entry if it's renamed to itself.
    ///
    /// Both types must be reference types.
    fn set_class(&mut self, original: JavaType, renamed: JavaType) -> Result<(), SrgError> {
        check_class(&original)?;
        check_class(&renamed)?;
        if original == renamed {
            self.classes.shift_remove(&original);
        } else {
            self.classes.insert(original, renamed);
        }
        Ok(())
    }
    #[inline]
    fn set_field(&mut self, original: FieldData, renamed: FieldData) -> Result<(), SrgError> {
        self.insert_field(original, renamed);
        Ok(())
    }
    #[inline]
    fn set_method(&mut self, original: MethodData, renamed: MethodData) -> Result<(), SrgError> {
        self.insert_method(original, renamed);
        Ok(())
    }
}

fn check_class(t: &JavaType) -> Result<(), SrgError> {
    if t.is_reference() {
        Ok(())
    } else {
        Err(SrgError::invalid_name(NameKind::Type, &t.name()))
    }
}
