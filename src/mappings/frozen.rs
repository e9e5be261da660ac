use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use lazycell::AtomicLazyCell;
use log::warn;

use crate::data::{FieldData, MethodData};
use crate::types::JavaType;
use crate::utils::is_valid_package;
use super::{Mappings, MappingsIter, SimpleMappings, PackageMappings};

struct FrozenData {
    classes: IndexMap<JavaType, JavaType>,
    fields: IndexMap<FieldData, FieldData>,
    methods: IndexMap<MethodData, MethodData>,
    inverted: AtomicLazyCell<FrozenMappings>,
}

/// Mappings which can't be modified.
///
/// Cloning is cheap, since the underlying data is shared.
#[derive(Clone)]
pub struct FrozenMappings(Arc<FrozenData>);
impl FrozenMappings {
    pub fn new(
        classes: IndexMap<JavaType, JavaType>,
        fields: IndexMap<FieldData, FieldData>,
        methods: IndexMap<MethodData, MethodData>
    ) -> FrozenMappings {
        FrozenMappings(Arc::new(FrozenData {
            classes, fields, methods, inverted: AtomicLazyCell::new()
        }))
    }
    #[inline]
    pub fn empty() -> FrozenMappings {
        FrozenMappings::new(IndexMap::new(), IndexMap::new(), IndexMap::new())
    }
    #[inline]
    pub fn class_count(&self) -> usize {
        self.0.classes.len()
    }
    #[inline]
    pub fn field_count(&self) -> usize {
        self.0.fields.len()
    }
    #[inline]
    pub fn method_count(&self) -> usize {
        self.0.methods.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.class_count() == 0 && self.field_count() == 0 && self.method_count() == 0
    }
    /// Copy these mappings into a mutable builder
    pub fn rebuild(&self) -> SimpleMappings {
        SimpleMappings::from_maps(self.0.classes.clone(), self.0.fields.clone(), self.0.methods.clone())
    }
    /// Use the renamed names of these mappings as the originals of the next
    pub fn chain<M: Mappings>(&self, next: M) -> FrozenMappings {
        super::chain(vec![self as &dyn Mappings, &next])
    }
    /// Move the renamed classes between packages.
    ///
    /// The function is given the internal name of each renamed package (`""` for the default package),
    /// and returns the internal name of its replacement, or `None` to leave it alone.
    /// Invalid replacements are logged and skipped.
    pub fn transform_packages<F>(&self, func: F) -> FrozenMappings
        where F: Fn(&str) -> Option<String> {
        let mut packages = IndexMap::new();
        for package in self.renamed_packages() {
            if let Some(renamed) = func(&package.replace('.', "/")) {
                let renamed = renamed.replace('/', ".");
                if is_valid_package(&renamed) {
                    packages.insert(package, renamed);
                } else {
                    warn!("Unable to move package {:?} into invalid package {:?}", package, renamed);
                }
            }
        }
        match PackageMappings::new(packages) {
            Ok(package_mappings) => self.chain(&package_mappings),
            Err(e) => {
                warn!("Unable to transform packages: {}", e);
                self.clone()
            }
        }
    }
    fn renamed_packages(&self) -> IndexSet<String> {
        let mut result = IndexSet::new();
        {
            let mut visit = |t: &JavaType| {
                if let Some(reference) = t.innermost_type().as_reference() {
                    if !result.contains(reference.package_name()) {
                        result.insert(reference.package_name().to_string());
                    }
                }
            };
            for renamed in self.0.classes.values() {
                visit(renamed);
            }
            for renamed in self.0.fields.values() {
                visit(renamed.declaring_type());
            }
            for renamed in self.0.methods.values() {
                visit(renamed.declaring_type());
                renamed.parameter_types().iter().for_each(&mut visit);
                visit(renamed.return_type());
            }
        }
        result
    }
    fn compute_inverted(&self) -> FrozenMappings {
        let classes: IndexMap<JavaType, JavaType> = self.0.classes.iter()
            .map(|(original, renamed)| (renamed.clone(), original.clone()))
            .collect();
        let fields: IndexMap<FieldData, FieldData> = self.0.fields.iter()
            .map(|(original, renamed)| (renamed.clone(), original.clone()))
            .collect();
        let methods: IndexMap<MethodData, MethodData> = self.0.methods.iter()
            .map(|(original, renamed)| (renamed.clone(), original.clone()))
            .collect();
        if classes.len() != self.class_count() || fields.len() != self.field_count()
            || methods.len() != self.method_count() {
            warn!(
                "Inverting mappings with duplicate renamed names, lost {} classes, {} fields and {} methods",
                self.class_count() - classes.len(),
                self.field_count() - fields.len(),
                self.method_count() - methods.len()
            );
        }
        FrozenMappings::new(classes, fields, methods)
    }
}
impl Mappings for FrozenMappings {
    #[inline]
    fn get_remapped_class(&self, original: &JavaType) -> Option<JavaType> {
        self.0.classes.get(original).cloned()
    }
    #[inline]
    fn get_remapped_field(&self, original: &FieldData) -> Option<FieldData> {
        self.0.fields.get(original).cloned()
    }
    #[inline]
    fn get_remapped_method(&self, original: &MethodData) -> Option<MethodData> {
        self.0.methods.get(original).cloned()
    }
    #[inline]
    fn classes(&self) -> MappingsIter<'_, JavaType> {
        Box::new(self.0.classes.iter())
    }
    #[inline]
    fn fields(&self) -> MappingsIter<'_, FieldData> {
        Box::new(self.0.fields.iter())
    }
    #[inline]
    fn methods(&self) -> MappingsIter<'_, MethodData> {
        Box::new(self.0.methods.iter())
    }
    #[inline]
    fn snapshot(&self) -> FrozenMappings {
        self.clone()
    }
    fn inverted(&self) -> FrozenMappings {
        if let Some(inverted) = self.0.inverted.borrow() {
            return inverted.clone();
        }
        let inverted = self.compute_inverted();
        // Someone else may have filled it first, which is fine since the result is the same
        let _ = self.0.inverted.fill(inverted.clone());
        inverted
    }
}
impl Default for FrozenMappings {
    #[inline]
    fn default() -> Self {
        FrozenMappings::empty()
    }
}
impl PartialEq for FrozenMappings {
    fn eq(&self, other: &FrozenMappings) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || (self.0.classes == other.0.classes
            && self.0.fields == other.0.fields
            && self.0.methods == other.0.methods)
    }
}
impl Eq for FrozenMappings {}
impl Debug for FrozenMappings {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FrozenMappings")
            .field("classes", &self.0.classes)
            .field("fields", &self.0.fields)
            .field("methods", &self.0.methods)
            .finish()
    }
}
impl From<SimpleMappings> for FrozenMappings {
    #[inline]
    fn from(mappings: SimpleMappings) -> Self {
        mappings.frozen()
    }
}
