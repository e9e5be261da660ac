use std::fmt::{self, Debug, Formatter};
use std::iter;
use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;
use log::warn;

use crate::data::{FieldData, MethodData};
use crate::errors::{SrgError, NameKind};
use crate::types::{JavaType, ReferenceType};
use crate::utils::{is_valid_identifier, is_valid_package};
use super::{Mappings, MappingsIter, FrozenMappings};

type ClassRenamer = Box<dyn Fn(&JavaType) -> JavaType + Send + Sync>;
type MethodRenamer = Box<dyn Fn(&MethodData) -> String + Send + Sync>;
type FieldRenamer = Box<dyn Fn(&FieldData) -> String + Send + Sync>;

/// Mappings which rename classes, methods and fields dynamically.
///
/// Unlike other mappings these have no entries of their own,
/// and just rename whatever they're given.
/// The renaming functions are expected to be pure.
/// The class renamer is only ever called with reference types,
/// and a missing renamer leaves the name unchanged.
/// Member signatures are always remapped through the class renamer.
#[derive(Default)]
pub struct RenamingMappings {
    class_renamer: Option<ClassRenamer>,
    method_renamer: Option<MethodRenamer>,
    field_renamer: Option<FieldRenamer>,
}
impl RenamingMappings {
    #[inline]
    pub fn new() -> RenamingMappings {
        RenamingMappings::default()
    }
    pub fn with_class_renamer<F>(mut self, func: F) -> Self
        where F: Fn(&JavaType) -> JavaType + Send + Sync + 'static {
        self.class_renamer = Some(Box::new(func));
        self
    }
    /// Rename methods with the given function.
    ///
    /// # Panics
    /// Looking up a method panics if the function returns an invalid identifier.
    pub fn with_method_renamer<F>(mut self, func: F) -> Self
        where F: Fn(&MethodData) -> String + Send + Sync + 'static {
        self.method_renamer = Some(Box::new(func));
        self
    }
    /// Rename fields with the given function.
    ///
    /// # Panics
    /// Looking up a field panics if the function returns an invalid identifier.
    pub fn with_field_renamer<F>(mut self, func: F) -> Self
        where F: Fn(&FieldData) -> String + Send + Sync + 'static {
        self.field_renamer = Some(Box::new(func));
        self
    }
    /// Use the renamed names of the input mappings as the originals for these mappings.
    ///
    /// The result maps each renamed name of `input` to its renaming by these mappings.
    pub fn transform_mappings(&self, input: &dyn Mappings) -> FrozenMappings {
        let classes: IndexMap<JavaType, JavaType> = input.classes()
            .map(|(_, renamed)| (renamed.clone(), self.get_class(renamed)))
            .collect();
        let fields: IndexMap<FieldData, FieldData> = input.fields()
            .map(|(_, renamed)| (renamed.clone(), self.get_field(renamed)))
            .collect();
        let methods: IndexMap<MethodData, MethodData> = input.methods()
            .map(|(_, renamed)| (renamed.clone(), self.get_method(renamed)))
            .collect();
        FrozenMappings::new(classes, fields, methods)
    }
}
impl Mappings for RenamingMappings {
    fn get_remapped_class(&self, original: &JavaType) -> Option<JavaType> {
        match self.class_renamer {
            Some(ref renamer) if original.is_reference() => {
                let renamed = renamer(original);
                if renamed != *original { Some(renamed) } else { None }
            },
            _ => None
        }
    }
    fn get_remapped_field(&self, original: &FieldData) -> Option<FieldData> {
        let renamer = self.field_renamer.as_ref()?;
        let name = renamer(original);
        assert!(is_valid_identifier(&name), "Renamed {} to invalid name {:?}", original, name);
        Some(FieldData::new_unchecked(self.get_class(original.declaring_type()), name))
    }
    fn get_remapped_method(&self, original: &MethodData) -> Option<MethodData> {
        let renamer = self.method_renamer.as_ref()?;
        let name = renamer(original);
        assert!(is_valid_identifier(&name), "Renamed {} to invalid name {:?}", original, name);
        let remapped = original.map_types(|t| self.get_class(t));
        Some(MethodData::new_unchecked(remapped.declaring_type().clone(), name, remapped.signature().clone()))
    }
    #[inline]
    fn classes(&self) -> MappingsIter<'_, JavaType> {
        Box::new(iter::empty())
    }
    #[inline]
    fn fields(&self) -> MappingsIter<'_, FieldData> {
        Box::new(iter::empty())
    }
    #[inline]
    fn methods(&self) -> MappingsIter<'_, MethodData> {
        Box::new(iter::empty())
    }
}
impl Debug for RenamingMappings {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("RenamingMappings")
            .field("class_renamer", &self.class_renamer.is_some())
            .field("method_renamer", &self.method_renamer.is_some())
            .field("field_renamer", &self.field_renamer.is_some())
            .finish()
    }
}

/// Mappings which move classes from one package into another.
///
/// Packages are dotted, and an empty package is the default package.
/// Moving a class into the default package leaves just its simple name.
pub struct PackageMappings {
    packages: Arc<IndexMap<String, String>>,
    renaming: RenamingMappings,
}
impl PackageMappings {
    pub fn new(packages: IndexMap<String, String>) -> Result<PackageMappings, SrgError> {
        for (original, renamed) in &packages {
            for package in &[original, renamed] {
                if !is_valid_package(package) {
                    return Err(SrgError::invalid_name(NameKind::Package, package))
                }
            }
        }
        let packages = Arc::new(packages);
        let renamer_packages = packages.clone();
        let renaming = RenamingMappings::new().with_class_renamer(move |original| {
            match original.as_reference() {
                Some(reference) => rename_package(&renamer_packages, reference)
                    .unwrap_or_else(|| original.clone()),
                None => original.clone()
            }
        });
        Ok(PackageMappings { packages, renaming })
    }
    #[inline]
    pub fn packages(&self) -> &IndexMap<String, String> {
        &self.packages
    }
}
fn rename_package(packages: &IndexMap<String, String>, original: &ReferenceType) -> Option<JavaType> {
    let renamed_package = packages.get(original.package_name())?;
    let renamed = if renamed_package.is_empty() {
        original.simple_name().to_string()
    } else {
        format!("{}.{}", renamed_package, original.simple_name())
    };
    match JavaType::reference(&renamed) {
        Ok(renamed) => Some(renamed),
        Err(e) => {
            warn!("Unable to move {} into package {:?}: {}", original.name(), renamed_package, e);
            None
        }
    }
}
impl Deref for PackageMappings {
    type Target = RenamingMappings;

    #[inline]
    fn deref(&self) -> &RenamingMappings {
        &self.renaming
    }
}
impl Mappings for PackageMappings {
    #[inline]
    fn get_remapped_class(&self, original: &JavaType) -> Option<JavaType> {
        self.renaming.get_remapped_class(original)
    }
    #[inline]
    fn get_remapped_field(&self, original: &FieldData) -> Option<FieldData> {
        self.renaming.get_remapped_field(original)
    }
    #[inline]
    fn get_remapped_method(&self, original: &MethodData) -> Option<MethodData> {
        self.renaming.get_remapped_method(original)
    }
    #[inline]
    fn classes(&self) -> MappingsIter<'_, JavaType> {
        self.renaming.classes()
    }
    #[inline]
    fn fields(&self) -> MappingsIter<'_, FieldData> {
        self.renaming.fields()
    }
    #[inline]
    fn methods(&self) -> MappingsIter<'_, MethodData> {
        self.renaming.methods()
    }
}
impl Debug for PackageMappings {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("PackageMappings")
            .field("packages", &self.packages)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn class(name: &str) -> JavaType {
        JavaType::from_name(name).unwrap()
    }
    fn packages(entries: &[(&str, &str)]) -> PackageMappings {
        PackageMappings::new(entries.iter()
            .map(|&(original, renamed)| (original.to_string(), renamed.to_string()))
            .collect()).unwrap()
    }

    #[test]
    fn rename_packages() {
        let mappings = packages(&[("", "net.minecraft.server"), ("org.bukkit.craftbukkit", "")]);
        assert_eq!(class("net.minecraft.server.Entity"), mappings.get_class(&class("Entity")));
        assert_eq!(class("CraftServer"), mappings.get_class(&class("org.bukkit.craftbukkit.CraftServer")));
        assert_eq!(class("org.bukkit.Bukkit"), mappings.get_class(&class("org.bukkit.Bukkit")));
        assert_eq!(class("net.minecraft.server.World[][]"), mappings.get_class(&class("World[][]")));
        assert_eq!(class("int[]"), mappings.get_class(&class("int[]")));
    }
    #[test]
    fn invalid_packages() {
        let invalid: IndexMap<String, String> = vec![("net/minecraft".to_string(), String::new())].into_iter().collect();
        match PackageMappings::new(invalid) {
            Err(SrgError::InvalidName { kind: NameKind::Package, .. }) => {},
            other => panic!("Unexpected result {:?}", other),
        }
    }
    #[test]
    fn members_follow_packages() {
        let mappings = packages(&[("", "net.minecraft.server")]);
        let method = MethodData::from_internal_name("Cow/love", "(LCow;I)V".parse().unwrap()).unwrap();
        let renamed = mappings.get_method(&method);
        assert_eq!("net/minecraft/server/Cow/love", renamed.internal_name());
        assert_eq!("(Lnet/minecraft/server/Cow;I)V", renamed.signature().descriptor());
        assert!(mappings.classes().next().is_none());
    }
    #[test]
    fn member_renamers() {
        let mappings = RenamingMappings::new()
            .with_class_renamer(|original| JavaType::reference(&format!("renamed.{}", original)).unwrap())
            .with_field_renamer(|original| format!("{}_field", original.name()))
            .with_method_renamer(|original| format!("{}_method", original.name()));
        let field = mappings.get_field(&FieldData::from_internal_name("a/b").unwrap());
        assert_eq!("renamed/a/b_field", field.internal_name());
        let method = mappings.get_method(&MethodData::from_internal_name("a/c", "(La;)La;".parse().unwrap()).unwrap());
        assert_eq!("renamed/a/c_method", method.internal_name());
        assert_eq!("(Lrenamed/a;)Lrenamed/a;", method.signature().descriptor());
    }
    #[test]
    fn missing_renamers_are_identity() {
        let mappings = RenamingMappings::new();
        let field = FieldData::from_internal_name("a/b").unwrap();
        assert_eq!(field, mappings.get_field(&field));
        assert_eq!(None, mappings.get_remapped_class(&class("a")));
    }
    #[test]
    #[should_panic(expected = "invalid name")]
    fn invalid_renamed_field() {
        let mappings = RenamingMappings::new().with_field_renamer(|_| "not valid".to_string());
        mappings.get_field(&FieldData::from_internal_name("a/b").unwrap());
    }
    #[test]
    #[should_panic(expected = "invalid name")]
    fn invalid_renamed_method() {
        let mappings = RenamingMappings::new().with_method_renamer(|_| String::new());
        mappings.get_method(&MethodData::from_internal_name("a/c", "()V".parse().unwrap()).unwrap());
    }
    #[test]
    fn renaming_is_immutable() {
        fn check_immutable(mappings: &mut dyn Mappings) {
            let class = JavaType::from_internal_name("a").unwrap();
            assert_eq!(
                Err(SrgError::UnsupportedOperation("set_class")),
                mappings.set_class(class.clone(), class.clone())
            );
            let field = FieldData::from_internal_name("a/b").unwrap();
            assert_eq!(
                Err(SrgError::UnsupportedOperation("set_field")),
                mappings.set_field(field.clone(), field)
            );
            let method = MethodData::from_internal_name("a/c", "()V".parse().unwrap()).unwrap();
            assert_eq!(
                Err(SrgError::UnsupportedOperation("set_method")),
                mappings.set_method(method.clone(), method)
            );
        }
        check_immutable(&mut RenamingMappings::new().with_field_renamer(|original| original.name().to_uppercase()));
        check_immutable(&mut packages(&[("", "net.minecraft.server")]));
    }
    #[test]
    fn transform_renamed_side() {
        let mut input = crate::mappings::SimpleMappings::new();
        input.set_class(class("aa"), class("Entity")).unwrap();
        input.set_field_name(FieldData::from_internal_name("aa/a").unwrap(), "dead").unwrap();
        let transformed = packages(&[("", "net.minecraft.server")]).transform_mappings(&input);
        assert_eq!(class("net.minecraft.server.Entity"), transformed.get_class(&class("Entity")));
        assert_eq!(class("aa"), transformed.get_class(&class("aa")));
        assert_eq!(
            "net/minecraft/server/Entity/dead",
            transformed.get_field(&FieldData::from_internal_name("Entity/dead").unwrap()).internal_name()
        );
    }
}
