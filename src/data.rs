//! Fields and methods, identified by their declaring type and name.
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

use serde_derive::{Serialize, Deserialize};

use crate::errors::{SrgError, NameKind};
use crate::signature::MethodSignature;
use crate::types::JavaType;
use crate::utils::is_valid_identifier;

/// Split a joined name like `net/minecraft/server/Entity/dead` at its last `/`,
/// into the internal name of the owner and the name of the member.
pub fn split_qualified_member(joined_name: &str) -> Result<(&str, &str), SrgError> {
    match joined_name.rfind('/') {
        Some(index) if index > 0 && index < joined_name.len() - 1 => {
            Ok((&joined_name[..index], &joined_name[(index + 1)..]))
        },
        _ => Err(SrgError::invalid_name(NameKind::Member, joined_name))
    }
}

#[inline]
fn check_identifier(name: &str) -> Result<(), SrgError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(SrgError::invalid_name(NameKind::Identifier, name))
    }
}

/// A field's name and declaring type.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldData {
    declaring_type: JavaType,
    name: String
}
impl FieldData {
    pub fn new(declaring_type: JavaType, name: impl Into<String>) -> Result<FieldData, SrgError> {
        let name = name.into();
        check_identifier(&name)?;
        Ok(FieldData { declaring_type, name })
    }
    /// Create field data whose name is already known to be valid
    #[inline]
    pub(crate) fn new_unchecked(declaring_type: JavaType, name: String) -> FieldData {
        debug_assert!(is_valid_identifier(&name), "Invalid name: {}", name);
        FieldData { declaring_type, name }
    }
    /// Parse a joined name like `obf4/a`
    pub fn from_internal_name(joined_name: &str) -> Result<FieldData, SrgError> {
        let (owner, name) = split_qualified_member(joined_name)?;
        FieldData::new(JavaType::from_internal_name(owner)?, name)
    }
    #[inline]
    pub fn declaring_type(&self) -> &JavaType {
        &self.declaring_type
    }
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The internal name of this field, in the format `${internal type name}/${field name}`
    #[inline]
    pub fn internal_name(&self) -> String {
        format!("{}/{}", self.declaring_type.internal_name(), self.name)
    }
    pub fn with_name(&self, name: impl Into<String>) -> Result<FieldData, SrgError> {
        FieldData::new(self.declaring_type.clone(), name)
    }
    #[inline]
    pub fn with_declaring_type(&self, declaring_type: JavaType) -> FieldData {
        FieldData { declaring_type, name: self.name.clone() }
    }
    #[inline]
    pub fn map_types<F>(&self, func: F) -> FieldData where F: FnOnce(&JavaType) -> JavaType {
        self.with_declaring_type(func(&self.declaring_type))
    }
    #[inline]
    pub fn has_same_types(&self, other: &FieldData) -> bool {
        self.declaring_type == other.declaring_type
    }
}
impl Display for FieldData {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.internal_name())
    }
}
impl TryFrom<String> for FieldData {
    type Error = SrgError;

    #[inline]
    fn try_from(joined_name: String) -> Result<FieldData, SrgError> {
        FieldData::from_internal_name(&joined_name)
    }
}
impl From<FieldData> for String {
    #[inline]
    fn from(field: FieldData) -> String {
        field.internal_name()
    }
}

/// A method's declaring type, name, and signature, uniquely identifying it in a jar.
///
/// Overloads with the same name but different signatures are distinct methods.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMethodData", into = "RawMethodData")]
pub struct MethodData {
    declaring_type: JavaType,
    name: String,
    signature: MethodSignature
}
impl MethodData {
    pub fn new(
        declaring_type: JavaType,
        name: impl Into<String>,
        signature: MethodSignature
    ) -> Result<MethodData, SrgError> {
        let name = name.into();
        check_identifier(&name)?;
        Ok(MethodData { declaring_type, name, signature })
    }
    #[inline]
    pub(crate) fn new_unchecked(declaring_type: JavaType, name: String, signature: MethodSignature) -> MethodData {
        debug_assert!(is_valid_identifier(&name), "Invalid name: {}", name);
        MethodData { declaring_type, name, signature }
    }
    /// Parse a joined name like `obfs/a` together with its signature
    pub fn from_internal_name(joined_name: &str, signature: MethodSignature) -> Result<MethodData, SrgError> {
        let (owner, name) = split_qualified_member(joined_name)?;
        MethodData::new(JavaType::from_internal_name(owner)?, name, signature)
    }
    #[inline]
    pub fn declaring_type(&self) -> &JavaType {
        &self.declaring_type
    }
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[inline]
    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }
    #[inline]
    pub fn parameter_types(&self) -> &[JavaType] {
        self.signature.parameter_types()
    }
    #[inline]
    pub fn return_type(&self) -> &JavaType {
        self.signature.return_type()
    }
    /// The internal name of this method, in the format `${internal type name}/${method name}`
    #[inline]
    pub fn internal_name(&self) -> String {
        format!("{}/{}", self.declaring_type.internal_name(), self.name)
    }
    pub fn with_name(&self, name: impl Into<String>) -> Result<MethodData, SrgError> {
        MethodData::new(self.declaring_type.clone(), name, self.signature.clone())
    }
    #[inline]
    pub fn with_declaring_type(&self, declaring_type: JavaType) -> MethodData {
        MethodData { declaring_type, name: self.name.clone(), signature: self.signature.clone() }
    }
    /// Transform the declaring type and every type in the signature
    pub fn map_types<F>(&self, mut func: F) -> MethodData where F: FnMut(&JavaType) -> JavaType {
        MethodData {
            declaring_type: func(&self.declaring_type),
            name: self.name.clone(),
            signature: self.signature.map_types(func)
        }
    }
    #[inline]
    pub fn has_same_types(&self, other: &MethodData) -> bool {
        self.declaring_type == other.declaring_type && self.signature == other.signature
    }
}
impl Display for MethodData {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}{}", self.declaring_type, self.name, self.signature)
    }
}

#[derive(Serialize, Deserialize)]
struct RawMethodData {
    name: String,
    signature: String
}
impl TryFrom<RawMethodData> for MethodData {
    type Error = SrgError;

    fn try_from(raw: RawMethodData) -> Result<MethodData, SrgError> {
        MethodData::from_internal_name(&raw.name, raw.signature.parse()?)
    }
}
impl From<MethodData> for RawMethodData {
    fn from(method: MethodData) -> RawMethodData {
        RawMethodData { name: method.internal_name(), signature: method.signature.descriptor() }
    }
}
