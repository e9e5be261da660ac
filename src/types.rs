//! The java type model.
//!
//! Every type has three textual forms:
//! - the source name, like `java.lang.String` or `int[]`
//! - the internal name, like `java/lang/String` or `int[]`
//! - the bytecode descriptor, like `Ljava/lang/String;` or `[I`
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Serialize, Serializer, Deserialize, Deserializer};
use serde::de;

use crate::errors::{SrgError, NameKind};
use crate::utils::is_valid_type_name;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PrimitiveType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    Void
}
impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::Char,
        PrimitiveType::Boolean,
        PrimitiveType::Void,
    ];
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Char => "char",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Void => "void",
        }
    }
    #[inline]
    pub fn descriptor(self) -> char {
        match self {
            PrimitiveType::Byte => 'B',
            PrimitiveType::Short => 'S',
            PrimitiveType::Int => 'I',
            PrimitiveType::Long => 'J',
            PrimitiveType::Float => 'F',
            PrimitiveType::Double => 'D',
            PrimitiveType::Char => 'C',
            PrimitiveType::Boolean => 'Z',
            PrimitiveType::Void => 'V',
        }
    }
    pub fn from_descriptor(c: char) -> Option<PrimitiveType> {
        Some(match c {
            'B' => PrimitiveType::Byte,
            'S' => PrimitiveType::Short,
            'I' => PrimitiveType::Int,
            'J' => PrimitiveType::Long,
            'F' => PrimitiveType::Float,
            'D' => PrimitiveType::Double,
            'C' => PrimitiveType::Char,
            'Z' => PrimitiveType::Boolean,
            'V' => PrimitiveType::Void,
            _ => return None
        })
    }
    /// Match the name against the primitive names, ignoring case
    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        PrimitiveType::ALL.iter().cloned()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}
impl Display for PrimitiveType {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A class, interface or enum, identified by its dotted name.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ReferenceType(Arc<str>);
impl ReferenceType {
    /// Create a reference type from its dotted name.
    ///
    /// The lowercase primitive names are reserved,
    /// so a reference type never compares equal to a primitive by name.
    pub fn new(name: &str) -> Result<ReferenceType, SrgError> {
        if !is_valid_type_name(name) || PrimitiveType::ALL.iter().any(|p| p.name() == name) {
            return Err(SrgError::invalid_name(NameKind::Type, name))
        }
        Ok(ReferenceType(Arc::from(name)))
    }
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
    #[inline]
    pub fn internal_name(&self) -> String {
        self.0.replace('.', "/")
    }
    /// The name with the package removed
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(index) => &self.0[(index + 1)..],
            None => &self.0
        }
    }
    /// The dotted package name, which is empty for the default package
    pub fn package_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(index) => &self.0[..index],
            None => ""
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum JavaType {
    Reference(ReferenceType),
    Primitive(PrimitiveType),
    Array(Box<JavaType>),
}
impl JavaType {
    #[inline]
    pub fn reference(name: &str) -> Result<JavaType, SrgError> {
        Ok(JavaType::Reference(ReferenceType::new(name)?))
    }
    #[inline]
    pub fn array_of(element: JavaType) -> JavaType {
        JavaType::Array(Box::new(element))
    }
    /// Parse a source name like `java.lang.String[]` or `int`
    pub fn from_name(name: &str) -> Result<JavaType, SrgError> {
        if name.is_empty() || name.replace("[]", "").is_empty() {
            return Err(SrgError::invalid_name(NameKind::Type, name))
        }
        if let Some(element) = name.strip_suffix("[]") {
            return Ok(JavaType::array_of(JavaType::from_name(element)?))
        }
        if let Some(primitive) = PrimitiveType::from_name(name) {
            return Ok(JavaType::Primitive(primitive))
        }
        JavaType::reference(name)
    }
    /// Parse an internal name like `java/lang/String`
    #[inline]
    pub fn from_internal_name(name: &str) -> Result<JavaType, SrgError> {
        JavaType::from_name(&name.replace('/', "."))
    }
    /// Parse a bytecode descriptor like `[Ljava/lang/String;` or `I`
    pub fn from_descriptor(descriptor: &str) -> Result<JavaType, SrgError> {
        if descriptor.is_empty() {
            return Err(SrgError::malformed_descriptor(descriptor, "empty descriptor"))
        }
        if descriptor.chars().all(|c| c == '[') {
            return Err(SrgError::malformed_descriptor(descriptor, "array of nothing"))
        }
        if let Some(element) = descriptor.strip_prefix('[') {
            return Ok(JavaType::array_of(JavaType::from_descriptor(element)?))
        }
        if let Some(rest) = descriptor.strip_prefix('L') {
            let internal_name = rest.strip_suffix(';')
                .ok_or_else(|| SrgError::malformed_descriptor(descriptor, "unterminated object descriptor"))?;
            return JavaType::reference(&internal_name.replace('/', "."))
        }
        let mut chars = descriptor.chars();
        match (chars.next().and_then(PrimitiveType::from_descriptor), chars.next()) {
            (Some(primitive), None) => Ok(JavaType::Primitive(primitive)),
            (Some(_), Some(_)) => Err(SrgError::malformed_descriptor(descriptor, "trailing characters")),
            (None, _) => Err(SrgError::malformed_descriptor(descriptor, "unrecognized primitive code")),
        }
    }
    /// The source name of this type, as returned by `Class.getName()`
    pub fn name(&self) -> String {
        match *self {
            JavaType::Reference(ref reference) => reference.name().into(),
            JavaType::Primitive(primitive) => primitive.name().into(),
            JavaType::Array(ref element) => format!("{}[]", element.name()),
        }
    }
    pub fn internal_name(&self) -> String {
        match *self {
            JavaType::Reference(ref reference) => reference.internal_name(),
            JavaType::Primitive(primitive) => primitive.name().into(),
            JavaType::Array(ref element) => format!("{}[]", element.internal_name()),
        }
    }
    pub fn descriptor(&self) -> String {
        let mut result = String::new();
        self.write_descriptor(&mut result);
        result
    }
    pub(crate) fn write_descriptor(&self, buffer: &mut String) {
        match *self {
            JavaType::Reference(ref reference) => {
                buffer.push('L');
                buffer.push_str(&reference.internal_name());
                buffer.push(';');
            },
            JavaType::Primitive(primitive) => buffer.push(primitive.descriptor()),
            JavaType::Array(ref element) => {
                buffer.push('[');
                element.write_descriptor(buffer);
            }
        }
    }
    #[inline]
    pub fn is_reference(&self) -> bool {
        match *self {
            JavaType::Reference(_) => true,
            _ => false
        }
    }
    #[inline]
    pub fn is_primitive(&self) -> bool {
        match *self {
            JavaType::Primitive(_) => true,
            _ => false
        }
    }
    #[inline]
    pub fn is_array(&self) -> bool {
        match *self {
            JavaType::Array(_) => true,
            _ => false
        }
    }
    #[inline]
    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match *self {
            JavaType::Reference(ref reference) => Some(reference),
            _ => None
        }
    }
    #[inline]
    pub fn element_type(&self) -> Option<&JavaType> {
        match *self {
            JavaType::Array(ref element) => Some(element),
            _ => None
        }
    }
    /// The element type of the innermost array, or this type if it isn't an array
    pub fn innermost_type(&self) -> &JavaType {
        let mut result = self;
        while let JavaType::Array(ref element) = *result {
            result = element;
        }
        result
    }
    /// Transform the innermost reference type of this type.
    ///
    /// Primitives (and arrays of primitives) are returned unchanged,
    /// and the function is never called for them.
    pub fn map_class<F>(&self, func: F) -> JavaType where F: FnOnce(&JavaType) -> JavaType {
        match *self {
            JavaType::Reference(_) => func(self),
            JavaType::Primitive(_) => self.clone(),
            JavaType::Array(ref element) => JavaType::array_of(element.map_class(func)),
        }
    }
}
impl From<PrimitiveType> for JavaType {
    #[inline]
    fn from(primitive: PrimitiveType) -> Self {
        JavaType::Primitive(primitive)
    }
}
impl From<ReferenceType> for JavaType {
    #[inline]
    fn from(reference: ReferenceType) -> Self {
        JavaType::Reference(reference)
    }
}
impl FromStr for JavaType {
    type Err = SrgError;

    #[inline]
    fn from_str(s: &str) -> Result<JavaType, SrgError> {
        JavaType::from_name(s)
    }
}
impl Display for JavaType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            JavaType::Reference(ref reference) => f.write_str(reference.name()),
            JavaType::Primitive(primitive) => f.write_str(primitive.name()),
            JavaType::Array(ref element) => write!(f, "{}[]", element),
        }
    }
}
impl Serialize for JavaType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where
        S: Serializer {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.name())
        } else {
            serializer.serialize_str(&self.descriptor())
        }
    }
}
impl<'de> Deserialize<'de> for JavaType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where
        D: Deserializer<'de> {
        struct NameVisitor;
        impl<'de> de::Visitor<'de> for NameVisitor {
            type Value = JavaType;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("a java type name")
            }

            #[inline]
            fn visit_str<E>(self, s: &str) -> Result<JavaType, E> where
                E: de::Error {
                JavaType::from_name(s).map_err(E::custom)
            }
        }
        struct DescriptorVisitor;
        impl<'de> de::Visitor<'de> for DescriptorVisitor {
            type Value = JavaType;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("a java type descriptor")
            }

            #[inline]
            fn visit_str<E>(self, s: &str) -> Result<JavaType, E> where
                E: de::Error {
                JavaType::from_descriptor(s).map_err(E::custom)
            }
        }
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(NameVisitor)
        } else {
            deserializer.deserialize_str(DescriptorVisitor)
        }
    }
}
