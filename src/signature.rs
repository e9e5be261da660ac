use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::errors::SrgError;
use crate::types::JavaType;

/// The parameter and return types of a method
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MethodSignature {
    parameter_types: Vec<JavaType>,
    return_type: JavaType
}
impl MethodSignature {
    #[inline]
    pub fn new(parameter_types: Vec<JavaType>, return_type: JavaType) -> MethodSignature {
        MethodSignature { parameter_types, return_type }
    }
    /// Parse a bytecode signature like `(Ljava/lang/String;I)V`
    #[inline]
    pub fn from_descriptor(descriptor: &str) -> Result<MethodSignature, SrgError> {
        parse_signature(descriptor)
    }
    #[inline]
    pub fn parameter_types(&self) -> &[JavaType] {
        &self.parameter_types
    }
    #[inline]
    pub fn return_type(&self) -> &JavaType {
        &self.return_type
    }
    #[inline]
    pub fn descriptor(&self) -> String {
        format_signature(&self.parameter_types, &self.return_type)
    }
    pub fn map_types<F>(&self, mut func: F) -> MethodSignature where F: FnMut(&JavaType) -> JavaType {
        MethodSignature {
            parameter_types: self.parameter_types.iter().map(&mut func).collect(),
            return_type: func(&self.return_type)
        }
    }
}
impl FromStr for MethodSignature {
    type Err = SrgError;

    #[inline]
    fn from_str(s: &str) -> Result<MethodSignature, SrgError> {
        parse_signature(s)
    }
}
impl Display for MethodSignature {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.descriptor())
    }
}

pub fn format_signature(parameter_types: &[JavaType], return_type: &JavaType) -> String {
    let mut result = String::with_capacity(2 + parameter_types.len() * 8);
    result.push('(');
    for parameter in parameter_types {
        parameter.write_descriptor(&mut result);
    }
    result.push(')');
    return_type.write_descriptor(&mut result);
    result
}

/// Scan a method signature into its parameter types and return type.
///
/// Array prefixes accumulate until the element they apply to is complete,
/// and object descriptors run through their terminating `;`.
pub fn parse_signature(signature: &str) -> Result<MethodSignature, SrgError> {
    if !signature.starts_with('(') {
        return Err(SrgError::malformed_signature(signature, "missing '('"))
    }
    let end = signature.find(')')
        .ok_or_else(|| SrgError::malformed_signature(signature, "unterminated argument list"))?;
    let mut parameter_types = Vec::new();
    let mut descriptor = String::new();
    let mut chars = signature[..end].chars();
    while let Some(c) = chars.next() {
        match c {
            '(' => continue,
            '[' => descriptor.push(c),
            'L' => {
                descriptor.push(c);
                loop {
                    match chars.next() {
                        Some(c) => {
                            descriptor.push(c);
                            if c == ';' { break }
                        },
                        None => return Err(SrgError::malformed_signature(
                            signature,
                            "reached end of arguments without object completion"
                        ))
                    }
                }
                parameter_types.push(JavaType::from_descriptor(&descriptor)?);
                descriptor.clear();
            },
            _ => {
                descriptor.push(c);
                parameter_types.push(JavaType::from_descriptor(&descriptor)?);
                descriptor.clear();
            }
        }
    }
    if !descriptor.is_empty() {
        return Err(SrgError::malformed_descriptor(&descriptor, "array of nothing"))
    }
    let return_type = JavaType::from_descriptor(&signature[(end + 1)..])?;
    Ok(MethodSignature { parameter_types, return_type })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::PrimitiveType;

    #[test]
    fn parse_simple() {
        let signature = parse_signature("(Ljava/lang/String;I)V").unwrap();
        assert_eq!(
            &[JavaType::reference("java.lang.String").unwrap(), PrimitiveType::Int.into()],
            signature.parameter_types()
        );
        assert_eq!(&JavaType::Primitive(PrimitiveType::Void), signature.return_type());
    }
    #[test]
    fn parse_arrays() {
        let signature = parse_signature("([BLjava/util/Set;[[Lobf4;D)[I").unwrap();
        assert_eq!(
            vec![
                JavaType::from_name("byte[]").unwrap(),
                JavaType::from_name("java.util.Set").unwrap(),
                JavaType::from_name("obf4[][]").unwrap(),
                JavaType::from_name("double").unwrap(),
            ],
            signature.parameter_types()
        );
        assert_eq!(&JavaType::from_name("int[]").unwrap(), signature.return_type());
    }
    #[test]
    fn parse_empty() {
        let signature = parse_signature("()Lorg/spigotmc/XRay;").unwrap();
        assert!(signature.parameter_types().is_empty());
        assert_eq!("org.spigotmc.XRay", signature.return_type().name());
    }
    #[test]
    fn malformed() {
        match parse_signature("(Ljava/lang/String") {
            Err(SrgError::MalformedSignature { .. }) => {},
            other => panic!("Unexpected result {:?}", other),
        }
        match parse_signature("(Ljava/lang/String)V") {
            Err(SrgError::MalformedSignature { .. }) => {},
            other => panic!("Unexpected result {:?}", other),
        }
        match parse_signature("(Q)V") {
            Err(SrgError::MalformedDescriptor { .. }) => {},
            other => panic!("Unexpected result {:?}", other),
        }
        assert!(parse_signature("([)V").is_err());
        assert!(parse_signature("(I)").is_err());
        assert!(parse_signature("I)V").is_err());
    }
    #[test]
    fn signature_inverse() {
        for descriptor in &["()V", "(IJ)Z", "([[Ljava/lang/Object;C)[Lab;", "(Lobf4;ID)Z", "([BLjava/util/Set;)I"] {
            let signature: MethodSignature = descriptor.parse().unwrap();
            assert_eq!(*descriptor, signature.descriptor());
            assert_eq!(
                signature,
                parse_signature(&format_signature(signature.parameter_types(), signature.return_type())).unwrap()
            );
        }
    }
}
