use itertools::Itertools;
use log::trace;

use crate::data::{FieldData, MethodData};
use crate::errors::SrgError;
use crate::mappings::{Mappings, SimpleMappings, FrozenMappings};
use crate::signature::MethodSignature;
use crate::types::JavaType;
use super::{LineProcessor, MappingsFormat};

/// The verbose srg format, where every line is tagged with its kind.
///
/// ```text
/// CL: obf4 net/techcable/minecraft/Player
/// FD: obf4/a net/techcable/minecraft/Player/dead
/// MD: obfs/a (Lobf4;ID)Z net/techcable/minecraft/NoHax/isHacking (Lnet/techcable/minecraft/Player;ID)Z
/// ```
///
/// Package (`PK:`) lines are accepted but ignored.
#[derive(Copy, Clone, Debug, Default)]
pub struct SrgMappingsFormat;
impl MappingsFormat for SrgMappingsFormat {
    type Processor = SrgLineProcessor;

    fn to_lines<M: Mappings + ?Sized>(mappings: &M) -> Vec<String> {
        let classes = mappings.classes()
            .map(|(original, renamed)| format!(
                "CL: {} {}",
                original.internal_name(),
                renamed.internal_name()
            ))
            .sorted();
        let fields = mappings.fields()
            .map(|(original, renamed)| format!(
                "FD: {} {}",
                original.internal_name(),
                renamed.internal_name()
            ))
            .sorted();
        let methods = mappings.methods()
            .map(|(original, renamed)| format!(
                "MD: {} {} {} {}",
                original.internal_name(),
                original.signature().descriptor(),
                renamed.internal_name(),
                renamed.signature().descriptor()
            ))
            .sorted();
        classes.chain(fields).chain(methods).collect()
    }
}

#[derive(Default)]
pub struct SrgLineProcessor {
    result: SimpleMappings
}
impl LineProcessor for SrgLineProcessor {
    fn process_line(&mut self, line: &str) -> Result<(), SrgError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(())
        }
        let mut parts = line.split_whitespace();
        let kind = parts.next().unwrap_or_default();
        let args = parts.collect::<Vec<&str>>();
        let expect_args = |count: usize| {
            if args.len() == count {
                Ok(())
            } else {
                Err(SrgError::invalid_line(line, "wrong number of arguments"))
            }
        };
        match kind {
            "PK:" => {
                trace!("Ignoring package mapping {:?}", line);
            },
            "CL:" => {
                expect_args(2)?;
                self.result.insert_class(
                    JavaType::from_internal_name(args[0])?,
                    JavaType::from_internal_name(args[1])?
                )?;
            },
            "FD:" => {
                expect_args(2)?;
                self.result.set_field(
                    FieldData::from_internal_name(args[0])?,
                    FieldData::from_internal_name(args[1])?
                )?;
            },
            "MD:" => {
                expect_args(4)?;
                self.result.set_method(
                    MethodData::from_internal_name(args[0], MethodSignature::from_descriptor(args[1])?)?,
                    MethodData::from_internal_name(args[2], MethodSignature::from_descriptor(args[3])?)?
                )?;
            },
            _ => return Err(SrgError::UnrecognizedRecordKind(kind.into()))
        }
        Ok(())
    }
    #[inline]
    fn finish(self) -> FrozenMappings {
        self.result.frozen()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_records() {
        let mappings = SrgMappingsFormat::parse_lines(vec![
            "# Comment",
            "",
            "PK: ./ net/minecraft/server",
            "  CL: obf4 net/techcable/minecraft/Player  ",
            "FD: obf4/a net/techcable/minecraft/Player/dead",
            "MD: obf4/b (I)V net/techcable/minecraft/Player/damage (I)V",
        ]).unwrap();
        assert_eq!(1, mappings.class_count());
        assert_eq!(1, mappings.field_count());
        assert_eq!(1, mappings.method_count());
        let method = MethodData::from_internal_name("obf4/b", "(I)V".parse().unwrap()).unwrap();
        assert_eq!("net/techcable/minecraft/Player/damage", mappings.get_method(&method).internal_name());
    }
    #[test]
    fn invalid_records() {
        let error = SrgMappingsFormat::parse_lines(vec!["CL: obf4"]).unwrap_err();
        match error.cause {
            SrgError::InvalidLine { .. } => {},
            ref other => panic!("Unexpected error {:?}", other),
        }
        let error = SrgMappingsFormat::parse_lines(vec!["CL: a b", "MD: a/b (IV a/c (I)V"]).unwrap_err();
        assert_eq!(2, error.line_number);
        match error.cause {
            SrgError::MalformedSignature { .. } => {},
            ref other => panic!("Unexpected error {:?}", other),
        }
        assert!(SrgMappingsFormat::parse_lines(vec!["CL: a"]).is_err());
        assert!(SrgMappingsFormat::parse_lines(vec!["FD: a/b c/d e"]).is_err());
        assert!(SrgMappingsFormat::parse_lines(vec!["CL: int a"]).is_err());
    }
    #[test]
    fn identity_classes_are_kept() {
        let mappings = SrgMappingsFormat::parse_lines(vec![
            "CL: net/minecraft/server/Main net/minecraft/server/Main",
            "CL: aa Entity",
        ]).unwrap();
        assert_eq!(2, mappings.class_count());
        assert!(mappings.contains_class(&JavaType::from_internal_name("net/minecraft/server/Main").unwrap()));
        assert_eq!(
            vec!["CL: aa Entity", "CL: net/minecraft/server/Main net/minecraft/server/Main"],
            SrgMappingsFormat::to_lines(&mappings)
        );
    }
    #[test]
    fn sorted_output() {
        let mappings = SrgMappingsFormat::parse_lines(vec![
            "MD: b/a ()V B/run ()V",
            "CL: b B",
            "FD: a/a A/x",
            "CL: a A",
        ]).unwrap();
        assert_eq!(
            vec!["CL: a A", "CL: b B", "FD: a/a A/x", "MD: b/a ()V B/run ()V"],
            SrgMappingsFormat::to_lines(&mappings)
        );
    }
}
