//! The line-oriented text formats mappings are stored in.
//!
//! Blank lines and lines starting with `#` are ignored by every format.
//! Parsing stops at the first malformed line.
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use failure::Error;
use failure_derive::Fail;
use log::debug;
use serde_derive::{Serialize, Deserialize};

use crate::errors::{SrgError, ParseError};
use crate::mappings::{Mappings, FrozenMappings};

mod srg;
mod compact;

pub use self::srg::SrgMappingsFormat;
pub use self::compact::CompactSrgMappingsFormat;

/// Incrementally builds mappings from the lines of a file
pub trait LineProcessor: Default {
    fn process_line(&mut self, line: &str) -> Result<(), SrgError>;
    fn finish(self) -> FrozenMappings;
}

pub trait MappingsFormat {
    type Processor: LineProcessor;

    /// Serialize the mappings into lines, without trailing newlines.
    ///
    /// Classes come first, then fields, then methods, each sorted.
    fn to_lines<M: Mappings + ?Sized>(mappings: &M) -> Vec<String>;

    fn parse_lines<I, S>(lines: I) -> Result<FrozenMappings, ParseError>
        where I: IntoIterator<Item=S>, S: AsRef<str> {
        let mut processor = Self::Processor::default();
        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            processor.process_line(line)
                .map_err(|cause| ParseError::new(index + 1, line, cause))?;
        }
        Ok(finish_parse(processor))
    }
    #[inline]
    fn parse_text(text: &str) -> Result<FrozenMappings, ParseError> {
        Self::parse_lines(text.lines())
    }
    fn parse_stream<R: BufRead>(reader: R) -> Result<FrozenMappings, Error> {
        let mut processor = Self::Processor::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            processor.process_line(&line)
                .map_err(|cause| ParseError::new(index + 1, &line, cause))?;
        }
        Ok(finish_parse(processor))
    }
    fn parse_file<P: AsRef<Path>>(path: P) -> Result<FrozenMappings, Error> {
        let path = path.as_ref();
        debug!("Parsing mappings from {}", path.display());
        Self::parse_stream(BufReader::new(File::open(path)?))
    }
    fn write<M, W>(mappings: &M, mut output: W) -> io::Result<()>
        where M: Mappings + ?Sized, W: Write {
        for line in Self::to_lines(mappings) {
            writeln!(output, "{}", line)?;
        }
        Ok(())
    }
    fn write_string<M: Mappings + ?Sized>(mappings: &M) -> String {
        let mut result = String::new();
        for line in Self::to_lines(mappings) {
            result.push_str(&line);
            result.push('\n');
        }
        result
    }
    fn write_file<M, P>(mappings: &M, path: P) -> io::Result<()>
        where M: Mappings + ?Sized, P: AsRef<Path> {
        let mut output = BufWriter::new(File::create(path)?);
        Self::write(mappings, &mut output)?;
        output.flush()
    }
}

fn finish_parse<P: LineProcessor>(processor: P) -> FrozenMappings {
    let result = processor.finish();
    debug!(
        "Parsed {} classes, {} fields and {} methods",
        result.class_count(), result.field_count(), result.method_count()
    );
    result
}

#[derive(Debug, Fail)]
#[fail(display = "Invalid mappings format {:?}", _0)]
pub struct InvalidFormatKind(String);

/// Selects one of the supported mapping formats at runtime
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    #[serde(rename = "srg")]
    Srg,
    #[serde(rename = "csrg")]
    CompactSrg,
}
impl FormatKind {
    #[inline]
    pub fn id(self) -> &'static str {
        match self {
            FormatKind::Srg => "srg",
            FormatKind::CompactSrg => "csrg",
        }
    }
    pub fn from_id(id: &str) -> Option<FormatKind> {
        Some(match id {
            "srg" => FormatKind::Srg,
            "csrg" => FormatKind::CompactSrg,
            _ => return None
        })
    }
    /// Guess the format from the file's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<FormatKind> {
        path.as_ref().extension()
            .and_then(|extension| extension.to_str())
            .and_then(FormatKind::from_id)
    }
    pub fn parse_lines<I, S>(self, lines: I) -> Result<FrozenMappings, ParseError>
        where I: IntoIterator<Item=S>, S: AsRef<str> {
        match self {
            FormatKind::Srg => SrgMappingsFormat::parse_lines(lines),
            FormatKind::CompactSrg => CompactSrgMappingsFormat::parse_lines(lines),
        }
    }
    #[inline]
    pub fn parse_text(self, text: &str) -> Result<FrozenMappings, ParseError> {
        self.parse_lines(text.lines())
    }
    pub fn parse_stream<R: BufRead>(self, reader: R) -> Result<FrozenMappings, Error> {
        match self {
            FormatKind::Srg => SrgMappingsFormat::parse_stream(reader),
            FormatKind::CompactSrg => CompactSrgMappingsFormat::parse_stream(reader),
        }
    }
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<FrozenMappings, Error> {
        match self {
            FormatKind::Srg => SrgMappingsFormat::parse_file(path),
            FormatKind::CompactSrg => CompactSrgMappingsFormat::parse_file(path),
        }
    }
    pub fn to_lines<M: Mappings + ?Sized>(self, mappings: &M) -> Vec<String> {
        match self {
            FormatKind::Srg => SrgMappingsFormat::to_lines(mappings),
            FormatKind::CompactSrg => CompactSrgMappingsFormat::to_lines(mappings),
        }
    }
    pub fn write<M, W>(self, mappings: &M, output: W) -> io::Result<()>
        where M: Mappings + ?Sized, W: Write {
        match self {
            FormatKind::Srg => SrgMappingsFormat::write(mappings, output),
            FormatKind::CompactSrg => CompactSrgMappingsFormat::write(mappings, output),
        }
    }
}
impl FromStr for FormatKind {
    type Err = InvalidFormatKind;

    #[inline]
    fn from_str(s: &str) -> Result<FormatKind, InvalidFormatKind> {
        FormatKind::from_id(s).ok_or_else(|| InvalidFormatKind(s.into()))
    }
}
impl Display for FormatKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}
