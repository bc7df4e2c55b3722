use std::string::FromUtf8Error;
use crate::serialization::StackData;

pub type SerializationResult<S> = Result<S, SerializationError>;

#[derive(Clone, Debug)]
pub struct SerializationError {
    pub inner: SerializationErrorEnum,
    pub stack: Vec<StackData>,
}
impl SerializationError {
    pub fn with_stack(mut self, stack: Vec<StackData>) -> Self {
        self.stack = stack;
        self
    }

    pub fn format_stack(&self) -> String {
        const INDENT: &str = "   ";
        self.stack.iter()
            .map(|StackData { depth, name, entries }| 
                format!(
                    "{}{name}\n{}", 
                    INDENT.repeat(*depth), 
                    entries.iter().map(|e| format!("{}-> {e}", INDENT.repeat(*depth + 1)))
                    .collect::<Vec<_>>().join("\n")
                )
            )
            .collect::<Vec<_>>().join("\n")
    }
}
impl From<SerializationErrorEnum> for SerializationError {
    fn from(value: SerializationErrorEnum) -> Self {
        Self {
            inner: value,
            stack: Vec::new()
        }
    }
}
impl From<FromUtf8Error> for SerializationError {
    fn from(utf8err: FromUtf8Error) -> Self {
        SerializationErrorEnum::FromUtf8Error(utf8err).into()
    }
}

impl PartialEq for SerializationError {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
impl Eq for SerializationError {}

impl core::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, stack: {}", self.inner, self.format_stack())
    }
}
impl std::error::Error for SerializationError {}


#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SerializationErrorEnum {
    /// tried to read past the end of the data
    OutOfBounds,
    FromUtf8Error(FromUtf8Error),
    /// an enum id which doesnt belong to any variant
    UnknownVariant { type_name: &'static str, id: u16 },
    /// data was written with a newer format than we know how to read
    UnsupportedVersion { type_name: &'static str, version: u16 },
}
impl core::fmt::Display for SerializationErrorEnum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::FromUtf8Error(e) => write!(f, "invalid utf8: {e}"),
            Self::UnknownVariant { type_name, id } => write!(f, "unknown {type_name} id {id}"),
            Self::UnsupportedVersion { type_name, version } => write!(f, "unsupported {type_name} version {version}"),
        }
    }
}
