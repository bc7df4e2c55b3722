use log::trace;

use crate::serialization::*;

/// Reads values back out of bytes written by a [`SerializationWriter`].
///
/// Every named read is recorded, so a failed read reports the path that led to it.
pub struct SerializationReader {
    bytes: Vec<u8>,
    offset: usize,
    stack: Vec<StackData>,
    depth: usize,
}
impl SerializationReader {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            offset: 0,
            stack: Vec::new(),
            depth: 0,
        }
    }

    /// start recording reads under `name`, until the matching [`Self::pop_parent`]
    pub fn push_parent(&mut self, name: impl ToString) {
        self.stack.push(StackData {
            depth: self.depth,
            name: name.to_string(),
            entries: Vec::new(),
        });
        self.depth += 1;
    }
    pub fn pop_parent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn read<R: Serializable>(&mut self, name: impl ToString) -> SerializationResult<R> {
        let name = name.to_string();
        let type_name = std::any::type_name::<R>();
        self.record(format!("{name} ({type_name})"));

        match R::read(self) {
            Ok(value) => {
                trace!("read {name}: {value:?}");
                Ok(value)
            }
            Err(e) => Err(e.with_stack(self.stack.clone())),
        }
    }

    /// Read the header written by [`SerializationWriter::write_version`].
    ///
    /// Anything newer than `current` is refused, older versions are returned for the caller to handle.
    pub fn read_version(&mut self, type_name: &'static str, current: u16) -> SerializationResult<u16> {
        let version = self.read::<u16>("version")?;
        if version > current {
            return Err(self.error(SerializationErrorEnum::UnsupportedVersion { type_name, version }));
        }
        Ok(version)
    }

    /// the next `size` bytes, or [`SerializationErrorEnum::OutOfBounds`] if there arent that many left
    pub fn read_slice(&mut self, size: usize) -> SerializationResult<&[u8]> {
        // lengths come from the data itself, so they cant be trusted
        if self.bytes.len() - self.offset < size {
            return Err(self.error(SerializationErrorEnum::OutOfBounds));
        }

        let start = self.offset;
        self.offset += size;
        Ok(&self.bytes[start..self.offset])
    }

    fn record(&mut self, entry: String) {
        match self.stack.last_mut() {
            Some(last) => last.entries.push(entry),
            None => self.stack.push(StackData { entries: vec![entry], ..Default::default() }),
        }
    }

    fn error(&self, inner: SerializationErrorEnum) -> SerializationError {
        SerializationError::from(inner).with_stack(self.stack.clone())
    }
}
