use crate::serialization::*;

/// Appends values to a byte buffer, little endian.
#[derive(Default)]
pub struct SerializationWriter {
    bytes: Vec<u8>,
}
impl SerializationWriter {
    pub fn new() -> Self { Self::default() }

    pub fn into_bytes(self) -> Vec<u8> { self.bytes }

    pub fn write<S: Serializable>(&mut self, value: &S) {
        value.write(self);
    }

    /// header for a versioned type, see [`SerializationReader::read_version`]
    pub fn write_version(&mut self, version: u16) {
        self.write(&version);
    }

    pub fn write_raw_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}
