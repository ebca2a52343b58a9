//! Generic TLV (type-length-value) option storage
//!
//! Option-bearing protocols keep their variable fields in a [`TlvOptions`]
//! store. Options preserve decode order, so a store that was not touched
//! between decode and encode reproduces its original bytes exactly.

use crate::stream::{InputStream, OutputStream};
use wirestack_core::{Error, Result};

/// A single (type, length, value) record.
///
/// The length is implicit: it always equals the value's byte length and is
/// written as a big-endian u16 on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvOption {
    opt_type: u16,
    data: Vec<u8>,
}

impl TlvOption {
    /// Create a new option
    pub fn new(opt_type: u16, data: Vec<u8>) -> Self {
        Self { opt_type, data }
    }

    /// The option's type code
    pub fn opt_type(&self) -> u16 {
        self.opt_type
    }

    /// The option's value bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The option's value length in bytes
    pub fn length(&self) -> usize {
        self.data.len()
    }
}

/// Insertion-ordered collection of TLV options with type-indexed lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlvOptions {
    options: Vec<TlvOption>,
}

impl TlvOptions {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option, preserving the order of those already stored
    pub fn add(&mut self, option: TlvOption) {
        self.options.push(option);
    }

    /// Find the first option with the given type
    pub fn search(&self, opt_type: u16) -> Option<&TlvOption> {
        self.options.iter().find(|opt| opt.opt_type == opt_type)
    }

    /// Remove the first option with the given type, reporting whether one
    /// was present
    pub fn remove(&mut self, opt_type: u16) -> bool {
        match self.options.iter().position(|opt| opt.opt_type == opt_type) {
            Some(index) => {
                self.options.remove(index);
                true
            }
            None => false,
        }
    }

    /// Iterate over the stored options in order
    pub fn iter(&self) -> impl Iterator<Item = &TlvOption> {
        self.options.iter()
    }

    /// Number of stored options
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Total wire size of the stored options
    pub fn serialized_size(&self) -> usize {
        self.options.iter().map(|opt| 4 + opt.data.len()).sum()
    }

    /// Write all options in stored order as consecutive (type, length,
    /// value) triples
    pub fn write(&self, stream: &mut OutputStream<'_>) -> Result<()> {
        for opt in &self.options {
            stream.write_u16(opt.opt_type)?;
            stream.write_u16(opt.data.len() as u16)?;
            stream.write_bytes(&opt.data)?;
        }
        Ok(())
    }

    /// Read options until exactly `available` bytes have been consumed.
    ///
    /// A record whose declared length crosses the end of the region fails
    /// with `MalformedOptions`.
    pub fn read(stream: &mut InputStream<'_>, available: usize) -> Result<Self> {
        let mut region = InputStream::new(stream.read_bytes(available)?);
        let mut options = TlvOptions::new();
        while region.has_data() {
            if region.remaining() < 4 {
                return Err(Error::MalformedOptions {
                    declared: 4,
                    available: region.remaining(),
                });
            }
            let opt_type = region.read_u16()?;
            let length = region.read_u16()? as usize;
            if length > region.remaining() {
                return Err(Error::MalformedOptions {
                    declared: length,
                    available: region.remaining(),
                });
            }
            options.add(TlvOption::new(opt_type, region.read_bytes(length)?.to_vec()));
        }
        Ok(options)
    }
}

impl FromIterator<TlvOption> for TlvOptions {
    fn from_iter<I: IntoIterator<Item = TlvOption>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store_of(entries: &[(u16, &[u8])]) -> TlvOptions {
        entries
            .iter()
            .map(|(ty, data)| TlvOption::new(*ty, data.to_vec()))
            .collect()
    }

    #[test]
    fn test_search_first_match() {
        let options = store_of(&[(1, b"A"), (3, b"BB"), (3, b"CC")]);
        assert_eq!(options.search(1).unwrap().data(), b"A");
        assert_eq!(options.search(3).unwrap().data(), b"BB");
        assert!(options.search(2).is_none());
    }

    #[test]
    fn test_remove() {
        let mut options = store_of(&[(1, b"A"), (3, b"BB")]);
        assert!(options.remove(1));
        assert!(!options.remove(1));
        assert_eq!(options.len(), 1);
        assert_eq!(options.search(3).unwrap().data(), b"BB");
    }

    #[test]
    fn test_order_preserving_roundtrip() {
        let wire = [
            0x00, 0x01, 0x00, 0x01, b'A', // (1, "A")
            0x00, 0x03, 0x00, 0x02, b'B', b'B', // (3, "BB")
        ];
        let mut stream = InputStream::new(&wire);
        let options = TlvOptions::read(&mut stream, wire.len()).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options.serialized_size(), wire.len());

        let mut buffer = vec![0u8; wire.len()];
        options.write(&mut OutputStream::new(&mut buffer)).unwrap();
        assert_eq!(buffer, wire);
    }

    #[test]
    fn test_declared_length_past_region() {
        // Declares 200 bytes of value but only 2 follow
        let wire = [0x00, 0x01, 0x00, 0xC8, 0xAA, 0xBB];
        let mut stream = InputStream::new(&wire);
        let err = TlvOptions::read(&mut stream, wire.len()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedOptions {
                declared: 200,
                available: 2
            }
        ));
    }

    #[test]
    fn test_dangling_header() {
        let wire = [0x00, 0x01, 0x00];
        let mut stream = InputStream::new(&wire);
        assert!(matches!(
            TlvOptions::read(&mut stream, wire.len()),
            Err(Error::MalformedOptions { .. })
        ));
    }

    #[test]
    fn test_read_consumes_only_region() {
        let wire = [0x00, 0x05, 0x00, 0x00, 0xDE, 0xAD];
        let mut stream = InputStream::new(&wire);
        let options = TlvOptions::read(&mut stream, 4).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options.search(5).unwrap().length(), 0);
        assert_eq!(stream.rest(), &[0xDE, 0xAD]);
    }

    proptest! {
        #[test]
        fn prop_roundtrip(entries in proptest::collection::vec(
            (any::<u16>(), proptest::collection::vec(any::<u8>(), 0..32)),
            0..8,
        )) {
            let options: TlvOptions = entries
                .iter()
                .map(|(ty, data)| TlvOption::new(*ty, data.clone()))
                .collect();

            let mut buffer = vec![0u8; options.serialized_size()];
            options.write(&mut OutputStream::new(&mut buffer)).unwrap();

            let mut stream = InputStream::new(&buffer);
            let decoded = TlvOptions::read(&mut stream, buffer.len()).unwrap();
            prop_assert_eq!(decoded, options);
        }
    }
}
