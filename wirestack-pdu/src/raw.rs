//! Opaque payload layer
//!
//! Terminal layer holding bytes no registered codec claimed. Keeping them
//! verbatim preserves the full capture through a decode/encode cycle.

use crate::pdu::{Pdu, PduType};
use crate::stream::OutputStream;
use wirestack_core::Result;

/// Uninterpreted payload bytes
#[derive(Debug, Default)]
pub struct RawPdu {
    payload: Vec<u8>,
    inner: Option<Box<dyn Pdu>>,
}

impl RawPdu {
    /// Create a raw layer over the given bytes
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            inner: None,
        }
    }

    /// The payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replace the payload bytes
    pub fn set_payload(&mut self, payload: Vec<u8>) {
        self.payload = payload;
    }
}

impl Pdu for RawPdu {
    fn pdu_type(&self) -> PduType {
        PduType::Raw
    }

    fn header_size(&self) -> usize {
        self.payload.len()
    }

    fn inner_pdu(&self) -> Option<&dyn Pdu> {
        self.inner.as_deref()
    }

    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.inner.as_deref_mut()
    }

    fn set_inner_pdu(&mut self, inner: Option<Box<dyn Pdu>>) {
        self.inner = inner;
    }

    fn take_inner_pdu(&mut self) -> Option<Box<dyn Pdu>> {
        self.inner.take()
    }

    fn write_header(&mut self, buffer: &mut [u8]) -> Result<()> {
        OutputStream::new(buffer).write_bytes(&self.payload)
    }
}
