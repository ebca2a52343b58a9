//! Capture-file sink adapter
//!
//! Accepts fully serialized packets plus their timestamps and appends them
//! to a pcap savefile. The bytes are never inspected or altered here.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use pcap::{Capture, Linktype, PacketHeader, Savefile};
use tracing::{debug, info};
use wirestack_core::{Error, Packet, Result};

/// Writes timestamped packets to a pcap capture file
pub struct PacketWriter {
    savefile: Savefile,
    path: PathBuf,
    packets_written: u64,
}

impl std::fmt::Debug for PacketWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacketWriter")
            .field("path", &self.path)
            .field("packets_written", &self.packets_written)
            .finish_non_exhaustive()
    }
}

impl PacketWriter {
    /// Open a capture file for Ethernet frames
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_linktype(path, Linktype::ETHERNET)
    }

    /// Open a capture file for frames of the given link type
    pub fn with_linktype<P: AsRef<Path>>(path: P, linktype: Linktype) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let capture = Capture::dead(linktype)
            .map_err(|err| Error::sink_unavailable(err.to_string()))?;
        let savefile = capture
            .savefile(&path)
            .map_err(|err| Error::sink_unavailable(err.to_string()))?;
        info!(path = %path.display(), linktype = linktype.0, "opened capture sink");
        Ok(Self {
            savefile,
            path,
            packets_written: 0,
        })
    }

    /// Append one packet record, framed with the packet's timestamp.
    ///
    /// The underlying library reports write errors when the file is
    /// flushed; call [`flush`](Self::flush) to surface them.
    pub fn write(&mut self, packet: &Packet) -> Result<()> {
        let elapsed = packet
            .timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let header = PacketHeader {
            ts: libc::timeval {
                tv_sec: elapsed.as_secs() as libc::time_t,
                tv_usec: elapsed.subsec_micros() as libc::suseconds_t,
            },
            caplen: packet.len() as u32,
            len: packet.len() as u32,
        };
        self.savefile.write(&pcap::Packet::new(&header, packet.data()));
        self.packets_written += 1;
        debug!(bytes = packet.len(), "wrote packet record");
        Ok(())
    }

    /// Flush buffered records to disk
    pub fn flush(&mut self) -> Result<()> {
        self.savefile
            .flush()
            .map_err(|err| Error::sink_write_failed(err.to_string()))
    }

    /// Path of the capture file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of packets written so far
    pub fn packets_written(&self) -> u64 {
        self.packets_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn temp_capture_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("wirestack-writer-{}-{}.pcap", name, std::process::id()));
        path
    }

    #[test]
    fn test_write_and_flush() {
        let path = temp_capture_path("basic");
        let mut writer = PacketWriter::create(&path).unwrap();

        let packet = Packet::with_timestamp(SystemTime::UNIX_EPOCH, vec![0xAB; 60]);
        writer.write(&packet).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.packets_written(), 1);
        drop(writer);

        let contents = std::fs::read(&path).unwrap();
        // pcap global header magic, either byte order
        let magic = u32::from_ne_bytes([contents[0], contents[1], contents[2], contents[3]]);
        assert!(magic == 0xA1B2_C3D4 || magic == 0xD4C3_B2A1);
        // global header + record header + 60 payload bytes
        assert_eq!(contents.len(), 24 + 16 + 60);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unwritable_path_is_sink_unavailable() {
        let err = PacketWriter::create("/definitely/missing/dir/out.pcap").unwrap_err();
        assert!(matches!(err, Error::SinkUnavailable(_)));
    }
}
