//! KISS encapsulation for TNC byte streams.
//!
//! Wraps finished link-layer frames in KISS framing (FEND delimiters,
//! FESC escapes, a port/command byte) and extracts frame contents back
//! out of a receive buffer. Only the byte transforms live here; wiring
//! the stream to a serial port or TCP TNC is the caller's concern.

const FEND: u8 = 0xC0;
const FESC: u8 = 0xDB;
const TFEND: u8 = 0xDC;
const TFESC: u8 = 0xDD;

/// Command nybble for "data frame to transmit".
const CMD_DATA: u8 = 0x00;

/// Wraps one frame for transmission on the given TNC port (0-15).
///
/// Frame bytes equal to FEND or FESC are escaped.
pub fn encapsulate(frame: &[u8], port: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.len() + 3);
    out.push(FEND);
    out.push((port & 0x0F) << 4 | CMD_DATA);
    for &byte in frame {
        match byte {
            FEND => out.extend_from_slice(&[FESC, TFEND]),
            FESC => out.extend_from_slice(&[FESC, TFESC]),
            byte => out.push(byte),
        }
    }
    out.push(FEND);
    out
}

enum Scan {
    LookingForStartMarker,
    Data,
    Escaped,
}

/// Scans `buffer` for one complete KISS frame and unescapes its contents.
///
/// Returns `None` until a full frame is buffered. On success the consumed
/// bytes are drained, leaving the closing FEND in place as the start
/// marker of the next frame. The returned contents still begin with the
/// port/command byte exactly as the TNC sent it.
pub fn extract_frame(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    let mut contents = Vec::new();
    let mut state = Scan::LookingForStartMarker;
    let mut final_idx = 0;

    for (idx, &byte) in buffer.iter().enumerate() {
        match state {
            Scan::LookingForStartMarker => {
                if byte == FEND {
                    state = Scan::Data;
                }
            }
            Scan::Data => match byte {
                FEND if !contents.is_empty() => {
                    final_idx = idx;
                    break;
                }
                FEND => {}
                FESC => state = Scan::Escaped,
                byte => contents.push(byte),
            },
            Scan::Escaped => {
                match byte {
                    TFEND => contents.push(FEND),
                    TFESC => contents.push(FESC),
                    FEND if !contents.is_empty() => {
                        final_idx = idx;
                        break;
                    }
                    // A lone FESC before anything else is dropped.
                    _ => {}
                }
                state = Scan::Data;
            }
        }
    }

    match final_idx {
        0 => None,
        n => {
            buffer.drain(0..n);
            Some(contents)
        }
    }
}
