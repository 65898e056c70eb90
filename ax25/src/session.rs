use crate::address::{AddressField, InvalidAddress, StationId};
use crate::control::{ControlField, ControlStyle, SEQUENCE_MODULUS};
use crate::frame::{Frame, PID_NONE};

/// Sequence state for one AX.25 link.
///
/// One session owns the V(S)/V(R) counters and the poll/final flag for one
/// logical link; nothing is shared between sessions. Building a frame
/// reads the current state without advancing it - the owning link
/// controller decides when a frame counts as sent or received and calls
/// [`frame_sent`](LinkSession::frame_sent) /
/// [`frame_received`](LinkSession::frame_received) accordingly.
#[derive(Debug, Clone)]
pub struct LinkSession {
    local: StationId,
    remote: StationId,
    send_seq: u8,
    receive_seq: u8,
    poll_final: bool,
    style: ControlStyle,
}

impl LinkSession {
    /// Opens session state between the local and remote station. Both
    /// counters start at zero, poll/final clear.
    pub fn new(local: &str, remote: &str) -> Result<Self, InvalidAddress> {
        Ok(LinkSession {
            local: local.parse()?,
            remote: remote.parse()?,
            send_seq: 0,
            receive_seq: 0,
            poll_final: false,
            style: ControlStyle::default(),
        })
    }

    /// Selects how control octets are rendered for this session.
    pub fn with_style(mut self, style: ControlStyle) -> Self {
        self.style = style;
        self
    }

    pub fn local(&self) -> &StationId {
        &self.local
    }

    pub fn remote(&self) -> &StationId {
        &self.remote
    }

    pub fn send_seq(&self) -> u8 {
        self.send_seq
    }

    pub fn receive_seq(&self) -> u8 {
        self.receive_seq
    }

    pub fn set_poll_final(&mut self, poll_final: bool) {
        self.poll_final = poll_final;
    }

    /// The control inputs a frame built right now would carry.
    pub fn control_field(&self) -> ControlField {
        ControlField::new(self.receive_seq, self.send_seq, self.poll_final)
    }

    /// Builds an information frame carrying `info` to the remote station,
    /// addressed with no digipeater path. Command framing puts the C bit
    /// on the destination address, response framing on the source.
    pub fn information_frame(&self, info: Vec<u8>, is_command: bool) -> Frame {
        let address = AddressField::from_stations(&self.local, &self.remote, is_command, false);
        let control = self.control_field().to_byte(self.style);
        Frame::new(address, control, PID_NONE, info)
    }

    /// Marks one frame as sent, advancing V(S) modulo 8.
    pub fn frame_sent(&mut self) {
        self.send_seq = (self.send_seq + 1) % SEQUENCE_MODULUS;
    }

    /// Marks one in-sequence frame as received, advancing V(R) modulo 8.
    pub fn frame_received(&mut self) {
        self.receive_seq = (self.receive_seq + 1) % SEQUENCE_MODULUS;
    }
}
