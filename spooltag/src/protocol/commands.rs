// spooltag-rs/spooltag/src/protocol/commands.rs

//! PN532 host commands used by the tag operations.

/// 106 kbps ISO14443 Type A targets (the spool tags)
pub const BRTY_106K_TYPE_A: u8 = 0x00;

/// SAM normal mode (no secure access module in the signal path)
pub const SAM_MODE_NORMAL: u8 = 0x01;

// MIFARE Ultralight commands tunnelled through InDataExchange
const MIFARE_CMD_READ: u8 = 0x30;
const MIFARE_CMD_WRITE: u8 = 0xA2;

/// High-level command enum. New commands get a variant here and their
/// parameter bytes in `encode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// GetFirmwareVersion (0x02)
    GetFirmwareVersion,
    /// SAMConfiguration (0x14)
    SamConfiguration {
        /// SAM mode byte; [`SAM_MODE_NORMAL`] for a bare PN532
        mode: u8,
        /// Virtual-card timeout in 50 ms units
        timeout: u8,
    },
    /// InListPassiveTarget (0x4A)
    InListPassiveTarget {
        /// Maximum targets to enumerate (1 or 2)
        max_targets: u8,
        /// Baud/modulation selector, e.g. [`BRTY_106K_TYPE_A`]
        baud: u8,
    },
    /// InDataExchange (0x40) wrapping a MIFARE Ultralight READ of four
    /// pages (16 bytes) starting at `page`
    ReadPage {
        /// Target number from InListPassiveTarget
        target: u8,
        /// First page to read
        page: u8,
    },
    /// InDataExchange (0x40) wrapping a MIFARE Ultralight WRITE of one
    /// four-byte page
    WritePage {
        /// Target number from InListPassiveTarget
        target: u8,
        /// Page to write
        page: u8,
        /// Page contents
        data: [u8; 4],
    },
}

impl Command {
    /// SAMConfiguration in normal mode with the conventional 1 s
    /// virtual-card timeout.
    pub fn sam_normal() -> Self {
        Command::SamConfiguration {
            mode: SAM_MODE_NORMAL,
            timeout: 0x14,
        }
    }

    /// The command code as defined by the PN532 user manual.
    pub fn opcode(&self) -> u8 {
        match self {
            Self::GetFirmwareVersion => 0x02,
            Self::SamConfiguration { .. } => 0x14,
            Self::InListPassiveTarget { .. } => 0x4A,
            Self::ReadPage { .. } | Self::WritePage { .. } => 0x40,
        }
    }

    /// Expected first payload byte of the matching response
    /// (request opcode + 1, per PN532 convention).
    pub fn response_opcode(&self) -> u8 {
        self.opcode() + 1
    }

    /// Encode the command into the raw payload (opcode + params).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::GetFirmwareVersion => vec![self.opcode()],
            Self::SamConfiguration { mode, timeout } => {
                // trailing byte: IRQ pin unused on a serial bridge
                vec![self.opcode(), *mode, *timeout, 0x00]
            }
            Self::InListPassiveTarget { max_targets, baud } => {
                vec![self.opcode(), *max_targets, *baud]
            }
            Self::ReadPage { target, page } => {
                vec![self.opcode(), *target, MIFARE_CMD_READ, *page]
            }
            Self::WritePage { target, page, data } => {
                let mut out = vec![self.opcode(), *target, MIFARE_CMD_WRITE, *page];
                out.extend_from_slice(data);
                out
            }
        }
    }
}
