//! Authoring application record

use sample_shared::{ByteReader, ReadError};

use super::write_utf16;

/// Product that wrote the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthoringApp {
    Kontakt,
    Maschine,
    Battery,
    Reaktor,
    Fm8,
    Other(u32),
}

impl AuthoringApp {
    pub fn from_u32(id: u32) -> Self {
        match id {
            1 => AuthoringApp::Kontakt,
            2 => AuthoringApp::Maschine,
            3 => AuthoringApp::Battery,
            4 => AuthoringApp::Reaktor,
            8 => AuthoringApp::Fm8,
            other => AuthoringApp::Other(other),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            AuthoringApp::Kontakt => 1,
            AuthoringApp::Maschine => 2,
            AuthoringApp::Battery => 3,
            AuthoringApp::Reaktor => 4,
            AuthoringApp::Fm8 => 8,
            AuthoringApp::Other(id) => id,
        }
    }
}

/// Tool id and version string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoringApplication {
    pub application: AuthoringApp,
    pub version: String,
}

impl AuthoringApplication {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        let application = AuthoringApp::from_u32(reader.u32()?);
        let version = reader.utf16_string()?;
        Ok(Self {
            application,
            version,
        })
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.application.to_u32().to_le_bytes());
        write_utf16(out, &self.version);
    }
}
