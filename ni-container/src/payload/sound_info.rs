//! Metadata record: name, author, vendor, description, tags and properties

use hashbrown::HashMap;
use sample_shared::{ByteReader, ReadError};

use super::write_utf16;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoundInfo {
    /// Record layout version, kept for re-encoding
    pub record_version: u32,
    pub name: String,
    pub author: String,
    pub vendor: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Free-form key/value pairs
    pub properties: HashMap<String, String>,
}

impl SoundInfo {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        let record_version = reader.u32()?;
        let name = reader.utf16_string()?;
        let author = reader.utf16_string()?;
        let vendor = reader.utf16_string()?;
        let description = reader.utf16_string()?;

        let tag_count = reader.u32()?;
        let mut tags = Vec::new();
        for _ in 0..tag_count {
            tags.push(reader.utf16_string()?);
        }

        let property_count = reader.u32()?;
        let mut properties = HashMap::new();
        for _ in 0..property_count {
            let key = reader.utf16_string()?;
            let value = reader.utf16_string()?;
            properties.insert(key, value);
        }

        Ok(Self {
            record_version,
            name,
            author,
            vendor,
            description,
            tags,
            properties,
        })
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.record_version.to_le_bytes());
        write_utf16(out, &self.name);
        write_utf16(out, &self.author);
        write_utf16(out, &self.vendor);
        write_utf16(out, &self.description);

        out.extend_from_slice(&(self.tags.len() as u32).to_le_bytes());
        for tag in &self.tags {
            write_utf16(out, tag);
        }

        let mut keys: Vec<&String> = self.properties.keys().collect();
        keys.sort();
        out.extend_from_slice(&(keys.len() as u32).to_le_bytes());
        for key in keys {
            write_utf16(out, key);
            write_utf16(out, &self.properties[key]);
        }
    }

    /// Property lookup
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let mut info = SoundInfo {
            record_version: 2,
            name: "Felt Piano".into(),
            author: "J. Doe".into(),
            vendor: "Example Audio".into(),
            description: "Soft upright".into(),
            tags: vec!["Piano".into(), "Soft".into()],
            properties: HashMap::new(),
        };
        info.properties.insert("category".into(), "Keys".into());
        info.properties.insert("bpm".into(), "".into());

        let mut bytes = Vec::new();
        info.encode(&mut bytes);
        let decoded = SoundInfo::decode(&mut ByteReader::new(&bytes)).unwrap();

        assert_eq!(decoded, info);
        assert_eq!(decoded.property("category"), Some("Keys"));
        assert_eq!(decoded.property("missing"), None);
    }

    #[test]
    fn test_truncated_tag_list() {
        let mut bytes = 1u32.to_le_bytes().to_vec();
        for _ in 0..4 {
            bytes.extend_from_slice(&0u32.to_le_bytes());
        }
        // Claims three tags, provides none
        bytes.extend_from_slice(&3u32.to_le_bytes());
        let result = SoundInfo::decode(&mut ByteReader::new(&bytes));
        assert!(matches!(result, Err(ReadError::UnexpectedEof { .. })));
    }
}
