//! Record and object framing

use sample_shared::ByteReader;

use crate::PresetError;

/// `[u16 id][u32 length][body]`
#[derive(Debug, Clone, Copy)]
pub(crate) struct Record<'a> {
    pub id: u16,
    pub body: &'a [u8],
}

impl<'a> Record<'a> {
    pub fn read(reader: &mut ByteReader<'a>, context: &'static str) -> Result<Self, PresetError> {
        let eof = PresetError::truncated(context);
        let id = reader.u16().map_err(&eof)?;
        let length = reader.u32().map_err(&eof)? as usize;
        let body = reader.bytes(length).map_err(&eof)?;
        Ok(Self { id, body })
    }

    pub fn object(&self, name: &'static str) -> Result<Object<'a>, PresetError> {
        Object::parse(self.body, name)
    }
}

/// `[u16 version][u32 fields length][fields][u32 children length][children]`
#[derive(Debug, Clone, Copy)]
pub(crate) struct Object<'a> {
    pub version: u16,
    fields: &'a [u8],
    pub children: &'a [u8],
}

impl<'a> Object<'a> {
    pub fn parse(body: &'a [u8], name: &'static str) -> Result<Self, PresetError> {
        let eof = PresetError::truncated(name);
        let mut reader = ByteReader::new(body);
        let version = reader.u16().map_err(&eof)?;
        let fields_len = reader.u32().map_err(&eof)? as usize;
        let fields = reader.bytes(fields_len).map_err(&eof)?;
        let children_len = reader.u32().map_err(&eof)? as usize;
        let children = reader.bytes(children_len).map_err(&eof)?;
        tracing::trace!(name, version, fields = fields_len, children = children_len, "object");
        Ok(Self {
            version,
            fields,
            children,
        })
    }

    /// Fresh reader over the field block; unread trailing fields are ignored
    pub fn fields(&self) -> ByteReader<'a> {
        ByteReader::new(self.fields)
    }
}

/// Iterate the child records packed in `bytes`
pub(crate) fn children<'a>(
    bytes: &'a [u8],
    parent: &'static str,
) -> impl Iterator<Item = Result<Record<'a>, PresetError>> {
    let mut reader = ByteReader::new(bytes);
    let mut failed = false;
    std::iter::from_fn(move || {
        if failed || reader.is_empty() {
            return None;
        }
        let record = Record::read(&mut reader, parent);
        failed = record.is_err();
        Some(record)
    })
}
