//! Chunk tree listing for the `probe` command

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use ni_container::{ChunkChain, ChunkData, IffBody, IffChunk, SubTree, parse_chain, parse_iff};
use sample_shared::fs::{MAX_SOURCE_BYTES, read_file_with_limit};

/// Describe the chunk structure of an NI container or IFF/RIFF file
pub fn describe_file(path: &Path) -> Result<String> {
    let data = read_file_with_limit(path, MAX_SOURCE_BYTES)?;
    describe_bytes(&data).with_context(|| format!("Failed to probe {}", path.display()))
}

/// IFF/RIFF when the data starts with a known group tag, NI container otherwise
pub fn describe_bytes(data: &[u8]) -> Result<String> {
    let mut out = String::new();
    if data.starts_with(b"RIFF") || data.starts_with(b"RIFX") || data.starts_with(b"FORM") {
        let root = parse_iff(data)?;
        describe_iff(&root, 0, &mut out);
    } else {
        let chain = parse_chain(data)?;
        describe_chain(&chain, 0, &mut out);
    }
    Ok(out)
}

fn describe_chain(chain: &ChunkChain, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for chunk in chain.iter() {
        let _ = write!(
            out,
            "{indent}[{}] {} (0x{:02X})",
            chunk.domain(),
            chunk.chunk_type().name(),
            chunk.chunk_type().id()
        );
        match chunk.data() {
            ChunkData::AuthoringApplication(app) => {
                let _ = writeln!(out, " {:?} {}", app.application, app.version);
            }
            ChunkData::SoundInfo(info) => {
                let _ = writeln!(out, " \"{}\" by \"{}\"", info.name, info.author);
            }
            ChunkData::Preset(blob) => {
                let _ = writeln!(out, " {} bytes", blob.as_bytes().len());
            }
            ChunkData::Unsupported(chunk) => {
                let _ = writeln!(out, " {} bytes (not decoded)", chunk.raw.len());
            }
            ChunkData::SubTree(SubTree::Encrypted(raw)) => {
                let _ = writeln!(out, " encrypted, {} bytes", raw.len());
            }
            ChunkData::SubTree(SubTree::Clear(inner)) => {
                let _ = writeln!(out);
                describe_chain(inner, depth + 1, out);
            }
            ChunkData::Terminator => {
                let _ = writeln!(out);
            }
        }
    }
}

fn describe_iff(chunk: &IffChunk, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match &chunk.body {
        IffBody::Data(data) => {
            let _ = writeln!(out, "{indent}{} {} bytes", chunk.id_str(), data.len());
        }
        IffBody::Group {
            form_type,
            children,
        } => {
            let _ = writeln!(
                out,
                "{indent}{} '{}'",
                chunk.id_str(),
                String::from_utf8_lossy(form_type)
            );
            for child in children {
                describe_iff(child, depth + 1, out);
            }
        }
    }
}
