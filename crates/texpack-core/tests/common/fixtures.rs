//! ZIP and FBX builders.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;

/// Write `files` into `dir/name` as a deflated ZIP, in the given order.
pub fn zip_archive(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    write_zip(dir, name, files, SimpleFileOptions::default())
}

/// Like [`zip_archive`] but without compression, so entry bodies appear
/// verbatim in the container bytes.
pub fn stored_zip_archive(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    write_zip(dir, name, files, options)
}

fn write_zip(dir: &Path, name: &str, files: &[(&str, &[u8])], options: SimpleFileOptions) -> PathBuf {
    let path = dir.join(name);
    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    for (entry, data) in files {
        writer.start_file(*entry, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// Flip one bit in the first occurrence of `needle` inside the file at
/// `path`. On a stored entry this breaks its CRC while the central
/// directory stays readable.
pub fn corrupt(path: &Path, needle: &[u8]) {
    let mut bytes = std::fs::read(path).unwrap();
    let at = bytes
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("needle not found in archive");
    bytes[at] ^= 0x20;
    std::fs::write(path, bytes).unwrap();
}

/// ASCII FBX that references `textures` through texture blocks.
pub fn ascii_fbx(textures: &[&str]) -> Vec<u8> {
    let mut out = String::from(
        "; FBX 7.4.0 project file\n\
         FBXHeaderExtension:  {\n\
         \tFBXVersion: 7400\n\
         \tCreator: \"texpack tests\"\n\
         }\n\
         Objects:  {\n",
    );
    for (i, t) in textures.iter().enumerate() {
        out.push_str(&format!(
            "\tModel: {i}, \"Texture::t{i}\", \"Texture\" {{\n\
             \t\tRelativeFilename: \"textures\\{t}\"\n\
             \t}}\n"
        ));
    }
    out.push_str("}\n");
    out.into_bytes()
}

/// Binary FBX header followed by string records naming `textures`.
pub fn binary_fbx(textures: &[&str]) -> Vec<u8> {
    let mut out = b"Kaydara FBX Binary  \x00\x1a\x00".to_vec();
    out.extend_from_slice(&7500u32.to_le_bytes());
    for t in textures {
        out.extend_from_slice(b"\x00\x00RelativeFilenameS");
        out.extend_from_slice(&(t.len() as u32).to_le_bytes());
        out.extend_from_slice(t.as_bytes());
    }
    out.extend_from_slice(&[0u8; 16]);
    out
}

/// Number of entries left in `dir`.
pub fn dir_len(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
