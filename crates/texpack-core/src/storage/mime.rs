//! Content types by file extension.

use crate::formats::extension;

const DEFAULT_TYPE: &str = "application/octet-stream";

/// MIME type for `name`, chosen by its lowercased extension.
/// Unknown or missing extensions map to `application/octet-stream`.
pub fn content_type(name: &str) -> &'static str {
    let Some(ext) = extension(name) else {
        return DEFAULT_TYPE;
    };
    match ext.as_str() {
        // images and textures
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".bmp" => "image/bmp",
        ".svg" => "image/svg+xml",
        ".tif" | ".tiff" => "image/tiff",
        ".tga" => "image/x-tga",
        ".dds" => "image/vnd-ms.dds",
        ".exr" => "image/x-exr",
        ".hdr" => "image/vnd.radiance",

        // 3D models
        ".fbx" => "model/fbx",
        ".obj" => "model/obj",
        ".dae" => "model/vnd.collada+xml",
        ".gltf" => "model/gltf+json",
        ".glb" => "model/gltf-binary",
        ".3ds" => "model/3ds",
        ".stl" => "model/stl",
        ".ply" => "model/ply",
        ".blend" => "application/x-blender",
        ".max" => "application/x-3dsmax",
        ".ma" | ".mb" => "application/x-maya",

        // video
        ".mp4" => "video/mp4",
        ".avi" => "video/x-msvideo",
        ".mov" => "video/quicktime",
        ".wmv" => "video/x-ms-wmv",
        ".flv" => "video/x-flv",
        ".webm" => "video/webm",
        ".mkv" => "video/x-matroska",
        ".m4v" => "video/x-m4v",

        // containers and documents
        ".zip" => "application/zip",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".json" => "application/json",
        ".txt" => "text/plain; charset=utf-8",

        _ => DEFAULT_TYPE,
    }
}
