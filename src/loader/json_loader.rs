// src/loader/json_loader.rs
use crate::config::LoadOptions;
use crate::error::MapError;
use crate::ir_map::IrMap;
use crate::layer::{name_hash, Layer};
use crate::loader::layer_tree::flatten_layers;
use crate::tileset::Tileset;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::io;
use std::mem::size_of;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Default)]
struct JsonMap {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    tilewidth: u32,
    #[serde(default)]
    tileheight: u32,
}

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    name: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    offsetx: f64,
    #[serde(default)]
    offsety: f64,
    #[serde(default = "one")]
    opacity: f32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    data: Vec<u32>,
}

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}

#[derive(Deserialize)]
struct JsonTileset {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    tilewidth: u32,
    #[serde(default)]
    tileheight: u32,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    imageheight: u32,
    #[serde(default)]
    firstgid: u32,
    #[serde(default)]
    tilecount: u32,
}

fn str_field<'j>(node: &'j JsonValue, key: &str) -> &'j str {
    node.get(key).and_then(JsonValue::as_str).unwrap_or_default()
}

fn from_node<T: DeserializeOwned>(node: &JsonValue, path: &Path) -> Result<T, MapError> {
    T::deserialize(node).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn layer_from_json(node: &JsonValue, path: &Path) -> Result<Layer, MapError> {
    // Checked before decoding: base64 layers carry `data` as a string.
    let encoding = str_field(node, "encoding");
    if !encoding.is_empty() && encoding != "csv" {
        return Err(MapError::UnsupportedEncoding {
            layer: str_field(node, "name").to_owned(),
            encoding: encoding.to_owned(),
            compression: str_field(node, "compression").to_owned(),
        });
    }

    let l: JsonLayer = from_node(node, path)?;

    let expected = l.width as usize * l.height as usize;
    if l.data.len() != expected {
        return Err(MapError::SizeMismatch {
            layer: l.name,
            width: l.width,
            height: l.height,
            expected,
            actual: l.data.len(),
        });
    }

    Ok(Layer {
        name_hash: name_hash(&l.name),
        name: l.name,
        width: l.width,
        height: l.height,
        offset_x: l.offsetx as i32,
        offset_y: l.offsety as i32,
        opacity: l.opacity,
        visible: l.visible,
        data: l.data,
    })
}

fn tileset_from_json(node: &JsonValue, path: &Path, map_dir: &Path) -> Result<Tileset, MapError> {
    if let Some(reference) = node.get("source").filter(|s| !s.is_null()) {
        return Err(MapError::UnsupportedExternalTileset {
            reference: reference.as_str().map_or_else(|| reference.to_string(), str::to_owned),
        });
    }

    let t: JsonTileset = from_node(node, path)?;
    Ok(Tileset {
        name: t.name,
        image: map_dir.join(t.image),
        tile_w: t.tilewidth,
        tile_h: t.tileheight,
        image_w: t.imagewidth,
        image_h: t.imageheight,
        first_gid: t.firstgid,
        tilecount: t.tilecount,
    })
}

/// Directory image paths are resolved against.
pub fn map_dir_of(path: &Path) -> PathBuf {
    path.parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"))
}

/// Decodes map JSON text into an [`IrMap`].
///
/// `map_path` is only used for error messages and to resolve tileset images
/// relative to its directory; the file itself is not touched.
pub fn decode_map_str(text: &str, map_path: &Path, opts: &LoadOptions) -> Result<IrMap, MapError> {
    let root: JsonValue = serde_json::from_str(text).map_err(|source| MapError::Json {
        path: map_path.to_path_buf(),
        source,
    })?;

    // Root geometry is lenient: anything missing is 0 and callers check it.
    let j: JsonMap = if root.is_object() {
        from_node(&root, map_path)?
    } else {
        JsonMap::default()
    };
    let map_dir = map_dir_of(map_path);

    let mut byte_size = size_of::<IrMap>();

    let leaves = if root.get("layers").is_some() {
        flatten_layers(&root, opts.max_group_depth)
    } else {
        Vec::new()
    };
    let mut layers = Vec::with_capacity(leaves.len());
    for node in leaves {
        let kind = str_field(node, "type");
        if matches!(kind, "objectgroup" | "imagelayer") {
            debug!("skipping {kind} \"{}\"", str_field(node, "name"));
            continue;
        }
        let layer = layer_from_json(node, map_path)?;
        debug!(
            "layer {} \"{}\" {}x{} offset ({}, {})",
            layers.len(),
            layer.name,
            layer.width,
            layer.height,
            layer.offset_x,
            layer.offset_y
        );
        byte_size += size_of::<Layer>() + layer.data.len() * size_of::<u32>();
        layers.push(layer);
    }

    let ts_nodes = root
        .get("tilesets")
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let mut tilesets = Vec::with_capacity(ts_nodes.len());
    for node in ts_nodes {
        let ts = tileset_from_json(node, map_path, &map_dir)?;
        debug!(
            "tileset \"{}\" gids {}..{} from {}",
            ts.name,
            ts.first_gid,
            ts.gid_end(),
            ts.image.display()
        );
        byte_size += size_of::<Tileset>();
        tilesets.push(ts);
    }

    Ok(IrMap {
        width: j.width,
        height: j.height,
        tile_w: j.tilewidth,
        tile_h: j.tileheight,
        layers,
        tilesets,
        byte_size,
    })
}

/// Reads and decodes a map file.
pub fn decode_map_file(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<IrMap, MapError> {
    let p = path.as_ref();
    let txt = std::fs::read_to_string(p).map_err(|source| MapError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    if txt.is_empty() {
        return Err(MapError::Io {
            path: p.to_path_buf(),
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "file is empty"),
        });
    }
    decode_map_str(&txt, p, opts)
}
