// src/loader/layer_tree.rs
use log::debug;
use serde_json::Value as JsonValue;

/// A node is a group when it has a `layers` child or is typed `"group"`.
fn is_group(node: &JsonValue) -> bool {
    let has_children = node.get("layers").is_some_and(|l| !l.is_null());
    let typed_group = node.get("type").and_then(JsonValue::as_str) == Some("group");
    has_children || typed_group
}

fn collect<'j>(node: &'j JsonValue, out: &mut Vec<&'j JsonValue>, depth: usize, max_depth: usize) {
    if !is_group(node) {
        out.push(node);
        return;
    }

    if depth >= max_depth {
        debug!(
            "layer group {:?} at depth {depth} not expanded",
            node.get("name").and_then(JsonValue::as_str).unwrap_or_default()
        );
        return;
    }

    let children = node
        .get("layers")
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for child in children {
        collect(child, out, depth + 1, max_depth);
    }
}

/// Flattens the layer tree under `root` into its leaf layers.
///
/// Leaves come out depth-first, left to right, which is also bottom-to-top
/// render order. `root` is normally the map object itself (depth 0). Groups
/// sitting at `max_depth` or deeper are dropped along with their children.
pub fn flatten_layers(root: &JsonValue, max_depth: usize) -> Vec<&JsonValue> {
    let mut out = Vec::new();
    collect(root, &mut out, 0, max_depth);
    out
}
