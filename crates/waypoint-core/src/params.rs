//! Layered header and query-parameter merging

use std::collections::HashMap;

/// Merge client-level defaults with per-call values.
///
/// Starts from a copy of the client-level mapping and overlays every
/// call-level key, call-level wins on conflict. Absent call-level input
/// behaves as an empty mapping. An empty result means "no parameters";
/// the executor omits the corresponding transport option entirely rather
/// than sending an empty mapping over the wire.
pub fn merge(
    client: &HashMap<String, String>,
    call: Option<&HashMap<String, String>>,
) -> HashMap<String, String> {
    let mut merged = client.clone();
    if let Some(call) = call {
        for (key, value) in call {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
