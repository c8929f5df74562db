//! Block state definitions: every block gets a single `normal` variant
//! pointing at the model of the same name.

use resgen_core::{translate, ResourceStream};
use serde_json::json;

use super::{json_stream, ContentProvider, PackView};
use crate::error::ProviderResult;

const FOLDER: &str = "blockstates/";

/// Generates `blockstates/<stem>.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockStateProvider;

impl ContentProvider for BlockStateProvider {
    fn name(&self) -> &'static str {
        "block_state"
    }

    fn can_provide(&self, name: &str, view: &PackView<'_>) -> bool {
        view.is_location(name, FOLDER) && !view.defers_to_authored(name)
    }

    fn provide(&self, name: &str, _view: &PackView<'_>) -> ProviderResult<ResourceStream> {
        let id = translate(name)?;
        let document = json!({
            "variants": {
                "normal": { "model": format!("{}:{}", id.namespace, id.stem()) }
            }
        });
        json_stream(name, &document)
    }
}
