//! Block models: a full cube textured on all six faces.

use resgen_core::{translate, ResourceStream};
use serde_json::json;

use super::{json_stream, ContentProvider, PackView};
use crate::error::ProviderResult;

const FOLDER: &str = "models/block/";

/// Parent model every generated block model inherits from.
pub const CUBE_ALL_PARENT: &str = "block/cube_all";

/// Generates `models/block/<stem>.json` as a `cube_all` model.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockModelProvider;

impl ContentProvider for BlockModelProvider {
    fn name(&self) -> &'static str {
        "block_model"
    }

    fn can_provide(&self, name: &str, view: &PackView<'_>) -> bool {
        view.is_location(name, FOLDER) && !view.defers_to_authored(name)
    }

    fn provide(&self, name: &str, view: &PackView<'_>) -> ProviderResult<ResourceStream> {
        let id = translate(name)?;
        let texture = format!(
            "{}:{}/{}",
            id.namespace,
            view.config().block_texture_dir,
            id.stem()
        );
        let document = json!({
            "parent": CUBE_ALL_PARENT,
            "textures": { "all": texture }
        });
        json_stream(name, &document)
    }
}
