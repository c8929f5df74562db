//! Item models for registered items.
//!
//! Only names the registry can attribute to an item are claimed, either by
//! item name or through a custom `inventory` model location. Items that
//! place a block reuse the block model: the authored block model is served
//! as-is when present, otherwise a model inheriting from the block model.
//! Plain items get a flat generated sprite model.

use resgen_core::{translate, OwnerKind, ResourceIdentifier, ResourceStream, ASSETS_PREFIX};
use serde_json::json;

use super::{json_stream, ContentProvider, PackView};
use crate::error::{ProviderError, ProviderResult};

const FOLDER: &str = "models/item/";

/// Parent model for flat sprite items.
pub const GENERATED_ITEM_PARENT: &str = "item/generated";

/// Generates `models/item/<stem>.json` for registered items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemModelProvider;

impl ContentProvider for ItemModelProvider {
    fn name(&self) -> &'static str {
        "item_model"
    }

    fn can_provide(&self, name: &str, view: &PackView<'_>) -> bool {
        if !view.is_location(name, FOLDER) || view.defers_to_authored(name) {
            return false;
        }
        translate(name).is_ok_and(|id| view.registry().resolve_item(&id).is_some())
    }

    fn provide(&self, name: &str, view: &PackView<'_>) -> ProviderResult<ResourceStream> {
        let id = translate(name)?;
        let owner = view
            .registry()
            .resolve_item(&id)
            .ok_or_else(|| ProviderError::OwnerVanished {
                name: name.to_string(),
            })?;

        tracing::debug!(
            resource = name,
            owner = owner.owner.0,
            tag = owner.tag,
            kind = ?owner.kind,
            "generating item model"
        );

        match owner.kind {
            OwnerKind::BlockItem => block_item_model(name, &id, view),
            OwnerKind::Item => {
                let texture = format!(
                    "{}:{}/{}",
                    id.namespace,
                    view.config().item_texture_dir,
                    id.stem()
                );
                let document = json!({
                    "parent": GENERATED_ITEM_PARENT,
                    "textures": { "layer0": texture }
                });
                json_stream(name, &document)
            }
        }
    }
}

/// Serves the authored block model unchanged, or a model inheriting from it.
fn block_item_model(
    name: &str,
    id: &ResourceIdentifier,
    view: &PackView<'_>,
) -> ProviderResult<ResourceStream> {
    let block_model = ResourceIdentifier::new(
        id.namespace.as_str(),
        format!("models/block/{}.json", id.stem()),
    )
    .to_resource_name(ASSETS_PREFIX);

    if view.authored_has_resource(&block_model) {
        return view
            .authored_get_resource(&block_model)
            .map_err(|source| ProviderError::Delegation {
                name: block_model,
                source,
            });
    }

    let document = json!({ "parent": format!("{}:block/{}", id.namespace, id.stem()) });
    json_stream(name, &document)
}
