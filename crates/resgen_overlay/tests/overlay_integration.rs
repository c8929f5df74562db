//! Integration tests: an overlay installed into an in-memory host.

mod support;

use std::sync::Arc;

use resgen_core::{
    GeneratedLocation, HostHandles, LayerOrder, MemoryHost, MemoryPack, OrderError, OwnerKind,
    ResourceError, ResourcePack, SharedPack, VariantTag,
};
use resgen_overlay::{InstallError, OverlayConfig, OverlayPack};
use serde_json::json;
use support::{host_with, read_json, read_text, CountingPack};

fn modx_overlay(authored: CountingPack) -> (MemoryHost, Arc<CountingPack>, Arc<OverlayPack>) {
    let (host, authored) = host_with("modx", authored);
    let overlay = OverlayPack::install(&host, OverlayConfig::for_namespace("modx")).unwrap();
    (host, authored, overlay)
}

#[test]
fn test_blockstate_is_generated_without_authored_calls() {
    let (_host, authored, overlay) = modx_overlay(CountingPack::new("modx-files"));
    let name = "assets/modx/blockstates/dirt.json";

    assert!(overlay.has_resource(name));
    let document = read_json(overlay.get_resource(name).unwrap());

    assert_eq!(document, json!({"variants": {"normal": {"model": "modx:dirt"}}}));
    assert_eq!(authored.has_calls(), 0);
    assert_eq!(authored.get_calls(), 0);
}

#[test]
fn test_unclaimed_name_matches_authored_answer() {
    let (_host, authored, overlay) = modx_overlay(
        CountingPack::new("modx-files").with("assets/modx/sounds.json", "{\"step\":{}}"),
    );

    let direct = read_text(overlay.authored_get_resource("assets/modx/sounds.json").unwrap());
    let through = read_text(overlay.get_resource("assets/modx/sounds.json").unwrap());
    assert_eq!(through, direct);
    assert_eq!(authored.get_calls(), 2);

    // Membership is never delegated.
    assert!(!overlay.has_resource("assets/modx/sounds.json"));
    assert_eq!(authored.has_calls(), 0);
}

#[test]
fn test_unclaimed_missing_name_propagates_not_found() {
    let (_host, _authored, overlay) = modx_overlay(CountingPack::new("modx-files"));

    let direct = overlay.authored_get_resource("assets/modx/sounds.json").err().unwrap();
    let through = overlay.get_resource("assets/modx/sounds.json").err().unwrap();

    match (direct, through) {
        (ResourceError::NotFound { name: a }, ResourceError::NotFound { name: b }) => {
            assert_eq!(a, b);
            assert_eq!(b, "assets/modx/sounds.json");
        }
        other => panic!("expected matching NotFound errors, got {other:?}"),
    }
}

#[test]
fn test_malformed_name_is_not_found() {
    let (_host, _authored, overlay) = modx_overlay(CountingPack::new("modx-files"));

    assert!(!overlay.has_resource("assets"));
    assert!(overlay.get_resource("assets").err().unwrap().is_not_found());
    assert!(overlay.get_resource("assets/modx").err().unwrap().is_not_found());
}

#[test]
fn test_item_model_needs_registry_entry() {
    let (host, _authored, overlay) = modx_overlay(CountingPack::new("modx-files"));
    let name = "assets/modx/models/item/gear.json";

    assert!(!overlay.has_resource(name));
    assert!(overlay.get_resource(name).err().unwrap().is_not_found());

    host.memory_registry().register_item("modx", "gear", OwnerKind::Item);
    assert!(overlay.has_resource(name));
    assert_eq!(
        read_json(overlay.get_resource(name).unwrap()),
        json!({"parent": "item/generated", "textures": {"layer0": "modx:items/gear"}})
    );
}

#[test]
fn test_custom_location_resolves_through_inverse_index() {
    let (host, _authored, overlay) = modx_overlay(CountingPack::new("modx-files"));
    let registry = host.memory_registry();
    let gear = registry.register_item("modx", "gear", OwnerKind::Item);
    registry.set_custom_location(
        gear,
        3,
        GeneratedLocation::new("modx", "gear_gold", VariantTag::Inventory),
    );

    assert!(overlay.has_resource("assets/modx/models/item/gear_gold.json"));

    registry.clear_custom_locations();
    assert!(!overlay.has_resource("assets/modx/models/item/gear_gold.json"));
}

#[test]
fn test_block_item_borrows_authored_block_model() {
    let (host, authored, overlay) = modx_overlay(CountingPack::new("modx-files").with(
        "assets/modx/models/block/lamp.json",
        "{\"parent\":\"block/lamp_base\"}",
    ));
    host.memory_registry()
        .register_item("modx", "lamp", OwnerKind::BlockItem);

    let text = read_text(overlay.get_resource("assets/modx/models/item/lamp.json").unwrap());
    assert_eq!(text, "{\"parent\":\"block/lamp_base\"}");
    assert_eq!(authored.get_calls(), 1);
}

#[test]
fn test_failed_block_model_delegation_is_not_found_without_fallback() {
    let (host, authored, overlay) = modx_overlay(
        CountingPack::new("modx-files")
            .with("assets/modx/models/block/lamp.json", "{\"parent\":\"block/lamp_base\"}")
            .with_broken_reads(),
    );
    host.memory_registry()
        .register_item("modx", "lamp", OwnerKind::BlockItem);

    let err = overlay
        .get_resource("assets/modx/models/item/lamp.json")
        .err()
        .unwrap();

    assert!(err.is_not_found());
    assert_eq!(authored.get_calls(), 1);
}

#[test]
fn test_missing_authored_layer_registers_nothing() {
    let (host, _authored) = host_with("modx", CountingPack::new("modx-files"));

    let err = OverlayPack::install(&host, OverlayConfig::for_namespace("mody"))
        .err()
        .unwrap();

    assert!(matches!(err, InstallError::MissingAuthoredLayer { .. }));
    assert_eq!(host.global().pack_names(), vec!["modx-files"]);
    assert!(host.namespace("mody").is_none());
    assert_eq!(host.namespace("modx").unwrap().pack_names(), vec!["modx-files"]);
}

#[test]
fn test_registered_immediately_before_authored_pack_in_both_orders() {
    let host = MemoryHost::new();
    let vanilla: SharedPack = Arc::new(MemoryPack::new("vanilla"));
    host.global().push(vanilla);
    host.add_authored_pack("modx", Arc::new(MemoryPack::new("modx-files")));
    host.add_authored_pack("mody", Arc::new(MemoryPack::new("mody-files")));

    let _overlay = OverlayPack::install(&host, OverlayConfig::for_namespace("mody")).unwrap();

    assert_eq!(
        host.global().pack_names(),
        vec!["vanilla", "modx-files", "resgen:mody", "mody-files"]
    );
    assert_eq!(
        host.namespace("mody").unwrap().pack_names(),
        vec!["resgen:mody", "mody-files"]
    );
    assert_eq!(host.namespace("modx").unwrap().pack_names(), vec!["modx-files"]);
}

#[test]
fn test_second_install_leaves_orders_unchanged() {
    let (host, _authored, _overlay) = modx_overlay(CountingPack::new("modx-files"));

    let err = OverlayPack::install(&host, OverlayConfig::for_namespace("modx"))
        .err()
        .unwrap();

    assert!(matches!(
        err,
        InstallError::Registration(OrderError::AlreadyRegistered { .. })
    ));
    assert_eq!(host.global().pack_names(), vec!["resgen:modx", "modx-files"]);
    assert_eq!(
        host.namespace("modx").unwrap().pack_names(),
        vec!["resgen:modx", "modx-files"]
    );
}

#[test]
fn test_host_without_namespace_orders_registers_globally() {
    let host = MemoryHost::without_namespace_orders();
    host.add_authored_pack("modx", Arc::new(MemoryPack::new("modx-files")));

    let _overlay = OverlayPack::install(&host, OverlayConfig::for_namespace("modx")).unwrap();

    assert_eq!(host.global().pack_names(), vec!["resgen:modx", "modx-files"]);
    assert!(host.namespace_order("modx").is_none());
}

#[test]
fn test_host_walk_prefers_overlay_then_falls_through() {
    let (host, _authored, _overlay) = modx_overlay(
        CountingPack::new("modx-files")
            .with("assets/modx/blockstates/dirt.json", "authored dirt")
            .with("assets/modx/sounds.json", "authored sounds"),
    );
    let order: &LayerOrder = host.global();

    // The overlay shadows the authored blockstate.
    let dirt = read_json(order.open("assets/modx/blockstates/dirt.json").unwrap());
    assert_eq!(dirt["variants"]["normal"]["model"], "modx:dirt");

    assert_eq!(
        read_text(order.open("assets/modx/sounds.json").unwrap()),
        "authored sounds"
    );
    assert!(order.open("assets/modx/lang/en.json").err().unwrap().is_not_found());
}

#[test]
fn test_defer_to_authored_keeps_authored_copy_visible() {
    let (host, _authored) = host_with(
        "modx",
        CountingPack::new("modx-files").with("assets/modx/blockstates/dirt.json", "authored dirt"),
    );
    let config = OverlayConfig::for_namespace("modx").with_defer_to_authored(true);
    let overlay = OverlayPack::install(&host, config).unwrap();

    assert!(!overlay.has_resource("assets/modx/blockstates/dirt.json"));
    assert!(overlay.has_resource("assets/modx/blockstates/stone.json"));
    assert_eq!(
        read_text(host.global().open("assets/modx/blockstates/dirt.json").unwrap()),
        "authored dirt"
    );
}

#[test]
fn test_reload_is_seen_without_invalidation() {
    let (host, authored, overlay) = modx_overlay(CountingPack::new("modx-files"));
    host.memory_registry()
        .register_item("modx", "lamp", OwnerKind::BlockItem);
    let name = "assets/modx/models/item/lamp.json";

    assert_eq!(
        read_json(overlay.get_resource(name).unwrap()),
        json!({"parent": "modx:block/lamp"})
    );

    authored.insert("assets/modx/models/block/lamp.json", "{\"parent\":\"block/lamp_v2\"}");
    assert_eq!(
        read_text(overlay.get_resource(name).unwrap()),
        "{\"parent\":\"block/lamp_v2\"}"
    );
}

#[test]
fn test_domains_and_name() {
    let (_host, _authored, overlay) = modx_overlay(CountingPack::new("modx-files"));

    assert_eq!(overlay.pack_name(), "resgen:modx");
    assert_eq!(overlay.resource_domains().into_iter().collect::<Vec<_>>(), vec!["modx"]);
    assert_eq!(overlay.authored_layer().pack_name(), "modx-files");
}
