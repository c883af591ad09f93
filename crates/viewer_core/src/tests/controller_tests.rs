use super::*;
use crate::{
    placement::STATUS_MESSAGES,
    test_support::{insecure_compact, secure_phone, Harness, HostCall, RecordingHost},
};
use shared::domain::Dimensions;

fn product(id: u32, price: f64) -> Product {
    Product {
        id: ProductId(id),
        name: format!("TV {id}"),
        model: format!("MODEL{id}"),
        price,
        category: "LED".into(),
        dimensions: Dimensions {
            width: 1.0,
            height: 0.6,
            depth: 0.05,
        },
        color: "#123456".into(),
        features: Vec::new(),
        description: String::new(),
    }
}

#[tokio::test(start_paused = true)]
async fn session_starts_in_normal_mode_with_first_product() {
    let harness = Harness::new(insecure_compact());
    let controller = &harness.controller;
    assert_eq!(controller.mode(), ViewMode::Normal);
    assert!(!controller.is_immersive());
    assert!(!controller.is_loading());
    assert!(!controller.is_fullscreen());
    assert_eq!(controller.selected_product().map(|p| p.id), Some(ProductId(1)));
    assert!(controller.model().is_some());
}

#[tokio::test(start_paused = true)]
async fn every_product_loads_after_the_delay() {
    let mut harness = Harness::new(insecure_compact());
    let ids: Vec<ProductId> = harness.controller.catalog().all().iter().map(|p| p.id).collect();

    for id in ids {
        assert!(harness.controller.select_product(id).is_applied());
        assert!(harness.controller.is_loading());

        harness.advance(499).await;
        assert!(harness.controller.is_loading(), "still loading before 500ms");
        assert_ne!(
            harness.controller.pending_product(),
            None,
            "load for {id} still pending"
        );

        harness.advance(2).await;
        assert!(!harness.controller.is_loading());
        assert_eq!(harness.controller.selected_product().map(|p| p.id), Some(id));
    }
}

#[tokio::test(start_paused = true)]
async fn previous_selection_stays_visible_while_loading() {
    let mut harness = Harness::new(insecure_compact());
    harness.controller.select_product(ProductId(4));
    harness.advance(250).await;

    assert!(harness.controller.is_loading());
    assert_eq!(
        harness.controller.selected_product().map(|p| p.id),
        Some(ProductId(1))
    );
}

#[tokio::test(start_paused = true)]
async fn later_selection_supersedes_pending_one() {
    let mut harness = Harness::new(insecure_compact());
    harness.controller.select_product(ProductId(2));
    harness.advance(300).await;
    harness.controller.select_product(ProductId(5));

    // The first timer would have fired here.
    harness.advance(300).await;
    assert!(harness.controller.is_loading());
    assert_eq!(
        harness.controller.selected_product().map(|p| p.id),
        Some(ProductId(1))
    );

    harness.advance(250).await;
    assert!(!harness.controller.is_loading());
    assert_eq!(
        harness.controller.selected_product().map(|p| p.id),
        Some(ProductId(5))
    );
}

#[tokio::test(start_paused = true)]
async fn stale_selection_completion_is_dropped() {
    let mut harness = Harness::new(insecure_compact());
    harness.controller.select_product(ProductId(3));

    let stale = TimerEvent::SelectionLoaded {
        generation: 0,
        product_id: ProductId(2),
    };
    assert_eq!(
        harness.controller.dispatch(SessionEvent::Timer(stale)),
        DispatchOutcome::Ignored
    );
    assert!(harness.controller.is_loading());

    harness.advance(501).await;
    assert_eq!(
        harness.controller.selected_product().map(|p| p.id),
        Some(ProductId(3))
    );
}

#[tokio::test(start_paused = true)]
async fn unknown_product_is_rejected() {
    let mut harness = Harness::new(insecure_compact());
    assert_eq!(
        harness.controller.select_product(ProductId(99)),
        DispatchOutcome::Rejected(Rejection::UnknownProduct {
            product_id: ProductId(99)
        })
    );
    assert!(!harness.controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn real_ar_is_rejected_without_capability_from_every_mode() {
    let mut harness = Harness::new(insecure_compact());

    assert_eq!(
        harness.controller.request_mode(ViewMode::ArReal),
        DispatchOutcome::Rejected(Rejection::ArRealUnavailable)
    );
    assert_eq!(harness.controller.mode(), ViewMode::Normal);

    assert!(harness.controller.request_mode(ViewMode::ArDemo).is_applied());
    assert_eq!(
        harness.controller.request_mode(ViewMode::ArReal),
        DispatchOutcome::Rejected(Rejection::ArRealUnavailable)
    );
    assert_eq!(harness.controller.mode(), ViewMode::ArDemo);
}

#[tokio::test(start_paused = true)]
async fn compact_insecure_device_only_offers_demo() {
    let harness = Harness::new(insecure_compact());
    let frame = harness.controller.frame();
    assert!(frame.capabilities.is_compact_layout);
    assert!(!frame.capabilities.is_secure_transport);
    assert!(!frame.chrome.ar_real_button);
    assert!(frame.chrome.ar_demo_button);
}

#[tokio::test(start_paused = true)]
async fn secure_handheld_device_can_enter_real_ar() {
    let mut harness = Harness::build(
        catalog::Catalog::builtin(),
        secure_phone(),
        RecordingHost::supporting_ar(),
    );
    assert!(harness.controller.frame().chrome.ar_real_button);
    assert!(harness.controller.request_mode(ViewMode::ArReal).is_applied());
    assert!(harness.controller.is_immersive());
    assert_eq!(
        harness.controller.ar_real().map(|view| view.xr_support),
        Some(XrSupport::Checking)
    );

    harness.advance(1).await;
    let view = harness.controller.ar_real().expect("ar-real context");
    assert_eq!(view.xr_support, XrSupport::Supported);
    assert!(!view.in_session);

    harness.controller.handle_host(HostSignal::XrSessionStarted);
    assert_eq!(harness.controller.ar_real().map(|v| v.in_session), Some(true));
    harness.controller.handle_host(HostSignal::XrSessionEnded);
    assert_eq!(harness.controller.ar_real().map(|v| v.in_session), Some(false));
}

#[tokio::test(start_paused = true)]
async fn probe_answer_for_discarded_context_is_ignored() {
    let mut harness = Harness::new(secure_phone());
    harness.controller.request_mode(ViewMode::ArReal);
    let first_epoch = harness.controller.next_epoch;
    harness.controller.exit_immersive();
    harness.controller.request_mode(ViewMode::ArReal);

    let outcome = harness.controller.dispatch(SessionEvent::XrSupportResolved {
        epoch: first_epoch,
        supported: true,
    });
    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(
        harness.controller.ar_real().map(|view| view.xr_support),
        Some(XrSupport::Checking)
    );
}

#[tokio::test(start_paused = true)]
async fn immersive_modes_hide_browsing_chrome_and_exit_restores_it() {
    let mut harness = Harness::new(secure_phone());
    for mode in [ViewMode::ArDemo, ViewMode::ArReal] {
        harness.controller.request_mode(mode);
        let frame = harness.controller.frame();
        assert!(frame.is_immersive);
        assert!(!frame.chrome.product_selector);
        assert!(!frame.chrome.info_panel);

        assert!(harness.controller.exit_immersive().is_applied());
        let frame = harness.controller.frame();
        assert_eq!(frame.mode, ViewMode::Normal);
        assert!(frame.chrome.product_selector);
        assert!(frame.chrome.info_panel);
    }
    assert_eq!(harness.controller.exit_immersive(), DispatchOutcome::Ignored);
    assert_eq!(harness.controller.mode(), ViewMode::Normal);
}

#[tokio::test(start_paused = true)]
async fn demo_place_then_enlarge_three_times() {
    let mut harness = Harness::new(insecure_compact());
    harness.controller.request_mode(ViewMode::ArDemo);

    assert_eq!(
        harness.controller.scale_by(1.2),
        DispatchOutcome::Rejected(Rejection::NotPlaced)
    );
    assert!(harness.controller.place().is_applied());
    for _ in 0..3 {
        harness.controller.scale_by(1.2);
    }

    let placement = harness.controller.placement().expect("demo context");
    assert!(placement.placed());
    assert!(placement.camera_settled());
    assert!((placement.scale() - 1.728).abs() < 1e-4);
}

#[tokio::test(start_paused = true)]
async fn demo_model_only_exists_after_placement() {
    let mut harness = Harness::new(insecure_compact());
    harness.controller.request_mode(ViewMode::ArDemo);
    assert!(harness.controller.model().is_none());
    assert_eq!(
        harness.controller.handle_intent(ViewerIntent::Activate),
        DispatchOutcome::Rejected(Rejection::NoActiveModel)
    );

    harness.controller.place();
    assert!(harness.controller.handle_intent(ViewerIntent::Activate).is_applied());
    let model = harness.controller.frame().model.expect("placed model");
    assert!(model.selected && model.floating);
}

#[tokio::test(start_paused = true)]
async fn status_ticker_has_period_of_four_ticks() {
    let mut harness = Harness::new(insecure_compact());
    harness.controller.request_mode(ViewMode::ArDemo);

    harness.advance(2001).await;
    let placement = harness.controller.placement().expect("demo context");
    assert_eq!(placement.status_index(), 1);
    assert_eq!(placement.status_message(), STATUS_MESSAGES[1]);

    harness.advance(3 * 2000).await;
    assert_eq!(
        harness.controller.placement().map(|p| p.status_index()),
        Some(0)
    );
    assert!(!harness.controller.placement().is_some_and(|p| p.placed()));
}

#[tokio::test(start_paused = true)]
async fn leaving_demo_discards_placement_and_stops_ticker() {
    let mut harness = Harness::new(insecure_compact());
    harness.controller.request_mode(ViewMode::ArDemo);
    harness.controller.place();
    harness.controller.scale_by(0.8);

    // A tick is already queued when the context is torn down.
    tokio::time::sleep(std::time::Duration::from_millis(2001)).await;
    harness.controller.exit_immersive();
    assert!(harness.controller.placement().is_none());
    harness.controller.request_mode(ViewMode::ArDemo);

    let queued = harness.events.try_recv().expect("queued tick");
    assert_eq!(harness.controller.dispatch(queued), DispatchOutcome::Ignored);

    let placement = harness.controller.placement().expect("fresh demo context");
    assert!(!placement.placed());
    assert_eq!(placement.scale(), 1.0);
    assert_eq!(placement.status_index(), 0);

    harness.controller.exit_immersive();
    harness.advance(10_000).await;
    assert!(harness.events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn interaction_state_does_not_survive_mode_changes() {
    let mut harness = Harness::new(secure_phone());
    harness.controller.handle_intent(ViewerIntent::HoverEnter);
    harness.controller.handle_intent(ViewerIntent::Activate);
    assert!(harness.controller.model().is_some_and(|m| m.selected()));

    harness.controller.request_mode(ViewMode::ArReal);
    assert!(harness.controller.model().is_some_and(|m| !m.selected() && !m.hovered()));

    harness.controller.handle_intent(ViewerIntent::Activate);
    harness.controller.exit_immersive();
    assert!(harness.controller.model().is_some_and(|m| !m.selected()));
}

#[tokio::test(start_paused = true)]
async fn activate_twice_via_controller_round_trips() {
    let mut harness = Harness::new(insecure_compact());
    harness.controller.handle_intent(ViewerIntent::Activate);
    let frame = harness.controller.frame();
    let model = frame.model.expect("model");
    assert!(model.selected && model.floating);
    assert!((model.display_scale - 1.15).abs() < 1e-6);
    assert_eq!(model.tint_color, "#4ecdc4");

    harness.controller.handle_intent(ViewerIntent::Activate);
    let model = harness.controller.frame().model.expect("model");
    assert!(!model.selected && !model.floating);
    assert_eq!(model.tint_color, "#2c3e50");
}

#[tokio::test(start_paused = true)]
async fn selection_made_during_demo_renders_in_demo() {
    let mut harness = Harness::new(insecure_compact());
    harness.controller.request_mode(ViewMode::ArDemo);
    harness.controller.place();
    harness.controller.handle_intent(ViewerIntent::Activate);

    harness.controller.handle_key('3');
    harness.advance(501).await;

    assert_eq!(harness.controller.mode(), ViewMode::ArDemo);
    let frame = harness.controller.frame();
    assert_eq!(frame.selected_product.map(|p| p.id), Some(ProductId(3)));
    let model = frame.model.expect("demo model remounted");
    assert_eq!(model.product_id, ProductId(3));
    assert!(!model.selected);
    assert!(frame.placement.is_some_and(|p| p.placed));
}

#[tokio::test(start_paused = true)]
async fn digit_shortcuts_select_by_position() {
    let catalog = catalog::Catalog::new(vec![product(10, 100.0), product(20, 200.0), product(30, 300.0)])
        .expect("catalog");
    let mut harness = Harness::build(catalog, insecure_compact(), RecordingHost::default());

    assert!(harness.controller.handle_key('2').is_applied());
    harness.advance(501).await;
    assert_eq!(
        harness.controller.selected_product().map(|p| p.id),
        Some(ProductId(20))
    );

    assert_eq!(
        harness.controller.handle_key('5'),
        DispatchOutcome::Rejected(Rejection::ShortcutOutOfRange { position: 5 })
    );
    assert!(!harness.controller.is_loading());
    assert_eq!(harness.controller.handle_key('9'), DispatchOutcome::Ignored);
    assert_eq!(harness.controller.handle_key('q'), DispatchOutcome::Ignored);
}

#[tokio::test(start_paused = true)]
async fn fullscreen_toggle_requests_host_and_syncs_back() {
    let mut harness = Harness::new(insecure_compact());
    assert!(harness.controller.handle_key('f').is_applied());
    assert!(harness.controller.is_fullscreen());
    assert!(harness.controller.handle_key('F').is_applied());
    assert!(!harness.controller.is_fullscreen());
    assert_eq!(
        harness.host.calls(),
        vec![HostCall::Fullscreen(true), HostCall::Fullscreen(false)]
    );

    harness.controller.toggle_fullscreen();
    let outcome = harness
        .controller
        .handle_host(HostSignal::FullscreenChanged { active: false });
    assert!(outcome.is_applied());
    assert!(!harness.controller.is_fullscreen());
    assert_eq!(harness.host.calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn capture_is_delegated_only_from_normal_mode() {
    let mut harness = Harness::new(insecure_compact());
    assert_eq!(harness.controller.handle_key('s'), DispatchOutcome::Ignored);

    let calls = harness.host.calls();
    let [HostCall::Capture(request)] = calls.as_slice() else {
        panic!("expected one capture call, got {calls:?}");
    };
    assert!(request.file_name.starts_with("lg-OLED55C3PSA-"));
    assert!(request.file_name.ends_with(".png"));
    assert_eq!(request.product_id, Some(ProductId(1)));

    harness.controller.request_mode(ViewMode::ArDemo);
    harness.controller.handle_key('S');
    assert_eq!(harness.host.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn resize_reevaluates_capabilities() {
    let mut harness = Harness::new(secure_phone());
    assert!(harness.controller.capabilities().is_compact_layout);

    let outcome = harness
        .controller
        .handle_host(HostSignal::Resized { viewport_width: 1400 });
    assert!(outcome.is_applied());
    assert!(!harness.controller.capabilities().is_compact_layout);
    assert!(harness.controller.capabilities().ar_real_available());

    assert_eq!(
        harness
            .controller
            .handle_host(HostSignal::Resized { viewport_width: 1500 }),
        DispatchOutcome::Ignored
    );
}

#[tokio::test(start_paused = true)]
async fn losing_capability_closes_the_real_ar_gate() {
    let mut harness = Harness::new(secure_phone());
    harness
        .controller
        .handle_host(HostSignal::EnvironmentChanged(insecure_compact()));
    assert_eq!(
        harness.controller.request_mode(ViewMode::ArReal),
        DispatchOutcome::Rejected(Rejection::ArRealUnavailable)
    );
}

#[tokio::test(start_paused = true)]
async fn scene_preset_drives_scene_options_and_survives_modes() {
    let mut harness = Harness::new(insecure_compact());
    assert!(harness
        .controller
        .set_scene_preset(ScenePreset::Presentation)
        .is_applied());
    assert_eq!(
        harness.controller.set_scene_preset(ScenePreset::Presentation),
        DispatchOutcome::Ignored
    );

    harness.controller.request_mode(ViewMode::ArDemo);
    harness.controller.exit_immersive();
    let frame = harness.controller.frame();
    assert_eq!(frame.scene_preset, ScenePreset::Presentation);
    assert!(frame.scene.auto_rotate && frame.scene.show_environment);
}

#[tokio::test(start_paused = true)]
async fn empty_catalog_has_nothing_to_show() {
    let mut harness = Harness::build(
        catalog::Catalog::empty(),
        insecure_compact(),
        RecordingHost::default(),
    );
    let frame = harness.controller.frame();
    assert!(frame.selected_product.is_none());
    assert!(frame.model.is_none());
    assert_eq!(frame.catalog.price_range, None);
    assert_eq!(
        harness.controller.handle_intent(ViewerIntent::HoverEnter),
        DispatchOutcome::Rejected(Rejection::NoActiveModel)
    );
    assert!(matches!(
        harness.controller.handle_key('1'),
        DispatchOutcome::Rejected(Rejection::ShortcutOutOfRange { position: 1 })
    ));
}

#[tokio::test(start_paused = true)]
async fn frame_reports_watermark_and_catalog_stats() {
    let mut harness = Harness::new(insecure_compact());
    let frame = harness.controller.frame();
    assert_eq!(frame.watermark, "LG AR Product Viewer v1.0");
    assert_eq!(frame.catalog.count, 5);
    assert_eq!(frame.catalog.price_range, Some((499.0, 3299.0)));

    harness.controller.request_mode(ViewMode::ArDemo);
    assert_eq!(
        harness.controller.frame().watermark,
        "LG AR Product Viewer v1.0 (Demo AR)"
    );
}
