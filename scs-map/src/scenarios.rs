//! End-to-end flows against the fakes, wired the way the web app wires them.

use crate::config::SEARCH_ZOOM;
use crate::controller::{LoadOutcome, MapController};
use crate::layers::{LayerMode, BORDER_LAYER_ID, FILL_LAYER_ID};
use crate::search::{GeocodeSearch, Lookup};
use crate::testing::{suggestion, FakeDataClient, FakeEngine, FakeGeocoder};
use crate::view_model::ViewModel;
use futures::executor::{block_on, LocalPool};
use futures::task::LocalSpawnExt;
use scs_data::{Coordinate, MapError};
use std::cell::RefCell;
use std::rc::Rc;

fn mounted() -> (MapController<FakeEngine>, FakeEngine) {
    let options = crate::config::MapConfig::default().map_options();
    let controller = MapController::<FakeEngine>::initialize("map-container", &options).unwrap();
    let engine = FakeEngine::last_created();
    engine.fire_ready();
    (controller, engine)
}

#[test]
fn load_publishes_counts_and_places_all_markers() {
    let (controller, engine) = mounted();
    let mut view = ViewModel::new();

    match block_on(controller.load(&FakeDataClient::brooklyn())) {
        Ok(LoadOutcome::Loaded(data)) => {
            assert_eq!(data.aggregate.get("Brooklyn"), 1);
            assert_eq!(data.aggregate.len(), 1);
            assert_eq!(data.markers, 2, "unnamed borough still gets a marker");
            assert_eq!(data.fill_color.evaluate("Brooklyn"), "#f3722c");
            view.publish_aggregates(data.aggregate);
        }
        other => panic!("unexpected load result: {other:?}"),
    }

    assert_eq!(engine.marker_count(), 2);
    let texts: Vec<String> = view.legend_entries().iter().map(|e| e.text()).collect();
    assert_eq!(texts, vec!["Brooklyn: 1 sites"]);

    let fill = engine.layer(FILL_LAYER_ID).unwrap();
    assert_eq!(
        fill.paint["fill-color"],
        serde_json::json!(["match", ["get", "name"], "Brooklyn", "#f3722c", "#cccccc"])
    );
    let popups: Vec<String> = engine.markers().into_iter().map(|m| m.popup_html).collect();
    assert!(popups[0].contains("Complaint Count: 3"));
}

#[test]
fn search_without_match_changes_nothing_but_the_notification() {
    let (controller, engine) = mounted();
    let search = GeocodeSearch::new(FakeGeocoder::new().answer(
        "123 Mai",
        vec![suggestion("123 Maiden Ln", -74.0, 40.7)],
    ));
    let mut view = ViewModel::new();

    view.set_query("123 Mai");
    view.apply_lookup(block_on(search.suggest(view.query())));
    view.set_query("123 Main St");
    let before = view.suggestions().to_vec();

    let result = block_on(search.search(view.query()));
    assert!(matches!(result, Err(MapError::AddressNotFound(_))));
    view.apply_search(result, &controller, SEARCH_ZOOM);

    assert_eq!(engine.camera(), None, "camera must not move");
    assert_eq!(view.suggestions(), before.as_slice());
    assert_eq!(view.notification().unwrap().message, "Address not found.");
}

#[test]
fn selecting_a_suggestion_flies_and_resets_search() {
    let (controller, engine) = mounted();
    let picked = suggestion("Williamsburg, Brooklyn", -73.95, 40.72);
    let search = GeocodeSearch::new(FakeGeocoder::new().answer("Williams", vec![picked.clone()]));
    let mut view = ViewModel::new();

    view.set_query("Williams");
    view.apply_lookup(block_on(search.suggest(view.query())));
    assert_eq!(view.suggestions(), &[picked.clone()]);

    let target = view.select_suggestion(&search, &picked, &controller, SEARCH_ZOOM);
    assert_eq!(target, Coordinate::new(-73.95, 40.72));

    let camera = engine.camera().unwrap();
    assert_eq!(camera.target(), Coordinate::new(-73.95, 40.72));
    assert_eq!(camera.zoom, 15.0);
    assert_eq!(view.query(), "");
    assert!(view.suggestions().is_empty());
}

#[test]
fn dispose_during_site_fetch_is_a_no_op() {
    let (controller, engine) = mounted();
    let client = FakeDataClient::brooklyn();
    let release_sites = client.gate_sites();
    let view = Rc::new(RefCell::new(ViewModel::new()));

    let mut pool = LocalPool::new();
    let task = controller.clone();
    let task_view = Rc::clone(&view);
    let outcome = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&outcome);
    pool.spawner()
        .spawn_local(async move {
            let result = task.load(&client).await;
            match &result {
                Ok(LoadOutcome::Loaded(data)) => task_view.borrow_mut().publish_aggregates(data.aggregate.clone()),
                Err(err) => task_view.borrow_mut().notify(err),
                Ok(LoadOutcome::Cancelled) => {}
            }
            *slot.borrow_mut() = Some(result);
        })
        .unwrap();

    pool.run_until_stalled();
    assert!(outcome.borrow().is_none(), "load is parked on the site fetch");

    controller.dispose();
    let _ = release_sites.send(());
    pool.run_until_stalled();

    assert!(matches!(outcome.borrow().as_ref(), Some(Ok(LoadOutcome::Cancelled))));
    assert!(engine.is_destroyed());
    assert!(engine.layer_ids().is_empty());
    assert_eq!(engine.marker_count(), 0);
    assert_eq!(*view.borrow(), ViewModel::new(), "view state untouched");
}

#[test]
fn layer_toggle_round_trip() {
    let (controller, engine) = mounted();
    block_on(controller.load(&FakeDataClient::brooklyn())).unwrap();
    let mut view = ViewModel::new();

    view.select_layer_mode(LayerMode::Points, Some(&controller));
    assert!(!engine.is_visible(FILL_LAYER_ID) && !engine.is_visible(BORDER_LAYER_ID));
    assert_eq!(engine.marker_count(), 2);

    view.select_layer_mode(LayerMode::Both, Some(&controller));
    assert!(engine.is_visible(FILL_LAYER_ID) && engine.is_visible(BORDER_LAYER_ID));
    assert_eq!(engine.marker_count(), 2);
}

#[test]
fn typing_fast_keeps_newest_suggestions() {
    let geocoder = FakeGeocoder::new()
        .answer("Fla", vec![suggestion("Flatlands", -73.93, 40.62)])
        .answer("Flatb", vec![suggestion("Flatbush Ave", -73.96, 40.65)]);
    let slow = geocoder.gate("Fla");
    let search = GeocodeSearch::new(geocoder);
    let view = Rc::new(RefCell::new(ViewModel::new()));

    let mut pool = LocalPool::new();
    for text in ["Fla", "Flatb"] {
        view.borrow_mut().set_query(text);
        let search = search.clone();
        let view = Rc::clone(&view);
        pool.spawner()
            .spawn_local(async move {
                let lookup = search.suggest(text).await;
                view.borrow_mut().apply_lookup(lookup);
            })
            .unwrap();
        pool.run_until_stalled();
    }

    let _ = slow.send(());
    pool.run_until_stalled();

    let view = view.borrow();
    assert_eq!(view.suggestions(), &[suggestion("Flatbush Ave", -73.96, 40.65)]);
    assert!(matches!(
        block_on(search.suggest("Flatb")),
        Ok(Lookup::Fresh(ref s)) if s.len() == 1
    ));
}
