//! Integration tests for the visualization flow.
//!
//! Tests cover:
//! - Records with unparseable locations are left off the map
//! - No map when nothing parses
//! - Re-rendering unchanged contents gives the same markers

mod common;

use common::*;
use obstaclemap::map::load_projection;

#[tokio::test]
async fn test_unparseable_record_is_skipped() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    store.add_detection(&make_test_record("a.jpg", "12.9716,77.5946", &["car"])).await?;
    store.add_detection(&make_test_record("b.jpg", "abc", &["bench"])).await?;
    store.add_detection(&make_test_record("c.jpg", "12.98, 77.60", &["person", "dog"])).await?;

    let projection = load_projection(&store).await?;
    assert_eq!(projection.markers.len(), 2);
    assert_eq!(projection.skipped_count(), 1);
    assert!(matches!(projection.skipped[0].1, SkipReason::Unparseable(_)));

    let view = MapView::from_projection(projection).expect("two markers should render a map");
    assert_eq!(view.center, Coordinates::new(12.9716, 77.5946));
    assert_eq!(view.markers[1].obstacles, "person, dog");
    assert_eq!(
        view.markers[1].popup_html(),
        "Obstacles: person, dog<br>File: c.jpg"
    );
    Ok(())
}

#[tokio::test]
async fn test_no_parseable_records_means_no_map() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;

    let empty = load_projection(&store).await?;
    assert!(MapView::from_projection(empty).is_none());

    store.add_detection(&make_test_record("a.jpg", "abc", &[])).await?;
    store.add_detection(&make_test_record("b.jpg", "1,2,3", &[])).await?;
    let projection = load_projection(&store).await?;
    assert_eq!(projection.skipped_count(), 2);
    assert!(MapView::from_projection(projection).is_none());
    Ok(())
}

#[tokio::test]
async fn test_rerender_is_idempotent() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    store.add_detection(&make_test_record("a.jpg", "1,2", &["car"])).await?;
    store.add_detection(&make_test_record("b.jpg", "", &[])).await?;

    let first: MapProjection = load_projection(&store).await?;
    let second: MapProjection = load_projection(&store).await?;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_map_reflects_new_saves() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    store.add_detection(&make_test_record("a.jpg", "1,2", &[])).await?;
    assert_eq!(load_projection(&store).await?.markers.len(), 1);

    store.add_detection(&make_test_record("b.jpg", "3,4", &[])).await?;
    assert_eq!(load_projection(&store).await?.markers.len(), 2);
    Ok(())
}
