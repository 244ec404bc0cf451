//! Session lifecycle and view changes, end to end through client replicas

use tilemark_client::{ChunkReceivedEvent, RemoveMarkerEvent};
use tilemark_server::{ServerConfig, SessionKey, ViewerKey};
use tilemark_shared::{
    ChunkIndices, ChunkKey, Color, Marker, MarkerId, Position, SurfaceId, TileBox, TileIndices,
};
use tilemark_test::{assert_replica_synced, TestHarness, TestTerrain};

const SURFACE: SurfaceId = SurfaceId::new(1);
const OTHER_SURFACE: SurfaceId = SurfaceId::new(2);

fn chunk(surface: SurfaceId, x: i32, y: i32) -> ChunkKey {
    ChunkKey::new(surface, ChunkIndices::new(x, y))
}

fn harness() -> TestHarness {
    TestHarness::new(ServerConfig::default(), TestTerrain::with_surfaces([1, 2]))
}

fn add(harness: &mut TestHarness, surface: SurfaceId, x: f32, y: f32) -> MarkerId {
    let kind = harness.server.protocol().marker_kind("A").unwrap();
    harness
        .server
        .markers_mut()
        .add(&harness.terrain, surface, Marker::new(kind, Position::new(x, y)))
        .unwrap()
}

fn watch(harness: &mut TestHarness, surface: SurfaceId, x: f32, y: f32, radius: f32) -> SessionKey {
    let session = harness.connect();
    let viewer = ViewerKey::from_u64(0);
    harness
        .server
        .session_mut(&session)
        .unwrap()
        .spawn_viewer(viewer, surface, Position::new(x, y))
        .set_view_radius(&viewer, radius);
    session
}

#[test]
fn idle_ticks_send_nothing() {
    let mut harness = harness();
    add(&mut harness, SURFACE, 5.0, 5.0);
    let session = watch(&mut harness, SURFACE, 5.0, 5.0, 20.0);

    assert_eq!(harness.tick_and_exchange().len(), 1);
    for _ in 0..5 {
        assert!(harness.tick_and_exchange().is_empty());
    }
    assert_replica_synced!(harness, session);
}

#[test]
fn chunk_changed_out_of_view_is_current_on_return() {
    let mut harness = harness();
    let id = add(&mut harness, SURFACE, 5.0, 5.0);
    let session = watch(&mut harness, SURFACE, 5.0, 5.0, 4.0);
    harness.tick_and_exchange();

    let viewer = ViewerKey::from_u64(0);
    harness
        .server
        .session_mut(&session)
        .unwrap()
        .move_viewer(&viewer, SURFACE, Position::new(500.0, 500.0));
    harness.tick_and_exchange();

    let red = Some(Color::rgba(255, 0, 0, 255));
    harness.server.markers_mut().set_color(&id, red);
    harness.tick_and_exchange();
    // the replica still holds the copy from before it looked away
    assert_eq!(harness.client(&session).marker(&id).unwrap().color, None);

    harness
        .server
        .session_mut(&session)
        .unwrap()
        .move_viewer(&viewer, SURFACE, Position::new(5.0, 5.0));
    harness.tick_and_exchange();

    assert_eq!(harness.client(&session).marker(&id).unwrap().color, red);
    assert_replica_synced!(harness, session);
}

#[test]
fn every_session_sees_a_shared_change() {
    let mut harness = harness();
    let id = add(&mut harness, SURFACE, 5.0, 5.0);
    let sessions: Vec<SessionKey> = (0..4)
        .map(|index| watch(&mut harness, SURFACE, 5.0 + index as f32, 5.0, 10.0))
        .collect();
    harness.tick_and_exchange();

    harness.server.markers_mut().set_z_index(&id, 7);
    let events = harness.tick_and_exchange();

    assert_eq!(events.len(), sessions.len());
    for session in &sessions {
        assert_eq!(harness.client(session).marker(&id).unwrap().z_index, 7);
        assert_replica_synced!(harness, *session);
    }
}

#[test]
fn disconnect_mid_session_leaves_others_in_sync() {
    let mut harness = harness();
    let id = add(&mut harness, SURFACE, 5.0, 5.0);
    let leaving = watch(&mut harness, SURFACE, 5.0, 5.0, 10.0);
    let staying = watch(&mut harness, SURFACE, 5.0, 5.0, 10.0);
    harness.tick_and_exchange();

    harness.server.markers_mut().set_rotation(&id, 1.5);
    harness.disconnect(&leaving);
    let events = harness.tick_and_exchange();

    assert!(!events.contains_key(&leaving));
    assert!(events.contains_key(&staying));
    assert_eq!(harness.server.sessions_count(), 1);
    assert_replica_synced!(harness, staying);
}

#[test]
fn viewers_union_their_views() {
    let mut harness = harness();
    let near = add(&mut harness, SURFACE, 5.0, 5.0);
    let far = add(&mut harness, OTHER_SURFACE, 300.0, 300.0);
    let session = watch(&mut harness, SURFACE, 5.0, 5.0, 4.0);
    harness.server.session_mut(&session).unwrap().spawn_viewer(
        ViewerKey::from_u64(1),
        OTHER_SURFACE,
        Position::new(300.0, 300.0),
    );

    harness.tick_and_exchange();

    let client = harness.client(&session);
    assert!(client.marker(&near).is_some());
    assert!(client.marker(&far).is_some());
    assert_replica_synced!(harness, session);
}

#[test]
fn lost_floor_removes_markers_for_viewers() {
    let mut harness = harness();
    let doomed = add(&mut harness, SURFACE, 3.5, 3.5);
    let kept = add(&mut harness, SURFACE, 3.5, 4.5);
    let session = watch(&mut harness, SURFACE, 3.0, 3.0, 8.0);
    harness.tick_and_exchange();

    let event = harness.terrain.set_space(SURFACE, TileIndices::new(3, 3));
    assert_eq!(harness.server.tile_changed(&event), vec![doomed]);
    assert!(harness
        .server
        .markers()
        .dirty_chunks()
        .is_dirty(&chunk(SURFACE, 0, 0)));

    let mut events = harness.tick_and_exchange();
    let session_events = events.get_mut(&session).unwrap();
    assert_eq!(
        session_events.read::<RemoveMarkerEvent>().collect::<Vec<_>>(),
        vec![(chunk(SURFACE, 0, 0), doomed)]
    );
    assert!(harness.client(&session).marker(&kept).is_some());

    // markers can no longer be placed there either
    let kind = harness.server.protocol().marker_kind("B").unwrap();
    let result = harness.server.markers_mut().add(
        &harness.terrain,
        SURFACE,
        Marker::new(kind, Position::new(3.2, 3.9)),
    );
    assert!(result.is_err());
    assert_replica_synced!(harness, session);
}

#[test]
fn removed_surface_drops_its_markers() {
    let mut harness = harness();
    add(&mut harness, SURFACE, 5.0, 5.0);
    let elsewhere = add(&mut harness, OTHER_SURFACE, 5.0, 5.0);
    let session = watch(&mut harness, SURFACE, 5.0, 5.0, 10.0);
    harness.tick_and_exchange();

    assert_eq!(harness.remove_surface(SURFACE), 1);

    // the viewer's surface is gone, so it sees nothing and hears nothing
    assert!(harness.tick_and_exchange().is_empty());
    assert_eq!(harness.server.markers().len(), 1);
    assert!(harness.server.markers().contains(&elsewhere));
    assert!(harness
        .server
        .visible_chunks(&session, &harness.terrain)
        .unwrap()
        .is_empty());
}

#[test]
fn chunk_removals_keep_replica_bounded() {
    let mut harness = TestHarness::new(
        ServerConfig {
            send_chunk_removals: true,
            ..ServerConfig::default()
        },
        TestTerrain::with_surfaces([1]),
    );
    add(&mut harness, SURFACE, 5.0, 5.0);
    let session = watch(&mut harness, SURFACE, 5.0, 5.0, 4.0);
    let viewer = ViewerKey::from_u64(0);

    for step in 0..10 {
        let x = 5.0 + 40.0 * step as f32;
        harness
            .server
            .session_mut(&session)
            .unwrap()
            .move_viewer(&viewer, SURFACE, Position::new(x, 5.0));
        harness.tick_and_exchange();
    }

    let visible = harness
        .server
        .visible_chunks(&session, &harness.terrain)
        .unwrap();
    let client = harness.client(&session);
    assert!(client.chunk_keys().all(|key| visible.contains(key)));
    assert_eq!(client.marker_count(), 0);
}

#[test]
fn resync_sends_the_whole_view_again() {
    let mut harness = harness();
    add(&mut harness, SURFACE, 5.0, 5.0);
    let session = watch(&mut harness, SURFACE, 5.0, 5.0, 4.0);
    harness.tick_and_exchange();

    harness.server.session_mut(&session).unwrap().resync();
    let mut events = harness.tick_and_exchange();

    let received: Vec<ChunkKey> = events
        .get_mut(&session)
        .unwrap()
        .read::<ChunkReceivedEvent>()
        .collect();
    assert_eq!(received, vec![chunk(SURFACE, 0, 0)]);
}

#[test]
fn intersecting_query_matches_the_replica() {
    let mut harness = harness();
    for x in 0..6 {
        add(&mut harness, SURFACE, x as f32 * 7.0 + 0.5, 2.5);
    }
    let session = watch(&mut harness, SURFACE, 20.0, 2.0, 30.0);
    harness.tick_and_exchange();

    let found = harness.server.markers().markers_intersecting(
        SURFACE,
        &TileBox::new(Position::new(6.0, 0.0), Position::new(22.0, 4.0)),
    );

    assert_eq!(found.len(), 3);
    for id in &found {
        let marker = harness.client(&session).marker(id).unwrap();
        assert!(marker.position.x >= 6.0 && marker.position.x <= 22.0);
    }
}
