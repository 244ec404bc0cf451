//! PROPERTY-BASED TESTS: Client replicas converge
//!
//! After every tick, each session's replica must hold exactly the server's
//! contents for every chunk its viewers can see, whatever happened to the
//! markers and viewers in between.

use proptest::prelude::*;
use tilemark_server::{ServerConfig, SessionKey, ViewerKey};
use tilemark_shared::{Marker, MarkerId, MarkerKind, Position, SurfaceId, TileIndices};
use tilemark_test::{TestHarness, TestTerrain};

#[derive(Clone, Debug)]
enum Step {
    Add { x: f32, y: f32 },
    Remove { pick: usize },
    Move { pick: usize, x: f32, y: f32 },
    Recolor { pick: usize, shade: u8 },
    MoveViewer { session: usize, x: f32, y: f32 },
    SetRadius { session: usize, radius: f32 },
    Space { x: i32, y: i32 },
    Reconnect { session: usize },
}

const SURFACE: SurfaceId = SurfaceId::new(1);
const SESSIONS: usize = 3;

fn coordinate() -> impl Strategy<Value = f32> {
    -60.0f32..60.0f32
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (coordinate(), coordinate()).prop_map(|(x, y)| Step::Add { x, y }),
        1 => any::<usize>().prop_map(|pick| Step::Remove { pick }),
        2 => (any::<usize>(), coordinate(), coordinate())
            .prop_map(|(pick, x, y)| Step::Move { pick, x, y }),
        1 => (any::<usize>(), any::<u8>()).prop_map(|(pick, shade)| Step::Recolor { pick, shade }),
        3 => (0..SESSIONS, coordinate(), coordinate())
            .prop_map(|(session, x, y)| Step::MoveViewer { session, x, y }),
        1 => (0..SESSIONS, 0.0f32..30.0f32)
            .prop_map(|(session, radius)| Step::SetRadius { session, radius }),
        1 => (-60i32..60, -60i32..60).prop_map(|(x, y)| Step::Space { x, y }),
        1 => (0..SESSIONS).prop_map(|session| Step::Reconnect { session }),
    ]
}

fn pick(ids: &[MarkerId], pick: usize) -> Option<MarkerId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[pick % ids.len()])
    }
}

fn viewer() -> ViewerKey {
    ViewerKey::from_u64(0)
}

fn watch(harness: &mut TestHarness) -> SessionKey {
    let session = harness.connect();
    harness
        .server
        .session_mut(&session)
        .unwrap()
        .spawn_viewer(viewer(), SURFACE, Position::new(0.0, 0.0));
    session
}

fn run(steps: Vec<(Step, bool)>, server_config: ServerConfig) -> Result<(), TestCaseError> {
    let send_chunk_removals = server_config.send_chunk_removals;
    let mut harness = TestHarness::new(server_config, TestTerrain::with_surfaces([1]));
    let mut sessions: Vec<SessionKey> = (0..SESSIONS).map(|_| watch(&mut harness)).collect();
    let mut ids: Vec<MarkerId> = Vec::new();
    let kind = MarkerKind::from_u16(0);

    for (step, tick) in steps {
        match step {
            Step::Add { x, y } => {
                let marker = Marker::new(kind, Position::new(x, y));
                if let Ok(id) = harness.server.markers_mut().add(&harness.terrain, SURFACE, marker) {
                    ids.push(id);
                }
            }
            Step::Remove { pick: index } => {
                if let Some(id) = pick(&ids, index) {
                    harness.server.markers_mut().remove(&id);
                }
            }
            Step::Move { pick: index, x, y } => {
                if let Some(id) = pick(&ids, index) {
                    harness
                        .server
                        .markers_mut()
                        .move_marker(&id, SURFACE, Position::new(x, y));
                }
            }
            Step::Recolor { pick: index, shade } => {
                if let Some(id) = pick(&ids, index) {
                    let color = tilemark_shared::Color::rgba(shade, 0, 0, 255);
                    harness.server.markers_mut().set_color(&id, Some(color));
                }
            }
            Step::MoveViewer { session, x, y } => {
                harness
                    .server
                    .session_mut(&sessions[session])
                    .unwrap()
                    .move_viewer(&viewer(), SURFACE, Position::new(x, y));
            }
            Step::SetRadius { session, radius } => {
                harness
                    .server
                    .session_mut(&sessions[session])
                    .unwrap()
                    .set_view_radius(&viewer(), radius);
            }
            Step::Space { x, y } => {
                let event = harness.terrain.set_space(SURFACE, TileIndices::new(x, y));
                harness.server.tile_changed(&event);
            }
            Step::Reconnect { session } => {
                let old = sessions[session];
                harness.disconnect(&old);
                sessions[session] = watch(&mut harness);
            }
        }

        if !tick {
            continue;
        }
        harness.tick_and_exchange();
        prop_assert!(harness.server.markers().dirty_chunks().is_empty());

        for session in &sessions {
            let mismatches = harness.replica_mismatches(session);
            prop_assert!(
                mismatches.is_empty(),
                "session {:?} holds stale copies of {:?}",
                session,
                mismatches
            );

            if send_chunk_removals {
                let visible = harness
                    .server
                    .visible_chunks(session, &harness.terrain)
                    .unwrap();
                let client = harness.client(session);
                prop_assert!(client.chunk_keys().all(|key| visible.contains(key)));
            }
        }
    }

    Ok(())
}

proptest! {
    /// Replicas match the server for every visible chunk after every tick
    #[test]
    fn prop_replicas_converge(
        steps in prop::collection::vec((step_strategy(), any::<bool>()), 1..50),
    ) {
        run(steps, ServerConfig::default())?;
    }

    /// Same, while also dropping chunks that leave the view
    #[test]
    fn prop_replicas_converge_with_removals(
        steps in prop::collection::vec((step_strategy(), any::<bool>()), 1..50),
    ) {
        run(
            steps,
            ServerConfig {
                send_chunk_removals: true,
                ..ServerConfig::default()
            },
        )?;
    }
}
