//! Frame-level integration tests: systems run through a `Schedule` on a
//! `World` without a window, covering message plumbing, the game-over
//! latch and delay, hotkeys and commentary bookkeeping.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use crossbeam_channel::{Receiver, Sender, unbounded};

use faceoff::events::audio::AudioCmd;
use faceoff::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use faceoff::events::matchover::{PendingGameOver, observe_match_over};
use faceoff::events::sound::SoundEvent;
use faceoff::game;
use faceoff::resources::arena::{Arena, Corner, GameMode, SessionSetup};
use faceoff::resources::audio::AudioSettings;
use faceoff::resources::commentary::{
    Commentary, CommentaryBridge, CommentaryReply, CommentaryRequest,
};
use faceoff::resources::gamestate::{GameState, GameStates, NextGameState};
use faceoff::resources::input::{GameKey, InputState};
use faceoff::resources::systemsstore::SystemsStore;
use faceoff::resources::worldtime::WorldTime;
use faceoff::systems::arena::arena_tick_system;
use faceoff::systems::commentary::poll_commentary;
use faceoff::systems::gameover::game_over_delay_system;
use faceoff::systems::gamestate::{check_pending_state, state_is_fighting};
use faceoff::systems::hotkeys::hotkeys_system;
use faceoff::systems::sound::{sound_policy_system, update_sound_events};
use faceoff::systems::time::update_world_time;

const FRAME: f32 = 0.25;

/// The far ends of the commentary channels, standing in for the worker.
struct FakeWorker {
    rx_req: Receiver<CommentaryRequest>,
    tx_reply: Sender<CommentaryReply>,
}

fn make_world(mode: GameMode) -> (World, FakeWorker) {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(PendingGameOver::default());
    world.insert_resource(AudioSettings::default());
    world.insert_resource(SessionSetup {
        mode,
        ..SessionSetup::default()
    });
    world.init_resource::<Messages<SoundEvent>>();
    world.init_resource::<Messages<AudioCmd>>();

    let (tx_req, rx_req) = unbounded::<CommentaryRequest>();
    let (tx_reply, rx_reply) = unbounded::<CommentaryReply>();
    world.insert_resource(CommentaryBridge { tx_req, rx_reply });
    world.insert_resource(Commentary::default());

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(observe_match_over));

    let mut systems_store = SystemsStore::new();
    let id = world.register_system(game::enter_fight);
    systems_store.insert("enter_fight", id);
    let id = world.register_system(game::enter_game_over);
    systems_store.insert("enter_game_over", id);
    let id = world.register_system(game::quit_game);
    systems_store.insert("quit_game", id);
    world.insert_resource(systems_store);
    world.flush();

    world
        .resource_mut::<NextGameState>()
        .set(GameStates::Fighting);
    world.trigger(GameStateChangedEvent {});
    world.flush();

    (world, FakeWorker { rx_req, tx_reply })
}

fn frame_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(hotkeys_system);
    schedule.add_systems(check_pending_state.after(hotkeys_system));
    schedule.add_systems(
        arena_tick_system
            .run_if(state_is_fighting)
            .after(check_pending_state),
    );
    schedule.add_systems(
        game_over_delay_system
            .run_if(state_is_fighting)
            .after(arena_tick_system),
    );
    schedule.add_systems(
        (sound_policy_system, update_sound_events)
            .chain()
            .after(arena_tick_system),
    );
    schedule.add_systems(poll_commentary.after(check_pending_state));
    schedule
}

fn run_frame(world: &mut World, schedule: &mut Schedule, held: &[GameKey]) {
    world
        .resource_mut::<InputState>()
        .advance(held.iter().copied());
    update_world_time(world, FRAME);
    schedule.run(world);
}

fn audio_cmds(world: &mut World) -> Vec<AudioCmd> {
    let mut state = SystemState::<MessageReader<AudioCmd>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().cloned().collect()
}

fn state_of(world: &World) -> GameStates {
    world.resource::<GameState>().get().clone()
}

fn knock_out_player_two(world: &mut World) {
    match &mut *world.resource_mut::<Arena>() {
        Arena::Versus(m) => {
            m.p2.take_damage(1000);
        }
        Arena::Practice(_) => panic!("expected a versus match"),
    }
}

/// Run frames until the game-over screen is up. Returns the frame count.
fn run_until_game_over(world: &mut World, schedule: &mut Schedule) -> usize {
    for frame in 1..=200 {
        run_frame(world, schedule, &[]);
        if state_of(world) == GameStates::GameOver {
            return frame;
        }
    }
    panic!("game over never reached");
}

#[test]
fn first_fight_is_built_on_startup() {
    let (world, _worker) = make_world(GameMode::Practice);
    assert_eq!(state_of(&world), GameStates::Fighting);
    assert!(matches!(*world.resource::<Arena>(), Arena::Practice(_)));
}

#[test]
fn jump_becomes_a_play_command() {
    let (mut world, _worker) = make_world(GameMode::Versus);
    let mut schedule = frame_schedule();

    run_frame(&mut world, &mut schedule, &[GameKey::W]);

    let cmds = audio_cmds(&mut world);
    assert_eq!(
        cmds,
        vec![AudioCmd::PlayFx {
            id: "jump".to_string(),
            pitch: 1.0
        }]
    );
}

#[test]
fn mute_hotkey_silences_sounds() {
    let (mut world, _worker) = make_world(GameMode::Versus);
    let mut schedule = frame_schedule();

    run_frame(&mut world, &mut schedule, &[GameKey::M, GameKey::W, GameKey::O]);

    assert!(world.resource::<AudioSettings>().muted);
    assert!(audio_cmds(&mut world).is_empty());

    // holding M does not toggle again
    run_frame(&mut world, &mut schedule, &[GameKey::M]);
    assert!(world.resource::<AudioSettings>().muted);
    run_frame(&mut world, &mut schedule, &[]);
    run_frame(&mut world, &mut schedule, &[GameKey::M]);
    assert!(!world.resource::<AudioSettings>().muted);
}

#[test]
fn knockout_reaches_game_over_after_delay_and_requests_commentary() {
    let (mut world, worker) = make_world(GameMode::Versus);
    let mut schedule = frame_schedule();
    knock_out_player_two(&mut world);

    let frames = run_until_game_over(&mut world, &mut schedule);
    // 60 ticks of KO fall, then one second of delay at four frames per second
    assert!(frames > 60 && frames <= 66, "game over after {} frames", frames);

    let pending = world.resource::<PendingGameOver>().clone();
    let outcome = pending.outcome.expect("match result");
    assert_eq!(outcome.winner, Corner::One);
    assert_eq!(outcome.winner_name, "Player 1");

    let req = worker.rx_req.try_recv().expect("commentary request");
    assert_eq!(req.winner, "Player 1");
    assert_eq!(req.loser, "Player 2");
    assert_eq!(req.generation, world.resource::<Commentary>().generation);
    assert!(worker.rx_req.try_recv().is_err());
}

#[test]
fn stale_commentary_is_discarded() {
    let (mut world, worker) = make_world(GameMode::Versus);
    let mut schedule = frame_schedule();
    knock_out_player_two(&mut world);
    run_until_game_over(&mut world, &mut schedule);
    let req = worker.rx_req.try_recv().expect("commentary request");

    worker
        .tx_reply
        .send(CommentaryReply {
            generation: req.generation - 1,
            text: "old news".into(),
        })
        .unwrap();
    run_frame(&mut world, &mut schedule, &[]);
    assert_eq!(world.resource::<Commentary>().text, None);

    worker
        .tx_reply
        .send(CommentaryReply {
            generation: req.generation,
            text: "WHAT A KNOCKOUT!".into(),
        })
        .unwrap();
    run_frame(&mut world, &mut schedule, &[]);
    assert_eq!(
        world.resource::<Commentary>().text.as_deref(),
        Some("WHAT A KNOCKOUT!")
    );
}

#[test]
fn rematch_rebuilds_the_match_and_drops_late_commentary() {
    let (mut world, worker) = make_world(GameMode::Versus);
    let mut schedule = frame_schedule();
    knock_out_player_two(&mut world);
    run_until_game_over(&mut world, &mut schedule);
    let req = worker.rx_req.try_recv().expect("commentary request");

    run_frame(&mut world, &mut schedule, &[GameKey::Enter]);
    run_frame(&mut world, &mut schedule, &[]);
    assert_eq!(state_of(&world), GameStates::Fighting);
    assert_eq!(*world.resource::<PendingGameOver>(), PendingGameOver::default());
    match &*world.resource::<Arena>() {
        Arena::Versus(m) => {
            assert!(!m.is_over());
            assert_eq!(m.p2.health, m.p2.max_health);
        }
        Arena::Practice(_) => panic!("expected a versus match"),
    }

    // the answer for the finished match arrives after the rematch started
    worker
        .tx_reply
        .send(CommentaryReply {
            generation: req.generation,
            text: "too late".into(),
        })
        .unwrap();
    run_frame(&mut world, &mut schedule, &[]);
    assert_eq!(world.resource::<Commentary>().text, None);
}

#[test]
fn escape_quits() {
    let (mut world, _worker) = make_world(GameMode::Practice);
    let mut schedule = frame_schedule();
    run_frame(&mut world, &mut schedule, &[GameKey::Escape]);
    run_frame(&mut world, &mut schedule, &[]);
    assert_eq!(state_of(&world), GameStates::Quitting);
}
