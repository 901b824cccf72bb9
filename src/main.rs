//! Face-Off main entry point.
//!
//! A two-player local fighting game with a practice mode against a swinging
//! punching bag, written in Rust using:
//! - **raylib** for windowing, graphics, keyboard and audio
//! - **bevy_ecs** for resources, messages, observers and the frame schedule
//!
//! # Main Loop
//!
//! 1. Parse the command line, load `config.ini` and apply CLI overrides
//! 2. Initialize the raylib window, the ECS world, the audio thread and the
//!    commentary worker
//! 3. Register observers and state hooks, then enter the fighting state
//! 4. Run the main loop:
//!    - Read the keyboard, apply global hotkeys and pending state changes
//!    - Advance the running session one tick
//!    - Turn sound cues into audio commands, poll commentary
//!    - Render the arena, HUD and game-over screen
//! 5. Stop the audio thread and the commentary worker on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --mode practice --p1-name Rocky
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;
use std::time::Duration;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::{Parser, ValueEnum};
use log::{error, info, warn};

use faceoff::events::audio::AudioCmd;
use faceoff::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use faceoff::events::matchover::{PendingGameOver, observe_match_over};
use faceoff::events::sound::SoundEvent;
use faceoff::game;
use faceoff::resources::arena::{GameMode, SessionSetup};
use faceoff::resources::audio::{setup_audio, shutdown_audio};
use faceoff::resources::commentary::{
    ExternalCommentator, setup_commentary, shutdown_commentary,
};
use faceoff::resources::faces::FaceTextures;
use faceoff::resources::gameconfig::GameConfig;
use faceoff::resources::gamestate::{GameState, GameStates, NextGameState};
use faceoff::resources::input::InputState;
use faceoff::resources::systemsstore::SystemsStore;
use faceoff::resources::worldtime::WorldTime;
use faceoff::systems::arena::arena_tick_system;
use faceoff::systems::audio::{
    forward_audio_cmds, log_audio_messages, poll_audio_messages, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use faceoff::systems::commentary::poll_commentary;
use faceoff::systems::gameover::game_over_delay_system;
use faceoff::systems::gamestate::{check_pending_state, state_is_fighting};
use faceoff::systems::hotkeys::hotkeys_system;
use faceoff::systems::input::update_input_state;
use faceoff::systems::render::render_system;
use faceoff::systems::sound::{sound_policy_system, update_sound_events};
use faceoff::systems::time::update_world_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Two players on one keyboard.
    Versus,
    /// Player 1 against the punching bag.
    Practice,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Versus => GameMode::Versus,
            ModeArg::Practice => GameMode::Practice,
        }
    }
}

fn fighter_name(s: &str) -> Result<String, String> {
    let name = s.trim();
    if name.is_empty() {
        Err("fighter names cannot be empty".to_string())
    } else {
        Ok(name.to_string())
    }
}

/// Face-Off boxing arena
#[derive(Parser)]
#[command(version, about = "Face-Off: a two-player boxing arena with a practice bag.")]
struct Cli {
    /// Versus match or practice against the bag.
    #[arg(long, value_enum, default_value_t = ModeArg::Versus)]
    mode: ModeArg,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    #[arg(long, value_name = "NAME", value_parser = fighter_name)]
    p1_name: Option<String>,

    #[arg(long, value_name = "NAME", value_parser = fighter_name)]
    p2_name: Option<String>,

    #[arg(long, value_name = "NAME", value_parser = fighter_name)]
    bag_name: Option<String>,

    /// Face image for player 1.
    #[arg(long, value_name = "PATH")]
    p1_face: Option<PathBuf>,

    /// Face image for player 2.
    #[arg(long, value_name = "PATH")]
    p2_face: Option<PathBuf>,

    /// Face image for the punching bag.
    #[arg(long, value_name = "PATH")]
    bag_face: Option<PathBuf>,

    /// Start with sound muted.
    #[arg(long)]
    mute: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut GameConfig) {
        let overrides = [
            (&self.p1_name, &self.p1_face, &mut config.player1),
            (&self.p2_name, &self.p2_face, &mut config.player2),
            (&self.bag_name, &self.bag_face, &mut config.bag),
        ];
        for (name, face, fighter) in overrides {
            if let Some(name) = name {
                fighter.name = name.clone();
            }
            if let Some(face) = face {
                fighter.face = Some(face.clone());
            }
        }
        if self.mute {
            config.audio.muted = true;
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    cli.apply(&mut config);

    // Early-exit: write the effective config and quit (no window/audio needed)
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", config.config_path.display());
        return;
    }

    info!("Face-Off starting in {:?} mode", cli.mode);
    // --------------- Raylib window & assets ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Face-Off");
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Esc is a game key
    rl.set_exit_key(None);

    let mut faces = FaceTextures::new();
    for fighter in [&config.player1, &config.player2, &config.bag] {
        if let Some(path) = &fighter.face {
            faces.load(&mut rl, &thread, path);
        }
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(PendingGameOver::default());
    world.insert_resource(config.audio.clone());
    world.insert_resource(SessionSetup {
        mode: cli.mode.into(),
        player1: config.player1.clone(),
        player2: config.player2.clone(),
        bag: config.bag.clone(),
        settings: config.settings,
    });
    world.insert_resource(Messages::<SoundEvent>::default());

    // Init audio and queue every sound for loading
    setup_audio(&mut world);
    {
        let mut cmds = world.resource_mut::<Messages<AudioCmd>>();
        for cmd in config.audio.load_commands() {
            cmds.write(cmd);
        }
    }

    let commentator = ExternalCommentator::from_command_line(&config.commentary_command)
        .with_timeout(Duration::from_secs(config.commentary_timeout_secs));
    if !commentator.is_configured() {
        info!("no commentary command configured; matches end with the fallback line");
    }
    setup_commentary(&mut world, Box::new(commentator));

    world.insert_resource(config);
    world.insert_non_send_resource(faces);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(observe_match_over));

    // Game state systems store
    let mut systems_store = SystemsStore::new();
    let enter_fight_id = world.register_system(game::enter_fight);
    systems_store.insert("enter_fight", enter_fight_id);
    let enter_game_over_id = world.register_system(game::enter_game_over);
    systems_store.insert("enter_game_over", enter_game_over_id);
    let quit_game_id = world.register_system(game::quit_game);
    systems_store.insert("quit_game", quit_game_id);
    world.insert_resource(systems_store);

    world.flush();

    // Start the first fight right away
    world
        .resource_mut::<NextGameState>()
        .set(GameStates::Fighting);
    world.trigger(GameStateChangedEvent {});
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(hotkeys_system.after(update_input_state));
    update.add_systems(check_pending_state.after(hotkeys_system));
    update.add_systems(
        arena_tick_system
            .run_if(state_is_fighting)
            .after(check_pending_state),
    );
    update.add_systems(
        game_over_delay_system
            .run_if(state_is_fighting)
            .after(arena_tick_system),
    );
    update.add_systems(
        (sound_policy_system, update_sound_events)
            .chain()
            .after(arena_tick_system),
    );
    update.add_systems(
        // audio systems must be together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            log_audio_messages,
        )
            .chain()
            .after(sound_policy_system),
    );
    update.add_systems(poll_commentary.after(check_pending_state));
    update.add_systems(
        render_system
            .after(game_over_delay_system)
            .after(poll_commentary)
            .after(hotkeys_system),
    );

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && *world.resource::<GameState>().get() != GameStates::Quitting
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
    shutdown_audio(&mut world);
    shutdown_commentary(&mut world);
}
