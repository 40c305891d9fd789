use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bonfires::block::loader as block_loader;
use bonfires::bonfire::BonfirePlugin;
use bonfires::debug::DebugDumpPlugin;
use bonfires::item::loader as item_loader;
use bonfires::lang::load_lang_from_dir;
use bonfires::presentation::AmbientSoundPlugin;
use bonfires::settings::loader as settings_loader;
use std::time::Duration;

mod app;
use app::{DemoScript, log_world_events, run_demo_script, setup_demo_site, speed_up_time};

// Game tick constants
pub const GAME_TICK_RATE: f64 = 20.0;
/// Simulated seconds per real second, so a full burn fits in a short run.
pub const DEMO_SPEED: f32 = 20.0;

fn main() {
    let settings = settings_loader::load_settings_from_dir("data/settings");
    let settings_watcher = settings_loader::setup_settings_watcher("data/settings")
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / GAME_TICK_RATE,
    ))))
    .add_plugins(LogPlugin::default());

    app.insert_resource(settings);
    app.insert_resource(settings_watcher);
    app.insert_resource(block_loader::load_blocks_from_dir("data/blocks"));
    app.insert_resource(
        block_loader::setup_block_watcher("data/blocks").unwrap_or_else(|_| {
            block_loader::BlockWatcher::stub()
        }),
    );
    app.insert_resource(item_loader::load_items_from_dir("data/items"));
    app.insert_resource(
        item_loader::setup_item_watcher("data/items").unwrap_or_else(|_| {
            item_loader::ItemWatcher::stub()
        }),
    );
    app.insert_resource(load_lang_from_dir("data/lang"));

    app.add_plugins(BonfirePlugin)
        .add_plugins(AmbientSoundPlugin)
        .add_plugins(DebugDumpPlugin);

    app.init_resource::<DemoScript>();
    app.add_systems(Startup, (speed_up_time, setup_demo_site));
    app.add_systems(PreUpdate, run_demo_script);
    app.add_systems(Last, log_world_events);

    app.add_systems(Update, block_loader::check_block_changes);
    app.add_systems(Update, item_loader::check_item_changes);
    app.add_systems(Update, settings_loader::check_settings_changes);

    app.run();
}
