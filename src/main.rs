use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use bevy::{
    log::{Level, LogPlugin},
    prelude::*,
};

mod console;
mod core;
mod events;
mod ledger;
mod market;
mod services;
mod session;
mod world;

use crate::{
    console::{parse_line, render, ConsoleFeed, ConsoleInput, ConsolePlugin, View},
    core::CorePlugin,
    events::EventsPlugin,
    ledger::Player,
    market::{MarketBoard, MarketPlugin},
    services::ServicesPlugin,
    session::{CommandQueue, SessionPlugin},
    world::LocationAtlas,
};

fn main() {
    load_env_file();

    let mut app = App::new();
    app.add_plugins((
        LogPlugin {
            level: Level::WARN,
            filter: "fushengji=info".to_string(),
            ..default()
        },
        CorePlugin::default(),
        MarketPlugin,
        EventsPlugin,
        ServicesPlugin,
        SessionPlugin,
        ConsolePlugin, // After SessionPlugin so the feed sees every turn message
    ));
    app.finish();
    app.cleanup();
    app.update();

    println!("{}", show(app.world(), View::Status));
    println!("{}", show(app.world(), View::Goods));
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("Failed to read from stdin: {err}");
                break;
            }
        };

        match parse_line(&line) {
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Help) => println!("{}", render::HELP),
            Ok(ConsoleInput::Show(view)) => println!("{}", show(app.world(), view)),
            Ok(ConsoleInput::Command(command)) => {
                app.world_mut().resource_mut::<CommandQueue>().push(command);
                app.update();

                let mut feed = app.world_mut().resource_mut::<ConsoleFeed>();
                for line in feed.drain() {
                    println!("{line}");
                }
                if feed.finished() {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
        prompt();
    }
}

fn show(world: &World, view: View) -> String {
    let player = world.resource::<Player>();
    let atlas = world.resource::<LocationAtlas>();
    match view {
        View::Status => render::status(player, atlas),
        View::Goods => render::market(&world.resource::<MarketBoard>().available_goods()),
        View::Locations => render::locations(atlas, player.city(), player.location()),
    }
}

fn prompt() {
    print!("> ");
    // A failed flush only delays the prompt.
    let _ = io::stdout().flush();
}

fn load_env_file() {
    const ENV_FILE: &str = "fushengji.env";

    let path = Path::new(ENV_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", ENV_FILE, err);
    }
}
