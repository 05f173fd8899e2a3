use clap::Parser;
use macroquad::prelude::*;
use neuroflap::simulation::game::Game;
use neuroflap::simulation::params::Params;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod graphics;
mod ui;

/// Upper bound on simulation ticks per rendered frame.
const MAX_TICKS_PER_FRAME: u32 = 1000;

#[derive(Debug, Parser)]
#[command(version, about = "Evolve neural agents through a scrolling obstacle course")]
struct Args {
    /// JSON file with simulation parameters; missing fields use defaults.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Overrides the population size.
    #[arg(long)]
    population: Option<usize>,
}

/// Sized for the default world; other world sizes are scaled to fit the window.
fn window_conf() -> Conf {
    let params = Params::default();
    Conf {
        window_title: "Neuroflap".to_owned(),
        window_width: (params.world_width + graphics::PANEL_WIDTH) as i32,
        window_height: params.world_height as i32,
        ..Default::default()
    }
}

fn load_params(args: &Args) -> Params {
    let mut params = match &args.params {
        Some(path) => match Params::load_from_file(path) {
            Ok(params) => params,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "falling back to default parameters");
                Params::default()
            }
        },
        None => Params::default(),
    };

    if let Some(population) = args.population {
        params.population_size = population;
    }

    if let Err(e) = params.validate() {
        tracing::error!(error = %e, "falling back to default parameters");
        return Params::default();
    }
    params
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let params = load_params(&args);
    let tick = 1.0 / params.tick_rate as f32;

    tracing::info!(
        population = params.population_size,
        tick_rate = params.tick_rate,
        "starting simulation"
    );

    let mut game = match Game::new(params) {
        Ok(game) => game,
        Err(e) => {
            tracing::error!(error = %e, "cannot start simulation");
            return;
        }
    };

    let mut ui_state = ui::UIState::new();
    let mut accumulator = 0.0;

    loop {
        accumulator += get_frame_time() * ui_state.simulation_speed;

        let mut ticks = 0;
        while accumulator >= tick && ticks < MAX_TICKS_PER_FRAME {
            game.update();
            accumulator -= tick;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            accumulator = 0.0;
        }

        clear_background(BLACK);

        if ui_state.rendering_enabled {
            let viewport = graphics::Viewport::new(game.params());
            graphics::draw_obstacles(&game, &viewport);
            graphics::draw_agents(&game, &viewport);
        }

        ui::draw_ui(&mut ui_state, &game);
        ui::process_egui();

        if std::mem::take(&mut ui_state.next_generation_requested) {
            game.manual_advance();
        }
        if std::mem::take(&mut ui_state.restart_requested) {
            game.hard_restart();
        }

        next_frame().await
    }
}
