use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use neuroflap::simulation::game::Game;

use crate::graphics::PANEL_WIDTH;

pub struct UIState {
    pub simulation_speed: f32,
    pub rendering_enabled: bool,
    pub next_generation_requested: bool,
    pub restart_requested: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            simulation_speed: 1.0,
            rendering_enabled: true,
            next_generation_requested: false,
            restart_requested: false,
        }
    }
}

pub fn draw_ui(state: &mut UIState, game: &Game) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        egui_ctx.set_visuals(visuals);

        draw_stats_panel(egui_ctx, state, game);
    });
}

fn draw_stats_panel(egui_ctx: &egui::Context, state: &mut UIState, game: &Game) {
    egui::SidePanel::right("stats_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(egui_ctx, |ui| {
            ui.heading("Neuroflap");
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("⏭ Next generation").clicked() {
                    state.next_generation_requested = true;
                }
                if ui.button("🔄 Hard restart").clicked() {
                    state.restart_requested = true;
                }
            });

            let button_text = if state.rendering_enabled {
                "🎨 Rendering: ON"
            } else {
                "🎨 Rendering: OFF"
            };
            if ui.button(button_text).clicked() {
                state.rendering_enabled = !state.rendering_enabled;
            }

            ui.add(egui::Slider::new(&mut state.simulation_speed, 0.25..=50.0).text("Speed"));
            ui.separator();

            ui.label(format!("Generation: {}", game.generation()));
            ui.label(format!(
                "Alive: {} / {}",
                game.agents().len(),
                game.params().population_size
            ));
            ui.label(format!("Score: {}", game.best_score()));
            ui.label(format!("Best ever: {}", game.history().best_ever()));
            ui.separator();

            ui.label("Score per generation");
            draw_score_plot(ui, game);
        });
}

fn draw_score_plot(ui: &mut egui::Ui, game: &Game) {
    let summaries = game.history().summaries();
    if summaries.is_empty() {
        ui.label("Waiting for the first generation...");
        return;
    }

    let best: PlotPoints = summaries
        .iter()
        .map(|s| [f64::from(s.generation), f64::from(s.best_score)])
        .collect();
    let mean: PlotPoints = summaries
        .iter()
        .map(|s| [f64::from(s.generation), f64::from(s.mean_score)])
        .collect();

    Plot::new("score_plot")
        .height(200.0)
        .show_axes([true, true])
        .legend(Legend::default())
        .label_formatter(|name, value| {
            format!("{}\nGeneration: {:.0}\nScore: {:.1}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(best)
                    .color(egui::Color32::from_rgb(255, 200, 100))
                    .name("Best"),
            );
            plot_ui.line(
                Line::new(mean)
                    .color(egui::Color32::from_rgb(100, 150, 255))
                    .name("Mean"),
            );
        });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
