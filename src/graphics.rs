use macroquad::prelude::*;
use neuroflap::simulation::game::Game;
use neuroflap::simulation::params::Params;

/// Width reserved for the stats panel on the right.
pub const PANEL_WIDTH: f32 = 300.0;

/// Maps world units onto the part of the window left of the stats panel.
pub struct Viewport {
    scale: f32,
    world_width: f32,
    world_height: f32,
}

impl Viewport {
    pub fn new(params: &Params) -> Self {
        let available = (screen_width() - PANEL_WIDTH).max(1.0);
        let scale = (available / params.world_width).min(screen_height() / params.world_height);
        Self {
            scale,
            world_width: params.world_width,
            world_height: params.world_height,
        }
    }

    fn to_screen(&self, value: f32) -> f32 {
        value * self.scale
    }
}

pub fn draw_obstacles(game: &Game, viewport: &Viewport) {
    let color = Color::from_rgba(0, 200, 0, 255);

    for obstacle in game.obstacles() {
        let x = viewport.to_screen(obstacle.pos.x);
        let width = viewport.to_screen(obstacle.width);

        // upper pipe
        draw_rectangle(x, 0.0, width, viewport.to_screen(obstacle.gap_top()), color);

        // lower pipe
        let bottom = obstacle.gap_bottom();
        draw_rectangle(
            x,
            viewport.to_screen(bottom),
            width,
            viewport.to_screen(viewport.world_height - bottom),
            color,
        );
    }

    draw_rectangle_lines(
        0.0,
        0.0,
        viewport.to_screen(viewport.world_width),
        viewport.to_screen(viewport.world_height),
        2.0,
        DARKGRAY,
    );
}

pub fn draw_agents(game: &Game, viewport: &Viewport) {
    for agent in game.agents() {
        draw_rectangle_ex(
            viewport.to_screen(agent.pos.x),
            viewport.to_screen(agent.pos.y),
            viewport.to_screen(agent.width),
            viewport.to_screen(agent.height),
            DrawRectangleParams {
                offset: vec2(0.5, 0.5),
                rotation: agent.tilt(),
                color: Color::from_rgba(255, 220, 60, 140),
            },
        );
    }
}
