/*
 * Renderer Module
 *
 * Draws the flock through the perspective camera: the boundary box as a
 * wireframe, each agent as a dot with a short heading tick, far agents first.
 * Dot size and color follow depth and speed.
 */

use nannou::prelude::*;

use glam::Vec3;
use tracing::warn;

use crate::app::Model;
use crate::ui;
use crate::AGENT_SIZE;

// World-space length of the heading tick
const HEADING_LENGTH: f32 = 0.4;

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let camera = &model.camera;

    if model.view.show_boundary {
        draw_boundary(&draw, model, window_rect);
    }

    // Painter's order: farthest first
    let mut projected: Vec<(usize, Point2, f32)> = model
        .flock
        .positions()
        .enumerate()
        .filter_map(|(i, position)| camera.project(position, window_rect).map(|(screen, depth)| (i, screen, depth)))
        .collect();
    projected.sort_by(|a, b| b.2.total_cmp(&a.2));

    let agents = model.flock.agents();
    let speed_limit = model.params.speed_limit;
    for &(i, screen, depth) in &projected {
        let agent = &agents[i];
        let radius = (AGENT_SIZE * camera.distance / depth / 2.0).clamp(1.0, 12.0);
        let heat = (agent.speed() / speed_limit).clamp(0.0, 1.0);
        let color = hsl(0.6 - 0.6 * heat, 0.8, 0.55);

        draw.ellipse().xy(screen).radius(radius).color(color);

        let speed = agent.speed();
        if speed > 0.0 {
            let tip = agent.position + agent.velocity / speed * HEADING_LENGTH;
            if let Some((tip_screen, _)) = camera.project(tip, window_rect) {
                draw.line().start(screen).end(tip_screen).weight(1.0).color(color);
            }
        }
    }

    if model.view.show_debug {
        // Vision range of the first agent
        if let Some(first) = agents.first() {
            if let Some((screen, depth)) = camera.project(first.position, window_rect) {
                let focal = camera.focal_length(window_rect);
                draw.ellipse()
                    .xy(screen)
                    .radius(model.params.vision_range * focal / depth)
                    .no_fill()
                    .stroke(GREEN)
                    .stroke_weight(1.0);
                draw.ellipse()
                    .xy(screen)
                    .radius(model.params.collision_range * focal / depth)
                    .no_fill()
                    .stroke(RED)
                    .stroke_weight(1.0);
            }
        }

        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to render frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to render control panel");
    }
}

fn draw_boundary(draw: &Draw, model: &Model, window_rect: Rect) {
    let b = model.params.boundary;
    let corners: Vec<Vec3> = (0..8)
        .map(|k| {
            Vec3::new(
                if k & 1 == 0 { -b.x } else { b.x },
                if k & 2 == 0 { -b.y } else { b.y },
                if k & 4 == 0 { -b.z } else { b.z },
            )
        })
        .collect();

    // Corners differing in exactly one bit share an edge
    for a in 0..8usize {
        for bit in [1usize, 2, 4] {
            let other = a | bit;
            if other == a {
                continue;
            }
            let start = model.camera.project(corners[a], window_rect);
            let end = model.camera.project(corners[other], window_rect);
            if let (Some((start, _)), Some((end, _))) = (start, end) {
                draw.line()
                    .start(start)
                    .end(end)
                    .weight(1.0)
                    .color(rgba(0.3, 0.3, 0.3, 1.0));
            }
        }
    }
}
