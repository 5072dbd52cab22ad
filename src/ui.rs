/*
 * UI Module
 *
 * The egui control panel: rule weights, ranges, speed limit, population and
 * the viewer toggles. It reports what changed so the app can respawn the flock
 * when the population slider moves.
 */

use nannou_egui::{egui, Egui};

use crate::app::ViewSettings;
use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};

#[derive(Debug, Clone, Copy, Default)]
pub struct UiResponse {
    pub reset_flock: bool,
    pub reset_camera: bool,
    pub changes: ParamChanges,
}

pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    view: &mut ViewSettings,
    debug_info: &DebugInfo,
    camera: &Camera,
) -> UiResponse {
    let mut response = UiResponse::default();
    let tracker = params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Flock Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(egui::Slider::new(&mut params.num_agents, SimulationParams::num_agents_range()).text("Agents"));
                if ui.button("Respawn Flock").clicked() {
                    response.reset_flock = true;
                }
                ui.add(egui::Slider::new(&mut params.speed_limit, SimulationParams::speed_limit_range()).text("Speed Limit"));
            });

            ui.collapsing("Flocking Rules", |ui| {
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::weight_range()).text("Cohesion"));
                ui.add(egui::Slider::new(&mut params.separation_weight, SimulationParams::weight_range()).text("Separation"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, SimulationParams::weight_range()).text("Alignment"));
                ui.add(egui::Slider::new(&mut params.vision_range, SimulationParams::range_range()).logarithmic(true).text("Vision Range"));
                ui.add(egui::Slider::new(&mut params.collision_range, SimulationParams::range_range()).logarithmic(true).text("Collision Range"));
            });

            ui.collapsing("Boundary", |ui| {
                ui.checkbox(&mut view.fit_bounds_to_view, "Fit Bounds To View");
                if !view.fit_bounds_to_view {
                    ui.add(egui::Slider::new(&mut params.boundary.x, 0.0..=200.0).text("Half Width"));
                    ui.add(egui::Slider::new(&mut params.boundary.y, 0.0..=200.0).text("Half Height"));
                }
                ui.add(egui::Slider::new(&mut params.boundary.z, 0.0..=200.0).text("Half Depth"));
                ui.checkbox(&mut view.show_boundary, "Show Boundary");
            });

            ui.collapsing("Camera", |ui| {
                ui.label("Orbit: click and drag");
                ui.label("Zoom: mouse wheel");
                ui.label(format!("Distance: {:.1}", camera.distance));
                if ui.button("Reset Camera").clicked() {
                    response.reset_camera = true;
                }
            });

            ui.collapsing("Performance Tuning", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Scan");
                ui.checkbox(&mut params.enable_spatial_grid, "Enable Spatial Grid");

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Step time: {:.2} ms", debug_info.step_time.as_secs_f64() * 1000.0));
            });

            ui.checkbox(&mut view.show_debug, "Show Debug Info");
            ui.checkbox(&mut view.paused, "Pause Simulation");
        });

    // Sliders may cross; the collision range can never exceed the vision range
    params.collision_range = params.collision_range.min(params.vision_range);

    response.changes = tracker.detect_changes(params);
    response
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 240.0;

    let mut lines = vec![
        format!("FPS: {:.1}", debug_info.fps),
        format!("Step time: {:.2} ms", debug_info.step_time.as_secs_f64() * 1000.0),
    ];
    if let Some(stats) = &debug_info.stats {
        lines.push(format!("Frame: {}", stats.frame));
        lines.push(format!("Agents: {}", stats.agents));
        lines.push(format!("Mean speed: {:.3}", stats.mean_speed));
        lines.push(format!("Max speed: {:.3}", stats.max_speed));
        lines.push(format!("Mean neighbors: {:.2}", stats.mean_neighbors));
        lines.push(format!("Out of bounds: {}", stats.out_of_bounds));
    }

    let panel_height = line_height * lines.len() as f32 + margin;
    draw.rect()
        .x_y(window_rect.right() - panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width / 2.0;
    let text_y = window_rect.top() - margin;
    for (i, text) in lines.iter().enumerate() {
        draw.text(text)
            .x_y(text_x, text_y - i as f32 * line_height)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
