use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wheel_shared::shared_wheel_game::Segment;
use wheel_shared::wheel_math::{label_anchor, wheel_layout, POINTER_ANGLE_DEG};
use yew::prelude::*;

const RIM_MARGIN: f64 = 28.0;
const MAX_LABEL_CHARS: usize = 14;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub segments: Vec<Segment>,
    pub rotation: f64,
    #[prop_or_default]
    pub is_spinning: bool,
    #[prop_or(360)]
    pub size: u32,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();

        use_effect_with(
            (props.segments.clone(), props.rotation, props.is_spinning),
            move |(segments, rotation, is_spinning)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    let context = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());

                    match context {
                        Some(context) => draw_wheel(
                            &context,
                            canvas.width() as f64,
                            canvas.height() as f64,
                            segments,
                            *rotation,
                            *is_spinning,
                        ),
                        None => log::error!("Canvas 2d context unavailable"),
                    }
                }
                || ()
            },
        );
    }

    html! {
        <canvas
            ref={canvas_ref}
            width={props.size.to_string()}
            height={props.size.to_string()}
            class="max-w-full h-auto"
        />
    }
}

fn draw_wheel(
    context: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    segments: &[Segment],
    rotation_deg: f64,
    is_spinning: bool,
) {
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - RIM_MARGIN;

    context.clear_rect(0.0, 0.0, width, height);

    // Outer glow, a little stronger while the wheel is moving
    context.begin_path();
    let glow = if is_spinning { 0.3 } else { 0.15 };
    context.set_fill_style_str(&format!("rgba(100, 130, 255, {})", glow));
    let _ = context.arc(center_x, center_y, radius + 12.0, 0.0, 2.0 * PI);
    context.fill();

    if segments.is_empty() {
        context.begin_path();
        context.set_fill_style_str("#e5e7eb");
        let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
        context.fill();
        context.set_fill_style_str("#6b7280");
        context.set_text_align("center");
        context.set_text_baseline("middle");
        context.set_font("16px 'Segoe UI', Roboto, system-ui, sans-serif");
        let _ = context.fill_text("Add segments to play", center_x, center_y);
        draw_pointer(context, center_x, center_y, radius);
        return;
    }

    context.save();
    let _ = context.translate(center_x, center_y);
    let _ = context.rotate(rotation_deg.to_radians());

    let count = segments.len();
    for (arc, segment) in wheel_layout(count).iter().zip(segments) {
        context.begin_path();
        context.move_to(0.0, 0.0);
        let _ = context.arc(0.0, 0.0, radius, arc.start_deg.to_radians(), arc.end_deg.to_radians());
        context.close_path();
        context.set_fill_style_str(&segment.color);
        context.fill();
        context.set_stroke_style_str("rgba(255, 255, 255, 0.9)");
        context.set_line_width(2.0);
        context.stroke();
    }

    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_fill_style_str("#1f2937");
    context.set_font("bold 15px 'Segoe UI', Roboto, system-ui, sans-serif");
    for (index, (arc, segment)) in wheel_layout(count).iter().zip(segments).enumerate() {
        let (x, y) = label_anchor(0.0, 0.0, radius, index, count);
        context.save();
        let _ = context.translate(x, y);
        let _ = context.rotate(arc.center_deg.to_radians());
        let _ = context.fill_text(&short_label(&segment.label), 0.0, 0.0);
        context.restore();
    }

    context.restore();

    // Hub
    context.begin_path();
    context.set_fill_style_str("#ffffff");
    let _ = context.arc(center_x, center_y, radius * 0.12, 0.0, 2.0 * PI);
    context.fill();
    context.set_stroke_style_str("rgba(130, 100, 255, 0.6)");
    context.set_line_width(3.0);
    context.stroke();

    // Rim
    context.begin_path();
    context.set_stroke_style_str("rgba(130, 100, 255, 0.5)");
    context.set_line_width(4.0);
    let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
    context.stroke();

    draw_pointer(context, center_x, center_y, radius);
}

/// Fixed marker at the pointer angle; it never rotates with the wheel.
fn draw_pointer(context: &CanvasRenderingContext2d, center_x: f64, center_y: f64, radius: f64) {
    let angle = POINTER_ANGLE_DEG.to_radians();
    let (dir_x, dir_y) = (angle.cos(), angle.sin());
    let (side_x, side_y) = (-dir_y, dir_x);
    let half_width = 14.0;

    let tip = (center_x + dir_x * (radius - 10.0), center_y + dir_y * (radius - 10.0));
    let base = (center_x + dir_x * (radius + 20.0), center_y + dir_y * (radius + 20.0));

    context.begin_path();
    context.move_to(tip.0, tip.1);
    context.line_to(base.0 + side_x * half_width, base.1 + side_y * half_width);
    context.line_to(base.0 - side_x * half_width, base.1 - side_y * half_width);
    context.close_path();
    context.set_fill_style_str("#f59e0b");
    context.fill();
    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();
}

fn short_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    short.push('…');
    short
}

/// Cubic ease-out: fast start, gentle stop.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Rotation shown `elapsed_ms` into a spin from `start_deg` by `delta_deg`.
pub fn animated_rotation(start_deg: f64, delta_deg: f64, elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return start_deg + delta_deg;
    }
    start_deg + delta_deg * ease_out_cubic(elapsed_ms / duration_ms)
}
