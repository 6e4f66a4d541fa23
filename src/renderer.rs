// Renderer that turns particle field draw calls into CanvasRenderingContext2d
// calls, and keeps the canvas backing buffer in step with the viewport.

use crate::color::Color;
use crate::surface::Surface;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct Renderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl Renderer {
    // Errors if the element has no 2d context, the caller decides whether that is fatal
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Renderer { canvas, context })
    }

    // Setting the size also wipes the backing buffer, the next frame redraws everything
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn trace_disc(&self, center: Vector2<f64>, radius: f64) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0)
    }
}

#[allow(deprecated)]
impl Surface for Renderer {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.context.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
        opacity: f64,
    ) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css_with_opacity(opacity)));
        self.context.set_line_width(width);
        self.context.stroke();
        Ok(())
    }

    fn glow(&mut self, center: Vector2<f64>, radius: f64, color: Color) -> Result<(), JsValue> {
        let gradient = self
            .context
            .create_radial_gradient(center[0], center[1], 0.0, center[0], center[1], radius)?;
        gradient.add_color_stop(0.0, &color.with_alpha(0xcc).to_css())?;
        gradient.add_color_stop(1.0, &Color::TRANSPARENT.to_css())?;
        self.trace_disc(center, radius)?;
        self.context.set_fill_style(&gradient);
        self.context.fill();
        Ok(())
    }

    fn disc(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.trace_disc(center, radius)?;
        self.context
            .set_fill_style(&JsValue::from_str(&color.with_alpha(0xff).to_css()));
        self.context.set_global_alpha(alpha);
        self.context.fill();
        self.context.set_global_alpha(1.0);
        Ok(())
    }
}
