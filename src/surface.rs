// The handful of 2d drawing primitives the particle field needs. The canvas
// implementation lives in renderer.rs, tests record calls instead of drawing.

use crate::color::Color;
use vecmath::Vector2;

pub trait Surface {
    type Error;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    fn line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
        opacity: f64,
    ) -> Result<(), Self::Error>;

    /// Radial gradient disc fading from `color` at the center to transparent at `radius`.
    fn glow(&mut self, center: Vector2<f64>, radius: f64, color: Color) -> Result<(), Self::Error>;

    fn disc(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        Clear(f64, f64),
        Line {
            from: Vector2<f64>,
            to: Vector2<f64>,
            width: f64,
            color: Color,
            opacity: f64,
        },
        Glow {
            center: Vector2<f64>,
            radius: f64,
            color: Color,
        },
        Disc {
            center: Vector2<f64>,
            radius: f64,
            color: Color,
            alpha: f64,
        },
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    impl Surface for RecordingSurface {
        type Error = Infallible;

        fn clear(&mut self, width: f64, height: f64) -> Result<(), Infallible> {
            self.calls.push(Call::Clear(width, height));
            Ok(())
        }

        fn line(
            &mut self,
            from: Vector2<f64>,
            to: Vector2<f64>,
            width: f64,
            color: Color,
            opacity: f64,
        ) -> Result<(), Infallible> {
            self.calls.push(Call::Line {
                from,
                to,
                width,
                color,
                opacity,
            });
            Ok(())
        }

        fn glow(
            &mut self,
            center: Vector2<f64>,
            radius: f64,
            color: Color,
        ) -> Result<(), Infallible> {
            self.calls.push(Call::Glow { center, radius, color });
            Ok(())
        }

        fn disc(
            &mut self,
            center: Vector2<f64>,
            radius: f64,
            color: Color,
            alpha: f64,
        ) -> Result<(), Infallible> {
            self.calls.push(Call::Disc {
                center,
                radius,
                color,
                alpha,
            });
            Ok(())
        }
    }
}
