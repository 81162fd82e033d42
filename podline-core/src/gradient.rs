//! Layered CSS gradients derived from sampled cover colors.
//!
//! A [`GradientDescriptor`] is always two `linear-gradient` layers: a 165°
//! three-stop primary layer and a 45° two-stop overlay. Its `Display` output
//! can be dropped straight into a CSS `background` declaration.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::color::{Hsl, Rgb};

pub const PRIMARY_ANGLE: u16 = 165;
pub const OVERLAY_ANGLE: u16 = 45;

const REFERENCE_HUE: f64 = 198.0;
const REFERENCE_SATURATION: f64 = 92.0;

/// Colors keep the model they were produced in; it decides how they print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopColor {
    Rgb(Rgb),
    Hsl(Hsl),
}

impl StopColor {
    pub fn to_rgb(self) -> Rgb {
        match self {
            StopColor::Rgb(rgb) => rgb,
            StopColor::Hsl(hsl) => hsl.rounded().to_rgb(),
        }
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: StopColor,
    pub alpha: f64,
    /// Percentage along the gradient line.
    pub position: u8,
}

impl GradientStop {
    pub const fn new(color: StopColor, alpha: f64, position: u8) -> Self {
        Self {
            color,
            alpha,
            position,
        }
    }
}

impl fmt::Display for GradientStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            StopColor::Rgb(Rgb { r, g, b }) => {
                write!(f, "rgba({r}, {g}, {b}, {})", self.alpha)?
            }
            StopColor::Hsl(hsl) => {
                let Hsl { h, s, l } = hsl.rounded();
                write!(f, "hsla({h}, {s}%, {l}%, {})", self.alpha)?
            }
        }
        write!(f, " {}%", self.position)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientLayer {
    pub angle: u16,
    pub stops: Vec<GradientStop>,
}

impl fmt::Display for GradientLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linear-gradient({}deg", self.angle)?;
        for stop in &self.stops {
            write!(f, ", {stop}")?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientDescriptor {
    primary: GradientLayer,
    overlay: GradientLayer,
}

impl GradientDescriptor {
    /// Cool blue used whenever no cover colors are available.
    pub fn fallback() -> Self {
        let reference = |lightness: f64| {
            StopColor::Hsl(Hsl::new(
                REFERENCE_HUE,
                REFERENCE_SATURATION,
                lightness,
            ))
        };

        Self {
            primary: GradientLayer {
                angle: PRIMARY_ANGLE,
                stops: vec![
                    GradientStop::new(reference(44.0), 0.97, 0),
                    GradientStop::new(reference(39.0), 0.95, 45),
                    GradientStop::new(reference(34.0), 0.92, 100),
                ],
            },
            overlay: GradientLayer {
                angle: OVERLAY_ANGLE,
                stops: vec![
                    GradientStop::new(reference(49.0), 0.85, 0),
                    GradientStop::new(reference(34.0), 0.82, 100),
                ],
            },
        }
    }

    /// The 165° layer, painted on top.
    pub fn primary(&self) -> &GradientLayer {
        &self.primary
    }

    /// The 45° layer underneath.
    pub fn overlay(&self) -> &GradientLayer {
        &self.overlay
    }

    /// Layers in CSS order.
    pub fn layers(&self) -> [&GradientLayer; 2] {
        [&self.primary, &self.overlay]
    }
}

impl fmt::Display for GradientDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.primary, self.overlay)
    }
}

impl Serialize for GradientDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Build the background gradient for an ordered, de-duplicated color sample.
///
/// Only the first two colors are used; anything beyond that is ignored.
pub fn compose(colors: &[Rgb]) -> GradientDescriptor {
    match colors {
        [] => GradientDescriptor::fallback(),
        [color] => single_color(*color),
        [first, second, ..] => two_colors(*first, *second),
    }
}

fn single_color(color: Rgb) -> GradientDescriptor {
    let hsl = color.to_hsl();

    GradientDescriptor {
        primary: GradientLayer {
            angle: PRIMARY_ANGLE,
            stops: vec![
                GradientStop::new(StopColor::Rgb(color), 0.97, 0),
                GradientStop::new(StopColor::Hsl(hsl.darken(0.1)), 0.95, 45),
                GradientStop::new(StopColor::Hsl(hsl.darken(0.2)), 0.92, 100),
            ],
        },
        overlay: GradientLayer {
            angle: OVERLAY_ANGLE,
            stops: vec![
                GradientStop::new(StopColor::Hsl(hsl.lighten(0.1)), 0.88, 0),
                GradientStop::new(StopColor::Rgb(color), 0.85, 100),
            ],
        },
    }
}

fn two_colors(first: Rgb, second: Rgb) -> GradientDescriptor {
    let mixed = first.mix(second, 0.5);

    GradientDescriptor {
        primary: GradientLayer {
            angle: PRIMARY_ANGLE,
            stops: vec![
                GradientStop::new(StopColor::Rgb(first), 0.97, 0),
                GradientStop::new(StopColor::Rgb(mixed), 0.95, 45),
                GradientStop::new(StopColor::Rgb(second), 0.92, 100),
            ],
        },
        overlay: GradientLayer {
            angle: OVERLAY_ANGLE,
            stops: vec![
                GradientStop::new(
                    StopColor::Hsl(first.to_hsl().lighten(0.1)),
                    0.85,
                    0,
                ),
                GradientStop::new(StopColor::Rgb(second), 0.82, 100),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK_CSS: &str = "linear-gradient(165deg, \
        hsla(198, 92%, 44%, 0.97) 0%, \
        hsla(198, 92%, 39%, 0.95) 45%, \
        hsla(198, 92%, 34%, 0.92) 100%), \
        linear-gradient(45deg, \
        hsla(198, 92%, 49%, 0.85) 0%, \
        hsla(198, 92%, 34%, 0.82) 100%)";

    fn hex(value: &str) -> Rgb {
        Rgb::from_hex(value).expect("valid hex")
    }

    #[test]
    fn test_empty_sample_uses_fallback() {
        let gradient = compose(&[]);
        assert_eq!(gradient, GradientDescriptor::fallback());
        assert_eq!(gradient.to_string(), FALLBACK_CSS);
    }

    #[test]
    fn test_single_color_layers() {
        let gradient = compose(&[hex("#336699")]);

        let first = gradient.primary().stops[0];
        assert_eq!(first.color.to_hex(), "#336699");
        assert_eq!(first.alpha, 0.97);
        assert_eq!(first.position, 0);

        assert_eq!(
            gradient.to_string(),
            "linear-gradient(165deg, rgba(51, 102, 153, 0.97) 0%, \
             hsla(210, 50%, 36%, 0.95) 45%, \
             hsla(210, 50%, 32%, 0.92) 100%), \
             linear-gradient(45deg, hsla(210, 50%, 44%, 0.88) 0%, \
             rgba(51, 102, 153, 0.85) 100%)"
        );
    }

    #[test]
    fn test_two_colors_blend_through_midpoint() {
        let gradient = compose(&[hex("#ff0000"), hex("#0000ff")]);

        assert_eq!(
            gradient.to_string(),
            "linear-gradient(165deg, rgba(255, 0, 0, 0.97) 0%, \
             rgba(128, 0, 128, 0.95) 45%, \
             rgba(0, 0, 255, 0.92) 100%), \
             linear-gradient(45deg, hsla(0, 100%, 55%, 0.85) 0%, \
             rgba(0, 0, 255, 0.82) 100%)"
        );
    }

    #[test]
    fn test_extra_colors_are_ignored() {
        let c1 = hex("#112233");
        let c2 = hex("#aa5500");
        let c3 = hex("#00ff99");
        assert_eq!(compose(&[c1, c2, c3]), compose(&[c1, c2]));
        assert_eq!(
            compose(&[c1, c2, c3, hex("#ffffff")]).to_string(),
            compose(&[c1, c2]).to_string()
        );
    }

    #[test]
    fn test_always_two_layers() {
        for sample in [vec![], vec![hex("#123456")], vec![hex("#123456"), hex("#654321")]] {
            let gradient = compose(&sample);
            let [primary, overlay] = gradient.layers();
            assert_eq!(primary.angle, PRIMARY_ANGLE);
            assert_eq!(primary.stops.len(), 3);
            assert_eq!(overlay.angle, OVERLAY_ANGLE);
            assert_eq!(overlay.stops.len(), 2);
        }
    }

    #[test]
    fn test_serializes_as_css_string() {
        let json = serde_json::to_value(compose(&[])).expect("serialize");
        assert_eq!(json, serde_json::Value::String(FALLBACK_CSS.to_string()));
    }
}
