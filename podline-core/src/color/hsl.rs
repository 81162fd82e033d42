use super::{Rgb, round_channel};

/// Hue in degrees, saturation and lightness in percent.
///
/// Conversions follow the usual hexcone model; `darken` and `lighten` scale
/// lightness relative to its current value, as common CSS color tooling does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn darken(self, ratio: f64) -> Self {
        Self {
            l: (self.l - self.l * ratio).max(0.0),
            ..self
        }
    }

    pub fn lighten(self, ratio: f64) -> Self {
        Self {
            l: (self.l + self.l * ratio).min(100.0),
            ..self
        }
    }

    /// Each component rounded to one decimal place, as printed in CSS.
    pub fn rounded(self) -> Self {
        let one_place = |v: f64| (v * 10.0).round() / 10.0;
        Self::new(one_place(self.h), one_place(self.s), one_place(self.l))
    }

    pub fn to_rgb(self) -> Rgb {
        Rgb::from(self)
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let sector = if delta == 0.0 {
            0.0
        } else if max == r {
            (g - b) / delta
        } else if max == g {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };

        let mut h = (sector * 60.0).min(360.0);
        if h < 0.0 {
            h += 360.0;
        }

        let l = (min + max) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else if l <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        Hsl::new(h, s * 100.0, l * 100.0)
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let h = hsl.h / 360.0;
        let s = hsl.s / 100.0;
        let l = hsl.l / 100.0;

        if s == 0.0 {
            let v = round_channel(l * 255.0);
            return Rgb::new(v, v, v);
        }

        let t2 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let t1 = 2.0 * l - t2;

        let mut out = [0u8; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let mut t3 = h + (1.0 / 3.0) * (1.0 - i as f64);
            if t3 < 0.0 {
                t3 += 1.0;
            }
            if t3 > 1.0 {
                t3 -= 1.0;
            }

            let value = if 6.0 * t3 < 1.0 {
                t1 + (t2 - t1) * 6.0 * t3
            } else if 2.0 * t3 < 1.0 {
                t2
            } else if 3.0 * t3 < 2.0 {
                t1 + (t2 - t1) * (2.0 / 3.0 - t3) * 6.0
            } else {
                t1
            };

            *slot = round_channel(value * 255.0);
        }

        Rgb::new(out[0], out[1], out[2])
    }
}
