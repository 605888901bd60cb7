/// Linear interpolation in Oklab between a light and a dark endpoint, so
/// equal steps in plugin count read as equal visual steps.
#[derive(Clone, Copy, Debug)]
pub struct ColorScale {
    light: Oklab,
    dark: Oklab,
}

#[derive(Clone, Copy, Debug)]
struct Oklab {
    l: f64,
    a: f64,
    b: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::new(
            Rgb {
                r: 0xf7,
                g: 0xfb,
                b: 0xff,
            },
            Rgb {
                r: 0x08,
                g: 0x30,
                b: 0x6b,
            },
        )
    }
}

impl ColorScale {
    pub fn new(light: Rgb, dark: Rgb) -> Self {
        Self {
            light: rgb_to_oklab(light),
            dark: rgb_to_oklab(dark),
        }
    }

    /// Maps `value` within `[0, domain_max]` onto the scale. Values outside
    /// the domain clamp to the endpoints; a degenerate domain maps everything
    /// to the light endpoint rather than producing NaN.
    pub fn color_for(&self, value: f64, domain_max: f64) -> Rgb {
        let t = if domain_max > 0.0 {
            (value / domain_max).clamp(0.0, 1.0)
        } else {
            0.0
        };

        oklab_to_rgb(Oklab {
            l: lerp(self.light.l, self.dark.l, t),
            a: lerp(self.light.a, self.dark.a, t),
            b: lerp(self.light.b, self.dark.b, t),
        })
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn srgb_to_linear(u: f64) -> f64 {
    if u <= 0.04045 {
        u / 12.92
    } else {
        ((u + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(u: f64) -> f64 {
    if u <= 0.003_130_8 {
        12.92 * u
    } else {
        1.055 * u.powf(1.0 / 2.4) - 0.055
    }
}

fn rgb_to_oklab(rgb: Rgb) -> Oklab {
    let lr = srgb_to_linear(rgb.r as f64 / 255.0);
    let lg = srgb_to_linear(rgb.g as f64 / 255.0);
    let lb = srgb_to_linear(rgb.b as f64 / 255.0);

    let l = (0.412_221_470_8 * lr + 0.536_332_536_3 * lg + 0.051_445_992_9 * lb).cbrt();
    let m = (0.211_903_498_2 * lr + 0.680_699_545_1 * lg + 0.107_396_956_6 * lb).cbrt();
    let s = (0.088_302_461_9 * lr + 0.281_718_837_6 * lg + 0.629_978_700_5 * lb).cbrt();

    Oklab {
        l: 0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
        a: 1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
        b: 0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
    }
}

fn oklab_to_rgb(lab: Oklab) -> Rgb {
    let l = (lab.l + 0.396_337_777_4 * lab.a + 0.215_803_757_3 * lab.b).powi(3);
    let m = (lab.l - 0.105_561_345_8 * lab.a - 0.063_854_172_8 * lab.b).powi(3);
    let s = (lab.l - 0.089_484_177_5 * lab.a - 1.291_485_548_0 * lab.b).powi(3);

    let lr = 4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s;
    let lg = -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s;
    let lb = -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s;

    Rgb {
        r: (linear_to_srgb(lr).clamp(0.0, 1.0) * 255.0).round() as u8,
        g: (linear_to_srgb(lg).clamp(0.0, 1.0) * 255.0).round() as u8,
        b: (linear_to_srgb(lb).clamp(0.0, 1.0) * 255.0).round() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(rgb: Rgb) -> f64 {
        0.2126 * rgb.r as f64 + 0.7152 * rgb.g as f64 + 0.0722 * rgb.b as f64
    }

    #[test]
    fn endpoints_round_trip() {
        let scale = ColorScale::default();
        assert_eq!(
            scale.color_for(0.0, 10.0),
            Rgb {
                r: 0xf7,
                g: 0xfb,
                b: 0xff
            }
        );
        assert_eq!(
            scale.color_for(10.0, 10.0),
            Rgb {
                r: 0x08,
                g: 0x30,
                b: 0x6b
            }
        );
    }

    #[test]
    fn larger_counts_read_darker() {
        let scale = ColorScale::default();
        let mut previous = luminance(scale.color_for(0.0, 6.0));
        for value in 1..=6 {
            let current = luminance(scale.color_for(value as f64, 6.0));
            assert!(
                current < previous,
                "value {value} did not darken: {current} vs {previous}"
            );
            previous = current;
        }
    }

    #[test]
    fn values_clamp_to_the_domain() {
        let scale = ColorScale::default();
        assert_eq!(scale.color_for(-3.0, 10.0), scale.color_for(0.0, 10.0));
        assert_eq!(scale.color_for(99.0, 10.0), scale.color_for(10.0, 10.0));
    }

    #[test]
    fn degenerate_domain_maps_to_the_light_endpoint() {
        let scale = ColorScale::default();
        assert_eq!(scale.color_for(5.0, 0.0), scale.color_for(0.0, 10.0));
    }

    #[test]
    fn hex_formatting() {
        let hex = Rgb {
            r: 0x08,
            g: 0x30,
            b: 0x6b,
        }
        .to_hex();
        assert_eq!(hex, "#08306b");
    }
}
