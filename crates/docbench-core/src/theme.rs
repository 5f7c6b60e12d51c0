//! Fixed palette catalog and appearance resolution.

use rand::Rng;
use serde::Serialize;

use crate::locale::{self, Language, Strings};

/// An immutable palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: &'static str,
    pub primary: &'static str,
    pub bg_light: &'static str,
    pub bg_dark: &'static str,
    pub text_light: &'static str,
    pub text_dark: &'static str,
}

const fn theme(
    name: &'static str,
    primary: &'static str,
    bg_light: &'static str,
    bg_dark: &'static str,
    text_light: &'static str,
    text_dark: &'static str,
) -> Theme {
    Theme {
        name,
        primary,
        bg_light,
        bg_dark,
        text_light,
        text_dark,
    }
}

pub const FLOWER_THEMES: [Theme; 20] = [
    theme("Rose Quartz", "#e91e63", "#ffe4ec", "#330b15", "#880e4f", "#fce4ec"),
    theme("Lavender Mist", "#9c27b0", "#f3e5f5", "#2a0b33", "#4a148c", "#f3e5f5"),
    theme("Sunflower Glow", "#fbc02d", "#fff8e1", "#33260b", "#f57f17", "#fffde7"),
    theme("Cherry Blossom", "#ec407a", "#fde2ea", "#330e19", "#880e4f", "#fce4ec"),
    theme("Orchid Bloom", "#ab47bc", "#f4e1f7", "#2a0b33", "#4a148c", "#e1bee7"),
    theme("Peony Pink", "#f06292", "#fde1ee", "#33101f", "#880e4f", "#f8bbd0"),
    theme("Iris Indigo", "#3f51b5", "#e8eaf6", "#0e1133", "#1a237e", "#c5cae9"),
    theme("Marigold", "#ffa000", "#fff3e0", "#332100", "#e65100", "#ffe0b2"),
    theme("Lotus", "#8e24aa", "#f5e1ff", "#220833", "#4a148c", "#e1bee7"),
    theme("Camellia", "#d81b60", "#fde1ea", "#330515", "#880e4f", "#f8bbd0"),
    theme("Jasmine", "#43a047", "#e8f5e9", "#0c330e", "#1b5e20", "#c8e6c9"),
    theme("Tulip Red", "#e53935", "#ffebee", "#330e0e", "#b71c1c", "#ffcdd2"),
    theme("Dahlia Plum", "#6a1b9a", "#ede7f6", "#1a0633", "#311b92", "#d1c4e9"),
    theme("Gardenia", "#009688", "#e0f2f1", "#002622", "#004d40", "#b2dfdb"),
    theme("Hydrangea", "#5c6bc0", "#e3e8fd", "#111533", "#1a237e", "#c5cae9"),
    theme("Lavatera", "#7b1fa2", "#f2e5ff", "#1e0633", "#4a148c", "#e1bee7"),
    theme("Primrose", "#f57c00", "#fff3e0", "#331a00", "#e65100", "#ffe0b2"),
    theme("Bluebell", "#1e88e5", "#e3f2fd", "#051e33", "#0d47a1", "#bbdefb"),
    theme("Magnolia", "#8d6e63", "#efebe9", "#261d1b", "#3e2723", "#d7ccc8"),
    theme("Wisteria", "#7e57c2", "#ede7f6", "#1a1233", "#311b92", "#d1c4e9"),
];

/// Theme at `index`, wrapping around the catalog.
pub fn theme_at(index: usize) -> &'static Theme {
    &FLOWER_THEMES[index % FLOWER_THEMES.len()]
}

/// Uniformly random catalog index.
pub fn random_theme_index<R: Rng + ?Sized>(rng: &mut R) -> usize {
    rng.gen_range(0..FLOWER_THEMES.len())
}

/// One slice of the selection wheel, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelSlice {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Equal slices of the selection wheel, one per theme.
pub fn wheel_slices() -> Vec<WheelSlice> {
    let slice = 2.0 * std::f64::consts::PI / FLOWER_THEMES.len() as f64;
    (0..FLOWER_THEMES.len())
        .map(|index| WheelSlice {
            index,
            start_angle: index as f64 * slice,
            end_angle: (index + 1) as f64 * slice,
        })
        .collect()
}

/// Colours resolved for the current theme and mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    pub background_from: &'static str,
    pub background_to: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
}

/// Session appearance: palette, mode, and display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Appearance {
    pub theme_index: usize,
    pub dark_mode: bool,
    pub language: Language,
}

impl Appearance {
    pub fn theme(&self) -> &'static Theme {
        theme_at(self.theme_index)
    }

    pub fn strings(&self) -> &'static Strings {
        locale::strings(self.language)
    }

    pub fn style(&self) -> ResolvedStyle {
        let t = self.theme();
        if self.dark_mode {
            ResolvedStyle {
                background_from: t.bg_dark,
                background_to: "#1a1a1a",
                text: t.text_dark,
                accent: t.primary,
            }
        } else {
            ResolvedStyle {
                background_from: t.bg_light,
                background_to: "white",
                text: t.text_light,
                accent: t.primary,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog_has_unique_names() {
        let mut names: Vec<_> = FLOWER_THEMES.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn test_theme_at_wraps() {
        assert_eq!(theme_at(0).name, "Rose Quartz");
        assert_eq!(theme_at(19).name, "Wisteria");
        assert_eq!(theme_at(20).name, "Rose Quartz");
    }

    #[test]
    fn test_random_index_in_range_and_covers_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 20];
        for _ in 0..2000 {
            let i = random_theme_index(&mut rng);
            assert!(i < 20);
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_wheel_slices_cover_circle() {
        let slices = wheel_slices();
        assert_eq!(slices.len(), 20);
        assert_eq!(slices[0].start_angle, 0.0);
        let last = slices.last().unwrap();
        assert!((last.end_angle - 2.0 * std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_style_light_and_dark() {
        let mut a = Appearance {
            theme_index: 10,
            ..Default::default()
        };
        let light = a.style();
        assert_eq!(light.background_from, "#e8f5e9");
        assert_eq!(light.background_to, "white");
        assert_eq!(light.text, "#1b5e20");
        assert_eq!(light.accent, "#43a047");

        a.dark_mode = true;
        let dark = a.style();
        assert_eq!(dark.background_from, "#0c330e");
        assert_eq!(dark.background_to, "#1a1a1a");
        assert_eq!(dark.text, "#c8e6c9");
    }

    #[test]
    fn test_theme_serializes_camel_case() {
        let json = serde_json::to_value(theme_at(0)).unwrap();
        assert_eq!(json["bgLight"], "#ffe4ec");
        assert_eq!(json["textDark"], "#fce4ec");
    }
}
