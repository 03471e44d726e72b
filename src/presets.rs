//! Built-in scene prompts, grouped by category.

use crate::output::sanitize_for_filename;

/// A ready-made scene description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Category heading.
    pub category: &'static str,
    /// Short display name.
    pub label: &'static str,
    /// Prompt text sent to the model.
    pub text: &'static str,
}

impl Preset {
    /// Kebab-case identifier used on the command line, e.g. `luxury-dark`.
    ///
    /// Quick picks are prefixed with `quick-`, since some share a label
    /// with a catalog scene.
    #[must_use]
    pub fn slug(&self) -> String {
        let slug = sanitize_for_filename(self.label, 64);
        if self.category == QUICK {
            format!("quick-{slug}")
        } else {
            slug
        }
    }
}

const fn preset(category: &'static str, label: &'static str, text: &'static str) -> Preset {
    Preset { category, label, text }
}

const STUDIO: &str = "Studio & Professional";
const LIFESTYLE: &str = "Lifestyle & Interior";
const NATURE: &str = "Nature & Outdoors";
const CREATIVE: &str = "Creative & Artistic";
const QUICK: &str = "Quick Picks";

/// The full catalog, in display order.
pub const PRESETS: &[Preset] = &[
    preset(STUDIO, "Clean White Studio", "Place the product on a seamless white background with soft, diffuse studio lighting."),
    preset(STUDIO, "Luxury Dark", "Professional product photography, dark luxury aesthetic, black silk background, dramatic rim lighting."),
    preset(STUDIO, "Pastel Minimal", "Minimalist composition with a soft pastel pink geometric background and hard shadows."),
    preset(STUDIO, "Wooden Podium", "Displayed on a round wooden podium with a neutral beige wall in the background."),
    preset(STUDIO, "Marble Counter", "Sitting on a white marble countertop with bright, airy natural lighting."),
    preset(LIFESTYLE, "Modern Kitchen", "On a granite kitchen island with a blurred modern kitchen in the background."),
    preset(LIFESTYLE, "Cozy Living Room", "On a rustic coffee table in a cozy living room with warm evening lighting."),
    preset(LIFESTYLE, "Bright Office", "On a clean white desk next to a laptop and a small succulent plant."),
    preset(LIFESTYLE, "Bathroom Vanity", "On a bathroom sink counter with a mirror and soft daylight reflection."),
    preset(LIFESTYLE, "Bedroom Nightstand", "On a wooden nightstand next to a lamp with cozy, warm lighting."),
    preset(NATURE, "Sunlit Forest", "Placed on a mossy rock in a forest with dappled sunlight filtering through trees."),
    preset(NATURE, "Beach Sunset", "On the sand at a tropical beach during golden hour with the ocean in the background."),
    preset(NATURE, "Snowy Mountain", "On a stone surface with a majestic snowy mountain range in the background."),
    preset(NATURE, "Flower Garden", "Surrounded by colorful blooming flowers in a sunny garden."),
    preset(NATURE, "Desert Dunes", "On a sand dune in a desert with a clear blue sky."),
    preset(CREATIVE, "Cyberpunk Neon", "Futuristic cyberpunk style, wet street reflection, neon blue and pink lighting."),
    preset(CREATIVE, "Floating in Space", "Floating in deep space with stars and a nebula in the background."),
    preset(CREATIVE, "Underwater", "Submerged underwater with bubbles and light rays piercing from above."),
    preset(CREATIVE, "Splash Photography", "High-speed photography style with dynamic water splashes around the product."),
    preset(CREATIVE, "Vaporwave", "Vaporwave aesthetic with retro grid background and purple hues."),
    preset(QUICK, "Minimal Studio", "Place this product on a clean white podium with soft studio lighting."),
    preset(QUICK, "Luxury Dark", "Professional product photography, dark luxury aesthetic, silk background, dramatic lighting."),
    preset(QUICK, "Nature Vibe", "Place the product on a wooden table outdoors with blurred forest background and sunlight."),
    preset(QUICK, "Cyberpunk", "Neon lighting, futuristic tech background, cyberpunk style product shot."),
];

/// Look up a preset by slug or label, ignoring case.
#[must_use]
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let wanted = sanitize_for_filename(name, 64);
    PRESETS.iter().find(|p| p.slug() == wanted)
}

/// Render the catalog as grouped, human-readable lines.
#[must_use]
pub fn catalog_listing() -> String {
    let mut out = String::new();
    let mut current = "";
    for preset in PRESETS {
        if preset.category != current {
            if !current.is_empty() {
                out.push('\n');
            }
            out.push_str(preset.category);
            out.push('\n');
            current = preset.category;
        }
        out.push_str(&format!("  {:<20} {}\n", preset.slug(), preset.text));
    }
    out
}
