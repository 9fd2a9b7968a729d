//! Ordered, actionable advice derived from a computed score.
//!
//! Rules run in a fixed sequence and each appends at most one suggestion.
//! Later rules never suppress earlier ones, so an upscale recommendation and
//! a resize alternative can appear together.

use crate::profiles::{MediumProfile, UpscaleProfile};
use crate::types::{Extent, Priority, RequiredPixels, Suggestion, SuggestionKind};
use crate::units::round_to;

const TWO_X_TOOLS: [&str; 3] = ["Topaz Photo AI", "Adobe Lightroom Super Resolution", "Let's Enhance"];
const FOUR_X_TOOLS: [&str; 2] = ["Topaz Gigapixel AI", "Magnific AI"];

/// Everything the rules look at, borrowed from a finished calculation.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionContext<'a> {
    pub score: u8,
    pub medium: &'a MediumProfile,
    pub upscale: &'a UpscaleProfile,
    pub required: &'a RequiredPixels,
    pub pixels: Extent<u32>,
}

pub fn suggestions(ctx: &SuggestionContext<'_>) -> Vec<Suggestion> {
    let mut out = Vec::new();
    let medium = ctx.medium;
    let dpi = f64::from(medium.recommended_dpi);
    let safe_w = f64::from(ctx.pixels.w) / dpi;
    let safe_h = f64::from(ctx.pixels.h) / dpi;

    if ctx.score >= 90 {
        out.push(suggestion(
            SuggestionKind::Confirm,
            Priority::Positive,
            "Print Ready ✦".to_string(),
            format!("Your image meets quality requirements for {}. Safe to send to print.", medium.label),
        ));
    }

    if ctx.score < 75 && ctx.upscale.is_none() {
        let factor = upscale_factor(ctx.pixels.w, ctx.required.width)
            .max(upscale_factor(ctx.pixels.h, ctx.required.height));

        if factor <= 2.0 {
            out.push(with_tools(
                suggestion(
                    SuggestionKind::Upscale,
                    Priority::High,
                    "AI 2× Upscaling Recommended".to_string(),
                    format!(
                        "Your image needs ~{factor}× upscaling. AI tools recover real detail that standard interpolation cannot."
                    ),
                ),
                &TWO_X_TOOLS,
            ));
        } else if factor <= 4.0 {
            out.push(with_tools(
                suggestion(
                    SuggestionKind::Upscale,
                    Priority::High,
                    "AI 4× Upscaling Required".to_string(),
                    format!(
                        "~{factor}× upscaling needed. Use a 4× AI upscaler. Also check if a higher-resolution source file is available."
                    ),
                ),
                &FOUR_X_TOOLS,
            ));
        } else {
            out.push(suggestion(
                SuggestionKind::Source,
                Priority::Critical,
                "Source Resolution Insufficient".to_string(),
                format!(
                    "{factor}× upscaling required, beyond reliable AI recovery. Reduce print size to {safe_w:.1} × {safe_h:.1} in, or request a higher-res source."
                ),
            ));
        }
    }

    if ctx.score < 55 && !ctx.upscale.is_none() {
        out.push(suggestion(
            SuggestionKind::Source,
            Priority::Critical,
            "AI Cannot Fully Recover This Image".to_string(),
            format!(
                "The score shown already accounts for {}. Source resolution is still too low. A higher-resolution original is needed.",
                ctx.upscale.label
            ),
        ));
    }

    if ctx.score < 55 {
        out.push(suggestion(
            SuggestionKind::Resize,
            Priority::Medium,
            "Alternative: Reduce Print Size".to_string(),
            format!(
                "At current resolution, maximum safe print on {} is {safe_w:.1} × {safe_h:.1} inches at {} DPI.",
                medium.label, medium.recommended_dpi
            ),
        ));
    }

    if medium.maf < 0.85 {
        out.push(suggestion(
            SuggestionKind::Medium,
            Priority::Info,
            format!("{}: Surface Note", medium.label),
            medium.note.to_string(),
        ));
    }

    if medium.is_sublimation() {
        out.push(suggestion(
            SuggestionKind::Color,
            Priority::Info,
            "Sublimation: Use RGB + ICC Profile".to_string(),
            "Sublimation printers work in RGB, never CMYK. Use the ICC profile from your printer or ink manufacturer for accurate color output.".to_string(),
        ));
    }

    out
}

/// Linear factor needed to reach `required` pixels; 1.0 once already met.
fn upscale_factor(current: u32, required: u64) -> f64 {
    if u64::from(current) >= required {
        1.0
    } else {
        round_to(required as f64 / f64::from(current), 2)
    }
}

fn suggestion(kind: SuggestionKind, priority: Priority, title: String, detail: String) -> Suggestion {
    Suggestion {
        kind,
        priority,
        title,
        detail,
        tools: Vec::new(),
    }
}

fn with_tools(mut s: Suggestion, tools: &[&str]) -> Suggestion {
    s.tools = tools.iter().map(|t| t.to_string()).collect();
    s
}
