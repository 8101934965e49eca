//! Font lookup for the report renderer.
//!
//! The report is a Korean-language form, so the NanumGothic family is
//! preferred. When its file is not installed the renderer falls back to the
//! bundled default family; the fallback only degrades glyph coverage and
//! never fails the render. Resolution happens once per render call.

use std::path::Path;

use genpdf::fonts::{FontData, FontFamily};

/// Preferred Korean-capable family. A single TTF covers all styles; a bold
/// cut is used when present.
pub const PRIMARY_REGULAR: &str = "NanumGothic.ttf";
pub const PRIMARY_BOLD: &str = "NanumGothicBold.ttf";

/// Fallback family, loaded via the `{name}-{Variant}.ttf` convention.
pub const FALLBACK_FAMILY_NAME: &str = "Roboto";

const FALLBACK_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

#[derive(Debug)]
pub struct ResolvedFonts {
    pub family: FontFamily<FontData>,
    /// True when the preferred family was absent and the fallback is in use.
    pub fallback: bool,
}

/// Resolves the font family for one render call.
pub fn resolve(font_dir: &Path) -> Result<ResolvedFonts, String> {
    match load_primary(font_dir) {
        Ok(family) => Ok(ResolvedFonts {
            family,
            fallback: false,
        }),
        Err(primary_err) => {
            tracing::warn!(
                "Preferred report font unavailable ({primary_err}); using {FALLBACK_FAMILY_NAME}"
            );
            let family = genpdf::fonts::from_files(font_dir, FALLBACK_FAMILY_NAME, None)
                .map_err(|e| {
                    format!(
                        "no usable font in {}: {primary_err}; fallback failed: {e}",
                        font_dir.display()
                    )
                })?;
            Ok(ResolvedFonts {
                family,
                fallback: true,
            })
        }
    }
}

fn load_primary(font_dir: &Path) -> Result<FontFamily<FontData>, String> {
    let regular_path = font_dir.join(PRIMARY_REGULAR);
    let bytes = std::fs::read(&regular_path)
        .map_err(|e| format!("{}: {e}", regular_path.display()))?;
    let regular = FontData::new(bytes, None)
        .map_err(|e| format!("{}: {e}", regular_path.display()))?;

    let bold = match std::fs::read(font_dir.join(PRIMARY_BOLD)) {
        Ok(bytes) => FontData::new(bytes, None)
            .map_err(|e| format!("{}: {e}", font_dir.join(PRIMARY_BOLD).display()))?,
        Err(_) => regular.clone(),
    };

    Ok(FontFamily {
        regular: regular.clone(),
        bold: bold.clone(),
        italic: regular,
        bold_italic: bold,
    })
}

/// Whether the preferred family can be loaded from `font_dir`.
pub fn primary_available(font_dir: &Path) -> bool {
    font_dir.join(PRIMARY_REGULAR).is_file()
}

/// Whether any usable family (preferred or fallback) is present. Render
/// tests use this to skip instead of failing on machines without fonts.
pub fn any_available(font_dir: &Path) -> bool {
    primary_available(font_dir)
        || FALLBACK_FILES
            .iter()
            .all(|name| font_dir.join(name).is_file())
}
