//! Custom brush catalog service.
//!
//! # Responsibility
//! - Decode the embedded brush-family manifest on first access.
//! - Resolve brush families by client id for the codec and the session.
//!
//! # Invariants
//! - Catalog load is best-effort: one bad resource is logged and skipped,
//!   never failing the whole catalog.
//! - The decoded list is cached for the catalog's lifetime; the catalog is
//!   an explicitly constructed, injectable service, not ambient state.

use crate::ink::brush::CustomFamily;
use crate::ink::storage::decode_brush_family;
use log::{error, info};
use once_cell::sync::OnceCell;

/// One selectable custom brush.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomBrush {
    /// Display name shown in the toolbox.
    pub name: String,
    /// Icon asset name for the toolbox entry.
    pub icon: String,
    /// Decoded brush family.
    pub family: CustomFamily,
}

struct ManifestEntry {
    name: &'static str,
    icon: &'static str,
    resource: &'static [u8],
}

const BRUSH_MANIFEST: &[ManifestEntry] = &[
    ManifestEntry {
        name: "Calligraphy",
        icon: "draw_24px",
        resource: include_bytes!("../../assets/brushes/calligraphy.bfr"),
    },
    ManifestEntry {
        name: "Flag Banner",
        icon: "flag_24px",
        resource: include_bytes!("../../assets/brushes/flag_banner.bfr"),
    },
    ManifestEntry {
        name: "Graffiti",
        icon: "format_paint_24px",
        resource: include_bytes!("../../assets/brushes/graffiti.bfr"),
    },
    ManifestEntry {
        name: "Groovy",
        icon: "bubble_chart_24px",
        resource: include_bytes!("../../assets/brushes/groovy.bfr"),
    },
    ManifestEntry {
        name: "Holiday lights",
        icon: "lightbulb_24px",
        resource: include_bytes!("../../assets/brushes/holiday_lights.bfr"),
    },
    ManifestEntry {
        name: "Lace",
        icon: "styler_24px",
        resource: include_bytes!("../../assets/brushes/lace.bfr"),
    },
    ManifestEntry {
        name: "Music",
        icon: "music_note_24px",
        resource: include_bytes!("../../assets/brushes/music.bfr"),
    },
    ManifestEntry {
        name: "Shadow",
        icon: "blur_on_24px",
        resource: include_bytes!("../../assets/brushes/shadow.bfr"),
    },
    ManifestEntry {
        name: "Twisted yarn",
        icon: "line_weight_24px",
        resource: include_bytes!("../../assets/brushes/twisted_yarn.bfr"),
    },
    ManifestEntry {
        name: "Wet paint",
        icon: "water_drop_24px",
        resource: include_bytes!("../../assets/brushes/wet_paint.bfr"),
    },
];

/// Lazily decoded catalog of the shipped custom brushes.
#[derive(Default)]
pub struct CustomBrushCatalog {
    cache: OnceCell<Vec<CustomBrush>>,
}

impl CustomBrushCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the decoded brushes, decoding the manifest on first call.
    pub fn get(&self) -> &[CustomBrush] {
        self.cache.get_or_init(decode_manifest).as_slice()
    }

    /// Resolves one family by its client id.
    pub fn find_family(&self, client_brush_family_id: &str) -> Option<&CustomFamily> {
        self.get()
            .iter()
            .find(|brush| brush.family.client_brush_family_id == client_brush_family_id)
            .map(|brush| &brush.family)
    }
}

fn decode_manifest() -> Vec<CustomBrush> {
    let brushes: Vec<CustomBrush> = BRUSH_MANIFEST
        .iter()
        .filter_map(|entry| match decode_brush_family(entry.resource) {
            Ok(family) => Some(CustomBrush {
                name: entry.name.to_string(),
                icon: entry.icon.to_string(),
                family,
            }),
            Err(err) => {
                error!(
                    "event=brush_decode module=brushes status=error name={} error={err}",
                    entry.name
                );
                None
            }
        })
        .collect();

    info!(
        "event=catalog_load module=brushes status=ok loaded={} manifest={}",
        brushes.len(),
        BRUSH_MANIFEST.len()
    );
    brushes
}

#[cfg(test)]
mod tests {
    use super::{CustomBrushCatalog, BRUSH_MANIFEST};

    #[test]
    fn all_manifest_entries_decode() {
        let catalog = CustomBrushCatalog::new();
        assert_eq!(catalog.get().len(), BRUSH_MANIFEST.len());
    }

    #[test]
    fn repeated_access_returns_the_cached_slice() {
        let catalog = CustomBrushCatalog::new();
        let first = catalog.get().as_ptr();
        let second = catalog.get().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn find_family_resolves_known_ids_only() {
        let catalog = CustomBrushCatalog::new();
        let lace = catalog.find_family("lace").unwrap();
        assert_eq!(lace.client_brush_family_id, "lace");
        assert!(catalog.find_family("no-such-brush").is_none());
    }
}
