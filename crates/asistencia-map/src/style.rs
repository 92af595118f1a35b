//! Marker appearance.

use asistencia_core::AnnotatedProvider;

const BRAND: &str = "#1A365D";
const ACCENT: &str = "#ef4444";
const USER_BLUE: &str = "#2563eb";
const BORDER: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    pub fill: &'static str,
    pub border: &'static str,
    pub border_weight: f32,
    pub fill_opacity: f32,
}

impl MarkerStyle {
    /// Style of a provider marker. Depends only on whether it is selected.
    #[must_use]
    pub const fn provider(selected: bool) -> Self {
        Self {
            radius: if selected { 12.0 } else { 8.0 },
            fill: if selected { ACCENT } else { BRAND },
            border: BORDER,
            border_weight: 2.0,
            fill_opacity: 0.9,
        }
    }

    /// Style of the user-location marker.
    #[must_use]
    pub const fn user() -> Self {
        Self {
            radius: 8.0,
            fill: USER_BLUE,
            border: BORDER,
            border_weight: 2.0,
            fill_opacity: 1.0,
        }
    }
}

/// Popup body for a provider marker: name, category and phone, one per line.
#[must_use]
pub fn popup_text(provider: &AnnotatedProvider) -> String {
    let p = &provider.provider;
    format!("{}\n{}\n{}", p.name, p.category, p.contact_phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_marker_is_larger_and_accented() {
        let selected = MarkerStyle::provider(true);
        let plain = MarkerStyle::provider(false);
        assert!((selected.radius - 12.0).abs() < f32::EPSILON);
        assert!((plain.radius - 8.0).abs() < f32::EPSILON);
        assert_eq!(selected.fill, "#ef4444");
        assert_eq!(plain.fill, "#1A365D");
        assert_eq!(selected.border, plain.border);
        assert!((plain.fill_opacity - 0.9).abs() < f32::EPSILON);
    }
}
