use crate::catalog::{MarkerColor, SupplyType};

/// Ключевые слова в описании расходника. Светлые варианты раньше
/// базовых: "light cyan" не должен стать просто Cyan.
const DESCRIPTION_KEYWORDS: &[(&[&str], MarkerColor)] = &[
    (&["light cyan", "lightcyan"], MarkerColor::LightCyan),
    (&["light magenta", "lightmagenta"], MarkerColor::LightMagenta),
    (&["black", "blk", "bk"], MarkerColor::Black),
    (&["cyan"], MarkerColor::Cyan),
    (&["magenta"], MarkerColor::Magenta),
    (&["yellow", "ylw"], MarkerColor::Yellow),
    (&["photo"], MarkerColor::Photo),
    (&["gray", "grey"], MarkerColor::Gray),
];

/// Цвет расходника. Только для маркеров (тонер, чернила, лента, воск).
///
/// Сначала имя красителя из prtMarkerColorantValue, затем ключевые
/// слова в описании. Нераспознанное имя красителя возвращается как есть.
pub fn resolve_color(
    kind: Option<SupplyType>,
    colorant: Option<&str>,
    description: Option<&str>,
) -> Option<MarkerColor> {
    if !kind.is_some_and(|k| k.is_marker()) {
        return None;
    }

    let from_colorant = colorant
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(MarkerColor::from_name);

    if let Some(color) = &from_colorant {
        if !matches!(color, MarkerColor::Other(_)) {
            return from_colorant;
        }
    }

    description.and_then(color_from_description).or(from_colorant)
}

pub fn color_from_description(description: &str) -> Option<MarkerColor> {
    let lower = description.to_lowercase();
    DESCRIPTION_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, color)| color.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorant_name_wins() {
        assert_eq!(
            resolve_color(Some(SupplyType::Toner), Some("lightCyan"), Some("Black Cartridge")),
            Some(MarkerColor::LightCyan)
        );
    }

    #[test]
    fn description_heuristic() {
        let toner = Some(SupplyType::TonerCartridge);
        assert_eq!(
            resolve_color(toner, None, Some("HP 58A Black Toner")),
            Some(MarkerColor::Black)
        );
        assert_eq!(
            resolve_color(toner, None, Some("Light Cyan Ink")),
            Some(MarkerColor::LightCyan)
        );
        assert_eq!(
            resolve_color(toner, None, Some("TN-247Y ylw")),
            Some(MarkerColor::Yellow)
        );
        assert_eq!(resolve_color(toner, None, Some("Toner")), None);
    }

    #[test]
    fn unknown_colorant_is_kept_when_description_is_silent() {
        assert_eq!(
            resolve_color(Some(SupplyType::Ink), Some("Vivid Orange-ish"), Some("Ink")),
            Some(MarkerColor::Other("Vivid Orange-ish".to_string()))
        );
    }

    #[test]
    fn non_marker_supplies_have_no_color() {
        assert_eq!(
            resolve_color(Some(SupplyType::Opc), Some("black"), Some("Drum Black")),
            None
        );
        assert_eq!(resolve_color(None, Some("black"), None), None);
    }
}
