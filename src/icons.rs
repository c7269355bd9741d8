use rand::Rng;

/// Keyword table scanned in order; the first category with a hit wins.
const KEYWORD_ICONS: &[(&[&str], &str)] = &[
    (&["meditat", "mindful", "zen"], "\u{1F9D8}"),            // 🧘
    (&["read", "book", "study", "learn"], "\u{1F4DA}"),       // 📚
    (&["run", "jog", "cardio", "exercise"], "\u{1F3C3}"),     // 🏃
    (&["gym", "workout", "strength", "lift"], "\u{1F4AA}"),   // 💪
    (&["water", "hydrat", "drink"], "\u{1F4A7}"),             // 💧
    (&["eat", "diet", "nutrition", "meal", "food"], "\u{1F957}"), // 🥗
    (&["write", "journal", "diary"], "\u{270D}\u{FE0F}"),     // ✍️
    (&["art", "draw", "paint", "creative"], "\u{1F3A8}"),     // 🎨
    (&["music", "practice", "instrument", "sing"], "\u{1F3B5}"), // 🎵
    (&["sleep", "rest", "bed"], "\u{1F634}"),                 // 😴
    (&["morning"], "\u{1F305}"),                              // 🌅
    (&["brain", "mental", "focus"], "\u{1F9E0}"),             // 🧠
];

pub const FALLBACK_ICONS: [&str; 5] = [
    "\u{1F31F}", // 🌟
    "\u{2728}",  // ✨
    "\u{1F3AF}", // 🎯
    "\u{1F4AB}", // 💫
    "\u{1F308}", // 🌈
];

/// Case-insensitive keyword match against the category table.
pub fn keyword_icon(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    KEYWORD_ICONS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, icon)| *icon)
}

/// Icon for a new habit: keyword match first, otherwise a uniform pick from
/// the fallback set.
pub fn icon_for(name: &str, rng: &mut impl Rng) -> &'static str {
    keyword_icon(name).unwrap_or_else(|| FALLBACK_ICONS[rng.gen_range(0..FALLBACK_ICONS.len())])
}
