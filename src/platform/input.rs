//! Raw key names to simulation input
//!
//! Only A-Z, the two arrow keys and quit make it through. Everything else is
//! dropped here so the simulation never sees an unexpected key.

use crate::sim::InputEvent;

/// Map a host key name (e.g. "a", "Up", "Escape") to an input event
pub fn map_key(name: &str) -> Option<InputEvent> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c
            .is_ascii_alphabetic()
            .then(|| InputEvent::Letter(c.to_ascii_uppercase()));
    }

    match name.to_ascii_lowercase().as_str() {
        "up" | "arrowup" => Some(InputEvent::SpeedUp),
        "down" | "arrowdown" => Some(InputEvent::SpeedDown),
        "escape" | "esc" | "quit" => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Map a frame's worth of key names, keeping arrival order
pub fn map_keys<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<InputEvent> {
    names.into_iter().filter_map(map_key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_uppercased() {
        assert_eq!(map_key("a"), Some(InputEvent::Letter('A')));
        assert_eq!(map_key("Z"), Some(InputEvent::Letter('Z')));
    }

    #[test]
    fn test_non_letters_are_dropped() {
        assert_eq!(map_key("1"), None);
        assert_eq!(map_key(" "), None);
        assert_eq!(map_key("é"), None);
        assert_eq!(map_key("space"), None);
        assert_eq!(map_key(""), None);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(map_key("Up"), Some(InputEvent::SpeedUp));
        assert_eq!(map_key("ArrowDown"), Some(InputEvent::SpeedDown));
        assert_eq!(map_key("Escape"), Some(InputEvent::Quit));
    }

    #[test]
    fn test_map_keys_keeps_order() {
        let events = map_keys(["q", "shift", "up", "w"]);
        assert_eq!(
            events,
            vec![
                InputEvent::Letter('Q'),
                InputEvent::SpeedUp,
                InputEvent::Letter('W')
            ]
        );
    }
}
