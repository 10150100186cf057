use crate::tree::nodes::Sephirah;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

/// One of the 22 fixed paths, joining exactly two connected nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolicPath {
    pub number: u8,
    pub name: &'static str,
    pub trump: u8,
    pub nodes: (Sephirah, Sephirah),
    pub attribution: &'static str,
}

impl SymbolicPath {
    pub fn touches(&self, node: Sephirah) -> bool {
        self.nodes.0 == node || self.nodes.1 == node
    }

    /// The node at the other end, if `node` is an endpoint.
    pub fn other_end(&self, node: Sephirah) -> Option<Sephirah> {
        if self.nodes.0 == node {
            Some(self.nodes.1)
        } else if self.nodes.1 == node {
            Some(self.nodes.0)
        } else {
            None
        }
    }
}

macro_rules! path {
    ($number:expr, $name:expr, $trump:expr, $a:ident, $b:ident, $attribution:expr) => {
        SymbolicPath {
            number: $number,
            name: $name,
            trump: $trump,
            nodes: (Sephirah::$a, Sephirah::$b),
            attribution: $attribution,
        }
    };
}

pub static PATHS: [SymbolicPath; 22] = [
    path!(11, "The Fool", 0, Kether, Chokmah, "Air"),
    path!(12, "The Magician", 1, Kether, Binah, "Mercury"),
    path!(13, "The High Priestess", 2, Kether, Tiphareth, "Moon"),
    path!(14, "The Empress", 3, Chokmah, Binah, "Venus"),
    path!(15, "The Emperor", 4, Chokmah, Tiphareth, "Aries"),
    path!(16, "The Hierophant", 5, Chokmah, Chesed, "Taurus"),
    path!(17, "The Lovers", 6, Binah, Tiphareth, "Gemini"),
    path!(18, "The Chariot", 7, Binah, Geburah, "Cancer"),
    path!(19, "Strength", 8, Chesed, Geburah, "Leo"),
    path!(20, "The Hermit", 9, Chesed, Tiphareth, "Virgo"),
    path!(21, "Wheel of Fortune", 10, Chesed, Netzach, "Jupiter"),
    path!(22, "Justice", 11, Geburah, Tiphareth, "Libra"),
    path!(23, "The Hanged Man", 12, Geburah, Hod, "Water"),
    path!(24, "Death", 13, Tiphareth, Netzach, "Scorpio"),
    path!(25, "Temperance", 14, Tiphareth, Yesod, "Sagittarius"),
    path!(26, "The Devil", 15, Tiphareth, Hod, "Capricorn"),
    path!(27, "The Tower", 16, Netzach, Hod, "Mars"),
    path!(28, "The Star", 17, Netzach, Yesod, "Aquarius"),
    path!(29, "The Moon", 18, Netzach, Malkuth, "Pisces"),
    path!(30, "The Sun", 19, Hod, Yesod, "Sun"),
    path!(31, "Judgement", 20, Hod, Malkuth, "Fire"),
    path!(32, "The World", 21, Yesod, Malkuth, "Saturn"),
];

fn ordered(a: Sephirah, b: Sephirah) -> (Sephirah, Sephirah) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

lazy_static! {
    static ref PATH_BY_ENDPOINTS: HashMap<(Sephirah, Sephirah), &'static SymbolicPath> = PATHS
        .iter()
        .map(|path| (ordered(path.nodes.0, path.nodes.1), path))
        .collect();
}

/// The path joining two nodes, in either order. Nothing touches the hidden node.
pub fn path_between(a: Sephirah, b: Sephirah) -> Option<&'static SymbolicPath> {
    if a.is_hidden() || b.is_hidden() {
        return None;
    }
    PATH_BY_ENDPOINTS.get(&ordered(a, b)).copied()
}

pub fn path_by_number(number: u8) -> Option<&'static SymbolicPath> {
    PATHS.iter().find(|p| p.number == number)
}

/// Every path with `node` as an endpoint, in path-number order.
pub fn paths_touching(node: Sephirah) -> Vec<&'static SymbolicPath> {
    if node.is_hidden() {
        return Vec::new();
    }
    PATHS.iter().filter(|p| p.touches(node)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_numbered_and_unique() {
        for (i, path) in PATHS.iter().enumerate() {
            assert_eq!(path.number as usize, i + 11);
            assert_eq!(path.trump as usize, i);
            assert_ne!(path.nodes.0, path.nodes.1);
        }
        assert_eq!(PATH_BY_ENDPOINTS.len(), 22);
    }

    #[test]
    fn test_hidden_node_is_on_no_path() {
        assert!(PATHS.iter().all(|p| !p.touches(Sephirah::Daath)));
        assert!(path_between(Sephirah::Daath, Sephirah::Tiphareth).is_none());
        assert!(paths_touching(Sephirah::Daath).is_empty());
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let forward = path_between(Sephirah::Tiphareth, Sephirah::Geburah).map(|p| p.number);
        let backward = path_between(Sephirah::Geburah, Sephirah::Tiphareth).map(|p| p.number);
        assert_eq!(forward, Some(22));
        assert_eq!(forward, backward);
        assert!(path_between(Sephirah::Kether, Sephirah::Malkuth).is_none());
    }

    #[test]
    fn test_tiphareth_touches_eight_paths() {
        assert_eq!(paths_touching(Sephirah::Tiphareth).len(), 8);
        assert_eq!(path_by_number(32).map(|p| p.name), Some("The World"));
    }
}
