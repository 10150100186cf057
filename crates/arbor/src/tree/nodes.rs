use crate::western::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The eleven nodes of the symbolic tree. Daath is hidden and joined by no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sephirah {
    Kether,
    Chokmah,
    Binah,
    Daath,
    Chesed,
    Geburah,
    Tiphareth,
    Netzach,
    Hod,
    Yesod,
    Malkuth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Left,
    Middle,
    Right,
}

impl Pillar {
    pub const ALL: [Pillar; 3] = [Pillar::Left, Pillar::Middle, Pillar::Right];
}

/// How bodies placed on the hidden node are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenNodePolicy {
    /// On no path, but still counted in pillar aggregation.
    #[default]
    Unconnected,
    /// On no path and left out of pillar aggregation.
    ExcludeFromPillars,
}

impl Sephirah {
    pub fn name(self) -> &'static str {
        match self {
            Sephirah::Kether => "Kether",
            Sephirah::Chokmah => "Chokmah",
            Sephirah::Binah => "Binah",
            Sephirah::Daath => "Daath",
            Sephirah::Chesed => "Chesed",
            Sephirah::Geburah => "Geburah",
            Sephirah::Tiphareth => "Tiphareth",
            Sephirah::Netzach => "Netzach",
            Sephirah::Hod => "Hod",
            Sephirah::Yesod => "Yesod",
            Sephirah::Malkuth => "Malkuth",
        }
    }

    pub fn pillar(self) -> Pillar {
        match self {
            Sephirah::Chokmah | Sephirah::Chesed | Sephirah::Netzach => Pillar::Right,
            Sephirah::Binah | Sephirah::Geburah | Sephirah::Hod => Pillar::Left,
            Sephirah::Kether
            | Sephirah::Daath
            | Sephirah::Tiphareth
            | Sephirah::Yesod
            | Sephirah::Malkuth => Pillar::Middle,
        }
    }

    pub fn is_hidden(self) -> bool {
        self == Sephirah::Daath
    }
}

impl fmt::Display for Sephirah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Node a body projects onto. Computed points have none.
pub fn body_node(body: Body) -> Option<Sephirah> {
    let node = match body {
        Body::Sun => Sephirah::Tiphareth,
        Body::Moon => Sephirah::Yesod,
        Body::Mercury => Sephirah::Hod,
        Body::Venus => Sephirah::Netzach,
        Body::Mars => Sephirah::Geburah,
        Body::Jupiter => Sephirah::Chesed,
        Body::Saturn => Sephirah::Binah,
        Body::Uranus => Sephirah::Chokmah,
        Body::Neptune => Sephirah::Kether,
        Body::Pluto => Sephirah::Daath,
        Body::Chiron | Body::NorthNode => return None,
    };
    Some(node)
}
