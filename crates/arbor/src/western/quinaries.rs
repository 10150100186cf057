//! Quinaries and their genii.
//!
//! Each sign is divided into six quinaries (5 degrees each). The 72 quinaries
//! of the zodiac are numbered from 0° Aries and each one carries a genius.

use crate::western::types::Sign;
use serde::{Deserialize, Serialize};

/// (name, psalm, attributes) for genii 1..=72.
const GENII: [(&str, u8, &str); 72] = [
    ("VEHU-IAH", 3, "Primordial Will, Divine Impulse"),
    ("YELI-EL", 22, "Divine Love, Kundalini"),
    ("SITA-EL", 91, "Building under Fire"),
    ("ELEMI-AH", 6, "Inner Journey, Spiritual Pilgrimage"),
    ("MAHAS-IAH", 34, "Peace in War, Ruler of Physical Things"),
    ("LELAH-EL", 9, "Sudden Illumination, Science of the Useful"),
    ("ACHA-IAH", 103, "Divine Patience"),
    ("CAHETH-EL", 95, "Sanctified Prosperity"),
    ("HAZI-EL", 25, "Universal Mercy, Tangible Compassion"),
    ("ALAD-IAH", 33, "Forgiving Grace"),
    ("LAVI-AH", 18, "Hidden Victory, Revelations in Dreams"),
    ("HAHAU-IAH", 10, "Refuge, Divine Protection"),
    ("YEZAL-EL", 98, "Conjugal Fidelity"),
    ("MEBAH-EL", 9, "Liberating Truth"),
    ("LAUU-IAH", 8, "Victory, Renown, Musical and Poetic Talent"),
    ("CALAH-IAH", 35, "Swift Justice"),
    ("LEVU-IAH", 40, "Expansion of Intelligence"),
    ("CALI-EL", 7, "Immediate Help"),
    ("LEVU-IAH", 40, "Prodigious Memory"),
    ("PAHAL-IAH", 120, "Vocation, Redemption"),
    ("NELA-IAH", 145, "Study, Deep Meditation"),
    ("YEYA-EL", 121, "Fame, Diplomacy"),
    ("MELAH-EL", 121, "Healing the Sick"),
    ("CHAHU-IAH", 33, "Voluntary Exile, Protection"),
    ("NETAH-IAH", 145, "Spiritual Elevation"),
    ("HAAI-AH", 119, "Victory over Hidden Enemies"),
    ("YERAT-EL", 140, "Spreading of Light, Propagation of Knowledge"),
    ("SEEHH-IAH", 71, "Longevity, Health"),
    ("REYI-EL", 54, "Deliverance from Enemies"),
    ("AUMA-EL", 113, "Patience, Conversion"),
    ("LECA-EL", 131, "Clairvoyance, Science"),
    ("VESHAR-IAH", 33, "Clemency, Justice"),
    ("YEHU-IAH", 94, "Knowledge, Subordination"),
    ("LEHAH-IAH", 131, "Obedience, Restraint"),
    ("CAVAQ-IAH", 88, "Testaments, Family Reconciliation"),
    ("MENAD-EL", 26, "Work, Deliverance from Oppression"),
    ("ANIE-EL", 80, "Victory, Breaking Vicious Circles"),
    ("HAAMI-AH", 131, "Rites, Religious Ceremonies"),
    ("REHA-EL", 30, "Health, Family Longevity"),
    ("YEYAZ-EL", 88, "Joy, Gladness, Consolation"),
    ("HAHAH-EL", 120, "Refuge, Protection"),
    ("MIKA-EL", 121, "House of God, Archangel Michael"),
    ("VEVAL-IAH", 88, "Destruction of Enemies, Deliverance"),
    ("YELAH-IAH", 119, "Military Talent, Protection in Battle"),
    ("SEALH-IAH", 94, "Raising the Fallen"),
    ("ARI-EL", 145, "Revelation of Treasures"),
    ("ASAL-IAH", 105, "Contemplation of the Divine"),
    ("MIHAH-EL", 98, "Fertility, Conjugal Harmony"),
    ("VEHU-EL", 145, "Greatness of Soul"),
    ("DANI-EL", 145, "Eloquence, Just Decisions"),
    ("HAHASH-IAH", 104, "Universal Medicine, Spiritual Alchemy"),
    ("IMAMI-AH", 7, "Destruction of Enemies"),
    ("NANA-EL", 113, "Spiritual Communication"),
    ("NITHA-EL", 9, "Eternal Life in the Elect"),
    ("MEBAH-IAH", 102, "Intellectual Consolation"),
    ("POI-EL", 145, "Wealth, Esteem"),
    ("NEMAMI-AH", 113, "Prosperity"),
    ("YEYAZ-EL", 88, "Consolation, Conjugal Fidelity"),
    ("HARACH-EL", 113, "Intellectual Wealth"),
    ("MITSAR-EL", 145, "Healing of Mental Illness"),
    ("UMAB-EL", 113, "Affinities, Friendship"),
    ("YAHAH-EL", 119, "Transcendent Knowledge"),
    ("ANAU-EL", 3, "Circle of Sages"),
    ("MECHI-EL", 33, "Literary Inspiration"),
    ("DAMA-IAH", 88, "Fountain of Wisdom"),
    ("MENA-EL", 26, "Deliverance of Captives"),
    ("AYAI-EL", 37, "Transmutation"),
    ("HABUU-IAH", 106, "Healing, Fertility"),
    ("ROAH-EL", 16, "Restitution of Objects"),
    ("YABAM-IAH", 119, "Alchemical Genesis"),
    ("HAYI-EL", 109, "Divine Protection"),
    ("MUMA-IAH", 116, "End and Beginning, Rebirth"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeniusInfo {
    /// 1..=72, counted from 0° Aries.
    pub number: u8,
    pub name: String,
    pub psalm: u8,
    pub attributes: String,
    /// 1..=6 within the sign.
    pub quinary: u8,
    /// Degree range of the quinary within its sign, e.g. (15.0, 20.0).
    pub range: (f64, f64),
}

/// Given degree in sign, returns the quinary index 1..=6.
/// Degrees outside [0, 30) are clamped to the first or last quinary.
pub fn get_quinary_index(degree_in_sign: f64) -> u8 {
    let q = (degree_in_sign / 5.0).floor();
    q.clamp(0.0, 5.0) as u8 + 1
}

/// Genius for a sign and degree within it.
pub fn genius_for_sign_and_degree(sign: Sign, degree_in_sign: f64) -> GeniusInfo {
    let quinary = get_quinary_index(degree_in_sign);
    let number = 1 + sign.index() as u8 * 6 + (quinary - 1);
    let (name, psalm, attributes) = GENII[number as usize - 1];
    let start = f64::from(quinary - 1) * 5.0;

    GeniusInfo {
        number,
        name: name.to_string(),
        psalm,
        attributes: attributes.to_string(),
        quinary,
        range: (start, start + 5.0),
    }
}

/// Genius for an absolute longitude 0–360.
pub fn genius_from_longitude(longitude: f64) -> GeniusInfo {
    let lon = longitude.rem_euclid(360.0);
    let sign = Sign::from_longitude(lon);
    genius_for_sign_and_degree(sign, lon - sign.start_longitude())
}
