//! Built-in word lists.
//!
//! Valences use a -4.0..=4.0 scale. The domain list is merged on top of the
//! base list, so a domain entry replaces a base entry for the same word.

/// Generic English valence dictionary.
pub const BASE_VALENCES: &[(&str, f64)] = &[
    ("abandon", -1.9),
    ("abandoned", -2.0),
    ("abuse", -3.2),
    ("accept", 1.6),
    ("accepted", 1.1),
    ("admire", 2.4),
    ("adorable", 2.2),
    ("afraid", -2.0),
    ("aggravating", -2.1),
    ("agree", 1.5),
    ("alarming", -1.9),
    ("amazing", 2.8),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("anxious", -1.0),
    ("appreciate", 1.7),
    ("appreciated", 2.3),
    ("awesome", 3.1),
    ("awful", -2.0),
    ("awkward", -0.6),
    ("bad", -2.5),
    ("beautiful", 2.9),
    ("beautifully", 2.7),
    ("benefit", 2.0),
    ("best", 3.2),
    ("better", 1.9),
    ("bitter", -1.8),
    ("blame", -1.4),
    ("bored", -1.1),
    ("boring", -1.3),
    ("brilliant", 2.8),
    ("broke", -1.8),
    ("calm", 1.3),
    ("careful", 0.6),
    ("careless", -1.5),
    ("charming", 2.8),
    ("cheerful", 2.5),
    ("clean", 1.7),
    ("clear", 1.6),
    ("comfortable", 2.3),
    ("complain", -1.5),
    ("complaint", -1.2),
    ("confused", -1.3),
    ("cool", 1.3),
    ("crap", -1.6),
    ("crazy", -1.4),
    ("cry", -2.1),
    ("damage", -2.2),
    ("damaged", -1.9),
    ("danger", -2.4),
    ("dead", -3.3),
    ("delight", 2.9),
    ("delighted", 3.1),
    ("depressed", -2.3),
    ("desperate", -1.3),
    ("difficult", -1.5),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disappointment", -2.3),
    ("disaster", -3.1),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("dumb", -2.3),
    ("easy", 1.9),
    ("effective", 2.1),
    ("efficient", 1.8),
    ("embarrassing", -1.6),
    ("encouraging", 2.4),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failing", -2.3),
    ("failure", -2.3),
    ("fair", 1.3),
    ("fantastic", 2.6),
    ("fault", -1.7),
    ("favorite", 2.0),
    ("fear", -2.2),
    ("fine", 0.8),
    ("fix", 1.0),
    ("fixed", 1.1),
    ("fool", -1.9),
    ("fortunate", 1.9),
    ("free", 2.3),
    ("friendly", 2.2),
    ("frustrated", -2.4),
    ("frustrating", -1.9),
    ("frustration", -2.1),
    ("fun", 2.3),
    ("funny", 1.9),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("grateful", 2.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("hard", -0.4),
    ("harm", -2.5),
    ("hate", -2.7),
    ("hated", -3.2),
    ("helpful", 1.8),
    ("helpless", -2.1),
    ("hope", 1.9),
    ("hopeless", -2.0),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("ideal", 2.4),
    ("ignore", -1.5),
    ("ignored", -1.3),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("inadequate", -1.7),
    ("incredible", 2.5),
    ("ineffective", -0.5),
    ("inferior", -1.7),
    ("interesting", 1.7),
    ("irritating", -2.0),
    ("joy", 2.8),
    ("kind", 2.4),
    ("lame", -1.8),
    ("like", 2.0),
    ("liked", 1.8),
    ("lose", -1.3),
    ("losing", -1.6),
    ("loss", -1.3),
    ("lost", -1.3),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("mad", -2.2),
    ("mess", -1.5),
    ("messy", -1.5),
    ("miserable", -2.2),
    ("miss", -0.6),
    ("mistake", -1.4),
    ("nice", 1.8),
    ("nightmare", -2.8),
    ("nonsense", -1.7),
    ("ok", 1.2),
    ("okay", 0.9),
    ("outstanding", 3.0),
    ("pain", -2.3),
    ("painful", -1.9),
    ("pathetic", -2.4),
    ("perfect", 2.7),
    ("perfectly", 3.2),
    ("pleasant", 2.3),
    ("please", 1.3),
    ("pleased", 1.9),
    ("poor", -2.1),
    ("poorly", -1.8),
    ("positive", 2.6),
    ("powerful", 1.8),
    ("pretty", 2.2),
    ("problem", -1.7),
    ("problems", -1.7),
    ("progress", 1.8),
    ("proud", 2.1),
    ("recommend", 1.5),
    ("recommended", 0.8),
    ("regret", -1.8),
    ("relief", 2.1),
    ("ridiculous", -1.5),
    ("rude", -2.0),
    ("sad", -2.1),
    ("safe", 1.9),
    ("satisfied", 1.8),
    ("scary", -2.2),
    ("simple", 1.0),
    ("smart", 1.7),
    ("solid", 0.6),
    ("sorry", -0.3),
    ("stupid", -2.4),
    ("success", 2.7),
    ("successful", 2.8),
    ("suck", -1.9),
    ("sucks", -1.5),
    ("super", 2.9),
    ("superb", 3.1),
    ("support", 1.7),
    ("terrible", -2.1),
    ("terrific", 2.1),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("trouble", -1.7),
    ("ugly", -2.3),
    ("unfortunately", -1.4),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("useful", 1.9),
    ("useless", -1.8),
    ("valuable", 2.1),
    ("waste", -1.8),
    ("weak", -1.9),
    ("welcome", 2.0),
    ("wonderful", 2.7),
    ("worried", -1.2),
    ("worse", -2.1),
    ("worst", -3.1),
    ("worth", 0.9),
    ("wow", 2.8),
    ("wrong", -2.1),
    ("yay", 2.4),
];

/// Product and feedback vocabulary.
pub const DOMAIN_VALENCES: &[(&str, f64)] = &[
    ("broken", -2.3),
    ("bug", -1.4),
    ("bugs", -1.5),
    ("buggy", -2.0),
    ("clunky", -1.8),
    ("confusing", -1.8),
    ("crash", -2.2),
    ("crashed", -2.2),
    ("crashes", -2.2),
    ("crashing", -2.3),
    ("cumbersome", -1.6),
    ("downtime", -1.8),
    ("error", -1.2),
    ("errors", -1.3),
    ("fast", 1.2),
    ("flaky", -1.6),
    ("freeze", -1.5),
    ("freezes", -1.7),
    ("glitch", -1.3),
    ("glitchy", -1.8),
    ("hang", -1.0),
    ("hangs", -1.3),
    ("intuitive", 2.0),
    ("lag", -1.3),
    ("laggy", -1.7),
    ("outage", -2.2),
    ("polished", 1.8),
    ("reliable", 1.8),
    ("responsive", 1.6),
    ("seamless", 2.1),
    ("slick", 1.7),
    ("slow", -1.5),
    ("sluggish", -1.7),
    ("smooth", 1.6),
    ("snappy", 1.5),
    ("stable", 1.3),
    ("timeout", -1.2),
    ("unintuitive", -1.8),
    ("unreliable", -2.0),
    ("unresponsive", -1.9),
    ("unstable", -1.8),
    ("unusable", -2.6),
];

/// Negation words (contractions appear apostrophe-free, as tokenized).
pub const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "despite", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no", "nobody", "none",
    "nope", "nor", "not", "nothing", "nowhere", "rarely", "seldom", "shouldnt", "wasnt", "werent",
    "without", "wont", "wouldnt",
];

/// Intensifiers that scale the next sentiment word up.
pub const BOOSTERS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "enormously", "entirely", "especially", "exceptionally", "extremely", "greatly", "highly",
    "hugely", "incredibly", "intensely", "majorly", "particularly", "purely", "quite", "really",
    "remarkably", "so", "substantially", "thoroughly", "totally", "tremendously", "truly",
    "unbelievably", "utterly", "very",
];

/// Intensifiers that scale the next sentiment word down.
pub const DAMPENERS: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "marginally", "occasionally", "partly", "scarcely",
    "slightly", "somewhat", "sorta",
];

/// Words that force a negative label.
pub const STRONG_NEGATIVE: &[&str] = &[
    "terrible", "awful", "unusable", "hate", "broken", "worst", "horrible",
];

/// Words that force a positive label.
pub const STRONG_POSITIVE: &[&str] = &[
    "amazing", "love", "perfect", "excellent", "fantastic", "great", "best",
];
