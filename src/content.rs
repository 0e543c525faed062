//! Practice-message generators: random common-word runs, character
//! groups, and a canned QSO exchange. Everything is driven by a caller
//! supplied RNG so drills are reproducible from a seed.

use rand::Rng;

/// Which content the word/group generators may draw from.
#[derive(Debug, Clone, Copy)]
pub struct ContentConfig {
    pub letters: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub callsigns: bool,
    pub prosigns: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            letters: true,
            numbers: true,
            symbols: true,
            callsigns: true,
            prosigns: true,
        }
    }
}

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "./=?,";

// Not an exhaustive list of US callsign prefixes, but a good sampling.
const CALL_PREFIXES: &[&str] = &[
    "K", "N", "W", "AA", "AB", "AC", "AD", "AE", "AF", "AG", "AH", "AI", "AJ", "AK", "AL", "KA",
    "KB", "KC", "KD", "KE", "KF", "KG", "KH", "KI", "KL", "KM", "KN", "NA", "NB", "NC", "ND", "NE",
    "NF", "NG", "NH", "NI", "NJ", "NK", "NL", "NM", "NN", "WA", "WB", "WC", "WD", "WE", "WF", "WG",
    "WH", "WI", "WJ", "WK", "WL", "WM", "WN",
];

const PROSIGN_LIST: &[&str] = &["@AR", "@BT", "@SK", "@KN", "@BK"];

// Most-used words and abbreviations heard on CW, mixing everyday English
// with Q-codes and operating shorthand.
const TOP_WORDS: &[&str] = &[
    "I", "AND", "THE", "YOU", "THAT", "A", "TO", "KNOW", "OF", "IT", "YES", "IN", "THEY", "DO",
    "SO", "BUT", "IS", "LIKE", "HAVE", "WAS", "WE", "ITS", "JUST", "ON", "OR", "NOT", "THINK",
    "FOR", "WELL", "WHAT", "ABOUT", "ALL", "THATS", "OH", "REALLY", "ONE", "ARE", "RIGHT", "THEM",
    "AT", "HERE", "THERE", "MY", "MEAN", "DONT", "NO", "WITH", "IF", "WHEN", "CAN", "U", "BE",
    "AS", "OUT", "KIND", "BECAUSE", "PEOPLE", "GO", "GOT", "THIS", "SOME", "IM", "WOULD", "THINGS",
    "NOW", "LOT", "HAD", "HOW", "GOOD", "GET", "SEE", "FROM", "HE", "ME", "THEIR", "MORE", "TOO",
    "OK", "VERY", "UP", "BEEN", "GUESS", "TIME", "GOING", "INTO", "THOSE", "DID", "WORK", "OTHER",
    "IVE", "EVEN", "OUR", "ANY", "QRL", "QRM", "QRN", "QRQ", "QRS", "QRZ", "QTH", "QSB", "QSY",
    "R", "TU", "RTU", "TNX", "NAME", "RST", "CQ", "AGN", "ANT", "DX", "ES", "FB", "GM", "GA", "GE",
    "HI", "HR", "HW", "NR", "OM", "PSE", "PWR", "WX", "73", "5NN", "599", "BTU", "TST", "DE",
];

fn pick(alphabet: &str, rng: &mut impl Rng) -> char {
    let bytes = alphabet.as_bytes();
    bytes[rng.gen_range(0..bytes.len())] as char
}

fn pick_str<'a>(items: &[&'a str], rng: &mut impl Rng) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// A random US-style callsign: prefix, digit, then one to three letters.
pub fn make_callsign(rng: &mut impl Rng) -> String {
    let mut callsign = pick_str(CALL_PREFIXES, rng).to_string();
    callsign.push(pick(NUMBERS, rng));
    callsign.push(pick(LETTERS, rng));

    if rng.gen_bool(0.5) {
        callsign.push(pick(LETTERS, rng));
    }
    if rng.gen_bool(0.5) {
        callsign.push(pick(LETTERS, rng));
    }

    callsign
}

/// `num_words` random common CW words, with occasional callsigns and
/// prosigns mixed in when enabled. Lowercased; the sender uppercases for
/// display.
pub fn random_words(num_words: usize, config: ContentConfig, rng: &mut impl Rng) -> String {
    let mut words = Vec::with_capacity(num_words);

    while words.len() < num_words {
        if config.callsigns && rng.gen_bool(0.05) {
            words.push(make_callsign(rng));
        } else if config.prosigns && rng.gen_bool(0.05) {
            words.push(pick_str(PROSIGN_LIST, rng).to_string());
        } else {
            words.push(pick_str(TOP_WORDS, rng).to_string());
        }
    }

    words.join(" ").to_lowercase()
}

/// `num_groups` random groups of `group_size` characters from the enabled
/// classes. Empty when every class is disabled.
pub fn random_char_groups(
    num_groups: usize,
    group_size: usize,
    config: ContentConfig,
    rng: &mut impl Rng,
) -> String {
    let mut alphabet = String::new();
    if config.letters {
        alphabet.push_str(LETTERS);
    }
    if config.numbers {
        alphabet.push_str(NUMBERS);
    }
    if config.symbols {
        alphabet.push_str(SYMBOLS);
    }

    if alphabet.is_empty() {
        return String::new();
    }

    let mut groups = Vec::with_capacity(num_groups);
    for _ in 0..num_groups {
        let group: String = (0..group_size).map(|_| pick(&alphabet, rng)).collect();
        groups.push(group);
    }

    groups.join(" ").to_lowercase()
}

/// A scripted two-station QSO exchange, one message per transmission.
pub fn contact_exchange(rng: &mut impl Rng) -> Vec<String> {
    let caller = make_callsign(rng);
    let answerer = make_callsign(rng);
    let rst_options = ["599", "579", "559", "5NN"];
    let rst = pick_str(&rst_options, rng);
    let name = pick_str(&["BOB", "JIM", "ANN", "SUE", "TOM", "KAY"], rng);
    let qth = pick_str(
        &["DENVER CO", "AUSTIN TX", "BOISE ID", "SALEM OR", "TAMPA FL"],
        rng,
    );

    vec![
        format!("CQ CQ CQ DE {caller} {caller} K"),
        format!("{caller} DE {answerer} {answerer} @KN"),
        format!("{answerer} DE {caller} @BT TNX FER CALL @BT UR RST {rst} {rst} @BT HW? @BK"),
        format!("@BK R R TNX @BT UR RST {rst} @BT NAME {name} {name} @BT QTH {qth} @BT HW? @BK"),
        format!("@BK FB {name} TNX FER QSO @BT 73 ES CUL @BT {answerer} DE {caller} @SK"),
        format!("73 {caller} DE {answerer} @SK E E"),
    ]
}
