//! Turns a trip's free-text title and description into a short keyword
//! query for the photo search API.
//!
//! Words are scored by a handful of additive heuristics (length, leading
//! capital, geographic and administrative vocabulary). Generic travel words
//! only pad the query when there are not enough strong words, and stop words
//! never make it in. When nothing qualifies the capitalised words of the
//! title are used, and failing that the title itself.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashSet;

const MAX_QUERY_WORDS: usize = 5;
const MAX_FALLBACK_WORDS: usize = 3;
/// Tokens must be strictly longer than this, measured before punctuation is stripped.
const MIN_TOKEN_LEN: usize = 2;

const STOP_WORD_SCORE: f32 = -1.0;
const FILLER_SCORE: f32 = 0.5;

const STOP_WORDS: [&str; 26] = [
    "a", "an", "the", "and", "or", "but", "for", "is", "are", "was", "were", "been", "have",
    "has", "had", "do", "does", "did", "will", "would", "should", "could", "can", "may",
    "might", "must",
];

const TRAVEL_KEYWORDS: [&str; 16] = [
    "trip",
    "travel",
    "vacation",
    "holiday",
    "journey",
    "adventure",
    "visit",
    "explore",
    "tour",
    "getaway",
    "break",
    "escape",
    "excursion",
    "weekend",
    "day",
    "days",
];

// Landforms, waters, landmarks and the place-name particles of a few languages.
const GEOGRAPHIC_TERMS: &[&str] = &[
    "mountain", "mountains", "mount", "mt", "peak", "peaks", "hill", "hills", "volcano",
    "glacier", "canyon", "gorge", "valley", "plateau", "cliff", "cliffs", "cave", "caves",
    "desert", "dune", "dunes", "forest", "jungle", "rainforest", "savanna", "safari", "lake",
    "lakes", "river", "falls", "waterfall", "beach", "beaches", "coast", "shore", "bay",
    "gulf", "sea", "ocean", "lagoon", "reef", "island", "islands", "isle", "archipelago",
    "atoll", "peninsula", "cape", "harbor", "harbour", "port", "delta", "fjord", "fjords",
    "loch", "glen", "ben", "highlands", "alps", "andes", "rockies", "himalaya", "himalayas",
    "park", "national", "castle", "palace", "fort", "fortress", "tower", "bridge", "ruins",
    "temple", "temples", "shrine", "cathedral", "church", "abbey", "monastery", "mosque",
    "pyramid", "pyramids", "citadel", "acropolis", "colosseum", "market", "plaza", "square",
    "garden", "gardens", "vineyard", "vineyards", "springs", "oasis", "city", "town",
    "village", "old", "san", "santa", "santo", "saint", "st", "sao", "porto", "costa",
    "playa", "isla", "monte", "lago", "rio", "sierra", "mont", "lac", "berg", "burg", "dorf",
    "wald", "koh", "pulau", "gunung", "danau", "yama", "shima", "jima", "wat",
];

// Compass points, administrative divisions and common settlement suffixes.
const ADMINISTRATIVE_TERMS: &[&str] = &[
    "north", "south", "east", "west", "northern", "southern", "eastern", "western",
    "northeast", "northwest", "southeast", "southwest", "northeastern", "northwestern",
    "southeastern", "southwestern", "central", "midwest", "upper", "lower", "inner", "outer",
    "greater", "new", "province", "provinces", "provincial", "prefecture", "state", "states",
    "county", "counties", "district", "districts", "region", "regions", "regional",
    "territory", "territories", "canton", "department", "municipality", "borough", "parish",
    "shire", "oblast", "krai", "voivodeship", "governorate", "emirate", "emirates", "kingdom",
    "republic", "federation", "commonwealth", "principality", "duchy", "metro",
    "metropolitan", "capital", "downtown", "uptown", "suburb", "suburbs", "quarter",
    "arrondissement", "comune", "gemeinde", "kreis", "land", "nagar", "pur", "pura", "abad",
    "stan", "garh", "ganj", "kota", "shi", "ku", "cho", "machi", "mura", "gun", "ken", "fu",
    "dong", "gu", "eup", "myeon", "sheng", "xian", "zhen", "qu", "cun",
];

static GEOGRAPHIC_RE: Lazy<Regex> = Lazy::new(|| whole_token_regex(GEOGRAPHIC_TERMS));
static ADMINISTRATIVE_RE: Lazy<Regex> = Lazy::new(|| whole_token_regex(ADMINISTRATIVE_TERMS));

fn whole_token_regex(terms: &[&str]) -> Regex {
    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("^(?i:{})$", alternation)).expect("whole-token alternation regex")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWord {
    /// Lowercased with non-word characters removed
    pub word: String,
    pub score: f32,
}

pub struct SearchQueryBuilder;

impl SearchQueryBuilder {
    /// Build an image search query from a trip title and optional description.
    ///
    /// Never fails: when no keyword qualifies the capitalised words of the
    /// title are returned, and when there are none of those either the
    /// title comes back unchanged.
    pub fn build(title: &str, description: Option<&str>) -> String {
        let text = format!("{} {}", title, description.unwrap_or(""));
        let scored = Self::score_words(&text);

        let keywords = Self::select_keywords(&scored);
        if !keywords.is_empty() {
            return keywords.join(" ");
        }

        let capitalized = Self::capitalized_title_words(title);
        if !capitalized.is_empty() {
            return capitalized.join(" ");
        }

        title.to_string()
    }

    /// Score every token of `text` that passes the length gate.
    /// Stop words are kept with a negative score.
    pub fn score_words(text: &str) -> Vec<ScoredWord> {
        text.split_whitespace()
            .filter_map(|original| {
                let lowered = original.to_lowercase();
                if lowered.chars().count() <= MIN_TOKEN_LEN {
                    return None;
                }

                let word = clean_word(&lowered);
                if word.is_empty() {
                    return None;
                }

                let score = Self::score_word(original, &word);
                Some(ScoredWord { word, score })
            })
            .collect()
    }

    /// `original` keeps the caller's casing; `word` is the cleaned, lowercased form.
    fn score_word(original: &str, word: &str) -> f32 {
        if STOP_WORDS.contains(&word) {
            return STOP_WORD_SCORE;
        }
        if TRAVEL_KEYWORDS.contains(&word) {
            return FILLER_SCORE;
        }

        let mut score = if word.chars().count() > 4 { 3.0 } else { 1.0 };
        if starts_uppercase(original) {
            score += 4.0;
        }
        if GEOGRAPHIC_RE.is_match(word) {
            score += 2.0;
        }
        if ADMINISTRATIVE_RE.is_match(word) {
            score += 1.0;
        }
        score
    }

    /// Strong words first (best score first, ties in text order), padded
    /// with travel filler words up to the query limit.
    fn select_keywords(scored: &[ScoredWord]) -> Vec<&str> {
        let mut strong: Vec<&ScoredWord> =
            scored.iter().filter(|w| w.score > FILLER_SCORE).collect();
        // sort_by is stable, so equal scores keep their order of appearance
        strong.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let strong = dedupe(strong.into_iter().map(|w| w.word.as_str()));
        let filler = dedupe(
            scored
                .iter()
                .filter(|w| w.score == FILLER_SCORE)
                .map(|w| w.word.as_str()),
        );

        strong
            .into_iter()
            .chain(filler)
            .take(MAX_QUERY_WORDS)
            .collect()
    }

    fn capitalized_title_words(title: &str) -> Vec<&str> {
        title
            .split_whitespace()
            .filter(|token| starts_uppercase(token) && token.chars().count() > MIN_TOKEN_LEN)
            .take(MAX_FALLBACK_WORDS)
            .collect()
    }
}

/// Shorthand for [`SearchQueryBuilder::build`].
pub fn build_search_query(title: &str, description: Option<&str>) -> String {
    SearchQueryBuilder::build(title, description)
}

/// Keep ASCII word characters only, the same set as a `\w` class without Unicode.
fn clean_word(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

fn dedupe<'a>(words: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    words.filter(|word| seen.insert(*word)).collect()
}
