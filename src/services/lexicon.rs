// Lexicon Tables
// Static word sets and phrase lists read by the signal extractors.
// Built once on first use and shared read-only across analyses.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::services::phrase_matcher::{Boundary, PhraseMatcher};

macro_rules! word_set {
    ($(#[$meta:meta])* $name:ident, $list:ident) => {
        $(#[$meta])*
        pub fn $name() -> &'static HashSet<&'static str> {
            static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
            SET.get_or_init(|| $list.iter().copied().collect())
        }
    };
}

macro_rules! phrase_set {
    ($(#[$meta:meta])* $name:ident, $list:ident, $boundary:expr) => {
        $(#[$meta])*
        pub fn $name() -> &'static PhraseMatcher {
            static MATCHER: OnceLock<PhraseMatcher> = OnceLock::new();
            MATCHER.get_or_init(|| PhraseMatcher::new($list.iter().copied(), $boundary))
        }
    };
}

// ============ Vocabulary ============

pub const COMMON_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when",
    "make", "can", "like", "time", "no", "just", "him", "know", "take", "people", "into",
    "year", "your", "good", "some", "could", "them", "see", "other", "than", "then", "now",
    "look", "only", "come", "its", "over", "think", "also", "back", "after", "use", "two",
    "how", "our", "work", "first", "well", "way", "even", "new", "want", "because", "any",
    "these", "give", "day", "most", "us", "great", "very", "much", "before", "between",
    "still", "should", "been", "through", "where", "too", "find", "here", "thing", "many",
    "those", "long", "made", "world", "own", "while", "last", "might", "such", "end",
    "never", "both", "old", "each", "tell", "does", "set", "three", "had", "has", "was",
    "were", "are", "is", "am", "did", "being", "more", "may", "down", "part", "same",
    "around", "every", "must", "place", "small", "right", "big", "few", "off", "keep",
    "help", "put", "another", "hand", "high", "again", "under", "once", "man", "woman",
    "life", "child", "home", "need", "house", "why", "let", "head", "point", "far", "turn",
    "move", "left", "run", "real", "group", "start", "call", "ask", "began", "seem", "show",
    "hear", "play", "number", "change", "state",
];

pub const CLICHE_WORDS: &[&str] = &[
    "delve", "tapestry", "landscape", "leverage", "utilize", "facilitate",
    "multifaceted", "comprehensive", "robust", "nuanced", "pivotal", "paramount",
    "intricate", "meticulous", "holistic", "streamline", "foster", "encompass",
    "embark", "underscore", "interplay", "showcasing", "navigating", "underscores",
    "harness", "spearhead", "bolster", "elucidate", "cornerstone", "synergy",
    "groundbreaking", "transformative", "noteworthy", "commendable", "invaluable",
    "indispensable", "testament", "realm", "myriad", "plethora",
    "harnessing", "crafting", "elevate", "optimize", "strategically", "proactively",
    "seamlessly", "endeavor", "adept", "proficient",
    "burgeoning", "thriving", "vibrant", "bustling",
    "captivating", "enthralling", "resonate", "reverberate",
    "accentuate", "illuminate", "demystify", "unravel",
    "spearheading", "orchestrating", "catalyzing", "galvanizing", "propelling",
    "arguably", "undeniably", "unequivocally", "quintessential",
    "imperative", "conducive", "elucidating", "delineate", "juxtapose",
    "juxtaposition", "paradigm", "paradigmatic", "synergistic", "synergize",
    "ideate", "ideation", "actionable", "scalable", "impactful",
    "operationalize", "incentivize", "conceptualize", "contextualize",
    "revolutionize", "reimagine", "reinvent", "reimagining",
    "underpin", "underpinning", "overarching", "intersectionality",
    "intersecting", "multifarious", "manifold", "discerning",
    "astute", "judicious", "exemplary", "laudable",
    "formidable", "unwavering", "steadfast", "relentless", "tenacious",
    "poignant", "evocative", "visceral", "palpable", "tangible",
    "intangible", "ephemeral", "transcendent", "unprecedented",
    "unparalleled", "seminal", "watershed", "monumental",
    "instrumental", "consequential", "substantive", "quintessentially",
    "reimagined", "curated", "curating", "bespoke",
    "tailor", "tailored", "tailor-made", "fine-tuned",
    "cutting-edge", "state-of-the-art", "thought-provoking",
    "game-changing", "trailblazing", "pioneering",
    "ever-evolving", "ever-changing", "ever-growing", "ever-increasing",
    "aforementioned", "hitherto", "heretofore", "notwithstanding",
    "therein", "thereof", "whereby", "whilst",
];

pub const CLICHE_PHRASES: &[&str] = &[
    "it's important to note", "it is important to note", "it's worth noting",
    "it is worth noting", "it bears mentioning", "in today's world",
    "in today's digital age", "in today's fast-paced", "in the realm of",
    "plays a crucial role", "plays a vital role", "plays a key role",
    "plays an important role", "is a testament to", "stands as a testament",
    "serves as a reminder", "serves as a testament", "paves the way",
    "shed light on", "sheds light on", "shedding light on", "dive deep into",
    "let's dive in", "let's delve into", "a myriad of", "a plethora of",
    "at the end of the day", "it goes without saying", "when it comes to",
    "in this day and age", "the landscape of", "the realm of",
    "it cannot be overstated", "cannot be understated",
    "in a nutshell", "the bottom line is", "the key takeaway",
    "moving forward", "going forward", "looking ahead",
    "the importance of", "the significance of", "the impact of",
    "has become increasingly", "is becoming increasingly",
    "whether you're a", "whether you are a",
    "not only but also", "first and foremost", "last but not least",
    "in order to", "due to the fact", "the fact that",
    "on the other hand", "having said that", "that being said",
    "it should come as no surprise", "comes as no surprise",
    "are well-positioned", "is well-positioned",
    "offers a unique", "offers valuable", "provides valuable",
    "can be a game", "is a game-changer",
    "are you looking to", "if you're looking to", "if you are looking to",
    "in the ever-evolving", "in an ever-changing",
    "a comprehensive guide", "a step-by-step guide",
    "from understanding", "from exploring", "from analyzing",
    "by understanding", "by exploring", "by leveraging",
    "this comprehensive", "this article will", "this guide will",
    "without further ado", "with that in mind", "with this in mind",
    "it is crucial to", "it is essential to", "it is imperative to",
    "it is noteworthy that", "it is evident that", "it is clear that",
    "it is undeniable that", "it is worth mentioning", "it is safe to say",
    "there is no denying", "there is no doubt", "needless to say",
    "as we navigate", "as we delve", "as we explore",
    "one cannot overstate", "one cannot underestimate",
    "in an increasingly", "in our increasingly",
    "stands out as", "stands as a", "serves as a cornerstone",
    "serves as a catalyst", "acts as a catalyst",
    "the cornerstone of", "the bedrock of", "the crux of",
    "the epitome of", "the pinnacle of", "the hallmark of",
    "a deep dive into", "taking a closer look", "a holistic approach",
    "a nuanced understanding", "a comprehensive understanding",
    "a fundamental shift", "a paradigm shift",
    "strikes a balance", "navigating the complexities",
    "at its core", "at the heart of", "at the forefront of",
    "is poised to", "are poised to", "well-positioned to",
    "on a deeper level", "to a large extent", "to a great extent",
    "a wide range of", "a broad spectrum of", "a diverse range of",
    "the intricacies of", "the nuances of", "the complexities of",
    "in light of", "in the wake of", "in the context of",
    "is not without its challenges", "is not without its limitations",
    "the ever-growing", "the ever-expanding", "the rapidly evolving",
    "a testament to the", "a reflection of", "a manifestation of",
    "fosters a sense of", "cultivates a sense of",
    "the overarching goal", "the overarching theme",
    "embracing the", "harnessing the power", "unlocking the potential",
    "bridging the gap", "closing the gap", "filling the void",
    "a wealth of", "a treasure trove", "an abundance of",
    "the fabric of", "the tapestry of", "woven into the fabric",
    "reshaping the", "redefining the", "revolutionizing the",
    "it becomes evident", "it becomes clear", "it becomes apparent",
    "to put it simply", "simply put", "to sum up",
    "a double-edged sword", "a slippery slope",
    "the tip of the iceberg", "scratch the surface",
    "food for thought", "a wake-up call",
];

pub const FORMAL_ADVERBS: &[&str] = &[
    "significantly", "importantly", "effectively", "efficiently", "essentially",
    "fundamentally", "particularly", "specifically", "notably", "remarkably",
    "considerably", "substantially", "profoundly", "increasingly", "predominantly",
    "inherently", "intrinsically", "invariably", "inevitably", "undoubtedly",
    "unquestionably", "indisputably", "categorically", "overwhelmingly",
    "disproportionately", "exponentially", "systematically", "holistically",
    "strategically", "proactively", "meticulously", "seamlessly", "effortlessly",
    "comprehensively", "thoroughly", "rigorously", "robustly",
];

// ============ Discourse Markers ============

pub const TRANSITION_WORDS: &[&str] = &[
    "however", "furthermore", "moreover", "additionally", "consequently",
    "nevertheless", "therefore", "thus", "hence", "accordingly", "specifically",
    "importantly", "significantly", "essentially", "particularly", "notably",
    "indeed", "certainly", "undoubtedly", "clearly", "obviously", "evidently",
    "interestingly", "surprisingly", "ultimately", "fundamentally",
    "firstly", "secondly", "thirdly", "finally", "lastly", "meanwhile",
];

pub const TRANSITION_PHRASES: &[&str] = &[
    "in conclusion", "to summarize", "in summary", "in addition",
    "on the other hand", "in contrast", "as a result", "for example",
    "for instance", "in particular", "in fact", "above all",
    "to begin with", "in other words", "that is to say",
    "as mentioned", "it is worth noting", "it is important to note",
    "it should be noted", "on the contrary", "by contrast",
    "as a consequence", "in this regard", "to that end",
];

pub const FILLER_WORDS: &[&str] = &[
    "well", "basically", "actually", "literally", "honestly", "like", "kinda",
    "sorta", "gonna", "wanna", "gotta", "um", "uh", "hmm", "oh", "wow", "yeah",
    "yep", "nah", "anyway", "anyways", "stuff", "things", "whatever", "pretty",
    "really", "very", "quite", "just", "maybe", "perhaps", "probably", "guess",
    "suppose", "ok", "okay", "right", "cool", "sure", "hey", "huh", "whoa",
    "damn", "dude", "totally", "definitely", "absolutely", "seriously",
];

pub const HEDGE_PHRASES: &[&str] = &[
    "i think", "i guess", "i mean", "you know", "kind of", "sort of",
    "i suppose", "i feel like", "to be honest", "in my opinion",
    "if you ask me", "not sure", "i believe", "i reckon",
];

pub const IMPERATIVE_STARTERS: &[&str] = &[
    "do", "don't", "please", "let", "try", "make", "keep", "take", "give", "go",
    "come", "look", "see", "get", "put", "use", "find", "tell", "ask", "stop",
    "start", "run", "read", "write", "think", "consider", "remember", "note",
    "check", "ensure", "avoid", "imagine", "listen", "watch", "wait", "be",
];

pub const TRANSITION_STARTERS: &[&str] = &[
    "furthermore", "moreover", "additionally", "consequently", "nevertheless",
    "therefore", "thus", "hence", "accordingly", "specifically", "importantly",
    "significantly", "essentially", "particularly", "notably", "indeed",
    "certainly", "undoubtedly", "clearly", "obviously", "evidently",
    "interestingly", "surprisingly", "ultimately", "fundamentally",
    "firstly", "secondly", "thirdly", "finally", "lastly", "meanwhile",
    "however", "similarly", "likewise", "conversely", "alternatively",
    "overall", "subsequently",
];

pub const CONJUNCTION_STARTERS: &[&str] = &["and", "but", "or", "so", "yet", "for", "nor"];

pub const FIRST_PERSON: &[&str] = &["i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves"];

// ============ Tone ============

pub const POSITIVE_EMOTION: &[&str] = &[
    "love", "happy", "great", "wonderful", "amazing", "excellent", "fantastic",
    "beautiful", "incredible", "awesome", "brilliant", "delighted", "thrilled",
    "excited", "grateful", "blessed", "joyful", "glad", "proud", "pleased",
];

pub const NEGATIVE_EMOTION: &[&str] = &[
    "hate", "terrible", "horrible", "awful", "disgusting", "angry", "furious",
    "sad", "miserable", "depressed", "frustrated", "annoyed", "disappointed",
    "worried", "scared", "afraid", "devastated", "heartbroken", "painful", "ugly",
];

pub const STRONG_OPINION: &[&str] = &[
    "terrible", "amazing", "horrible", "incredible", "disgusting", "wonderful",
    "stupid", "brilliant", "garbage", "genius", "insane", "ridiculous",
    "absolutely", "definitely", "obviously", "clearly", "unfortunately",
    "honestly", "frankly", "basically", "literally", "seriously",
    "best", "worst", "perfect", "awful", "rubbish", "spectacular",
];

pub const HEDGING_TERMS: &[&str] = &[
    "however", "although", "nevertheless", "on the other hand", "while",
    "that said", "admittedly", "arguably", "granted", "regardless",
    "despite", "notwithstanding", "in contrast", "conversely", "yet",
];

// ============ Function Words ============

/// Stylometric function-word categories, in profile order. A word may sit in
/// more than one category and is then counted once per category.
pub const FUNCTION_WORD_CATEGORIES: &[(&str, &[&str])] = &[
    ("articles", &["the", "a", "an"]),
    (
        "prepositions",
        &[
            "of", "in", "to", "for", "with", "on", "at", "from", "by", "about", "as", "into",
            "through", "during", "before", "after", "above", "below", "between", "under",
        ],
    ),
    (
        "pronouns",
        &[
            "i", "me", "my", "we", "us", "our", "you", "your", "he", "him", "his", "she", "her",
            "they", "them", "their", "it", "its",
        ],
    ),
    (
        "auxiliaries",
        &[
            "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
            "did", "will", "would", "shall", "should", "may", "might", "can", "could", "must",
        ],
    ),
    (
        "conjunctions",
        &[
            "and", "but", "or", "nor", "for", "yet", "so", "because", "although", "while", "if",
            "when", "that", "which", "who",
        ],
    ),
    (
        "determiners",
        &[
            "this", "that", "these", "those", "each", "every", "some", "any", "no", "all", "both",
            "few", "many", "much", "several",
        ],
    ),
];

// ============ Surface Forms ============

pub const PASSIVE_AUXILIARIES: &[&str] = &["was", "were", "is", "are", "been", "being", "be", "am"];

pub const PASSIVE_SUFFIXES: &[&str] = &["ed", "en", "t"];

pub const CONTRACTION_SUFFIXES: &[&str] = &["t", "re", "ve", "ll", "d", "m", "s"];

/// Contractions typed without the apostrophe. Ambiguous forms such as
/// well, ill, were, shell, hell and its are left out.
pub const BARE_CONTRACTIONS: &[&str] = &[
    "dont", "cant", "wont", "isnt", "wasnt", "arent", "werent", "hasnt", "havent", "hadnt",
    "shouldnt", "wouldnt", "couldnt", "didnt", "doesnt", "neednt", "aint", "youre", "theyre",
    "hes", "shes", "im", "youve", "theyve", "weve", "ive", "youll", "theyll", "itll", "wouldve",
    "shouldve", "couldve", "mustve", "mightve", "thats", "theres", "heres", "whats", "wheres",
    "whos", "lets", "hed", "shed", "theyd", "wed", "youd", "id",
];

pub const INFORMAL_SPELLINGS: &[&str] = &[
    "gonna", "wanna", "gotta", "kinda", "sorta", "dunno", "lemme", "gimme", "ya", "yall",
    "nope", "yep", "yup", "haha", "lol", "omg", "btw", "imo", "tbh", "idk", "smh", "ngl", "fr",
    "bruh", "bro", "sis", "fam", "lowkey", "highkey", "sus", "vibe", "vibes", "slay", "lit",
    "fire", "cap", "bet",
];

/// Doubled words that are usually intentional.
pub const REPEAT_EXEMPT: &[&str] = &["very", "had", "that"];

pub const LIST_ORDINALS: &[&str] = &[
    "firstly", "secondly", "thirdly", "fourthly", "fifthly", "first", "second", "third", "fourth",
    "fifth",
];

pub const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand",
];

pub const NUMBER_UNITS: &[&str] = &[
    "hour", "hours", "minute", "minutes", "second", "seconds", "day", "days", "week", "weeks",
    "month", "months", "year", "years", "mile", "miles", "feet", "inche", "inches", "meter",
    "meters", "percent", "people", "student", "students", "participant", "participants", "time",
    "times",
];

word_set!(common_words, COMMON_WORDS);
word_set!(cliche_words, CLICHE_WORDS);
word_set!(formal_adverbs, FORMAL_ADVERBS);
word_set!(transition_words, TRANSITION_WORDS);
word_set!(filler_words, FILLER_WORDS);
word_set!(imperative_starters, IMPERATIVE_STARTERS);
word_set!(transition_starters, TRANSITION_STARTERS);
word_set!(conjunction_starters, CONJUNCTION_STARTERS);
word_set!(first_person, FIRST_PERSON);
word_set!(positive_emotion, POSITIVE_EMOTION);
word_set!(negative_emotion, NEGATIVE_EMOTION);
word_set!(strong_opinion, STRONG_OPINION);
word_set!(passive_auxiliaries, PASSIVE_AUXILIARIES);
word_set!(contraction_suffixes, CONTRACTION_SUFFIXES);
word_set!(bare_contractions, BARE_CONTRACTIONS);
word_set!(informal_spellings, INFORMAL_SPELLINGS);
word_set!(list_ordinals, LIST_ORDINALS);
word_set!(number_words, NUMBER_WORDS);
word_set!(number_units, NUMBER_UNITS);

phrase_set!(cliche_phrases, CLICHE_PHRASES, Boundary::Substring);
phrase_set!(transition_phrases, TRANSITION_PHRASES, Boundary::Substring);
phrase_set!(hedge_phrases, HEDGE_PHRASES, Boundary::Substring);
phrase_set!(
    /// Hedges must stand alone: "yet" inside "yeti" does not count.
    hedging_terms,
    HEDGING_TERMS,
    Boundary::Word
);
