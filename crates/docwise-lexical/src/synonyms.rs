//! Static synonym clusters for near-match scoring.

static SYNONYM_GROUPS: &[&[&str]] = &[
    &["big", "large", "huge", "enormous", "massive", "giant", "vast", "immense"],
    &["small", "little", "tiny", "minute", "compact", "mini", "petite"],
    &[
        "good",
        "excellent",
        "great",
        "wonderful",
        "fantastic",
        "amazing",
        "superb",
        "outstanding",
    ],
    &["bad", "terrible", "awful", "horrible", "poor", "dreadful"],
    &["fast", "quick", "rapid", "swift", "speedy", "hasty", "brisk"],
    &["slow", "sluggish", "gradual", "leisurely", "delayed", "tardy"],
    &["happy", "joyful", "cheerful", "glad", "pleased", "delighted", "content"],
    &["sad", "unhappy", "depressed", "gloomy", "melancholy", "sorrowful"],
    &[
        "important",
        "significant",
        "crucial",
        "vital",
        "essential",
        "key",
        "critical",
    ],
    &["help", "assist", "aid", "support", "facilitate", "enable"],
    &["show", "display", "demonstrate", "exhibit", "present", "reveal"],
    &["create", "make", "build", "construct", "develop", "generate", "produce"],
    &["use", "utilize", "employ", "apply", "implement", "adopt"],
    &["find", "discover", "locate", "identify", "detect", "uncover"],
    &["explain", "describe", "clarify", "elaborate", "detail", "illustrate"],
    &["method", "approach", "technique", "procedure", "process", "way"],
    &["result", "outcome", "consequence", "effect", "conclusion", "finding"],
    &["problem", "issue", "challenge", "difficulty", "obstacle", "trouble"],
    &["solution", "answer", "resolution", "fix", "remedy", "approach"],
];

/// True when the words are identical or share a synonym cluster.
#[must_use]
pub fn are_synonyms(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    SYNONYM_GROUPS
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
}
