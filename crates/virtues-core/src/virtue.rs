//! The thirteen-virtue rotation.
//!
//! Benjamin Franklin's thirteen virtues, cycled one per ISO week. The
//! table order is the rotation order; because the clamped week count (52)
//! is divisible by 13, the rotation lands on the same virtue for the same
//! ISO week number every year.

use crate::calendar::{decode_date, iso_week_of_year};

/// One of the thirteen fixed weekly virtues.
///
/// Defined once in [`VIRTUES`]; never created or destroyed at runtime.
#[derive(Debug, PartialEq, Eq)]
pub struct Virtue {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    /// Concrete daily practices, in suggested order.
    pub examples: &'static [&'static str],
}

/// The rotation table. Array order defines rotation order.
pub static VIRTUES: [Virtue; 13] = [
    Virtue {
        name: "Temperance",
        emoji: "🧘‍♂️",
        description: "Practice moderation in all things and avoid excess.",
        examples: &[
            "Stop eating before you feel full",
            "Skip the second coffee",
        ],
    },
    Virtue {
        name: "Silence",
        emoji: "🕊️",
        description: "Speak only when it benefits others or yourself. Avoid trifling conversation.",
        examples: &[
            "Let a pause stand in conversation",
            "Ask one question instead of giving one opinion",
        ],
    },
    Virtue {
        name: "Order",
        emoji: "🗂️",
        description: "Let all things have their place; let each part of your business have its time.",
        examples: &[
            "Clear your desk before starting work",
            "Plan tomorrow before closing the day",
        ],
    },
    Virtue {
        name: "Resolution",
        emoji: "💪",
        description: "Resolve to perform what you ought; perform without fail what you resolve.",
        examples: &[
            "Finish the task you said you would finish",
            "Keep one small promise to yourself",
        ],
    },
    Virtue {
        name: "Frugality",
        emoji: "🌱",
        description: "Make no expense but to do good to others or yourself; waste nothing.",
        examples: &[
            "Cook with what is already in the kitchen",
            "Delay one non-essential purchase by a day",
        ],
    },
    Virtue {
        name: "Industry",
        emoji: "🛠️",
        description: "Always be engaged in something useful; avoid idleness.",
        examples: &[
            "Replace one idle scroll with a useful task",
            "Start the hard thing first",
        ],
    },
    Virtue {
        name: "Sincerity",
        emoji: "🤝",
        description: "Use no hurtful deceit; think innocently and justly, and speak accordingly.",
        examples: &[
            "Say the uncomfortable true thing kindly",
            "Admit when you don't know",
        ],
    },
    Virtue {
        name: "Justice",
        emoji: "⚖️",
        description: "Wrong none by doing injuries or omitting benefits that are your duty.",
        examples: &[
            "Give credit where it is due",
            "Do the chore that is yours to do",
        ],
    },
    Virtue {
        name: "Moderation",
        emoji: "🛑",
        description: "Avoid extremes; forbear resenting injuries as much as you think they deserve.",
        examples: &[
            "Let a small slight pass unanswered",
            "Take the middle portion",
        ],
    },
    Virtue {
        name: "Cleanliness",
        emoji: "✨",
        description: "Keep your body, clothes, and habitation clean.",
        examples: &[
            "Leave the sink empty tonight",
            "Make the bed",
        ],
    },
    Virtue {
        name: "Tranquility",
        emoji: "🌳",
        description: "Be not disturbed at trifles, or at accidents common or unavoidable.",
        examples: &[
            "Breathe before replying to the annoying message",
            "Let the spilled coffee be just spilled coffee",
        ],
    },
    Virtue {
        name: "Chastity",
        emoji: "❤️",
        description: "Rarely use venery but for health or offspring; never to dullness, weakness, or the injury of your own or another's peace or reputation.",
        examples: &[
            "Guard your attention",
        ],
    },
    Virtue {
        name: "Humility",
        emoji: "😊",
        description: "Imitate Jesus and Socrates.",
        examples: &[
            "Ask someone to teach you something",
            "Say 'I was wrong' once",
        ],
    },
];

/// Rotation slot (0..13) for a date key.
pub fn rotation_index(date_key: &str) -> usize {
    iso_week_of_year(decode_date(date_key)) as usize % VIRTUES.len()
}

/// The virtue assigned to a date key's ISO week.
///
/// Pure and total over any valid `YYYYMMDD` key.
pub fn virtue_for_date(date_key: &str) -> &'static Virtue {
    &VIRTUES[rotation_index(date_key)]
}
