use serde::{Deserialize, Serialize};

/// Face of a card. Each token on a board is shared by exactly two cards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Apple,
    Banana,
    Grapes,
    Strawberry,
    Cherries,
    Kiwi,
    Watermelon,
    Pineapple,
    Tangerine,
    Lemon,
    Pear,
    Peach,
    Mango,
    Melon,
}

/// Tokens present on every board.
pub const BASE_TOKENS: [Token; 8] = [
    Token::Apple,
    Token::Banana,
    Token::Grapes,
    Token::Strawberry,
    Token::Cherries,
    Token::Kiwi,
    Token::Watermelon,
    Token::Pineapple,
];

/// Tokens added one per difficulty level above the first, in this order.
pub const EXTRA_TOKENS: [Token; 6] = [
    Token::Tangerine,
    Token::Lemon,
    Token::Pear,
    Token::Peach,
    Token::Mango,
    Token::Melon,
];

impl Token {
    pub const fn glyph(self) -> &'static str {
        use Token::*;
        match self {
            Apple => "🍎",
            Banana => "🍌",
            Grapes => "🍇",
            Strawberry => "🍓",
            Cherries => "🍒",
            Kiwi => "🥝",
            Watermelon => "🍉",
            Pineapple => "🍍",
            Tangerine => "🍊",
            Lemon => "🍋",
            Pear => "🍐",
            Peach => "🍑",
            Mango => "🥭",
            Melon => "🍈",
        }
    }

    pub const fn name(self) -> &'static str {
        use Token::*;
        match self {
            Apple => "apple",
            Banana => "banana",
            Grapes => "grapes",
            Strawberry => "strawberry",
            Cherries => "cherries",
            Kiwi => "kiwi",
            Watermelon => "watermelon",
            Pineapple => "pineapple",
            Tangerine => "tangerine",
            Lemon => "lemon",
            Pear => "pear",
            Peach => "peach",
            Mango => "mango",
            Melon => "melon",
        }
    }
}
