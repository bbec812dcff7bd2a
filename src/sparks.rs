use crate::config::{Category, Labels};
use crate::metrics::total_arrangements;

/// Number of Mind Spark hints
pub const SPARK_COUNT: usize = 5;

/// Position in the hint sequence. Advancing stops at the last hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SparkStep(usize);

impl SparkStep {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn advance(self) -> Self {
        Self((self.0 + 1).min(SPARK_COUNT - 1))
    }

    pub fn is_last(self) -> bool {
        self.0 == SPARK_COUNT - 1
    }

    pub fn text(self, depth: u32, labels: &Labels) -> String {
        let total = total_arrangements(depth);
        match self.0 {
            0 => "Start by setting the number of classmates Billy might have.".to_string(),
            1 => format!(
                "You've set {depth} classmates. This means there are {total} possible \
                 arrangements. Notice how each person in the bottom row has a unique number, \
                 from 1 to {total}. These numbers represent all possible combinations of {a}s \
                 and {b}s.",
                a = labels.a.to_lowercase(),
                b = labels.b.to_lowercase(),
            ),
            2 => format!(
                "Try adding some {item}s to Billy's classmates. Green for {a}s, purple for {b}s.",
                item = labels.item,
                a = labels.a.to_lowercase(),
                b = labels.b.to_lowercase(),
            ),
            3 => format!(
                "Each time you drag {article} {item} to a classmate, they receive it and smile!",
                article = indefinite_article(&labels.item),
                item = labels.item
            ),
            _ => format!(
                "The goal is to distribute the {item}s to as many classmates as possible.",
                item = labels.item
            ),
        }
    }
}

/// "an" before a vowel sound (by first letter), "a" otherwise
fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// The metric a ⚡ explanation is attached to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Explanation {
    Arrangements,
    Count(Category),
    Probability,
}

impl Explanation {
    pub const ALL: [Explanation; 4] = [
        Explanation::Arrangements,
        Explanation::Count(Category::A),
        Explanation::Count(Category::B),
        Explanation::Probability,
    ];

    /// Keyboard shortcut `1`-`4`
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }

    pub fn text(self, depth: u32, labels: &Labels) -> String {
        match self {
            Explanation::Arrangements => format!(
                "The total number of possible arrangements is 2^{depth} because each classmate \
                 can be either a {a} or a {b}, resulting in 2 choices for each of the {depth} \
                 classmates.",
                a = labels.a.to_lowercase(),
                b = labels.b.to_lowercase(),
            ),
            Explanation::Count(category) => format!(
                "This is the number of {color} {item}s you've given out to {who}s.",
                color = category.item_color_name(),
                item = labels.item,
                who = labels.category(category).to_lowercase(),
            ),
            Explanation::Probability => format!(
                "This probability is calculated as ((green {item}s / classmates + \
                 purple {item}s / classmates) / 2) * 100. It represents the average probability of \
                 having the right {item} for a randomly chosen classmate.",
                item = labels.item,
            ),
        }
    }
}
