#[derive(Debug, Clone, PartialEq)]
pub enum InvalidDistribution {
    Empty,
    Negative { index: usize, value: f32 },
    NonFinite { index: usize, value: f32 },
    ZeroSum,
    /// More outcomes than an `i32` index can name.
    TooLong { len: usize },
}

impl std::fmt::Display for InvalidDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidDistribution::Empty => write!(f, "weights slice is empty"),
            InvalidDistribution::Negative { index, value } => {
                write!(
                    f,
                    "weights contain a negative value at index {index}: {value}"
                )
            }
            InvalidDistribution::NonFinite { index, value } => {
                write!(
                    f,
                    "weights contain a non-finite value at index {index}: {value}"
                )
            }
            InvalidDistribution::ZeroSum => write!(f, "sum of weights is not positive"),
            InvalidDistribution::TooLong { len } => {
                write!(f, "{len} weights exceed the i32 outcome index range")
            }
        }
    }
}

impl std::error::Error for InvalidDistribution {}
