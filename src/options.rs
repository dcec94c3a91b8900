//! Table configuration options.

/// A bet size the table offers as a one-click choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BetPreset {
    /// A fixed chip amount.
    Fixed(usize),
    /// The entire current balance.
    AllIn,
}

impl BetPreset {
    /// The chip denominations offered by the standard table.
    pub const STANDARD: [Self; 6] = [
        Self::Fixed(5),
        Self::Fixed(10),
        Self::Fixed(25),
        Self::Fixed(50),
        Self::Fixed(100),
        Self::AllIn,
    ];

    /// Returns the amount this preset stakes given the current balance.
    #[must_use]
    pub const fn amount(self, balance: usize) -> usize {
        match self {
            Self::Fixed(amount) => amount,
            Self::AllIn => balance,
        }
    }
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjsolo::GameOptions;
///
/// let options = GameOptions::default()
///     .with_starting_balance(1_000)
///     .with_allow_split(false);
/// assert_eq!(options.starting_balance, 1_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOptions {
    /// Balance used when the store holds none, and after a stats reset.
    pub starting_balance: usize,
    /// The dealer draws while its score is below this value.
    pub dealer_stands_on: u32,
    /// Whether double down is offered.
    pub allow_double: bool,
    /// Whether a pair may be split.
    pub allow_split: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            starting_balance: 500,
            dealer_stands_on: 17,
            allow_double: true,
            allow_split: true,
        }
    }
}

impl GameOptions {
    /// Sets the starting balance.
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: usize) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets the total the dealer stands on.
    #[must_use]
    pub const fn with_dealer_stands_on(mut self, value: u32) -> Self {
        self.dealer_stands_on = value;
        self
    }

    /// Sets whether double down is offered.
    #[must_use]
    pub const fn with_allow_double(mut self, allow: bool) -> Self {
        self.allow_double = allow;
        self
    }

    /// Sets whether pairs may be split.
    #[must_use]
    pub const fn with_allow_split(mut self, allow: bool) -> Self {
        self.allow_split = allow;
        self
    }
}
