//! One Hand solitaire: the game state machine and run aggregation.
//! Keep this crate free of IO; persistence and rendering plug in through
//! [`OutcomeSink`] and [`RunObserver`].

pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod game;
pub mod rng;
pub mod rules;
pub mod run;
pub mod sink;
pub mod stats;

pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use game::*;
pub use rng::*;
pub use rules::*;
pub use run::*;
pub use sink::*;
pub use stats::*;
