//! # Actors
//!
//! Asynchronous collaborators that sit behind a message channel.
//!
//! - `completion`: talks to the hosted text-completion API
//! - `messages`: message types understood by the actors
//! - `traits`: the interfaces the rest of the crate depends on

pub mod completion;
pub mod messages;
pub mod traits;

pub use completion::CompletionActorHandle;
pub use traits::CompletionProvider;
