//! String-typed entry forms, the boundary between a UI and the typed draft.

pub mod checkup;
