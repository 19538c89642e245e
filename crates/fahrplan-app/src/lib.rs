// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod listing;
pub mod model;
pub mod nearest;
pub mod state;

pub use listing::*;
pub use model::*;
pub use nearest::*;
pub use state::*;
