// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

//! Rendering backends selectable with `--ui`.

mod interactive;
mod plain;
mod silent;
mod summary;

pub use interactive::InteractiveUi;
pub use plain::PlainUi;
pub use silent::SilentUi;

use taskmaker_core::application::ui::UiAdapter;
use taskmaker_core::domain::options::UiKind;

pub fn create(kind: UiKind, solutions: &[String]) -> Box<dyn UiAdapter> {
    match kind {
        UiKind::Interactive => Box::new(InteractiveUi::new(solutions)),
        UiKind::Plain => Box::new(PlainUi::new(solutions)),
        UiKind::Silent => Box::new(SilentUi),
    }
}
